//! Level boundary component

use crate::ecs::Component;
use crate::foundation::math::Vec2;
use crate::physics::collision::{GridShape, Rect};

/// Rectangular region a level occupies, in world coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundary {
    /// The covered rectangle
    pub rect: Rect,
}

impl Boundary {
    /// Boundary covering `rect`
    pub const fn new(rect: Rect) -> Self {
        Self { rect }
    }

    /// Boundary covering a tile grid anchored at `anchor`
    pub fn around_grid(grid: &GridShape, anchor: Vec2) -> Self {
        Self::new(grid.bounds().translated(anchor))
    }

    /// Minimum x
    pub const fn left(&self) -> f32 {
        self.rect.x
    }

    /// Maximum x
    pub fn right(&self) -> f32 {
        self.rect.right()
    }

    /// Minimum y
    pub const fn bottom(&self) -> f32 {
        self.rect.y
    }

    /// Maximum y
    pub fn top(&self) -> f32 {
        self.rect.top()
    }

    /// Half the width
    pub fn half_width(&self) -> f32 {
        self.rect.width / 2.0
    }

    /// Half the height
    pub fn half_height(&self) -> f32 {
        self.rect.height / 2.0
    }

    /// Centre point
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left() + self.half_width(), self.bottom() + self.half_height())
    }

    /// Whether a point lies inside
    pub fn contains(&self, point: Vec2) -> bool {
        self.rect.contains(point)
    }

    /// Clamp a point into the boundary
    pub fn clamp(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x.clamp(self.left(), self.right()),
            point.y.clamp(self.bottom(), self.top()),
        )
    }
}

impl Component for Boundary {}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_edges_and_extents() {
        let boundary = Boundary::new(Rect::new(10.0, 20.0, 100.0, 50.0));
        assert_relative_eq!(boundary.left(), 10.0);
        assert_relative_eq!(boundary.right(), 110.0);
        assert_relative_eq!(boundary.bottom(), 20.0);
        assert_relative_eq!(boundary.top(), 70.0);
        assert_relative_eq!(boundary.half_width(), 50.0);
        assert_relative_eq!(boundary.half_height(), 25.0);
        assert_relative_eq!(boundary.center(), Vec2::new(60.0, 45.0));
    }

    #[test]
    fn test_around_grid() {
        let grid = GridShape::new(16, 10, 4);
        let boundary = Boundary::around_grid(&grid, Vec2::new(-8.0, 0.0));
        assert_eq!(boundary.rect, Rect::new(-8.0, 0.0, 160.0, 64.0));
    }

    #[test]
    fn test_clamp() {
        let boundary = Boundary::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_relative_eq!(boundary.clamp(Vec2::new(-5.0, 15.0)), Vec2::new(0.0, 10.0));
        assert!(boundary.contains(Vec2::new(5.0, 5.0)));
        assert!(!boundary.contains(Vec2::new(10.0, 5.0)));
    }
}
