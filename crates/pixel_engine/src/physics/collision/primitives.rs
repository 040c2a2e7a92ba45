//! Primitive collision shapes and intersection algorithms
//!
//! Provides the axis-aligned rectangle and circle primitives with their
//! overlap predicates. All overlap tests are strict: shapes that only touch
//! along an edge do not overlap, which is what lets a mover rest flush
//! against a wall and still step along it.

use crate::foundation::math::Vec2;

/// An axis-aligned rectangle, `(x, y)` is the minimum corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Minimum x coordinate
    pub x: f32,
    /// Minimum y coordinate
    pub y: f32,
    /// Extent along x
    pub width: f32,
    /// Extent along y
    pub height: f32,
}

impl Rect {
    /// Creates a new rectangle
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Maximum x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Maximum y coordinate
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// This rectangle moved by `offset`
    pub fn translated(&self, offset: Vec2) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.width, self.height)
    }

    /// Check if this rectangle overlaps another
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.top()
            && self.top() > other.y
    }

    /// Check if this rectangle contains a point (inclusive of the min edges)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.top()
    }
}

/// A circle given by its centre and radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    /// Centre x coordinate
    pub x: f32,
    /// Centre y coordinate
    pub y: f32,
    /// The radius of the circle
    pub radius: f32,
}

impl Circle {
    /// Creates a new circle
    pub const fn new(x: f32, y: f32, radius: f32) -> Self {
        Self { x, y, radius }
    }

    /// This circle moved by `offset`
    pub fn translated(&self, offset: Vec2) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.radius)
    }

    /// The smallest axis-aligned rectangle containing this circle
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.x - self.radius,
            self.y - self.radius,
            self.radius * 2.0,
            self.radius * 2.0,
        )
    }

    /// Check if this circle overlaps another
    pub fn overlaps(&self, other: &Circle) -> bool {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let radius_sum = self.radius + other.radius;
        dx * dx + dy * dy < radius_sum * radius_sum
    }

    /// Check if this circle overlaps a rectangle
    ///
    /// Clamps the centre onto the rectangle to find the closest point, then
    /// compares that distance against the radius. A rectangle with a negative
    /// extent spans from its far edge back to its anchor.
    pub fn overlaps_rect(&self, rect: &Rect) -> bool {
        let closest_x = self.x.max(rect.x.min(rect.right())).min(rect.x.max(rect.right()));
        let closest_y = self.y.max(rect.y.min(rect.top())).min(rect.y.max(rect.top()));
        let dx = closest_x - self.x;
        let dy = closest_y - self.y;
        dx * dx + dy * dy < self.radius * self.radius
    }
}
