//! Collider component
//!
//! A collider pairs one [`CollisionShape`] with the [`Mask`] other colliders
//! filter on. The shape is stored in the owning entity's local space; the
//! queries in [`crate::physics::collision_system`] place it using the
//! entity's [`Position`](super::Position) at query time.

use log::warn;

use crate::ecs::Component;
use crate::physics::collision::{Circle, CollisionShape, GridShape, Rect};
use crate::physics::Mask;

/// Component giving an entity a collision shape
#[derive(Debug, Clone, PartialEq)]
pub struct Collider {
    /// The collision shape, in local space
    pub shape: CollisionShape,
    /// Filter tag other colliders' queries match against
    pub mask: Mask,
}

impl Collider {
    /// Create a collider from an already-built shape
    pub const fn new(mask: Mask, shape: CollisionShape) -> Self {
        Self { shape, mask }
    }

    /// Rectangle collider, `(x, y)` is the minimum corner relative to the owner
    pub fn rect(mask: Mask, x: f32, y: f32, width: f32, height: f32) -> Self {
        if width <= 0.0 || height <= 0.0 {
            warn!("Collider::rect with degenerate size {width}x{height}");
        }
        Self::new(mask, CollisionShape::Rect(Rect::new(x, y, width, height)))
    }

    /// Circle collider centred at `(x, y)` relative to the owner
    pub fn circle(mask: Mask, x: f32, y: f32, radius: f32) -> Self {
        if radius <= 0.0 {
            warn!("Collider::circle with degenerate radius {radius}");
        }
        Self::new(mask, CollisionShape::Circle(Circle::new(x, y, radius)))
    }

    /// Empty tile grid collider anchored at the owner's position
    pub fn grid(mask: Mask, tile_size: i32, cols: i32, rows: i32) -> Self {
        warn_degenerate_grid(tile_size, cols, rows);
        Self::new(mask, CollisionShape::Grid(GridShape::new(tile_size, cols, rows)))
    }

    /// Tile grid collider filled from a parsed tile layer
    pub fn grid_from_solidity(
        mask: Mask,
        tile_size: i32,
        cols: i32,
        rows: i32,
        solid: impl Fn(i32, i32) -> bool,
    ) -> Self {
        warn_degenerate_grid(tile_size, cols, rows);
        Self::new(
            mask,
            CollisionShape::Grid(GridShape::from_solidity(tile_size, cols, rows, solid)),
        )
    }

    /// The rectangle, if this is a rectangle collider
    pub const fn as_rect(&self) -> Option<&Rect> {
        match &self.shape {
            CollisionShape::Rect(rect) => Some(rect),
            _ => None,
        }
    }

    /// The circle, if this is a circle collider
    pub const fn as_circle(&self) -> Option<&Circle> {
        match &self.shape {
            CollisionShape::Circle(circle) => Some(circle),
            _ => None,
        }
    }

    /// The grid, if this is a grid collider
    pub const fn as_grid(&self) -> Option<&GridShape> {
        match &self.shape {
            CollisionShape::Grid(grid) => Some(grid),
            _ => None,
        }
    }

    /// Mutable grid, if this is a grid collider
    pub fn as_grid_mut(&mut self) -> Option<&mut GridShape> {
        match &mut self.shape {
            CollisionShape::Grid(grid) => Some(grid),
            _ => None,
        }
    }

    /// The grid of a collider known to be a grid
    ///
    /// # Panics
    ///
    /// Panics if the collider holds any other shape.
    pub fn grid_shape(&self) -> &GridShape {
        match &self.shape {
            CollisionShape::Grid(grid) => grid,
            other => panic!("grid_shape() called on a {} collider", other.name()),
        }
    }

    /// Mutable grid of a collider known to be a grid
    ///
    /// # Panics
    ///
    /// Panics if the collider holds any other shape.
    pub fn grid_shape_mut(&mut self) -> &mut GridShape {
        match &mut self.shape {
            CollisionShape::Grid(grid) => grid,
            other => panic!("grid_shape_mut() called on a {} collider", other.name()),
        }
    }

    /// Mark a grid tile solid or empty; ignored on non-grid colliders
    pub fn set_tile(&mut self, col: i32, row: i32, solid: bool) {
        let name = self.shape.name();
        match self.as_grid_mut() {
            Some(grid) => grid.set(col, row, solid),
            None => warn!("Collider::set_tile({col}, {row}) on a {name} collider, ignored"),
        }
    }
}

impl Component for Collider {}

fn warn_degenerate_grid(tile_size: i32, cols: i32, rows: i32) {
    if tile_size <= 0 || cols <= 0 || rows <= 0 {
        warn!("Collider::grid with degenerate layout: tile size {tile_size}, {cols}x{rows} tiles");
    }
}
