//! Collision shape variants and the overlap dispatch table
//!
//! Shapes are stored in the collider's local space. Positions are applied
//! on demand at query time, so the same shape can be tested at any offset
//! without being rebuilt.

use std::ops::Range;

use super::primitives::{Circle, Rect};
use crate::foundation::math::Vec2;

/// Collision shape types (stored in LOCAL SPACE)
#[derive(Debug, Clone, PartialEq)]
pub enum CollisionShape {
    /// Axis-aligned rectangle offset from the owner's position
    Rect(Rect),
    /// Circle whose centre is offset from the owner's position
    Circle(Circle),
    /// Static tile grid anchored at the owner's position
    Grid(GridShape),
}

impl CollisionShape {
    /// Short name of the variant, for diagnostics
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Rect(_) => "rect",
            Self::Circle(_) => "circle",
            Self::Grid(_) => "grid",
        }
    }

    /// Test whether `self` placed at `self_offset` overlaps `other` placed at
    /// `other_offset`.
    ///
    /// Grids are static level geometry: they may only ever be the second
    /// operand. Asking a grid to test itself against anything is a logic
    /// error in collision setup and panics.
    pub fn overlaps(&self, self_offset: Vec2, other: &CollisionShape, other_offset: Vec2) -> bool {
        match (self, other) {
            (Self::Rect(a), Self::Rect(b)) => {
                a.translated(self_offset).overlaps(&b.translated(other_offset))
            }
            (Self::Rect(rect), Self::Circle(circle)) => {
                circle.translated(other_offset).overlaps_rect(&rect.translated(self_offset))
            }
            (Self::Rect(rect), Self::Grid(grid)) => {
                grid.overlaps_rect(&rect.translated(self_offset - other_offset))
            }
            (Self::Circle(circle), Self::Rect(rect)) => {
                circle.translated(self_offset).overlaps_rect(&rect.translated(other_offset))
            }
            (Self::Circle(a), Self::Circle(b)) => {
                a.translated(self_offset).overlaps(&b.translated(other_offset))
            }
            (Self::Circle(circle), Self::Grid(grid)) => {
                grid.overlaps_circle(&circle.translated(self_offset - other_offset))
            }
            (Self::Grid(_), _) => panic!(
                "unsupported overlap check: grid vs {}, grid colliders are only ever the stationary operand",
                other.name()
            ),
        }
    }
}

/// A static grid of square tiles, each either solid or empty
///
/// Tile `(col, row)` covers `[col * tile_size, (col + 1) * tile_size)` on x
/// and likewise on y, relative to the grid's anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridShape {
    tile_size: i32,
    cols: i32,
    rows: i32,
    tiles: Vec<bool>,
}

impl GridShape {
    /// Create an all-empty grid
    pub fn new(tile_size: i32, cols: i32, rows: i32) -> Self {
        let len = cols.max(0) as usize * rows.max(0) as usize;
        Self {
            tile_size,
            cols,
            rows,
            tiles: vec![false; len],
        }
    }

    /// Build a grid from an already-parsed tile layer
    pub fn from_solidity(
        tile_size: i32,
        cols: i32,
        rows: i32,
        solid: impl Fn(i32, i32) -> bool,
    ) -> Self {
        let mut grid = Self::new(tile_size, cols, rows);
        for row in 0..rows {
            for col in 0..cols {
                grid.tiles[(col + row * cols) as usize] = solid(col, row);
            }
        }
        grid
    }

    /// Edge length of one tile in pixels
    pub const fn tile_size(&self) -> i32 {
        self.tile_size
    }

    /// Number of tile columns
    pub const fn cols(&self) -> i32 {
        self.cols
    }

    /// Number of tile rows
    pub const fn rows(&self) -> i32 {
        self.rows
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        let in_range = (0..self.cols).contains(&col) && (0..self.rows).contains(&row);
        in_range.then(|| (col + row * self.cols) as usize)
    }

    /// Mark a tile solid or empty. Out of range coordinates are ignored.
    pub fn set(&mut self, col: i32, row: i32, solid: bool) {
        match self.index(col, row) {
            Some(index) => self.tiles[index] = solid,
            None => log::warn!(
                "GridShape::set({col}, {row}, {solid}) out of bounds for {}x{} grid, ignored",
                self.cols,
                self.rows
            ),
        }
    }

    /// Solidity of a tile; anything outside the grid is empty
    pub fn is_solid(&self, col: i32, row: i32) -> bool {
        self.index(col, row).is_some_and(|index| self.tiles[index])
    }

    /// Grid extent in local space
    pub fn bounds(&self) -> Rect {
        Rect::new(
            0.0,
            0.0,
            (self.cols * self.tile_size) as f32,
            (self.rows * self.tile_size) as f32,
        )
    }

    /// Local-space rectangle covered by a tile
    pub fn tile_rect(&self, col: i32, row: i32) -> Rect {
        let size = self.tile_size as f32;
        Rect::new(col as f32 * size, row as f32 * size, size, size)
    }

    /// Range of columns and rows a local-space extent could touch
    pub fn tile_range(&self, extent: &Rect) -> (Range<i32>, Range<i32>) {
        let size = self.tile_size as f32;
        let left = ((extent.x / size).floor() as i32).clamp(0, self.cols.max(0));
        let right = ((extent.right() / size).ceil() as i32).clamp(0, self.cols.max(0));
        let bottom = ((extent.y / size).floor() as i32).clamp(0, self.rows.max(0));
        let top = ((extent.top() / size).ceil() as i32).clamp(0, self.rows.max(0));
        (left..right, bottom..top)
    }

    /// Check a rectangle, already in the grid's local space, against solid tiles
    pub fn overlaps_rect(&self, rect: &Rect) -> bool {
        if !rect.overlaps(&self.bounds()) {
            return false;
        }

        let (cols, mut rows) = self.tile_range(rect);
        rows.any(|row| {
            cols.clone()
                .any(|col| self.is_solid(col, row) && rect.overlaps(&self.tile_rect(col, row)))
        })
    }

    /// Check a circle, already in the grid's local space, against solid tiles
    pub fn overlaps_circle(&self, circle: &Circle) -> bool {
        if !circle.overlaps_rect(&self.bounds()) {
            return false;
        }

        let (cols, mut rows) = self.tile_range(&circle.bounds());
        rows.any(|row| {
            cols.clone()
                .any(|col| self.is_solid(col, row) && circle.overlaps_rect(&self.tile_rect(col, row)))
        })
    }
}
