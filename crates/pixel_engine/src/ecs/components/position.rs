//! World-space position of an entity
//!
//! Shapes, sprites and boundaries are all stored relative to the owning
//! entity's position, which is applied when they are queried.

use crate::ecs::{Component, Entity, World};
use crate::foundation::math::Vec2;

/// Component holding an entity's 2D position
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    /// Position in world units (pixels)
    pub value: Vec2,
}

impl Position {
    /// Create a position from its coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            value: Vec2::new(x, y),
        }
    }

    /// X coordinate
    pub fn x(&self) -> f32 {
        self.value.x
    }

    /// Y coordinate
    pub fn y(&self) -> f32 {
        self.value.y
    }

    /// Move to an absolute position
    pub fn set(&mut self, x: f32, y: f32) {
        self.value = Vec2::new(x, y);
    }

    /// Move by a relative amount
    pub fn move_by(&mut self, dx: f32, dy: f32) {
        self.value += Vec2::new(dx, dy);
    }

    /// Offset to apply to shapes owned by `entity`: its active position, or
    /// the origin when it has none
    pub fn offset_of(world: &World, entity: Option<Entity>) -> Vec2 {
        entity
            .and_then(|entity| world.get_if_active::<Self>(entity))
            .map_or_else(Vec2::zeros, |position| position.value)
    }
}

impl Component for Position {}
