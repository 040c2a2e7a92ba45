//! Component families
//!
//! A family is a cross-kind grouping of components that share a capability.
//! Membership is decided once, when the component is added to the world, and
//! the world keeps each family's members in insertion order alongside the
//! per-kind storages.

use super::component::AnyComponentId;
use super::{Entity, World};
use crate::physics::collision::Rect;

/// Capability groupings tracked by the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// Components that produce something to draw
    Renderable,
}

impl Family {
    /// Every family
    pub const ALL: [Self; 1] = [Self::Renderable];
}

/// RGBA colour with components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red
    pub r: f32,
    /// Green
    pub g: f32,
    /// Blue
    pub b: f32,
    /// Alpha
    pub a: f32,
}

impl Color {
    /// Opaque white, the neutral tint
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    /// Create a colour from its components
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// What a renderable component asks to have drawn
#[derive(Debug, Clone, PartialEq)]
pub struct Drawable {
    /// World-space rectangle to fill
    pub bounds: Rect,
    /// Tint applied to the region
    pub tint: Color,
    /// Name of the texture region, if any
    pub region: Option<String>,
}

/// One entry of the render list produced by [`World::render_items`]
#[derive(Debug, Clone, PartialEq)]
pub struct RenderItem {
    /// Component that produced the entry
    pub component: AnyComponentId,
    /// Entity the component is attached to
    pub entity: Option<Entity>,
    /// What to draw
    pub drawable: Drawable,
}

/// Capability of components in the [`Family::Renderable`] family
pub trait Renderable {
    /// Describe what to draw this frame, given the attached entity.
    ///
    /// Returning `None` skips the component for this frame.
    fn drawable(&self, world: &World, entity: Option<Entity>) -> Option<Drawable>;
}
