//! Sprite component, the renderable family member
//!
//! A sprite describes a tinted texture region drawn at its entity's
//! position. Its scale can be kicked away from the default (a squash on
//! landing, say) and eases back over the following ticks.

use super::Position;
use crate::ecs::{Color, Component, ComponentId, Drawable, Entity, Renderable, World};
use crate::foundation::math::{approach, Vec2};
use crate::physics::collision::Rect;

/// Drawable texture region attached to an entity
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    /// Texture region name, resolved by the renderer
    pub region: Option<String>,
    /// Tint multiplied into the region
    pub tint: Color,
    /// Unscaled size in pixels
    pub size: Vec2,
    /// Pivot in pixels from the minimum corner; scaling happens around it
    pub origin: Vec2,
    /// Current scale
    pub scale: Vec2,
    /// Scale the sprite eases back towards
    pub default_scale: Vec2,
    /// Scale units recovered per second; zero disables easing
    pub scale_return_speed: f32,
}

impl Sprite {
    /// A white sprite of the given size, pivoting on its minimum corner
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            region: None,
            tint: Color::WHITE,
            size: Vec2::new(width, height),
            origin: Vec2::zeros(),
            scale: Vec2::new(1.0, 1.0),
            default_scale: Vec2::new(1.0, 1.0),
            scale_return_speed: 0.0,
        }
    }

    /// Set the texture region
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set the tint
    #[must_use]
    pub fn with_tint(mut self, tint: Color) -> Self {
        self.tint = tint;
        self
    }

    /// Pivot around the centre of the sprite
    #[must_use]
    pub fn centered(mut self) -> Self {
        self.origin = self.size / 2.0;
        self
    }

    /// Ease the scale back to default at `speed` units per second
    #[must_use]
    pub fn with_scale_return(mut self, speed: f32) -> Self {
        self.scale_return_speed = speed;
        self
    }

    /// World-space rectangle covered when drawn at `position`
    pub fn bounds_at(&self, position: Vec2) -> Rect {
        Rect::new(
            position.x - self.origin.x * self.scale.x,
            position.y - self.origin.y * self.scale.y,
            self.size.x * self.scale.x,
            self.size.y * self.scale.y,
        )
    }

    /// World-space rectangle covered by the sprite with id `id`, placed at
    /// its entity's active position or the origin
    pub fn bounds(world: &World, id: ComponentId<Self>) -> Option<Rect> {
        let sprite = world.get_component(id)?;
        Some(sprite.bounds_at(Position::offset_of(world, world.entity_of(id))))
    }
}

impl Renderable for Sprite {
    fn drawable(&self, world: &World, entity: Option<Entity>) -> Option<Drawable> {
        Some(Drawable {
            bounds: self.bounds_at(Position::offset_of(world, entity)),
            tint: self.tint,
            region: self.region.clone(),
        })
    }
}

impl Component for Sprite {
    fn update(world: &mut World, id: ComponentId<Self>, delta_time: f32) {
        let Some(sprite) = world.get_component_mut(id) else {
            return;
        };
        if sprite.scale_return_speed <= 0.0 {
            return;
        }

        let step = sprite.scale_return_speed * delta_time;
        sprite.scale.x = approach(sprite.scale.x, sprite.default_scale.x, step);
        sprite.scale.y = approach(sprite.scale.y, sprite.default_scale.y, step);
    }

    fn as_renderable(&self) -> Option<&dyn Renderable> {
        Some(self)
    }
}
