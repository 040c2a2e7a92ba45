//! Pixel-stepped movement
//!
//! A [`Mover`] integrates velocity, gravity and friction every tick, then
//! moves its entity a whole number of pixels at a time. The fractional part
//! of each tick's displacement is carried in a sub-pixel remainder so slow
//! speeds still add up to motion over several ticks.
//!
//! Movement along X is resolved fully before Y. Before every one-pixel step
//! the entity's collider is probed at that offset; the first hit ends the
//! axis for this tick and either runs the axis callback or stops the axis.

use std::fmt;
use std::rc::Rc;

use super::{Collider, Position};
use crate::config::MoverConfig;
use crate::ecs::{Component, ComponentId, Entity, World};
use crate::foundation::math::{approach, sign, split_whole, Vec2};
use crate::physics::{check, check_and_get, Mask, MaskSet};

/// Direction of the step that produced a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Negative X
    Left,
    /// Positive X
    Right,
    /// Negative Y
    Up,
    /// Positive Y
    Down,
}

/// Details passed to a hit callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    /// The mover that was stepping
    pub mover: ComponentId<Mover>,
    /// The entity that owns the mover
    pub entity: Entity,
    /// The collider that blocked the step
    pub collider: ComponentId<Collider>,
    /// Direction of the blocked step
    pub direction: Direction,
}

/// Hit callback; receives the world so it can edit any component
pub type OnHit = Rc<dyn Fn(&mut World, &Hit)>;

#[derive(Debug, Clone, Copy)]
enum Axis {
    X,
    Y,
}

impl Axis {
    const fn probe(self, step: i32) -> (i32, i32) {
        match self {
            Self::X => (step, 0),
            Self::Y => (0, step),
        }
    }

    const fn direction(self, step: i32) -> Direction {
        match (self, step < 0) {
            (Self::X, true) => Direction::Left,
            (Self::X, false) => Direction::Right,
            (Self::Y, true) => Direction::Up,
            (Self::Y, false) => Direction::Down,
        }
    }

    fn shift(self, position: &mut Position, step: i32) {
        match self {
            Self::X => position.value.x += step as f32,
            Self::Y => position.value.y += step as f32,
        }
    }
}

/// Component moving its entity through the world pixel by pixel
#[derive(Clone)]
pub struct Mover {
    /// Velocity in pixels per second
    pub speed: Vec2,
    /// Added to `speed.y` every second while airborne
    pub gravity: f32,
    /// Deceleration of `speed.x` towards zero while grounded
    pub friction: f32,
    remainder: Vec2,
    collides_with: MaskSet,
    on_hit_x: Option<OnHit>,
    on_hit_y: Option<OnHit>,
}

impl Mover {
    /// Create a stationary mover colliding with solids
    pub fn new() -> Self {
        Self {
            speed: Vec2::zeros(),
            gravity: 0.0,
            friction: 0.0,
            remainder: Vec2::zeros(),
            collides_with: MaskSet::SOLID,
            on_hit_x: None,
            on_hit_y: None,
        }
    }

    /// Create a mover from a configuration section
    pub fn from_config(config: &MoverConfig) -> Self {
        Self {
            gravity: config.gravity,
            friction: config.friction,
            collides_with: config.collides_with.iter().copied().collect(),
            ..Self::new()
        }
    }

    /// Set the initial velocity
    #[must_use]
    pub fn with_speed(mut self, x: f32, y: f32) -> Self {
        self.speed = Vec2::new(x, y);
        self
    }

    /// Set gravity
    #[must_use]
    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set friction
    #[must_use]
    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    /// Replace the mask set the collider is tested against
    #[must_use]
    pub fn with_collides_with(mut self, masks: impl Into<MaskSet>) -> Self {
        self.collides_with = masks.into();
        self
    }

    /// Sub-pixel displacement carried to the next tick, each axis in (-1, 1)
    pub const fn remainder(&self) -> Vec2 {
        self.remainder
    }

    /// Masks the collider is tested against
    pub const fn collides_with(&self) -> MaskSet {
        self.collides_with
    }

    /// Replace the mask set the collider is tested against
    pub fn set_collides_with(&mut self, masks: impl Into<MaskSet>) {
        self.collides_with = masks.into();
    }

    /// Also collide with `mask`
    pub fn add_collides_with(&mut self, mask: Mask) {
        self.collides_with.insert(MaskSet::from(mask));
    }

    /// Stop colliding with `mask`
    pub fn remove_collides_with(&mut self, mask: Mask) {
        self.collides_with.remove(MaskSet::from(mask));
    }

    /// Use the same callback for hits on both axes
    pub fn set_on_hit(&mut self, on_hit: impl Fn(&mut World, &Hit) + 'static) {
        let on_hit: OnHit = Rc::new(on_hit);
        self.on_hit_x = Some(Rc::clone(&on_hit));
        self.on_hit_y = Some(on_hit);
    }

    /// Callback for hits while stepping along X
    pub fn set_on_hit_x(&mut self, on_hit: impl Fn(&mut World, &Hit) + 'static) {
        self.on_hit_x = Some(Rc::new(on_hit));
    }

    /// Callback for hits while stepping along Y
    pub fn set_on_hit_y(&mut self, on_hit: impl Fn(&mut World, &Hit) + 'static) {
        self.on_hit_y = Some(Rc::new(on_hit));
    }

    /// Remove both hit callbacks, so hits stop the axis
    pub fn clear_on_hit(&mut self) {
        self.on_hit_x = None;
        self.on_hit_y = None;
    }

    /// Zero horizontal speed and remainder
    pub fn stop_x(&mut self) {
        self.speed.x = 0.0;
        self.remainder.x = 0.0;
    }

    /// Zero vertical speed and remainder
    pub fn stop_y(&mut self) {
        self.speed.y = 0.0;
        self.remainder.y = 0.0;
    }

    /// Reverse horizontal speed and drop the remainder
    pub fn invert_x(&mut self) {
        self.speed.x = -self.speed.x;
        self.remainder.x = 0.0;
    }

    /// Reverse vertical speed and drop the remainder
    pub fn invert_y(&mut self) {
        self.speed.y = -self.speed.y;
        self.remainder.y = 0.0;
    }

    fn on_hit(&self, axis: Axis) -> Option<OnHit> {
        match axis {
            Axis::X => self.on_hit_x.clone(),
            Axis::Y => self.on_hit_y.clone(),
        }
    }

    fn stop(&mut self, axis: Axis) {
        match axis {
            Axis::X => self.stop_x(),
            Axis::Y => self.stop_y(),
        }
    }

    /// Whether the mover stands on something solid: its entity has an
    /// active collider, it collides with solids, and one pixel below
    /// (towards negative Y) is blocked
    pub fn on_ground(world: &World, id: ComponentId<Self>) -> bool {
        let Some(mover) = world.get_component(id) else {
            return false;
        };
        if !mover.collides_with.has(Mask::Solid) {
            return false;
        }
        world
            .entity_of(id)
            .and_then(|entity| world.attached_if_active::<Collider>(entity))
            .is_some_and(|collider| check(world, collider, Mask::Solid, 0, -1))
    }

    /// Step `amount` pixels along X; returns true if a collider was hit
    pub fn move_x(world: &mut World, id: ComponentId<Self>, amount: i32) -> bool {
        Self::move_axis(world, id, amount, Axis::X)
    }

    /// Step `amount` pixels along Y; returns true if a collider was hit
    pub fn move_y(world: &mut World, id: ComponentId<Self>, amount: i32) -> bool {
        Self::move_axis(world, id, amount, Axis::Y)
    }

    fn move_axis(world: &mut World, id: ComponentId<Self>, amount: i32, axis: Axis) -> bool {
        if amount == 0 {
            return false;
        }
        let Some(entity) = world.entity_of(id) else {
            return false;
        };
        let Some(masks) = world.get_component(id).map(|mover| mover.collides_with) else {
            return false;
        };

        let Some(collider) = world.attached_if_active::<Collider>(entity) else {
            if let Some(position) = world.get_if_active_mut::<Position>(entity) {
                axis.shift(position, amount);
            }
            return false;
        };

        let step = sign(amount);
        let (x_probe, y_probe) = axis.probe(step);
        for _ in 0..amount.abs() {
            if let Some(blocker) = check_and_get(world, collider, masks, x_probe, y_probe) {
                let on_hit = world.get_component(id).and_then(|mover| mover.on_hit(axis));
                match on_hit {
                    Some(on_hit) => {
                        let hit = Hit {
                            mover: id,
                            entity,
                            collider: blocker,
                            direction: axis.direction(step),
                        };
                        on_hit(world, &hit);
                    }
                    None => {
                        if let Some(mover) = world.get_component_mut(id) {
                            mover.stop(axis);
                        }
                    }
                }
                return true;
            }

            match world.get_if_active_mut::<Position>(entity) {
                Some(position) => axis.shift(position, step),
                None => return false,
            }
        }
        false
    }
}

impl Component for Mover {
    fn update(world: &mut World, id: ComponentId<Self>, delta_time: f32) {
        let Some(entity) = world.entity_of(id) else {
            return;
        };
        if world.get_if_active::<Position>(entity).is_none() {
            return;
        }

        let grounded = Self::on_ground(world, id);
        let Some(mover) = world.get_component_mut(id) else {
            return;
        };

        if mover.friction > 0.0 && grounded {
            mover.speed.x = approach(mover.speed.x, 0.0, mover.friction * delta_time);
        }
        if mover.gravity != 0.0 && !grounded {
            mover.speed.y += mover.gravity * delta_time;
        }

        let total = mover.remainder + mover.speed * delta_time;
        let (x_amount, x_remainder) = split_whole(total.x);
        let (y_amount, y_remainder) = split_whole(total.y);
        mover.remainder = Vec2::new(x_remainder, y_remainder);

        Self::move_x(world, id, x_amount);
        Self::move_y(world, id, y_amount);
    }
}

impl Default for Mover {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Mover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mover")
            .field("speed", &self.speed)
            .field("gravity", &self.gravity)
            .field("friction", &self.friction)
            .field("remainder", &self.remainder)
            .field("collides_with", &self.collides_with)
            .field("on_hit_x", &self.on_hit_x.is_some())
            .field("on_hit_y", &self.on_hit_y.is_some())
            .finish()
    }
}

/// Factory for movers with common setups
pub struct MoverFactory;

impl MoverFactory {
    /// A platformer body: falls under `gravity`, slows by `friction` on the
    /// ground, blocked by solids
    pub fn platformer(gravity: f32, friction: f32) -> Mover {
        Mover::new().with_gravity(gravity).with_friction(friction)
    }

    /// A body that bounces off solids by reversing the blocked axis
    pub fn bouncing(x_speed: f32, y_speed: f32) -> Mover {
        let mut mover = Mover::new().with_speed(x_speed, y_speed);
        mover.set_on_hit(|world, hit| {
            if let Some(mover) = world.get_component_mut(hit.mover) {
                match hit.direction {
                    Direction::Left | Direction::Right => mover.invert_x(),
                    Direction::Up | Direction::Down => mover.invert_y(),
                }
            }
        });
        mover
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_stop_and_invert_clear_remainder() {
        let mut mover = Mover::new().with_speed(3.0, -4.0);
        mover.remainder = Vec2::new(0.5, -0.25);

        mover.invert_x();
        assert_relative_eq!(mover.speed.x, -3.0);
        assert_relative_eq!(mover.remainder.x, 0.0);
        assert_relative_eq!(mover.remainder.y, -0.25);

        mover.stop_y();
        assert_relative_eq!(mover.speed.y, 0.0);
        assert_relative_eq!(mover.remainder.y, 0.0);
    }

    #[test]
    fn test_collides_with_editing() {
        let mut mover = Mover::new();
        assert_eq!(mover.collides_with(), MaskSet::SOLID);

        mover.add_collides_with(Mask::Npc);
        assert!(mover.collides_with().has(Mask::Npc));

        mover.remove_collides_with(Mask::Solid);
        assert_eq!(mover.collides_with(), MaskSet::NPC);
    }

    #[test]
    fn test_from_config() {
        let config = MoverConfig {
            gravity: -500.0,
            friction: 120.0,
            collides_with: vec![Mask::Solid, Mask::Object],
        };
        let mover = Mover::from_config(&config);

        assert_relative_eq!(mover.gravity, -500.0);
        assert_relative_eq!(mover.friction, 120.0);
        assert_eq!(mover.collides_with(), MaskSet::SOLID | MaskSet::OBJECT);
    }

    #[test]
    fn test_direction_mapping() {
        assert_eq!(Axis::X.direction(-1), Direction::Left);
        assert_eq!(Axis::X.direction(1), Direction::Right);
        assert_eq!(Axis::Y.direction(-1), Direction::Up);
        assert_eq!(Axis::Y.direction(1), Direction::Down);
    }

    #[test]
    fn test_move_without_collider_is_unobstructed() {
        let mut world = World::new();
        let entity = world.create_entity();
        world.insert(entity, Position::new(0.0, 0.0));
        let mover = world.insert(entity, Mover::new()).unwrap();

        assert!(!Mover::move_x(&mut world, mover, 7));
        assert!(!Mover::move_y(&mut world, mover, -3));
        assert_eq!(world.get::<Position>(entity), Some(&Position::new(7.0, -3.0)));
    }

    #[test]
    fn test_move_without_position_does_nothing() {
        let mut world = World::new();
        let entity = world.create_entity();
        let mover = world.insert(entity, Mover::new().with_speed(50.0, 0.0)).unwrap();

        world.update(1.0);

        assert!(world.get::<Position>(entity).is_none());
        assert_relative_eq!(world.get_component(mover).unwrap().remainder().x, 0.0);
    }
}
