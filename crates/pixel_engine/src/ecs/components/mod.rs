//! ECS Components module
//!
//! Contains the built-in component kinds. Each one carries its own per-tick
//! behaviour through [`Component::update`](crate::ecs::Component::update).

pub mod behavior;
pub mod boundary;
pub mod collision;
pub mod movement;
pub mod position;
pub mod sprite;
pub mod timer;
pub mod trigger;

pub use behavior::{Behavior, BehaviorFn};
pub use boundary::Boundary;
pub use collision::Collider;
pub use movement::{Direction, Hit, Mover, MoverFactory, OnHit};
pub use position::Position;
pub use sprite::Sprite;
pub use timer::{OnTimerEnd, Timer};
pub use trigger::{OnTrigger, Trigger, TriggerHit};
