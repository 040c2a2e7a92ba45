//! # Pixel Engine
//!
//! A small Entity-Component-System with a pixel-stepped 2D collision and
//! movement layer, for tile-based platformers and top-down games.
//!
//! ## Features
//!
//! - **Single Registry**: one [`World`](ecs::World) owns every component,
//!   indexed by kind and by family
//! - **Pixel-Stepped Movement**: [`Mover`](ecs::components::Mover) moves one
//!   pixel at a time with a sub-pixel remainder, so nothing tunnels
//! - **Closed Shape Set**: rectangles, circles and static tile grids with an
//!   exhaustive overlap table
//! - **Mask Filtering**: queries select colliders by [`MaskSet`](physics::MaskSet)
//! - **File Configuration**: TOML or RON settings through [`config::Config`]
//!
//! ## Quick Start
//!
//! ```rust
//! use pixel_engine::prelude::*;
//!
//! let mut world = World::new();
//!
//! let floor = world.create_entity();
//! world.insert(floor, Position::new(0.0, 0.0));
//! world.insert(floor, Collider::rect(Mask::Solid, 0.0, 0.0, 320.0, 16.0));
//!
//! let hero = world.create_entity();
//! world.insert(hero, Position::new(32.0, 40.0));
//! world.insert(hero, Collider::rect(Mask::Npc, 0.0, 0.0, 8.0, 8.0));
//! world.insert(hero, MoverFactory::platformer(-500.0, 400.0));
//!
//! for _ in 0..120 {
//!     world.update(1.0 / 60.0);
//! }
//!
//! // The hero has landed on the floor
//! assert_eq!(world.get::<Position>(hero).map(Position::y), Some(16.0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod ecs;
pub mod foundation;
pub mod physics;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, MoverConfig, SimulationConfig},
        ecs::{
            components::{
                Behavior, Boundary, Collider, Direction, Hit, Mover, MoverFactory, Position,
                Sprite, Timer, Trigger, TriggerHit,
            },
            AnyComponentId, Color, Component, ComponentId, EcsError, Entity, Family, RenderItem,
            World,
        },
        foundation::{
            math::{approach, Vec2},
            time::FixedTimestep,
        },
        physics::{check, check_and_get, Circle, CollisionShape, GridShape, Mask, MaskSet, Rect},
    };
}
