//! Entity-Component-System implementation
//!
//! A single [`World`] owns every component. Components are grouped by kind
//! (their concrete type) and, across kinds, by [`Family`]. Entities are ids
//! with at most one attached component per kind.
//!
//! Behaviour lives in the components themselves: each kind may override
//! [`Component::update`], and [`World::update`] runs every active component
//! once per tick, kind by kind in registration order.

pub mod component;
pub mod components;
pub mod entity;
pub mod error;
pub mod family;
pub mod storage;
pub mod world;

#[cfg(test)]
mod tests;

pub use component::{AnyComponentId, Component, ComponentId, ComponentKey, Kind};
pub use entity::Entity;
pub use error::EcsError;
pub use family::{Color, Drawable, Family, RenderItem, Renderable};
pub use storage::{ComponentSlot, ComponentStorage};
pub use world::World;
