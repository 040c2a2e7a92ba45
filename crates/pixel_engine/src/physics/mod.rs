//! Physics module for collision detection
//!
//! Provides the 2D collision shapes, the mask filter used by queries, and the
//! registry-wide overlap queries movers and triggers build on.

pub mod collision;
pub mod collision_layers;
pub mod collision_system;

pub use collision::{Circle, CollisionShape, GridShape, Rect};
pub use collision_layers::{Mask, MaskSet};
pub use collision_system::{check, check_and_get};
