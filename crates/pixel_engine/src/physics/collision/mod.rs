//! Collision shapes and narrow-phase overlap tests
//!
//! # Architecture
//!
//! - **Local Space Storage**: shapes are stored relative to their owner
//! - **On-Demand Translation**: owner positions and query offsets are applied
//!   only while a test runs
//! - **Closed Variant Set**: [`CollisionShape`] is a sum type, so the overlap
//!   table is an exhaustive `match`
//!
//! # Module Organization
//!
//! - [`primitives`] - Rectangles and circles with their overlap predicates
//! - [`shape`] - The shape enum, tile grids, and the overlap dispatch table

pub mod primitives;
pub mod shape;

// Re-export commonly used types
pub use primitives::{Circle, Rect};
pub use shape::{CollisionShape, GridShape};
