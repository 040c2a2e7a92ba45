//! Cross-module ECS scenarios
//!
//! Unit tests live next to each component; these exercise the world,
//! entities and the movement/collision layer together.

mod world_lifecycle;
