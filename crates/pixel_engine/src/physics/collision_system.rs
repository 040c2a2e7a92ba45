//! Registry-wide collision queries
//!
//! There is no broad phase: a query walks every collider in the world in
//! registration order and runs the narrow-phase test from
//! [`CollisionShape::overlaps`](super::collision::CollisionShape::overlaps)
//! against the first operand placed at its entity's position plus an
//! integer pixel offset. Movers call this once per pixel they step.

use log::warn;

use super::collision_layers::MaskSet;
use crate::ecs::components::{Collider, Position};
use crate::ecs::{ComponentId, World};
use crate::foundation::math::Vec2;

/// First active collider, other than `collider`, whose mask is in `masks`
/// and which overlaps `collider` shifted by `(x_offset, y_offset)` pixels
///
/// Colliders without an active position are placed at the origin. Returns
/// `None` (and logs) if `collider` itself is not registered.
pub fn check_and_get(
    world: &World,
    collider: ComponentId<Collider>,
    masks: impl Into<MaskSet>,
    x_offset: i32,
    y_offset: i32,
) -> Option<ComponentId<Collider>> {
    let masks = masks.into();
    let Some(storage) = world.storage::<Collider>() else {
        warn!("check_and_get: no colliders registered");
        return None;
    };
    let Some(this) = storage.get(collider) else {
        warn!("check_and_get: {collider:?} is not registered");
        return None;
    };

    let offset = Position::offset_of(world, this.entity())
        + Vec2::new(x_offset as f32, y_offset as f32);

    storage
        .iter()
        .filter(|(id, other)| {
            *id != collider && other.is_active() && masks.has(other.value().mask)
        })
        .find(|(_, other)| {
            let other_offset = Position::offset_of(world, other.entity());
            this.value()
                .shape
                .overlaps(offset, &other.value().shape, other_offset)
        })
        .map(|(id, _)| id)
}

/// Whether `collider` shifted by `(x_offset, y_offset)` pixels would overlap
/// any active collider whose mask is in `masks`
pub fn check(
    world: &World,
    collider: ComponentId<Collider>,
    masks: impl Into<MaskSet>,
    x_offset: i32,
    y_offset: i32,
) -> bool {
    check_and_get(world, collider, masks, x_offset, y_offset).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::Entity;
    use crate::physics::Mask;

    fn spawn(world: &mut World, x: f32, y: f32, collider: Collider) -> (Entity, ComponentId<Collider>) {
        let entity = world.create_entity();
        world.insert(entity, Position::new(x, y));
        let id = world.insert(entity, collider).unwrap();
        (entity, id)
    }

    #[test]
    fn test_offset_probe_finds_neighbour() {
        let mut world = World::new();
        let (_, probe) = spawn(&mut world, 0.0, 0.0, Collider::rect(Mask::Npc, 0.0, 0.0, 10.0, 10.0));
        let (_, wall) = spawn(&mut world, 10.0, 0.0, Collider::rect(Mask::Solid, 0.0, 0.0, 10.0, 10.0));

        assert!(!check(&world, probe, Mask::Solid, 0, 0));
        assert_eq!(check_and_get(&world, probe, Mask::Solid, 1, 0), Some(wall));
        assert!(!check(&world, probe, Mask::Solid, -1, 0));
    }

    #[test]
    fn test_mask_filtering() {
        let mut world = World::new();
        let (_, probe) = spawn(&mut world, 0.0, 0.0, Collider::rect(Mask::Npc, 0.0, 0.0, 10.0, 10.0));
        let (_, effect) = spawn(&mut world, 5.0, 5.0, Collider::circle(Mask::Effect, 0.0, 0.0, 3.0));

        assert!(check_and_get(&world, probe, Mask::Solid, 0, 0).is_none());
        assert_eq!(check_and_get(&world, probe, Mask::Effect, 0, 0), Some(effect));
        assert_eq!(
            check_and_get(&world, probe, [Mask::Solid, Mask::Effect], 0, 0),
            Some(effect)
        );
    }

    #[test]
    fn test_inactive_colliders_are_skipped() {
        let mut world = World::new();
        let (_, probe) = spawn(&mut world, 0.0, 0.0, Collider::rect(Mask::Npc, 0.0, 0.0, 10.0, 10.0));
        let (_, wall) = spawn(&mut world, 5.0, 0.0, Collider::rect(Mask::Solid, 0.0, 0.0, 10.0, 10.0));

        world.set_active(wall, false);
        assert!(!check(&world, probe, Mask::Solid, 0, 0));
    }

    #[test]
    fn test_first_match_in_registry_order() {
        let mut world = World::new();
        let (_, probe) = spawn(&mut world, 0.0, 0.0, Collider::rect(Mask::Npc, 0.0, 0.0, 10.0, 10.0));
        let (_, first) = spawn(&mut world, 2.0, 0.0, Collider::rect(Mask::Solid, 0.0, 0.0, 4.0, 4.0));
        spawn(&mut world, 4.0, 0.0, Collider::rect(Mask::Solid, 0.0, 0.0, 4.0, 4.0));

        assert_eq!(check_and_get(&world, probe, Mask::Solid, 0, 0), Some(first));
    }

    #[test]
    fn test_unplaced_collider_sits_at_origin() {
        let mut world = World::new();
        let loose = world.add_component(Collider::rect(Mask::Solid, -1.0, -1.0, 2.0, 2.0));
        let (_, probe) = spawn(&mut world, 0.5, 0.5, Collider::circle(Mask::Npc, 0.0, 0.0, 0.25));

        assert_eq!(check_and_get(&world, probe, Mask::Solid, 0, 0), Some(loose));
        assert!(!check(&world, probe, Mask::Solid, 2, 0));
    }

    #[test]
    fn test_degenerate_grid_does_not_panic() {
        let mut world = World::new();
        spawn(&mut world, 0.0, 0.0, Collider::grid(Mask::Solid, -16, 4, 4));
        let (_, probe) = spawn(&mut world, -10.0, -10.0, Collider::circle(Mask::Npc, 0.0, 0.0, 5.0));

        assert!(!check(&world, probe, Mask::Solid, 0, 0));
        assert!(!check(&world, probe, Mask::Solid, 3, -2));
    }

    #[test]
    fn test_grid_pruning_through_registry() {
        let mut world = World::new();
        let level = world.create_entity();
        world.insert(level, Position::new(100.0, 100.0));
        world.insert(
            level,
            Collider::grid_from_solidity(Mask::Solid, 16, 4, 4, |col, row| col == 2 && row == 0),
        );
        // Spans x in [104, 132): columns 0 and 1 of row 0, both empty
        let (_, probe) = spawn(&mut world, 104.0, 100.0, Collider::rect(Mask::Npc, 0.0, 0.0, 28.0, 8.0));

        assert!(!check(&world, probe, Mask::Solid, 0, 0));
        assert!(check(&world, probe, Mask::Solid, 1, 0));
    }

    #[test]
    fn test_unknown_collider_finds_nothing() {
        let mut world = World::new();
        let (_, probe) = spawn(&mut world, 0.0, 0.0, Collider::rect(Mask::Npc, 0.0, 0.0, 1.0, 1.0));
        spawn(&mut world, 0.0, 0.0, Collider::rect(Mask::Solid, 0.0, 0.0, 1.0, 1.0));
        world.destroy_component(probe);

        assert!(check_and_get(&world, probe, Mask::Solid, 0, 0).is_none());
    }
}
