//! Overlap trigger component
//!
//! A trigger watches its entity's collider and fires a callback on every
//! tick it overlaps a collider from the configured mask set. Triggers do not
//! move anything themselves; they suit pickups, bouncers and hazards.

use std::fmt;
use std::rc::Rc;

use super::Collider;
use crate::ecs::{Component, ComponentId, Entity, World};
use crate::physics::{check_and_get, MaskSet};

/// Details passed to a trigger callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerHit {
    /// The trigger that fired
    pub trigger: ComponentId<Trigger>,
    /// The entity that owns the trigger
    pub entity: Entity,
    /// The overlapping collider
    pub collider: ComponentId<Collider>,
    /// Entity the overlapping collider is attached to
    pub other: Option<Entity>,
}

/// Trigger callback
pub type OnTrigger = Rc<dyn Fn(&mut World, &TriggerHit)>;

/// Fires a callback while its entity's collider overlaps a matching collider
#[derive(Clone)]
pub struct Trigger {
    /// Masks that fire the trigger
    pub masks: MaskSet,
    on_hit: OnTrigger,
}

impl Trigger {
    /// Trigger on overlaps with any collider in `masks`
    pub fn new(masks: impl Into<MaskSet>, on_hit: impl Fn(&mut World, &TriggerHit) + 'static) -> Self {
        Self {
            masks: masks.into(),
            on_hit: Rc::new(on_hit),
        }
    }
}

impl Component for Trigger {
    fn update(world: &mut World, id: ComponentId<Self>, _delta_time: f32) {
        let Some(entity) = world.entity_of(id) else {
            return;
        };
        let Some(collider) = world.attached_if_active::<Collider>(entity) else {
            return;
        };
        let Some((masks, on_hit)) = world
            .get_component(id)
            .map(|trigger| (trigger.masks, Rc::clone(&trigger.on_hit)))
        else {
            return;
        };

        if let Some(other_collider) = check_and_get(world, collider, masks, 0, 0) {
            let hit = TriggerHit {
                trigger: id,
                entity,
                collider: other_collider,
                other: world.entity_of(other_collider),
            };
            on_hit(world, &hit);
        }
    }
}

impl fmt::Debug for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trigger")
            .field("masks", &self.masks)
            .finish_non_exhaustive()
    }
}
