//! Closure component for scene-specific per-tick logic

use std::fmt;
use std::rc::Rc;

use crate::ecs::{Component, ComponentId, Entity, World};

/// Per-tick logic for one entity
pub type BehaviorFn = Rc<dyn Fn(&mut World, Entity, f32)>;

/// Runs a closure for its entity every tick
///
/// Useful for small bits of game logic, such as picking an animation from a
/// mover's speed, that do not warrant a component kind of their own. An
/// unattached behavior does nothing.
#[derive(Clone)]
pub struct Behavior {
    run: BehaviorFn,
}

impl Behavior {
    /// Wrap a closure receiving the world, the owning entity and the tick
    /// length
    pub fn new(run: impl Fn(&mut World, Entity, f32) + 'static) -> Self {
        Self { run: Rc::new(run) }
    }
}

impl Component for Behavior {
    fn update(world: &mut World, id: ComponentId<Self>, delta_time: f32) {
        let Some(entity) = world.entity_of(id) else {
            return;
        };
        if let Some(run) = world.get_component(id).map(|behavior| Rc::clone(&behavior.run)) {
            run(world, entity, delta_time);
        }
    }
}

impl fmt::Debug for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Behavior").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::Position;

    #[test]
    fn test_runs_for_owner_each_tick() {
        let mut world = World::new();
        let entity = world.create_entity();
        world.insert(entity, Position::default());
        world.insert(
            entity,
            Behavior::new(|world, entity, delta_time| {
                if let Some(position) = world.get_mut::<Position>(entity) {
                    position.move_by(delta_time, 0.0);
                }
            }),
        );

        world.update(0.5);
        world.update(0.5);

        assert_eq!(world.get::<Position>(entity), Some(&Position::new(1.0, 0.0)));
    }

    #[test]
    fn test_unattached_behavior_is_idle() {
        let mut world = World::new();
        world.add_component(Behavior::new(|_, _, _| panic!("must not run")));
        world.update(0.1);
    }
}
