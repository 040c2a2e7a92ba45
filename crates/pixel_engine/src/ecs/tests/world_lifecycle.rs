//! Registry and entity lifecycle tests
//!
//! Attach/replace/detach semantics, destroy completeness, and mutation of
//! the world from inside component updates.

use std::cell::RefCell;
use std::rc::Rc;

use crate::ecs::components::{Behavior, Collider, Mover, Position, Sprite, Timer};
use crate::ecs::{Component, ComponentId, EcsError, Family, World};
use crate::physics::Mask;

#[test]
fn test_attach_refuses_second_component_of_kind() {
    let mut world = World::new();
    let entity = world.create_entity();
    let first = world.insert(entity, Position::new(1.0, 1.0)).unwrap();
    let second = world.add_component(Position::new(2.0, 2.0));

    assert_eq!(
        world.try_attach(entity, second),
        Err(EcsError::KindAlreadyAttached {
            entity,
            kind: "Position"
        })
    );
    assert_eq!(world.attached::<Position>(entity), Some(first));
    assert_eq!(world.entity_of(second), None);
}

#[test]
fn test_attach_refuses_component_owned_elsewhere() {
    let mut world = World::new();
    let owner = world.create_entity();
    let thief = world.create_entity();
    let position = world.insert(owner, Position::default()).unwrap();

    assert_eq!(
        world.try_attach(thief, position),
        Err(EcsError::AttachedElsewhere {
            entity: thief,
            owner,
            kind: "Position"
        })
    );
    assert!(world.attached::<Position>(thief).is_none());
    assert_eq!(world.entity_of(position), Some(owner));
}

#[test]
fn test_reattach_to_same_entity_is_noop() {
    let mut world = World::new();
    let entity = world.create_entity();
    let position = world.insert(entity, Position::default()).unwrap();

    assert!(world.attach(entity, position));
    assert_eq!(world.attached_components(entity), vec![position.erased()]);
}

#[test]
fn test_replace_destroys_previous() {
    let mut world = World::new();
    let entity = world.create_entity();
    let old = world.insert(entity, Position::new(1.0, 0.0)).unwrap();
    let new = world.add_component(Position::new(2.0, 0.0));

    assert!(world.replace(entity, new));

    assert!(!world.contains_component(old));
    assert_eq!(world.get::<Position>(entity), Some(&Position::new(2.0, 0.0)));
    assert_eq!(world.component_count::<Position>(), 1);
}

#[test]
fn test_replace_on_empty_entity_attaches() {
    let mut world = World::new();
    let entity = world.create_entity();
    let position = world.add_component(Position::default());

    assert!(world.replace(entity, position));
    assert_eq!(world.attached::<Position>(entity), Some(position));
}

#[test]
fn test_refused_replace_keeps_current() {
    let mut world = World::new();
    let a = world.create_entity();
    let b = world.create_entity();
    let pa = world.insert(a, Position::new(1.0, 0.0)).unwrap();
    let pb = world.insert(b, Position::new(2.0, 0.0)).unwrap();

    assert!(!world.replace(a, pb));
    assert_eq!(
        world.try_replace(a, pb),
        Err(EcsError::AttachedElsewhere {
            entity: a,
            owner: b,
            kind: "Position"
        })
    );
    assert!(world.contains_component(pa));
    assert_eq!(world.attached::<Position>(a), Some(pa));
    assert_eq!(world.attached::<Position>(b), Some(pb));

    // A stale handle is refused the same way
    let stale = world.add_component(Position::default());
    world.destroy_component(stale);
    assert_eq!(
        world.try_replace(a, stale),
        Err(EcsError::UnknownComponent { kind: "Position" })
    );
    assert_eq!(world.get::<Position>(a), Some(&Position::new(1.0, 0.0)));
}

#[test]
fn test_detach_keeps_component_registered() {
    let mut world = World::new();
    let entity = world.create_entity();
    let position = world.insert(entity, Position::new(3.0, 3.0)).unwrap();

    assert_eq!(world.detach::<Position>(entity), Some(position));

    assert!(world.contains_component(position));
    assert_eq!(world.entity_of(position), None);
    assert!(world.get::<Position>(entity).is_none());

    // Detached components can be attached elsewhere
    let other = world.create_entity();
    assert!(world.attach(other, position));
}

#[test]
fn test_missing_lookups_are_safe() {
    let mut world = World::new();
    let entity = world.create_entity();

    assert!(world.detach::<Position>(entity).is_none());
    assert!(!world.destroy_attached::<Position>(entity));
    assert_eq!(
        world.try_detach::<Position>(entity),
        Err(EcsError::NothingAttached {
            entity,
            kind: "Position"
        })
    );

    world.destroy_entity(entity);
    assert!(!world.destroy_entity(entity));
    assert!(world.insert(entity, Position::default()).is_none());
    assert_eq!(world.component_count::<Position>(), 0);
}

#[test]
fn test_get_if_active() {
    let mut world = World::new();
    let entity = world.create_entity();
    let position = world.insert(entity, Position::default()).unwrap();

    world.set_active(position, false);
    assert!(world.get::<Position>(entity).is_some());
    assert!(world.get_if_active::<Position>(entity).is_none());
    assert!(world.get_if_active_mut::<Position>(entity).is_none());
}

#[test]
fn test_destroy_entity_is_complete() {
    let mut world = World::new();
    let entity = world.create_entity();
    let position = world.insert(entity, Position::default()).unwrap();
    let sprite = world.insert(entity, Sprite::new(4.0, 4.0)).unwrap();
    let collider = world
        .insert(entity, Collider::rect(Mask::Npc, 0.0, 0.0, 4.0, 4.0))
        .unwrap();

    let survivor = world.create_entity();
    let kept = world.insert(survivor, Sprite::new(1.0, 1.0)).unwrap();

    world.destroy_entity(entity);

    assert!(!world.contains_entity(entity));
    assert!(!world.contains_component(position));
    assert!(!world.contains_component(sprite));
    assert!(!world.contains_component(collider));
    assert_eq!(world.entity_of(position), None);
    assert_eq!(world.family(Family::Renderable), &[kept.erased()]);
    assert_eq!(world.components::<Collider>().count(), 0);
    assert!(world.contains_component(kept));
}

#[test]
fn test_clear_entity_keeps_entity() {
    let mut world = World::new();
    let entity = world.create_entity();
    world.insert(entity, Position::default());
    world.insert(entity, Mover::new());

    assert!(world.clear_entity(entity));

    assert!(world.contains_entity(entity));
    assert!(world.attached_components(entity).is_empty());
    assert_eq!(world.component_count::<Position>(), 0);
    assert_eq!(world.component_count::<Mover>(), 0);
}

#[test]
fn test_entity_activity_flag() {
    let mut world = World::new();
    let entity = world.create_entity();
    assert!(world.is_entity_active(entity));

    world.set_entity_active(entity, false);
    assert!(!world.is_entity_active(entity));

    world.destroy_entity(entity);
    assert!(!world.is_entity_active(entity));
    assert!(!world.set_entity_active(entity, true));
}

/// Appends its tag to a shared log when updated
struct Tracer {
    tag: &'static str,
    log: Rc<RefCell<Vec<&'static str>>>,
}

impl Component for Tracer {
    fn update(world: &mut World, id: ComponentId<Self>, _delta_time: f32) {
        if let Some(tracer) = world.get_component(id) {
            tracer.log.borrow_mut().push(tracer.tag);
        }
    }
}

#[test]
fn test_update_order_follows_registration() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut world = World::new();

    world.add_component(Tracer { tag: "a", log: Rc::clone(&log) });
    let log_b = Rc::clone(&log);
    world.add_component(Timer::started(0.01).with_on_end(move |_, _| log_b.borrow_mut().push("timer")));
    world.add_component(Tracer { tag: "b", log: Rc::clone(&log) });

    world.update(0.02);

    // Every Tracer runs before the Timer kind, which registered second
    assert_eq!(*log.borrow(), vec!["a", "b", "timer"]);
}

#[test]
fn test_components_destroyed_mid_tick_are_skipped() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut world = World::new();

    let first = world.create_entity();
    let victim = world.create_entity();
    world.insert(
        first,
        Behavior::new(move |world, _, _| {
            world.destroy_entity(victim);
        }),
    );
    world.insert(victim, Tracer { tag: "victim", log: Rc::clone(&log) });
    world.insert(victim, Behavior::new(|_, _, _| panic!("destroyed behavior ran")));

    world.update(0.1);

    assert!(log.borrow().is_empty());
    assert!(!world.contains_entity(victim));
}

#[test]
fn test_components_added_mid_tick_wait_for_next_tick() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let spawned = Rc::new(RefCell::new(false));
    let mut world = World::new();

    let spawner = world.create_entity();
    let log_for_spawn = Rc::clone(&log);
    world.insert(
        spawner,
        Behavior::new(move |world, _, _| {
            if !spawned.replace(true) {
                world.add_component(Tracer { tag: "late", log: Rc::clone(&log_for_spawn) });
                world.add_component(Behavior::new(|_, _, _| {}));
            }
        }),
    );

    world.update(0.1);
    assert!(log.borrow().is_empty());

    world.update(0.1);
    assert_eq!(*log.borrow(), vec!["late"]);
}

#[test]
fn test_deactivated_mid_tick_is_skipped() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut world = World::new();

    let switch = world.create_entity();
    let target = world.create_entity();
    world.insert(
        switch,
        Behavior::new(move |world, _, _| {
            if let Some(tracer) = world.attached::<Tracer>(target) {
                world.set_active(tracer, false);
            }
        }),
    );
    let tracer = world
        .insert(target, Tracer { tag: "target", log: Rc::clone(&log) })
        .unwrap();

    world.update(0.1);

    assert!(log.borrow().is_empty());
    assert!(world.contains_component(tracer));
    assert!(!world.is_active(tracer));
}
