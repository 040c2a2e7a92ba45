//! Per-kind component storage
//!
//! Each component kind lives in its own [`ComponentStorage`]: a slotmap for
//! stable generational handles plus an insertion-order list, so per-kind
//! iteration visits components in the order they were added. The world keeps
//! storages behind a kind-erased trait object.

use std::any::Any;

use slotmap::SlotMap;

use super::component::{Component, ComponentId, ComponentKey};
use super::family::Renderable;
use super::{Entity, World};

/// A stored component together with its registry bookkeeping
#[derive(Debug, Clone)]
pub struct ComponentSlot<T> {
    value: T,
    active: bool,
    entity: Option<Entity>,
}

impl<T> ComponentSlot<T> {
    /// The component value
    pub const fn value(&self) -> &T {
        &self.value
    }

    /// Mutable access to the component value
    pub fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    /// Whether the component participates in updates, rendering and queries
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Entity this component is attached to, if any
    pub const fn entity(&self) -> Option<Entity> {
        self.entity
    }
}

/// Storage for every component of one kind
#[derive(Debug)]
pub struct ComponentStorage<T> {
    slots: SlotMap<ComponentKey, ComponentSlot<T>>,
    order: Vec<ComponentKey>,
}

impl<T: Component> ComponentStorage<T> {
    /// Create an empty storage
    pub fn new() -> Self {
        Self {
            slots: SlotMap::with_key(),
            order: Vec::new(),
        }
    }

    /// Number of live components
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when no component of this kind is live
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Check whether `id` refers to a live component
    pub fn contains(&self, id: ComponentId<T>) -> bool {
        self.slots.contains_key(id.key())
    }

    /// Look up a component slot
    pub fn get(&self, id: ComponentId<T>) -> Option<&ComponentSlot<T>> {
        self.slots.get(id.key())
    }

    /// Look up a component slot mutably
    pub fn get_mut(&mut self, id: ComponentId<T>) -> Option<&mut ComponentSlot<T>> {
        self.slots.get_mut(id.key())
    }

    /// Iterate live components in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (ComponentId<T>, &ComponentSlot<T>)> + '_ {
        self.order
            .iter()
            .filter_map(|&key| self.slots.get(key).map(|slot| (ComponentId::from_key(key), slot)))
    }

    /// Handles of live components in insertion order
    pub fn ids(&self) -> Vec<ComponentId<T>> {
        self.order.iter().map(|&key| ComponentId::from_key(key)).collect()
    }

    pub(crate) fn insert(&mut self, value: T) -> ComponentId<T> {
        let key = self.slots.insert(ComponentSlot {
            value,
            active: true,
            entity: None,
        });
        self.order.push(key);
        ComponentId::from_key(key)
    }

    pub(crate) fn remove(&mut self, key: ComponentKey) -> Option<T> {
        let slot = self.slots.remove(key)?;
        self.order.retain(|&k| k != key);
        Some(slot.value)
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.order.clear();
    }
}

impl<T: Component> Default for ComponentStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Signature of a kind's update entry point
pub(crate) type UpdateFn = fn(&mut World, ComponentKey, f32);

/// Kind-erased view of a [`ComponentStorage`]
pub(crate) trait AnyStorage {
    fn contains_key(&self, key: ComponentKey) -> bool;
    fn is_active(&self, key: ComponentKey) -> bool;
    fn set_active(&mut self, key: ComponentKey, active: bool) -> bool;
    fn entity_of(&self, key: ComponentKey) -> Option<Entity>;
    fn set_entity(&mut self, key: ComponentKey, entity: Option<Entity>) -> bool;
    fn remove_key(&mut self, key: ComponentKey) -> bool;
    fn keys(&self) -> Vec<ComponentKey>;
    fn updater(&self) -> UpdateFn;
    fn renderable(&self, key: ComponentKey) -> Option<&dyn Renderable>;
    fn clear(&mut self);
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> AnyStorage for ComponentStorage<T> {
    fn contains_key(&self, key: ComponentKey) -> bool {
        self.slots.contains_key(key)
    }

    fn is_active(&self, key: ComponentKey) -> bool {
        self.slots.get(key).is_some_and(|slot| slot.active)
    }

    fn set_active(&mut self, key: ComponentKey, active: bool) -> bool {
        let Some(slot) = self.slots.get_mut(key) else {
            return false;
        };
        slot.active = active;
        true
    }

    fn entity_of(&self, key: ComponentKey) -> Option<Entity> {
        self.slots.get(key).and_then(|slot| slot.entity)
    }

    fn set_entity(&mut self, key: ComponentKey, entity: Option<Entity>) -> bool {
        let Some(slot) = self.slots.get_mut(key) else {
            return false;
        };
        slot.entity = entity;
        true
    }

    fn remove_key(&mut self, key: ComponentKey) -> bool {
        self.remove(key).is_some()
    }

    fn keys(&self) -> Vec<ComponentKey> {
        self.order.clone()
    }

    fn updater(&self) -> UpdateFn {
        |world, key, delta_time| T::update(world, ComponentId::from_key(key), delta_time)
    }

    fn renderable(&self, key: ComponentKey) -> Option<&dyn Renderable> {
        self.slots.get(key).and_then(|slot| slot.value.as_renderable())
    }

    fn clear(&mut self) {
        ComponentStorage::clear(self);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
