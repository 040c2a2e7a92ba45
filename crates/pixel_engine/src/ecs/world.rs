//! ECS World implementation
//!
//! The world is the single registry that owns every component, keyed first
//! by kind and then by handle, plus the family index and the entity table.
//! Components are created and destroyed only through the world, so a
//! destroyed component disappears from its storage, its family collections
//! and its entity's attachment table in one step.

use std::collections::{BTreeMap, HashMap};

use log::{debug, warn};

use super::component::{AnyComponentId, Component, ComponentId, Kind};
use super::entity::EntityRecord;
use super::error::EcsError;
use super::family::{Family, RenderItem};
use super::storage::{AnyStorage, ComponentStorage};
use super::Entity;

/// ECS World containing all entities and components
pub struct World {
    next_entity_id: u32,
    pub(super) entities: BTreeMap<Entity, EntityRecord>,
    kind_order: Vec<Kind>,
    storages: HashMap<Kind, Box<dyn AnyStorage>>,
    families: HashMap<Family, Vec<AnyComponentId>>,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self {
            next_entity_id: 1,
            entities: BTreeMap::new(),
            kind_order: Vec::new(),
            storages: HashMap::new(),
            families: HashMap::new(),
        }
    }

    /// Create a new, empty and active entity
    pub fn create_entity(&mut self) -> Entity {
        let entity = Entity::new(self.next_entity_id);
        self.next_entity_id += 1;
        self.entities.insert(entity, EntityRecord::default());
        entity
    }

    /// Check whether an entity exists
    pub fn contains_entity(&self, entity: Entity) -> bool {
        self.entities.contains_key(&entity)
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Get an iterator over all entities, oldest first
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.keys().copied()
    }

    /// Destroy an entity and every component attached to it
    pub fn try_destroy_entity(&mut self, entity: Entity) -> Result<(), EcsError> {
        let record = self
            .entities
            .remove(&entity)
            .ok_or(EcsError::UnknownEntity(entity))?;

        for id in record.attached {
            if let Some(storage) = self.storages.get_mut(&id.kind()) {
                storage.set_entity(id.key(), None);
            }
            self.remove_any(id);
        }
        debug!("Destroyed {entity}");
        Ok(())
    }

    /// Destroy an entity and every component attached to it, logging a
    /// warning if it does not exist
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        self.try_destroy_entity(entity)
            .map_err(|error| warn!("destroy_entity: {error}"))
            .is_ok()
    }

    /// Storage for kind `T`, if any component of that kind was ever added
    pub fn storage<T: Component>(&self) -> Option<&ComponentStorage<T>> {
        self.storages
            .get(&Kind::of::<T>())
            .and_then(|storage| storage.as_any().downcast_ref::<ComponentStorage<T>>())
    }

    /// Storage for kind `T`, registering the kind if it is new
    pub fn storage_mut<T: Component>(&mut self) -> &mut ComponentStorage<T> {
        let kind = Kind::of::<T>();
        if !self.storages.contains_key(&kind) {
            self.kind_order.push(kind);
        }
        self.storages
            .entry(kind)
            .or_insert_with(|| Box::new(ComponentStorage::<T>::new()))
            .as_any_mut()
            .downcast_mut::<ComponentStorage<T>>()
            .unwrap_or_else(|| unreachable!("storage registered under the wrong kind"))
    }

    /// Live components of kind `T` in insertion order, active or not
    pub fn components<T: Component>(&self) -> impl Iterator<Item = (ComponentId<T>, &T)> + '_ {
        self.storage::<T>()
            .into_iter()
            .flat_map(ComponentStorage::<T>::iter)
            .map(|(id, slot)| (id, slot.value()))
    }

    /// Number of live components of kind `T`
    pub fn component_count<T: Component>(&self) -> usize {
        self.storage::<T>().map_or(0, ComponentStorage::len)
    }

    /// Kinds in the order their first component was added
    pub fn kinds(&self) -> &[Kind] {
        &self.kind_order
    }

    /// Register a new component: it is stored under its kind, added to every
    /// family it belongs to, starts active and attached to no entity
    pub fn add_component<T: Component>(&mut self, value: T) -> ComponentId<T> {
        let families: Vec<Family> = Family::ALL
            .into_iter()
            .filter(|family| match family {
                Family::Renderable => value.as_renderable().is_some(),
            })
            .collect();

        let id = self.storage_mut::<T>().insert(value);
        for family in families {
            self.families.entry(family).or_default().push(id.erased());
        }
        id
    }

    /// Destroy a component: detach it from its entity, drop it from its
    /// families and remove it from storage
    pub fn try_destroy_component<T: Component>(&mut self, id: ComponentId<T>) -> Result<(), EcsError> {
        if self.remove_any(id.erased()) {
            Ok(())
        } else {
            Err(EcsError::UnknownComponent {
                kind: Kind::of::<T>().name(),
            })
        }
    }

    /// Destroy a component, logging a warning if it is not registered
    pub fn destroy_component<T: Component>(&mut self, id: ComponentId<T>) -> bool {
        self.try_destroy_component(id)
            .map_err(|error| warn!("destroy_component: {error}"))
            .is_ok()
    }

    /// Destroy a component given only its kind-erased handle, logging a
    /// warning if the handle does not match a live component of its kind
    pub fn destroy_any(&mut self, id: AnyComponentId) -> bool {
        let removed = self.remove_any(id);
        if !removed {
            warn!("destroy_any: no live {} component for {:?}", id.kind(), id.key());
        }
        removed
    }

    pub(super) fn remove_any(&mut self, id: AnyComponentId) -> bool {
        let Some(storage) = self.storages.get_mut(&id.kind()) else {
            return false;
        };
        if !storage.contains_key(id.key()) {
            return false;
        }

        if let Some(entity) = storage.entity_of(id.key()) {
            if let Some(record) = self.entities.get_mut(&entity) {
                record.attached.retain(|attached| *attached != id);
            }
        }
        for members in self.families.values_mut() {
            members.retain(|member| *member != id);
        }
        storage.remove_key(id.key())
    }

    /// Check whether a component handle is live
    pub fn contains_component<T: Component>(&self, id: ComponentId<T>) -> bool {
        self.storage::<T>().is_some_and(|storage| storage.contains(id))
    }

    /// Read a component by handle
    pub fn get_component<T: Component>(&self, id: ComponentId<T>) -> Option<&T> {
        self.storage::<T>()?.get(id).map(|slot| slot.value())
    }

    /// Write a component by handle
    pub fn get_component_mut<T: Component>(&mut self, id: ComponentId<T>) -> Option<&mut T> {
        self.storages
            .get_mut(&Kind::of::<T>())?
            .as_any_mut()
            .downcast_mut::<ComponentStorage<T>>()?
            .get_mut(id)
            .map(|slot| slot.value_mut())
    }

    /// Entity a component is attached to
    pub fn entity_of<T: Component>(&self, id: ComponentId<T>) -> Option<Entity> {
        self.storage::<T>()?.get(id)?.entity()
    }

    /// Whether a component is active; unknown components are inactive
    pub fn is_active<T: Component>(&self, id: ComponentId<T>) -> bool {
        self.storage::<T>()
            .and_then(|storage| storage.get(id))
            .is_some_and(|slot| slot.is_active())
    }

    /// Activate or deactivate a component
    ///
    /// Inactive components are skipped by updates, rendering and collision
    /// queries but stay registered and attached.
    pub fn set_active<T: Component>(&mut self, id: ComponentId<T>, active: bool) -> bool {
        self.storages
            .get_mut(&Kind::of::<T>())
            .is_some_and(|storage| storage.set_active(id.key(), active))
    }

    pub(super) fn set_entity_any(&mut self, id: AnyComponentId, entity: Option<Entity>) -> bool {
        self.storages
            .get_mut(&id.kind())
            .is_some_and(|storage| storage.set_entity(id.key(), entity))
    }

    pub(super) fn entity_of_any(&self, id: AnyComponentId) -> Option<Entity> {
        self.storages.get(&id.kind())?.entity_of(id.key())
    }

    pub(super) fn contains_any(&self, id: AnyComponentId) -> bool {
        self.storages
            .get(&id.kind())
            .is_some_and(|storage| storage.contains_key(id.key()))
    }

    /// Members of a family in insertion order
    pub fn family(&self, family: Family) -> &[AnyComponentId] {
        self.families.get(&family).map(Vec::as_slice).unwrap_or_default()
    }

    /// Collect what every active renderable component wants drawn, in
    /// family insertion order
    pub fn render_items(&self) -> Vec<RenderItem> {
        self.family(Family::Renderable)
            .iter()
            .filter_map(|&id| {
                let storage = self.storages.get(&id.kind())?;
                if !storage.is_active(id.key()) {
                    return None;
                }
                let entity = storage.entity_of(id.key());
                let drawable = storage.renderable(id.key())?.drawable(self, entity)?;
                Some(RenderItem {
                    component: id,
                    entity,
                    drawable,
                })
            })
            .collect()
    }

    /// Advance the simulation by one tick
    ///
    /// Kinds are visited in the order they were first registered and, within
    /// a kind, components in insertion order. The visit list is a snapshot:
    /// components added during the tick wait for the next one, components
    /// destroyed or deactivated during the tick are skipped.
    pub fn update(&mut self, delta_time: f32) {
        if !delta_time.is_finite() || delta_time < 0.0 {
            warn!("World::update called with invalid delta time {delta_time}, skipping tick");
            return;
        }

        let kinds = self.kind_order.clone();
        for kind in kinds {
            let Some((keys, update)) = self
                .storages
                .get(&kind)
                .map(|storage| (storage.keys(), storage.updater()))
            else {
                continue;
            };

            for key in keys {
                let active = self
                    .storages
                    .get(&kind)
                    .is_some_and(|storage| storage.is_active(key));
                if active {
                    update(self, key, delta_time);
                }
            }
        }
    }

    /// Destroy every entity and component
    pub fn clear(&mut self) {
        let entities = self.entities.len();
        self.entities.clear();
        for storage in self.storages.values_mut() {
            storage.clear();
        }
        for members in self.families.values_mut() {
            members.clear();
        }
        debug!("Cleared world ({entities} entities)");
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
