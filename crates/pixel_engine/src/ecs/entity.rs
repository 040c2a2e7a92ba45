//! Entity implementation
//!
//! An entity is an id plus a table of attached components, at most one per
//! kind. The operations below live on [`World`] because attaching touches
//! both the entity table and the component's back-reference.

use std::fmt;

use log::warn;

use super::component::{AnyComponentId, Component, ComponentId, Kind};
use super::error::EcsError;
use super::World;

/// Entity identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity {
    id: u32,
}

impl Entity {
    /// Create a new entity with the given ID
    pub(super) const fn new(id: u32) -> Self {
        Self { id }
    }

    /// Get the entity ID
    pub const fn id(&self) -> u32 {
        self.id
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.id)
    }
}

/// Per-entity bookkeeping held by the world
#[derive(Debug, Clone)]
pub(crate) struct EntityRecord {
    pub(crate) active: bool,
    /// Attached components in attachment order
    pub(crate) attached: Vec<AnyComponentId>,
}

impl Default for EntityRecord {
    fn default() -> Self {
        Self {
            active: true,
            attached: Vec::new(),
        }
    }
}

impl EntityRecord {
    fn attached_of(&self, kind: Kind) -> Option<AnyComponentId> {
        self.attached.iter().copied().find(|id| id.kind() == kind)
    }
}

impl World {
    fn record(&self, entity: Entity) -> Result<&EntityRecord, EcsError> {
        self.entities.get(&entity).ok_or(EcsError::UnknownEntity(entity))
    }

    /// Attach a registered component to an entity
    ///
    /// Refused if the entity already has a component of that kind, or the
    /// component is attached to another entity. Attaching a component to the
    /// entity it is already attached to is a no-op.
    pub fn try_attach<T: Component>(&mut self, entity: Entity, id: ComponentId<T>) -> Result<(), EcsError> {
        let kind = Kind::of::<T>();
        let erased = id.erased();
        let current = self.record(entity)?.attached_of(kind);

        if !self.contains_any(erased) {
            return Err(EcsError::UnknownComponent { kind: kind.name() });
        }
        match current {
            Some(attached) if attached == erased => return Ok(()),
            Some(_) => {
                return Err(EcsError::KindAlreadyAttached {
                    entity,
                    kind: kind.name(),
                })
            }
            None => {}
        }
        if let Some(owner) = self.entity_of_any(erased) {
            return Err(EcsError::AttachedElsewhere {
                entity,
                owner,
                kind: kind.name(),
            });
        }

        self.set_entity_any(erased, Some(entity));
        if let Some(record) = self.entities.get_mut(&entity) {
            record.attached.push(erased);
        }
        Ok(())
    }

    /// Attach a component, logging a warning and returning `false` if refused
    pub fn attach<T: Component>(&mut self, entity: Entity, id: ComponentId<T>) -> bool {
        self.try_attach(entity, id)
            .map_err(|error| warn!("attach: {error}"))
            .is_ok()
    }

    /// Destroy whatever component of kind `T` the entity has, then attach `id`
    ///
    /// `id` is validated first; a refused replace leaves the current
    /// component in place.
    pub fn try_replace<T: Component>(&mut self, entity: Entity, id: ComponentId<T>) -> Result<(), EcsError> {
        let kind = Kind::of::<T>();
        let erased = id.erased();
        let current = self.record(entity)?.attached_of(kind);

        if current == Some(erased) {
            return Ok(());
        }
        if !self.contains_any(erased) {
            return Err(EcsError::UnknownComponent { kind: kind.name() });
        }
        if let Some(owner) = self.entity_of_any(erased) {
            return Err(EcsError::AttachedElsewhere {
                entity,
                owner,
                kind: kind.name(),
            });
        }

        if let Some(current) = current.and_then(AnyComponentId::downcast::<T>) {
            self.destroy_component(current);
        }
        self.try_attach(entity, id)
    }

    /// Replace a component, logging a warning and returning `false` if refused
    pub fn replace<T: Component>(&mut self, entity: Entity, id: ComponentId<T>) -> bool {
        self.try_replace(entity, id)
            .map_err(|error| warn!("replace: {error}"))
            .is_ok()
    }

    /// Register `value` and attach it to `entity`
    ///
    /// If the attach is refused the freshly added component is destroyed
    /// again so nothing is left behind.
    pub fn try_insert<T: Component>(&mut self, entity: Entity, value: T) -> Result<ComponentId<T>, EcsError> {
        self.record(entity)?;
        let id = self.add_component(value);
        match self.try_attach(entity, id) {
            Ok(()) => Ok(id),
            Err(error) => {
                self.destroy_component(id);
                Err(error)
            }
        }
    }

    /// Register and attach a component, logging a warning if refused
    pub fn insert<T: Component>(&mut self, entity: Entity, value: T) -> Option<ComponentId<T>> {
        self.try_insert(entity, value)
            .map_err(|error| warn!("insert: {error}"))
            .ok()
    }

    /// Detach the entity's component of kind `T`; it stays registered
    pub fn try_detach<T: Component>(&mut self, entity: Entity) -> Result<ComponentId<T>, EcsError> {
        let id = self.try_attached::<T>(entity)?;
        let erased = id.erased();
        if let Some(record) = self.entities.get_mut(&entity) {
            record.attached.retain(|attached| *attached != erased);
        }
        self.set_entity_any(erased, None);
        Ok(id)
    }

    /// Detach a component, logging a warning if there is none
    pub fn detach<T: Component>(&mut self, entity: Entity) -> Option<ComponentId<T>> {
        self.try_detach(entity)
            .map_err(|error| warn!("detach: {error}"))
            .ok()
    }

    /// Destroy the entity's component of kind `T`
    pub fn try_destroy_attached<T: Component>(&mut self, entity: Entity) -> Result<(), EcsError> {
        let id = self.try_attached::<T>(entity)?;
        self.try_destroy_component(id)
    }

    /// Destroy the entity's component of kind `T`, logging a warning if
    /// there is none
    pub fn destroy_attached<T: Component>(&mut self, entity: Entity) -> bool {
        self.try_destroy_attached::<T>(entity)
            .map_err(|error| warn!("destroy_attached: {error}"))
            .is_ok()
    }

    /// Handle of the entity's component of kind `T`
    pub fn try_attached<T: Component>(&self, entity: Entity) -> Result<ComponentId<T>, EcsError> {
        let kind = Kind::of::<T>();
        self.record(entity)?
            .attached_of(kind)
            .and_then(AnyComponentId::downcast::<T>)
            .ok_or(EcsError::NothingAttached {
                entity,
                kind: kind.name(),
            })
    }

    /// Handle of the entity's component of kind `T`, if any
    ///
    /// Absence is an ordinary answer here, so nothing is logged.
    pub fn attached<T: Component>(&self, entity: Entity) -> Option<ComponentId<T>> {
        self.try_attached(entity).ok()
    }

    /// Read the entity's component of kind `T`
    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.get_component(self.attached::<T>(entity)?)
    }

    /// Write the entity's component of kind `T`
    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        let id = self.attached::<T>(entity)?;
        self.get_component_mut(id)
    }

    /// Read the entity's component of kind `T` only if it is active
    pub fn get_if_active<T: Component>(&self, entity: Entity) -> Option<&T> {
        let id = self.attached::<T>(entity)?;
        if self.is_active(id) {
            self.get_component(id)
        } else {
            None
        }
    }

    /// Write the entity's component of kind `T` only if it is active
    pub fn get_if_active_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        let id = self.attached::<T>(entity)?;
        if self.is_active(id) {
            self.get_component_mut(id)
        } else {
            None
        }
    }

    /// Handle of the entity's component of kind `T` if it is active
    pub fn attached_if_active<T: Component>(&self, entity: Entity) -> Option<ComponentId<T>> {
        self.attached::<T>(entity).filter(|&id| self.is_active(id))
    }

    /// Every component attached to the entity, in attachment order
    pub fn attached_components(&self, entity: Entity) -> Vec<AnyComponentId> {
        self.entities
            .get(&entity)
            .map(|record| record.attached.clone())
            .unwrap_or_default()
    }

    /// Destroy every component attached to the entity, keeping the entity
    pub fn clear_entity(&mut self, entity: Entity) -> bool {
        let Some(record) = self.entities.get_mut(&entity) else {
            warn!("clear_entity: {}", EcsError::UnknownEntity(entity));
            return false;
        };
        for id in std::mem::take(&mut record.attached) {
            self.set_entity_any(id, None);
            self.remove_any(id);
        }
        true
    }

    /// Flag an entity active or inactive
    ///
    /// The flag is bookkeeping for game code; it does not gate updates of the
    /// entity's components.
    pub fn set_entity_active(&mut self, entity: Entity, active: bool) -> bool {
        match self.entities.get_mut(&entity) {
            Some(record) => {
                record.active = active;
                true
            }
            None => {
                warn!("set_entity_active: {}", EcsError::UnknownEntity(entity));
                false
            }
        }
    }

    /// Whether an entity is flagged active; unknown entities are not
    pub fn is_entity_active(&self, entity: Entity) -> bool {
        self.entities.get(&entity).is_some_and(|record| record.active)
    }
}
