//! Component trait, component kinds and component handles

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use super::family::Renderable;
use super::World;

slotmap::new_key_type! {
    /// Generational key of a component inside its kind's storage
    pub struct ComponentKey;
}

/// Trait implemented by every component type
///
/// A component type is its own kind: the registry keeps one storage per
/// implementing type and an entity holds at most one component of each kind.
pub trait Component: 'static {
    /// Per-tick update, called by [`World::update`] for every active
    /// component of this kind. The default does nothing.
    ///
    /// The component is addressed by id rather than borrowed so the
    /// implementation can read and write other components through `world`.
    fn update(_world: &mut World, _id: ComponentId<Self>, _delta_time: f32)
    where
        Self: Sized,
    {
    }

    /// Renderable view of this component, if it belongs to the renderable
    /// family
    fn as_renderable(&self) -> Option<&dyn Renderable> {
        None
    }
}

/// The kind of a component: its concrete type, used as a storage key
#[derive(Clone, Copy)]
pub struct Kind {
    id: TypeId,
    name: &'static str,
}

impl Kind {
    /// Kind of component type `T`
    pub fn of<T: Component>() -> Self {
        let full = std::any::type_name::<T>();
        // Drop generic arguments before taking the last path segment
        let path = full.split('<').next().unwrap_or(full);
        let name = path.rsplit("::").next().unwrap_or(path);
        Self {
            id: TypeId::of::<T>(),
            name,
        }
    }

    /// Short type name, for diagnostics
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for Kind {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Kind {}

impl Hash for Kind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Kind({})", self.name)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Typed handle to a component of kind `T`
pub struct ComponentId<T> {
    key: ComponentKey,
    _phantom: PhantomData<fn() -> T>,
}

impl<T: Component> ComponentId<T> {
    pub(crate) const fn from_key(key: ComponentKey) -> Self {
        Self {
            key,
            _phantom: PhantomData,
        }
    }

    /// Get the underlying key
    pub const fn key(self) -> ComponentKey {
        self.key
    }

    /// Forget the static kind, keeping it as a runtime tag
    pub fn erased(self) -> AnyComponentId {
        AnyComponentId {
            kind: Kind::of::<T>(),
            key: self.key,
        }
    }
}

impl<T> Clone for ComponentId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ComponentId<T> {}

impl<T> PartialEq for ComponentId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<T> Eq for ComponentId<T> {}

impl<T> Hash for ComponentId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl<T> fmt::Debug for ComponentId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentId<{}>({:?})", std::any::type_name::<T>(), self.key)
    }
}

/// Component handle with its kind carried at runtime
///
/// Used where components of different kinds share a collection: entity
/// attachment tables and family collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnyComponentId {
    kind: Kind,
    key: ComponentKey,
}

impl AnyComponentId {
    /// The component's kind
    pub const fn kind(&self) -> Kind {
        self.kind
    }

    /// Key within the kind's storage
    pub const fn key(&self) -> ComponentKey {
        self.key
    }

    /// Recover the typed handle if this component is of kind `T`
    pub fn downcast<T: Component>(self) -> Option<ComponentId<T>> {
        (self.kind == Kind::of::<T>()).then(|| ComponentId::from_key(self.key))
    }
}

impl<T: Component> From<ComponentId<T>> for AnyComponentId {
    fn from(id: ComponentId<T>) -> Self {
        id.erased()
    }
}
