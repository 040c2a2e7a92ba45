//! Errors reported by registry and entity operations

use thiserror::Error;

use super::Entity;

/// Reasons a registry or entity operation was refused
///
/// The plain operations on [`World`](super::World) log these at `warn` level
/// and return `false`/`None`; the `try_` variants hand them back instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EcsError {
    /// The entity was never created or has been destroyed
    #[error("{0} does not exist")]
    UnknownEntity(Entity),

    /// The component handle does not refer to a live component
    #[error("{kind} component is not registered")]
    UnknownComponent {
        /// Kind name of the component
        kind: &'static str,
    },

    /// The entity already has a component of this kind
    #[error("{entity} already has a {kind} attached, use replace() instead")]
    KindAlreadyAttached {
        /// Target entity
        entity: Entity,
        /// Kind name of the component
        kind: &'static str,
    },

    /// The component belongs to a different entity
    #[error("{kind} component is attached to {owner}, detach it before attaching to {entity}")]
    AttachedElsewhere {
        /// Target entity
        entity: Entity,
        /// Current owner of the component
        owner: Entity,
        /// Kind name of the component
        kind: &'static str,
    },

    /// The entity has no component of this kind
    #[error("{entity} has no {kind} attached")]
    NothingAttached {
        /// Target entity
        entity: Entity,
        /// Kind name of the component
        kind: &'static str,
    },
}
