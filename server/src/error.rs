use thiserror::Error;

use crate::{
    scene::{entity::EntityId, error::SceneRegistryError},
    user::UserKey,
};

/// Errors returned by server operations. Fatal to the failing operation
/// only; observer failures during dispatch are *not* errors at this level
/// (they degrade to non-veto and surface as diagnostics in the event
/// stream).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneSyncError {
    /// Scene registry error
    #[error("Scene registry error: {0}")]
    Registry(#[from] SceneRegistryError),

    /// The targeted entity does not exist in the targeted scene
    #[error("Entity {entity:?} does not exist in scene `{scene}`")]
    EntityNotFound { scene: String, entity: EntityId },

    /// The originating user is not connected
    #[error("User {user:?} is not connected")]
    UnknownUser { user: UserKey },
}
