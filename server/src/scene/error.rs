use thiserror::Error;

/// Errors that can occur during Scene Registry operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneRegistryError {
    /// A scene with this name is already registered
    #[error("A scene named `{name}` is already registered")]
    DuplicateName { name: String },

    /// No scene with this name is registered
    #[error("No scene named `{name}` is registered")]
    NotFound { name: String },
}
