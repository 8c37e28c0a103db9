pub(crate) mod entity;
pub(crate) mod error;
pub(crate) mod scene;
pub(crate) mod scene_ref;

pub use entity::{ComponentKind, Entity, EntityId};
pub use error::SceneRegistryError;
pub use scene::{Scene, SceneConfig};
pub use scene_ref::{SceneMut, SceneRef};
