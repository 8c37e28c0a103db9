pub(crate) mod server;
pub(crate) mod server_config;

pub use server::{ChangeOutcome, LifecycleKey, SceneServer};
pub use server_config::ServerConfig;
