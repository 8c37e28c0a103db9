mod recorder;

pub use recorder::*;

use scenesync_server::{SceneConfig, SceneServer, ServerConfig};

/// A server with one default-config scene registered under `name`.
pub fn server_with_scene(name: &str) -> SceneServer {
    let mut server = SceneServer::new(ServerConfig::default());
    server
        .create_scene(name, SceneConfig::default())
        .expect("scene name is unique");
    server
}
