use crate::{
    intercept::{Change, ObserverKey},
    server::server::SceneServer,
    user::UserKey,
};

use super::entity::{ComponentKind, EntityId};

// SceneRef

pub struct SceneRef<'s> {
    server: &'s SceneServer,
    name: String,
}

impl<'s> SceneRef<'s> {
    pub(crate) fn new(server: &'s SceneServer, name: &str) -> Self {
        Self {
            server,
            name: name.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_authority(&self) -> bool {
        self.server.scene_state(&self.name).is_authority()
    }

    pub fn has_entity(&self, entity: &EntityId) -> bool {
        self.server.scene_state(&self.name).has_entity(entity)
    }

    pub fn entity_count(&self) -> usize {
        self.server.scene_state(&self.name).entity_count()
    }

    /// Reads an entity's component payload, if present.
    pub fn component(&self, entity: &EntityId, kind: &ComponentKind) -> Option<&[u8]> {
        self.server
            .scene_state(&self.name)
            .entity(entity)
            .and_then(|entity_state| entity_state.component(kind))
    }

    pub fn observer_count(&self) -> usize {
        self.server.scene_state(&self.name).observer_count()
    }
}

// SceneMut

pub struct SceneMut<'s> {
    server: &'s mut SceneServer,
    name: String,
}

impl<'s> SceneMut<'s> {
    pub(crate) fn new(server: &'s mut SceneServer, name: &str) -> Self {
        Self {
            server,
            name: name.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_authority(&self) -> bool {
        self.server.scene_state(&self.name).is_authority()
    }

    // Interception

    /// Registers an "about to modify" observer on this scene. Observers
    /// run in subscription order.
    pub fn subscribe<F>(&mut self, observer: F) -> ObserverKey
    where
        F: Fn(&Change, UserKey, EntityId) + Send + Sync + 'static,
    {
        self.server.scene_state_mut(&self.name).subscribe(observer)
    }

    /// Removes a previously registered observer. Idempotent.
    pub fn unsubscribe(&mut self, key: &ObserverKey) -> &mut Self {
        self.server.scene_state_mut(&self.name).unsubscribe(key);

        self
    }

    pub fn observer_count(&self) -> usize {
        self.server.scene_state(&self.name).observer_count()
    }

    // Entities

    /// Spawns an entity and queues a spawn event for the transport layer.
    pub fn spawn_entity(&mut self) -> EntityId {
        self.server.scene_spawn_entity(&self.name)
    }

    pub fn has_entity(&self, entity: &EntityId) -> bool {
        self.server.scene_state(&self.name).has_entity(entity)
    }

    pub fn entity_count(&self) -> usize {
        self.server.scene_state(&self.name).entity_count()
    }

    /// Reads an entity's component payload, if present.
    pub fn component(&self, entity: &EntityId, kind: &ComponentKind) -> Option<&[u8]> {
        self.server
            .scene_state(&self.name)
            .entity(entity)
            .and_then(|entity_state| entity_state.component(kind))
    }
}
