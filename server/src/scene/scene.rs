use std::collections::HashMap;

use crate::{
    intercept::{Change, InterceptRegistry, ObserverKey},
    user::UserKey,
};

use super::entity::{Entity, EntityId};

/// Per-scene settings, supplied at creation time.
#[derive(Clone)]
pub struct SceneConfig {
    /// Whether this process is the authority for the scene. Committed
    /// changes in non-authoritative scenes are applied locally but never
    /// queued for outbound propagation.
    pub authority: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self { authority: true }
    }
}

/// One replicated scene: a named entity set plus the ordered observer list
/// consulted before any entity in it may be modified.
pub struct Scene {
    name: String,
    config: SceneConfig,
    entities: HashMap<EntityId, Entity>,
    intercept: InterceptRegistry,
    next_entity: u64,
}

impl Scene {
    pub(crate) fn new(name: &str, config: SceneConfig) -> Self {
        Self {
            name: name.to_string(),
            config,
            entities: HashMap::new(),
            intercept: InterceptRegistry::new(),
            next_entity: 1,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_authority(&self) -> bool {
        self.config.authority
    }

    // Interception

    /// Registers an observer for "about to modify" notifications on this
    /// Scene. Observers are consulted in subscription order.
    pub fn subscribe<F>(&mut self, observer: F) -> ObserverKey
    where
        F: Fn(&Change, UserKey, EntityId) + Send + Sync + 'static,
    {
        self.intercept.subscribe(observer)
    }

    /// Removes a previously registered observer. No-op if the key was
    /// already removed.
    pub fn unsubscribe(&mut self, key: &ObserverKey) {
        self.intercept.unsubscribe(key);
    }

    pub fn observer_count(&self) -> usize {
        self.intercept.observer_count()
    }

    pub(crate) fn intercept(&self) -> &InterceptRegistry {
        &self.intercept
    }

    // Entities

    pub(crate) fn spawn_entity(&mut self) -> EntityId {
        let id = EntityId::from_u64(self.next_entity);
        self.next_entity += 1;
        self.entities.insert(id, Entity::new());
        id
    }

    pub fn has_entity(&self, id: &EntityId) -> bool {
        self.entities.contains_key(id)
    }

    pub fn entity(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    pub(crate) fn entity_mut(&mut self, id: &EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }
}
