use std::{collections::HashMap, mem, sync::Arc};

use log::info;

use crate::{
    error::SceneSyncError,
    events::{CommittedChange, ObserverIncident, RejectedChange, SyncEvents},
    intercept::{Change, ChangeKind, InterceptDispatcher, Verdict},
    scene::{
        entity::{ComponentKind, EntityId},
        error::SceneRegistryError,
        scene::{Scene, SceneConfig},
        scene_ref::{SceneMut, SceneRef},
    },
    user::{User, UserKey},
    ServerConfig,
};

// LifecycleKey
/// Handle for a scene-created / scene-destroyed subscription.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct LifecycleKey(u64);

pub(crate) type LifecycleFn = dyn Fn(&mut Scene) + Send + Sync;

/// Terminal outcome of a proposed change. No further transitions exist
/// once one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOutcome {
    /// The mutation passed interception and was applied to authoritative
    /// state.
    Committed,
    /// The mutation was vetoed; authoritative state is untouched and
    /// nothing is propagated.
    Rejected,
}

/// The authoritative owner of scene state, and the registry that creates
/// and destroys scenes.
///
/// Every proposed mutation, local or network-sourced, is wrapped in a
/// [`Change`] and run through the target scene's observers before commit.
/// Scene-created subscribers are notified synchronously inside
/// [`create_scene`](SceneServer::create_scene), so an observer attached
/// from within that notification is guaranteed to see every change ever
/// proposed against the new scene.
pub struct SceneServer {
    dispatcher: InterceptDispatcher,
    // Scenes
    scenes: HashMap<String, Scene>,
    // Users
    users: HashMap<UserKey, User>,
    next_user: u64,
    // Lifecycle subscribers
    created_hooks: Vec<(LifecycleKey, Arc<LifecycleFn>)>,
    destroyed_hooks: Vec<(LifecycleKey, Arc<LifecycleFn>)>,
    next_lifecycle: u64,
    // Events
    outgoing_events: SyncEvents,
}

impl SceneServer {
    /// Create a new SceneServer. The local process is always connected as
    /// [`UserKey::LOCAL`], with broadcast rights.
    pub fn new(server_config: ServerConfig) -> Self {
        let mut users = HashMap::new();
        users.insert(UserKey::LOCAL, User::new(true));

        Self {
            dispatcher: InterceptDispatcher::new(server_config.observer_budget),
            scenes: HashMap::new(),
            users,
            next_user: 1,
            created_hooks: Vec::new(),
            destroyed_hooks: Vec::new(),
            next_lifecycle: 1,
            outgoing_events: SyncEvents::new(),
        }
    }

    // Scene Registry

    /// Registers a new scene and notifies all scene-created subscribers
    /// before returning, so subscribers may attach observers with no race
    /// window against incoming changes.
    pub fn create_scene(
        &mut self,
        name: &str,
        config: SceneConfig,
    ) -> Result<SceneMut<'_>, SceneRegistryError> {
        if self.scenes.contains_key(name) {
            return Err(SceneRegistryError::DuplicateName {
                name: name.to_string(),
            });
        }

        info!("Creating scene `{}`", name);
        self.scenes.insert(name.to_string(), Scene::new(name, config));

        let hooks: Vec<Arc<LifecycleFn>> = self
            .created_hooks
            .iter()
            .map(|(_, hook)| hook.clone())
            .collect();
        if let Some(scene) = self.scenes.get_mut(name) {
            for hook in hooks {
                (*hook)(scene);
            }
        }

        Ok(SceneMut::new(self, name))
    }

    /// Unregisters a scene, notifying scene-destroyed subscribers while
    /// the scene is still valid, then releasing its entities and all
    /// attached observers.
    pub fn destroy_scene(&mut self, name: &str) -> Result<(), SceneRegistryError> {
        let Some(mut scene) = self.scenes.remove(name) else {
            return Err(SceneRegistryError::NotFound {
                name: name.to_string(),
            });
        };

        info!("Destroying scene `{}`", name);
        let hooks: Vec<Arc<LifecycleFn>> = self
            .destroyed_hooks
            .iter()
            .map(|(_, hook)| hook.clone())
            .collect();
        for hook in hooks {
            (*hook)(&mut scene);
        }

        // scene drops here, releasing its intercept registry
        Ok(())
    }

    pub fn scene_exists(&self, name: &str) -> bool {
        self.scenes.contains_key(name)
    }

    /// Retrieves a SceneRef that exposes read-only operations for the
    /// named scene. Panics if the scene does not exist.
    pub fn scene(&'_ self, name: &str) -> SceneRef<'_> {
        if self.scenes.contains_key(name) {
            return SceneRef::new(self, name);
        }
        panic!("No scene named `{}` exists", name);
    }

    /// Retrieves a SceneMut that exposes read and write operations for the
    /// named scene. Panics if the scene does not exist.
    pub fn scene_mut(&'_ mut self, name: &str) -> SceneMut<'_> {
        if self.scenes.contains_key(name) {
            return SceneMut::new(self, name);
        }
        panic!("No scene named `{}` exists", name);
    }

    pub fn scene_names(&self) -> Vec<String> {
        self.scenes.keys().cloned().collect()
    }

    pub fn scenes_count(&self) -> usize {
        self.scenes.len()
    }

    // Lifecycle subscriptions

    /// Subscribes to scene-created notifications, delivered synchronously
    /// from within `create_scene`.
    pub fn on_scene_created<F>(&mut self, hook: F) -> LifecycleKey
    where
        F: Fn(&mut Scene) + Send + Sync + 'static,
    {
        let key = LifecycleKey(self.next_lifecycle);
        self.next_lifecycle += 1;
        self.created_hooks.push((key, Arc::new(hook)));
        key
    }

    /// Subscribes to scene-destroyed notifications, delivered while the
    /// scene is still valid during teardown.
    pub fn on_scene_destroyed<F>(&mut self, hook: F) -> LifecycleKey
    where
        F: Fn(&mut Scene) + Send + Sync + 'static,
    {
        let key = LifecycleKey(self.next_lifecycle);
        self.next_lifecycle += 1;
        self.destroyed_hooks.push((key, Arc::new(hook)));
        key
    }

    /// Removes a lifecycle subscription. No-op if already removed.
    pub fn remove_lifecycle_hook(&mut self, key: &LifecycleKey) {
        self.created_hooks.retain(|(entry_key, _)| entry_key != key);
        self.destroyed_hooks.retain(|(entry_key, _)| entry_key != key);
    }

    // Users

    /// Registers a network participant and returns its key. `can_broadcast`
    /// grants propagation rights for changes this user originates.
    pub fn connect_user(&mut self, can_broadcast: bool) -> UserKey {
        let key = UserKey::from_u64(self.next_user);
        self.next_user += 1;
        self.users.insert(key, User::new(can_broadcast));
        key
    }

    /// Removes a network participant. Returns false if the key was unknown.
    /// The local user cannot be disconnected.
    pub fn disconnect_user(&mut self, user: &UserKey) -> bool {
        if user.is_local() {
            return false;
        }
        self.users.remove(user).is_some()
    }

    pub fn user_exists(&self, user: &UserKey) -> bool {
        self.users.contains_key(user)
    }

    pub fn users_count(&self) -> usize {
        self.users.len()
    }

    // Entities

    /// Spawns an entity in the named scene and queues a spawn event for
    /// the transport layer.
    pub fn spawn_entity(&mut self, scene_name: &str) -> Result<EntityId, SceneSyncError> {
        if !self.scenes.contains_key(scene_name) {
            return Err(SceneRegistryError::NotFound {
                name: scene_name.to_string(),
            }
            .into());
        }
        Ok(self.scene_spawn_entity(scene_name))
    }

    // Synchronization Manager

    /// Gates one proposed mutation through interception, committing it to
    /// authoritative state only if no observer vetoes it.
    ///
    /// A committed change is queued for outbound propagation when the
    /// scene is authoritative and the origin is the local process or a
    /// user with broadcast rights. A rejected change is discarded with no
    /// partial side effects and queued as a rejection signal only.
    pub fn propose_change(
        &mut self,
        scene_name: &str,
        entity: EntityId,
        user: UserKey,
        kind: ChangeKind,
        component: ComponentKind,
        payload: Vec<u8>,
    ) -> Result<ChangeOutcome, SceneSyncError> {
        if !self.users.contains_key(&user) {
            return Err(SceneSyncError::UnknownUser { user });
        }
        let Some(scene) = self.scenes.get_mut(scene_name) else {
            return Err(SceneRegistryError::NotFound {
                name: scene_name.to_string(),
            }
            .into());
        };
        if !scene.has_entity(&entity) {
            return Err(SceneSyncError::EntityNotFound {
                scene: scene_name.to_string(),
                entity,
            });
        }

        // The change is offered to observers strictly before any state is
        // touched
        let change = Change::new(scene_name, entity, user, kind, component, payload);
        let result = self.dispatcher.dispatch(&change, scene.intercept());

        for diagnostic in result.diagnostics {
            self.outgoing_events.push_incident(ObserverIncident {
                scene: scene_name.to_string(),
                observer: diagnostic.observer,
                error: diagnostic.error,
            });
        }

        match result.verdict {
            Verdict::Denied { by } => {
                info!(
                    "Denied change by user {:?} on entity {:?} in scene `{}`",
                    user, entity, scene_name
                );
                self.outgoing_events.push_rejected(RejectedChange {
                    scene: scene_name.to_string(),
                    entity,
                    user,
                    kind,
                    component,
                    denied_by: by,
                });
                Ok(ChangeOutcome::Rejected)
            }
            Verdict::Allowed => {
                let propagate = scene.is_authority()
                    && (user.is_local()
                        || self
                            .users
                            .get(&user)
                            .map(|record| record.can_broadcast)
                            .unwrap_or(false));

                let payload = change.into_payload();
                if let Some(entity_state) = scene.entity_mut(&entity) {
                    match kind {
                        ChangeKind::ComponentAdded | ChangeKind::ComponentUpdated => {
                            entity_state.insert_component(component, payload.clone());
                        }
                        ChangeKind::ComponentRemoved => {
                            entity_state.remove_component(&component);
                        }
                    }
                }

                self.outgoing_events.push_committed(CommittedChange {
                    scene: scene_name.to_string(),
                    entity,
                    user,
                    kind,
                    component,
                    payload,
                    propagate,
                });
                Ok(ChangeOutcome::Committed)
            }
        }
    }

    // Events

    /// Drains the outbound event buffer. Call regularly; committed events
    /// marked `propagate` are the transport layer's replication feed.
    pub fn receive_events(&mut self) -> SyncEvents {
        mem::replace(&mut self.outgoing_events, SyncEvents::new())
    }

    // Crate-public

    pub(crate) fn scene_state(&self, name: &str) -> &Scene {
        let Some(scene) = self.scenes.get(name) else {
            panic!("No scene named `{}` exists", name);
        };
        scene
    }

    pub(crate) fn scene_state_mut(&mut self, name: &str) -> &mut Scene {
        let Some(scene) = self.scenes.get_mut(name) else {
            panic!("No scene named `{}` exists", name);
        };
        scene
    }

    pub(crate) fn scene_spawn_entity(&mut self, name: &str) -> EntityId {
        let id = self.scene_state_mut(name).spawn_entity();
        self.outgoing_events.push_spawn(name, id);
        id
    }
}
