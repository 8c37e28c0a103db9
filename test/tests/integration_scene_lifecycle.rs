/// Integration tests for scene registration: duplicate/missing name
/// errors, synchronous creation/destruction notifications, and the
/// guarantee that an observer attached from inside the scene-created
/// notification sees every change ever proposed against the scene.
use std::sync::{Arc, Mutex};

use scenesync_server::{
    ChangeKind, ChangeOutcome, ComponentKind, SceneConfig, SceneRegistryError, SceneServer,
    ServerConfig, UserKey,
};
use scenesync_test::{denying_observer, entries, new_log};

const TRANSFORM: ComponentKind = ComponentKind::new(1);

#[test]
fn duplicate_scene_name_is_rejected() {
    let mut server = SceneServer::new(ServerConfig::default());
    assert!(server.create_scene("arena", SceneConfig::default()).is_ok());

    let result = server.create_scene("arena", SceneConfig::default());
    assert!(matches!(
        result.err(),
        Some(SceneRegistryError::DuplicateName { .. })
    ));
    assert_eq!(server.scenes_count(), 1);
}

#[test]
fn destroying_a_missing_scene_is_not_found() {
    let mut server = SceneServer::new(ServerConfig::default());
    let result = server.destroy_scene("nowhere");
    assert!(matches!(
        result.err(),
        Some(SceneRegistryError::NotFound { .. })
    ));
}

#[test]
fn observer_attached_in_created_hook_sees_the_first_change() {
    let mut server = SceneServer::new(ServerConfig::default());

    let log = new_log();
    let hook_log = log.clone();
    server.on_scene_created(move |scene| {
        let log = hook_log.clone();
        scene.subscribe(move |change, _user, _entity| {
            log.lock().unwrap().push("deny");
            change.deny();
        });
    });

    // The notification fires inside create_scene, so the observer is in
    // place before any change can possibly be proposed
    let entity = server
        .create_scene("arena", SceneConfig::default())
        .expect("scene name is unique")
        .spawn_entity();

    let outcome = server
        .propose_change(
            "arena",
            entity,
            UserKey::LOCAL,
            ChangeKind::ComponentAdded,
            TRANSFORM,
            vec![1],
        )
        .expect("scene, entity and user all exist");

    assert_eq!(outcome, ChangeOutcome::Rejected);
    assert_eq!(entries(&log), vec!["deny"]);
}

#[test]
fn destroyed_hook_sees_a_still_valid_scene() {
    let mut server = SceneServer::new(ServerConfig::default());
    let seen: Arc<Mutex<Vec<(String, usize)>>> = Arc::new(Mutex::new(Vec::new()));

    let hook_seen = seen.clone();
    server.on_scene_destroyed(move |scene| {
        hook_seen
            .lock()
            .unwrap()
            .push((scene.name().to_string(), scene.entity_count()));
    });

    {
        let mut scene = server
            .create_scene("arena", SceneConfig::default())
            .expect("scene name is unique");
        scene.spawn_entity();
        scene.spawn_entity();
    }
    server.destroy_scene("arena").expect("scene exists");

    assert_eq!(*seen.lock().unwrap(), vec![("arena".to_string(), 2)]);
    assert!(!server.scene_exists("arena"));
}

#[test]
fn destruction_releases_attached_observers() {
    let mut server = SceneServer::new(ServerConfig::default());
    server
        .create_scene("arena", SceneConfig::default())
        .expect("scene name is unique");

    let log = new_log();
    server
        .scene_mut("arena")
        .subscribe(denying_observer(&log, "deny"));
    server.destroy_scene("arena").expect("scene exists");

    // A scene re-registered under the same name starts with a fresh,
    // empty intercept registry
    let entity = server
        .create_scene("arena", SceneConfig::default())
        .expect("scene name is unique again")
        .spawn_entity();
    assert_eq!(server.scene("arena").observer_count(), 0);

    let outcome = server
        .propose_change(
            "arena",
            entity,
            UserKey::LOCAL,
            ChangeKind::ComponentAdded,
            TRANSFORM,
            vec![1],
        )
        .expect("scene, entity and user all exist");
    assert_eq!(outcome, ChangeOutcome::Committed);
    assert!(entries(&log).is_empty());
}

#[test]
fn removed_lifecycle_hook_no_longer_fires() {
    let mut server = SceneServer::new(ServerConfig::default());

    let log = new_log();
    let hook_log = log.clone();
    let key = server.on_scene_created(move |scene| {
        let log = hook_log.clone();
        scene.subscribe(move |_change, _user, _entity| {
            log.lock().unwrap().push("observed");
        });
    });

    server.remove_lifecycle_hook(&key);
    // removing twice is a no-op
    server.remove_lifecycle_hook(&key);

    server
        .create_scene("arena", SceneConfig::default())
        .expect("scene name is unique");
    assert_eq!(server.scene("arena").observer_count(), 0);
}
