/// Property tests for observer ordering: invocation order equals
/// subscription order for arbitrary subscription sequences, dispatch stops
/// at the first denier, and unsubscribed observers are excluded.
use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

use proptest::prelude::*;

use scenesync_server::{
    ChangeKind, ChangeOutcome, ComponentKind, SceneConfig, SceneServer, ServerConfig, UserKey,
};

const HEALTH: ComponentKind = ComponentKind::new(3);

proptest! {
    #[test]
    fn invocation_order_matches_subscription_order(
        deny_flags in proptest::collection::vec(any::<bool>(), 0..16),
    ) {
        let mut server = SceneServer::new(ServerConfig::default());
        let entity = server
            .create_scene("arena", SceneConfig::default())
            .expect("scene name is unique")
            .spawn_entity();

        let log: Arc<Mutex<Vec<usize>>> = Arc::new(Mutex::new(Vec::new()));
        {
            let mut scene = server.scene_mut("arena");
            for (index, deny) in deny_flags.iter().cloned().enumerate() {
                let log = log.clone();
                scene.subscribe(move |change, _user, _entity| {
                    log.lock().unwrap().push(index);
                    if deny {
                        change.deny();
                    }
                });
            }
        }

        let outcome = server
            .propose_change(
                "arena",
                entity,
                UserKey::LOCAL,
                ChangeKind::ComponentUpdated,
                HEALTH,
                vec![0],
            )
            .expect("scene, entity and user all exist");

        let first_denier = deny_flags.iter().position(|flag| *flag);
        let expected: Vec<usize> = match first_denier {
            Some(stop) => (0..=stop).collect(),
            None => (0..deny_flags.len()).collect(),
        };
        prop_assert_eq!(log.lock().unwrap().clone(), expected);

        let expected_outcome = if first_denier.is_some() {
            ChangeOutcome::Rejected
        } else {
            ChangeOutcome::Committed
        };
        prop_assert_eq!(outcome, expected_outcome);
    }

    #[test]
    fn unsubscribed_observers_are_excluded_in_order(
        count in 1usize..12,
        removals in proptest::collection::vec(any::<prop::sample::Index>(), 0..6),
    ) {
        let mut server = SceneServer::new(ServerConfig::default());
        let entity = server
            .create_scene("arena", SceneConfig::default())
            .expect("scene name is unique")
            .spawn_entity();

        let log: Arc<Mutex<Vec<usize>>> = Arc::new(Mutex::new(Vec::new()));
        let mut keys = Vec::new();
        {
            let mut scene = server.scene_mut("arena");
            for index in 0..count {
                let log = log.clone();
                keys.push(scene.subscribe(move |_change, _user, _entity| {
                    log.lock().unwrap().push(index);
                }));
            }
        }

        // Repeats in `removals` exercise unsubscribe idempotency
        let mut removed = HashSet::new();
        {
            let mut scene = server.scene_mut("arena");
            for sample in &removals {
                let position = sample.index(count);
                removed.insert(position);
                scene.unsubscribe(&keys[position]);
            }
        }

        let outcome = server
            .propose_change(
                "arena",
                entity,
                UserKey::LOCAL,
                ChangeKind::ComponentUpdated,
                HEALTH,
                vec![0],
            )
            .expect("scene, entity and user all exist");
        prop_assert_eq!(outcome, ChangeOutcome::Committed);

        let expected: Vec<usize> = (0..count)
            .filter(|index| !removed.contains(index))
            .collect();
        prop_assert_eq!(log.lock().unwrap().clone(), expected);
    }
}
