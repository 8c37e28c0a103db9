//! # Scenesync Server
//! An authoritative owner of replicated scene state that gates every
//! proposed entity modification through registered observers before the
//! mutation is committed and propagated to other participants.
//!
//! Every incoming modification (local or network-sourced) is wrapped in a
//! [`Change`] and offered to the target scene's observers in registration
//! order. Any observer may veto the change; a vetoed change is discarded
//! without side effects and is never propagated. Higher-level entity
//! actions deliberately bypass this gate: the gate covers state mutation
//! only, not behavior invocation.
//!
//! All mutation flows through `&mut SceneServer`, so a change is always
//! fully dispatched-and-applied before the next one begins. Embedders that
//! want parallelism across scenes should shard one server per scene;
//! observers are `Send + Sync` so servers may move between threads.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

mod error;
mod events;
mod intercept;
mod scene;
mod server;
mod user;

pub use error::SceneSyncError;
pub use events::{CommittedChange, ObserverIncident, RejectedChange, SyncEvents};
pub use intercept::{
    Change, ChangeKind, Decision, DispatchResult, InterceptDispatcher, InterceptRegistry,
    ObserverDiagnostic, ObserverError, ObserverKey, Verdict,
};
pub use scene::{
    ComponentKind, Entity, EntityId, Scene, SceneConfig, SceneMut, SceneRef, SceneRegistryError,
};
pub use server::{ChangeOutcome, LifecycleKey, SceneServer, ServerConfig};
pub use user::UserKey;
