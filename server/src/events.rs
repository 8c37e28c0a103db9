use std::mem;

use crate::{
    intercept::{ChangeKind, ObserverError, ObserverKey},
    scene::entity::{ComponentKind, EntityId},
    user::UserKey,
};

/// A mutation that passed interception and was applied to authoritative
/// state. `propagate` marks whether the transport layer should forward it
/// to other participants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedChange {
    pub scene: String,
    pub entity: EntityId,
    pub user: UserKey,
    pub kind: ChangeKind,
    pub component: ComponentKind,
    pub payload: Vec<u8>,
    pub propagate: bool,
}

/// A mutation vetoed during interception. Never propagated; the denial is
/// local-authority-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedChange {
    pub scene: String,
    pub entity: EntityId,
    pub user: UserKey,
    pub kind: ChangeKind,
    pub component: ComponentKind,
    pub denied_by: ObserverKey,
}

/// An observer failure that degraded to non-veto during some dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObserverIncident {
    pub scene: String,
    pub observer: ObserverKey,
    pub error: ObserverError,
}

/// Outbound event buffer filled by the server as changes are proposed, and
/// drained by the embedder (typically once per loop iteration) to drive
/// propagation and diagnostics.
pub struct SyncEvents {
    spawns: Vec<(String, EntityId)>,
    committed: Vec<CommittedChange>,
    rejected: Vec<RejectedChange>,
    incidents: Vec<ObserverIncident>,
    empty: bool,
}

impl SyncEvents {
    pub(crate) fn new() -> Self {
        Self {
            spawns: Vec::new(),
            committed: Vec::new(),
            rejected: Vec::new(),
            incidents: Vec::new(),
            empty: true,
        }
    }

    // Public

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn has_spawns(&self) -> bool {
        !self.spawns.is_empty()
    }
    pub fn take_spawns(&mut self) -> Vec<(String, EntityId)> {
        mem::take(&mut self.spawns)
    }

    pub fn has_committed(&self) -> bool {
        !self.committed.is_empty()
    }
    pub fn take_committed(&mut self) -> Vec<CommittedChange> {
        mem::take(&mut self.committed)
    }

    pub fn has_rejected(&self) -> bool {
        !self.rejected.is_empty()
    }
    pub fn take_rejected(&mut self) -> Vec<RejectedChange> {
        mem::take(&mut self.rejected)
    }

    pub fn has_incidents(&self) -> bool {
        !self.incidents.is_empty()
    }
    pub fn take_incidents(&mut self) -> Vec<ObserverIncident> {
        mem::take(&mut self.incidents)
    }

    // Crate-public

    pub(crate) fn push_spawn(&mut self, scene: &str, entity: EntityId) {
        self.spawns.push((scene.to_string(), entity));
        self.empty = false;
    }

    pub(crate) fn push_committed(&mut self, committed: CommittedChange) {
        self.committed.push(committed);
        self.empty = false;
    }

    pub(crate) fn push_rejected(&mut self, rejected: RejectedChange) {
        self.rejected.push(rejected);
        self.empty = false;
    }

    pub(crate) fn push_incident(&mut self, incident: ObserverIncident) {
        self.incidents.push(incident);
        self.empty = false;
    }
}
