use std::cell::Cell;

use crate::{
    scene::entity::{ComponentKind, EntityId},
    user::UserKey,
};

/// What a proposed change would do to its target entity.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum ChangeKind {
    ComponentAdded,
    ComponentUpdated,
    ComponentRemoved,
}

/// The decision slot carried by a [`Change`].
///
/// Starts `Undecided`. Observers may move it to `Denied` via
/// [`Change::deny`]; `Allowed` is only ever the absence of a deny, sealed
/// by the dispatcher once all observers have run.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Decision {
    Undecided,
    Allowed,
    Denied,
}

/// One proposed mutation to one entity, offered to observers before it may
/// touch authoritative state.
///
/// The description (scene, entity, user, kind, payload) is immutable; the
/// only capability observers hold is [`deny`](Change::deny). A `Change` is
/// built fresh per proposal and never outlives a single dispatch pass.
pub struct Change {
    scene: String,
    entity: EntityId,
    user: UserKey,
    kind: ChangeKind,
    component: ComponentKind,
    payload: Vec<u8>,
    decision: Cell<Decision>,
}

impl Change {
    pub(crate) fn new(
        scene: &str,
        entity: EntityId,
        user: UserKey,
        kind: ChangeKind,
        component: ComponentKind,
        payload: Vec<u8>,
    ) -> Self {
        Self {
            scene: scene.to_string(),
            entity,
            user,
            kind,
            component,
            payload,
            decision: Cell::new(Decision::Undecided),
        }
    }

    pub fn scene(&self) -> &str {
        &self.scene
    }

    pub fn entity(&self) -> EntityId {
        self.entity
    }

    pub fn user(&self) -> UserKey {
        self.user
    }

    pub fn kind(&self) -> ChangeKind {
        self.kind
    }

    pub fn component(&self) -> ComponentKind {
        self.component
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn decision(&self) -> Decision {
        self.decision.get()
    }

    /// Vetoes this change. Once denied, the decision cannot be reverted by
    /// any observer for the remainder of the dispatch pass. There is no
    /// corresponding "allow" call.
    pub fn deny(&self) {
        if self.decision.get() == Decision::Undecided {
            self.decision.set(Decision::Denied);
        }
    }

    /// Discards a deny issued by a misbehaving observer (panicked or over
    /// budget). Dispatcher-internal: the observer-facing contract stays
    /// write-once.
    pub(crate) fn rescind_deny(&self) {
        if self.decision.get() == Decision::Denied {
            self.decision.set(Decision::Undecided);
        }
    }

    /// Seals the decision as `Allowed` after all observers have run without
    /// a surviving deny.
    pub(crate) fn seal_allowed(&self) {
        if self.decision.get() == Decision::Undecided {
            self.decision.set(Decision::Allowed);
        }
    }

    pub(crate) fn into_payload(self) -> Vec<u8> {
        self.payload
    }
}
