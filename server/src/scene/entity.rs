use std::collections::HashMap;

// EntityId
/// Identifies an Entity within its Scene. Assigned by the Scene on spawn.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct EntityId(u64);

impl EntityId {
    pub fn to_u64(&self) -> u64 {
        self.0
    }

    pub fn from_u64(value: u64) -> Self {
        EntityId(value)
    }
}

// ComponentKind
/// Identifies one component slot on an Entity. The interception pipeline
/// treats component contents as opaque; the kind only selects which slot a
/// change targets.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct ComponentKind(u32);

impl ComponentKind {
    pub const fn new(value: u32) -> Self {
        ComponentKind(value)
    }

    pub fn to_u32(&self) -> u32 {
        self.0
    }
}

// Entity
/// One entity's authoritative component state: a map from component kind to
/// an opaque payload. Only the synchronization manager writes here, and
/// only after a change has passed interception.
pub struct Entity {
    components: HashMap<ComponentKind, Vec<u8>>,
}

impl Entity {
    pub(crate) fn new() -> Self {
        Self {
            components: HashMap::new(),
        }
    }

    pub fn has_component(&self, kind: &ComponentKind) -> bool {
        self.components.contains_key(kind)
    }

    pub fn component(&self, kind: &ComponentKind) -> Option<&[u8]> {
        self.components.get(kind).map(|payload| payload.as_slice())
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub(crate) fn insert_component(&mut self, kind: ComponentKind, payload: Vec<u8>) {
        self.components.insert(kind, payload);
    }

    pub(crate) fn remove_component(&mut self, kind: &ComponentKind) {
        self.components.remove(kind);
    }
}
