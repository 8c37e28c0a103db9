// UserKey
/// Identifies the originating participant of a change: either a network
/// connection or the local process. Opaque to the interception pipeline;
/// observers use it only for policy decisions.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct UserKey(u64);

impl UserKey {
    /// The built-in key for the local process. Always connected.
    pub const LOCAL: UserKey = UserKey(0);

    pub fn to_u64(&self) -> u64 {
        self.0
    }

    pub fn from_u64(value: u64) -> Self {
        UserKey(value)
    }

    pub fn is_local(&self) -> bool {
        *self == Self::LOCAL
    }
}

// User
/// Server-side record for a connected participant.
pub(crate) struct User {
    /// Whether committed changes originated by this user are propagated
    /// onward to other participants.
    pub can_broadcast: bool,
}

impl User {
    pub(crate) fn new(can_broadcast: bool) -> Self {
        Self { can_broadcast }
    }
}
