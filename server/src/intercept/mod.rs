pub(crate) mod change;
pub(crate) mod dispatcher;
pub(crate) mod error;
pub(crate) mod registry;

pub use change::{Change, ChangeKind, Decision};
pub use dispatcher::{DispatchResult, InterceptDispatcher, ObserverDiagnostic, Verdict};
pub use error::ObserverError;
pub use registry::{InterceptRegistry, ObserverKey};
