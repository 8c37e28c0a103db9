use std::sync::{Arc, Mutex};

use scenesync_server::{Change, EntityId, UserKey};

/// Shared log the recording observers append their labels to, in
/// invocation order.
pub type InvocationLog = Arc<Mutex<Vec<&'static str>>>;

pub fn new_log() -> InvocationLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn entries(log: &InvocationLog) -> Vec<&'static str> {
    log.lock().unwrap().clone()
}

/// An observer that records its label and lets the change through.
pub fn recording_observer(
    log: &InvocationLog,
    label: &'static str,
) -> impl Fn(&Change, UserKey, EntityId) + Send + Sync + 'static {
    let log = log.clone();
    move |_, _, _| log.lock().unwrap().push(label)
}

/// An observer that records its label and vetoes the change.
pub fn denying_observer(
    log: &InvocationLog,
    label: &'static str,
) -> impl Fn(&Change, UserKey, EntityId) + Send + Sync + 'static {
    let log = log.clone();
    move |change, _, _| {
        log.lock().unwrap().push(label);
        change.deny();
    }
}
