use std::{
    any::Any,
    panic::{catch_unwind, AssertUnwindSafe},
    time::{Duration, Instant},
};

use log::warn;

use super::{
    change::{Change, Decision},
    error::ObserverError,
    registry::{InterceptRegistry, ObserverKey},
};

/// A single observer failure surfaced out of a dispatch pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObserverDiagnostic {
    pub observer: ObserverKey,
    pub error: ObserverError,
}

/// The terminal decision a dispatch pass produced for its change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Allowed,
    /// Vetoed; `by` is the first (winning) denier, recorded for
    /// diagnostics only.
    Denied { by: ObserverKey },
}

/// Everything the synchronization manager needs to know about one dispatch
/// pass: the verdict, how many observers actually ran, and any failures
/// that degraded to non-veto along the way.
#[derive(Debug)]
pub struct DispatchResult {
    pub verdict: Verdict,
    pub invoked: usize,
    pub diagnostics: Vec<ObserverDiagnostic>,
}

/// Runs a single [`Change`] through a scene's current observer snapshot and
/// produces the final decision.
///
/// Observers run synchronously in registration order. The first surviving
/// deny short-circuits the pass; observers registered after the denier are
/// never invoked. With zero observers the change is vacuously allowed.
///
/// A misbehaving observer cannot corrupt the pass for the others: a panic
/// is caught and treated as non-veto, and an observer that overruns the
/// per-invocation budget has its deny (if any) rescinded. Both surface as
/// [`ObserverDiagnostic`]s in the result.
pub struct InterceptDispatcher {
    budget: Duration,
}

impl InterceptDispatcher {
    pub fn new(budget: Duration) -> Self {
        Self { budget }
    }

    pub fn dispatch(&self, change: &Change, registry: &InterceptRegistry) -> DispatchResult {
        let snapshot = registry.snapshot();

        let mut invoked = 0;
        let mut diagnostics = Vec::new();

        for (key, observer) in snapshot {
            let start = Instant::now();
            let outcome = catch_unwind(AssertUnwindSafe(|| {
                (*observer)(change, change.user(), change.entity())
            }));
            let elapsed = start.elapsed();
            invoked += 1;

            match outcome {
                Err(payload) => {
                    // A deny issued before the panic does not survive it
                    change.rescind_deny();
                    let message = panic_message(payload.as_ref());
                    warn!(
                        "Observer {:?} panicked while inspecting change to entity {:?}: {}",
                        key,
                        change.entity(),
                        message
                    );
                    diagnostics.push(ObserverDiagnostic {
                        observer: key,
                        error: ObserverError::Panicked { message },
                    });
                }
                Ok(()) if elapsed > self.budget => {
                    change.rescind_deny();
                    let error = ObserverError::TimedOut {
                        elapsed_ms: elapsed.as_millis() as u64,
                        budget_ms: self.budget.as_millis() as u64,
                    };
                    warn!("Observer {:?} overran its invocation budget: {}", key, error);
                    diagnostics.push(ObserverDiagnostic {
                        observer: key,
                        error,
                    });
                }
                Ok(()) => {
                    if change.decision() == Decision::Denied {
                        return DispatchResult {
                            verdict: Verdict::Denied { by: key },
                            invoked,
                            diagnostics,
                        };
                    }
                }
            }
        }

        change.seal_allowed();
        DispatchResult {
            verdict: Verdict::Allowed,
            invoked,
            diagnostics,
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "<non-string panic payload>".to_string()
    }
}
