use thiserror::Error;

/// Failures raised by a single observer during dispatch. Diagnostic-only:
/// a failing observer degrades to "did not veto" and never aborts the
/// dispatch loop or the enclosing change proposal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObserverError {
    /// Observer panicked while inspecting the change
    #[error("Observer panicked during invocation: {message}")]
    Panicked { message: String },

    /// Observer exceeded the configured per-invocation time budget
    #[error("Observer ran for {elapsed_ms}ms, exceeding its {budget_ms}ms budget")]
    TimedOut { elapsed_ms: u64, budget_ms: u64 },
}
