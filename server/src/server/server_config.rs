use std::{default::Default, time::Duration};

/// Contains Config properties which will be used by the Server
#[derive(Clone)]
pub struct ServerConfig {
    /// Upper bound on a single observer invocation during dispatch. An
    /// observer that overruns it is treated as not having vetoed, and the
    /// overrun is surfaced as a diagnostic.
    pub observer_budget: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            observer_budget: Duration::from_millis(100),
        }
    }
}
