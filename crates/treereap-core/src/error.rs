use thiserror::Error;
use tracing::debug;

/// Internal failure taxonomy for sweep operations.
///
/// Nothing here ever crosses the public boundary: every instance is
/// absorbed by [`best_effort`] before an entry point returns.
#[derive(Debug, Error)]
pub enum ReapError {
    #[error("failed to enumerate children of pid {pid}: {reason}")]
    Discovery { pid: u32, reason: String },

    #[error("failed to signal pid {pid}: {reason}")]
    Signal { pid: u32, reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Run to completion, keep the value on success, discard the failure.
///
/// The termination contract is best-effort: a target that is already gone
/// is an achieved goal, not an error. Applying this one combinator at
/// every fallible call site keeps that policy auditable as one decision.
pub fn best_effort<T, E: std::fmt::Display>(context: &str, result: Result<T, E>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            debug!(%error, "{context} failed, continuing sweep");
            None
        }
    }
}
