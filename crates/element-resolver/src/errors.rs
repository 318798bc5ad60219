//! Error types for element resolution.

use thiserror::Error;

/// Resolution error. Strategy-level faults never surface here; they are
/// swallowed as misses inside the attempt loop.
#[derive(Debug, Error, Clone)]
pub enum ResolveError {
    /// No strategy produced a live match within the attempt budget.
    /// Terminal for the current replay step.
    #[error("element not found after {attempts} attempts: {target}")]
    NotFound { attempts: u32, target: String },

    /// The caller cancelled mid-resolution; remaining attempts and
    /// backoffs are abandoned.
    #[error("resolution cancelled")]
    Cancelled,
}
