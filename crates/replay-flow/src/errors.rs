//! Session-level error taxonomy.
//!
//! Strategy-level faults never reach this layer; they are swallowed as
//! misses inside the resolver. Everything here terminates the session —
//! no error may leave it stuck in `Replaying`.

use action_player::PlayerError;
use element_resolver::ResolveError;
use retrace_core_types::PortError;
use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum ReplayError {
    /// Resolution exhausted strategies x attempts for one step.
    #[error("step {step} not resolvable: {source}")]
    ElementNotResolvable {
        step: usize,
        #[source]
        source: ResolveError,
    },

    /// Performing the action against the live element failed.
    #[error("step {step} failed: {source}")]
    ActionFault {
        step: usize,
        #[source]
        source: PlayerError,
    },

    /// Starting or stopping the underlying recording session failed.
    #[error("recording session fault: {0}")]
    RecordingSessionFault(PortError),

    /// Persistence acknowledgment failed. The appended iteration stays on
    /// the in-memory report; retrying is the caller's responsibility.
    #[error("persistence fault: {0}")]
    TransportFault(PortError),

    /// The caller cancelled the replay at a suspension point.
    #[error("replay cancelled")]
    Cancelled,

    #[error("internal error: {0}")]
    Internal(String),
}
