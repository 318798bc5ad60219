//! Collaborator port contracts.
//!
//! The orchestrator is a pure in-process layer over these contracts; no
//! file formats or wire protocols are defined here.

use async_trait::async_trait;
use retrace_core_types::{PortError, Report, Screenshot, StepDescription, Trace};

/// Handle to an in-progress recording session.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecorderHandle(pub String);

/// Recording infrastructure capturing the replay's own trace.
#[async_trait]
pub trait RecorderPort: Send + Sync {
    async fn start(&self) -> Result<RecorderHandle, PortError>;

    /// Stop the session and return its trace. Must be idempotent and
    /// callable after a faulted replay; a stop without a live session
    /// returns an empty trace.
    async fn stop(&self) -> Result<Trace, PortError>;
}

/// Fire-and-forget progress sink, called after every performed step.
#[async_trait]
pub trait ProgressPort: Send + Sync {
    async fn publish(&self, completed: u32, total: u32);
}

/// Durable storage for the report aggregate.
#[async_trait]
pub trait StorePort: Send + Sync {
    /// Persist the report after a new iteration has been appended.
    async fn save(&self, report: &Report) -> Result<(), PortError>;
}

/// Optional page capture attached to the persisted iteration.
#[async_trait]
pub trait ScreenshotPort: Send + Sync {
    /// `None` is a valid, non-fatal outcome; persistence proceeds with a
    /// not-captured marker.
    async fn capture(&self) -> Option<Screenshot>;
}

/// User-facing outcome surface.
#[async_trait]
pub trait OutcomePort: Send + Sync {
    /// Success prompt carrying a copyable diagnostic reference.
    async fn success(&self, reference: &str);

    /// Failure prompt carrying the ordered original-step descriptions for
    /// the manual fallback path.
    async fn failure(&self, steps: &[StepDescription]);
}
