//! Orchestrator policy knobs.

use std::time::Duration;

use element_resolver::DEFAULT_MAX_ATTEMPTS;

/// How step pacing waits are derived.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PacingMode {
    /// One fixed inter-step delay, regardless of recorded offsets. This
    /// matches the originally observed behavior and is the default.
    Fixed(Duration),

    /// Wait out the gap between consecutive recorded offsets. Coarse:
    /// ordering and approximate pacing only.
    Relative,
}

impl Default for PacingMode {
    fn default() -> Self {
        PacingMode::Fixed(Duration::from_millis(500))
    }
}

/// View of the replay policy consumed by the orchestrator.
#[derive(Clone, Debug)]
pub struct ReplayPolicy {
    /// Resolution attempt budget per step.
    pub max_attempts: u32,

    pub pacing: PacingMode,

    /// Retry a failed persistence acknowledgment once before surfacing
    /// the fault. Off by default.
    pub retry_persist: bool,
}

impl Default for ReplayPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            pacing: PacingMode::default(),
            retry_persist: false,
        }
    }
}
