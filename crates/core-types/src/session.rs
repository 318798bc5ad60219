//! Replay session lifecycle types.

use serde::{Deserialize, Serialize};

use crate::ReportId;

/// Session lifecycle is strictly linear:
/// `Idle -> Replaying -> {Succeeded | Failed} -> Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplayStatus {
    Idle,
    Replaying,
    Succeeded,
    Failed,
}

/// Transient state of one replay run, owned exclusively by the
/// orchestrator. At most one session exists process-wide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaySession {
    pub report_id: ReportId,
    pub total_steps: u32,
    pub completed_steps: u32,
    pub status: ReplayStatus,
}

impl ReplaySession {
    pub fn begin(report_id: ReportId, total_steps: u32) -> Self {
        Self {
            report_id,
            total_steps,
            completed_steps: 0,
            status: ReplayStatus::Replaying,
        }
    }

    /// Advance progress by one step. `completed_steps` only increases and
    /// never exceeds `total_steps`.
    pub fn advance(&mut self) -> u32 {
        if self.completed_steps < self.total_steps {
            self.completed_steps += 1;
        }
        self.completed_steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_is_monotone_and_bounded() {
        let mut session = ReplaySession::begin(ReportId::new(), 2);
        assert_eq!(session.advance(), 1);
        assert_eq!(session.advance(), 2);
        assert_eq!(session.advance(), 2);
        assert_eq!(session.completed_steps, 2);
    }
}
