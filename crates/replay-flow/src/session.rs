//! Single-session slot.
//!
//! The slot is the only shared mutable resource in the engine. Entry is
//! an explicit check-and-set: a new session is rejected, never queued,
//! while one is active. `None` means `Idle`.

use parking_lot::Mutex;
use retrace_core_types::{ReplaySession, ReplayStatus, ReportId};

#[derive(Default)]
pub struct SessionSlot {
    inner: Mutex<Option<ReplaySession>>,
}

impl SessionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check-and-set entry guard. Returns `false` while a session is
    /// active, leaving it untouched.
    pub fn try_begin(&self, report_id: ReportId, total_steps: u32) -> bool {
        let mut slot = self.inner.lock();
        if slot.is_some() {
            return false;
        }
        *slot = Some(ReplaySession::begin(report_id, total_steps));
        true
    }

    /// Advance progress of the active session, returning the updated
    /// `(completed, total)` pair.
    pub fn advance(&self) -> Option<(u32, u32)> {
        let mut slot = self.inner.lock();
        let session = slot.as_mut()?;
        let completed = session.advance();
        Some((completed, session.total_steps))
    }

    /// Record the terminal status, then unconditionally re-arm to `Idle`
    /// so a subsequent replay request is always possible.
    pub fn finish(&self, status: ReplayStatus) -> Option<ReplaySession> {
        let mut slot = self.inner.lock();
        let mut session = slot.take()?;
        session.status = status;
        Some(session)
    }

    pub fn status(&self) -> ReplayStatus {
        self.inner
            .lock()
            .as_ref()
            .map(|session| session.status)
            .unwrap_or(ReplayStatus::Idle)
    }

    pub fn snapshot(&self) -> Option<ReplaySession> {
        self.inner.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_begin_is_rejected_while_active() {
        let slot = SessionSlot::new();
        assert!(slot.try_begin(ReportId::new(), 3));
        assert!(!slot.try_begin(ReportId::new(), 5));

        let snapshot = slot.snapshot().expect("active session");
        assert_eq!(snapshot.total_steps, 3);
        assert_eq!(snapshot.status, ReplayStatus::Replaying);
    }

    #[test]
    fn finish_rearms_to_idle() {
        let slot = SessionSlot::new();
        assert!(slot.try_begin(ReportId::new(), 1));
        slot.advance();

        let ended = slot.finish(ReplayStatus::Succeeded).expect("session");
        assert_eq!(ended.status, ReplayStatus::Succeeded);
        assert_eq!(ended.completed_steps, 1);

        assert_eq!(slot.status(), ReplayStatus::Idle);
        assert!(slot.try_begin(ReportId::new(), 2));
    }
}
