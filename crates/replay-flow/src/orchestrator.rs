//! Replay orchestrator state machine.

use std::sync::Arc;
use std::time::Duration;

use action_player::{ActionPlayer, PlayerError};
use element_resolver::{ElementResolver, ResolveError};
use retrace_core_types::{
    InteractionRecord, Recording, ReplayStatus, Report, StepDescription, TempoPort, TokioTempo,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::errors::ReplayError;
use crate::policy::{PacingMode, ReplayPolicy};
use crate::ports::{OutcomePort, ProgressPort, RecorderPort, ScreenshotPort, StorePort};
use crate::session::SessionSlot;

/// Terminal outcome of a replay request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReplayOutcome {
    /// Another session is active; the request was rejected with no state
    /// change. Benign no-op.
    AlreadyRunning,

    /// The report's first recording has no replayable interactions.
    /// Benign early exit; no recording session was started.
    NothingToReplay,

    /// Every filtered step was resolved and performed; the captured trace
    /// was appended as `iteration`.
    Completed { iteration: u32, reference: String },
}

pub struct ReplayOrchestrator {
    resolver: Arc<dyn ElementResolver>,
    player: Arc<dyn ActionPlayer>,
    recorder: Arc<dyn RecorderPort>,
    progress: Arc<dyn ProgressPort>,
    store: Arc<dyn StorePort>,
    screenshot: Arc<dyn ScreenshotPort>,
    outcome: Arc<dyn OutcomePort>,
    tempo: Arc<dyn TempoPort>,
    policy: ReplayPolicy,
    slot: SessionSlot,
}

impl ReplayOrchestrator {
    pub fn builder(policy: ReplayPolicy) -> ReplayOrchestratorBuilder {
        ReplayOrchestratorBuilder::new(policy)
    }

    /// Observable session status; `Idle` whenever no session is active.
    pub fn status(&self) -> ReplayStatus {
        self.slot.status()
    }

    /// Replay the report's first recording against the live page.
    ///
    /// Steps execute strictly sequentially; suspension occurs at every
    /// pacing wait, resolution backoff and collaborator call, and the
    /// cancellation token is honored at each of them. Terminal states
    /// always re-arm the session slot to `Idle`.
    #[instrument(skip_all, fields(report = %report.id))]
    pub async fn replay(
        &self,
        report: &mut Report,
        cancel: CancellationToken,
    ) -> Result<ReplayOutcome, ReplayError> {
        let timeline: Vec<InteractionRecord> = report
            .source_recording()
            .map(|recording| {
                recording
                    .timeline
                    .iter()
                    .filter(|record| record.kind.is_replayable())
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if timeline.is_empty() {
            info!("no replayable interactions, nothing to do");
            return Ok(ReplayOutcome::NothingToReplay);
        }

        if !self.slot.try_begin(report.id.clone(), timeline.len() as u32) {
            warn!("replay already in progress, rejecting request");
            return Ok(ReplayOutcome::AlreadyRunning);
        }

        match self.run(report, &timeline, &cancel).await {
            Ok(outcome) => {
                self.slot.finish(ReplayStatus::Succeeded);
                if let ReplayOutcome::Completed { reference, .. } = &outcome {
                    self.outcome.success(reference).await;
                }
                Ok(outcome)
            }
            Err(err) => {
                warn!("replay failed: {}", err);
                // Defensive stop; idempotent by contract. The partial
                // trace is dropped, only the failure is surfaced.
                if let Err(stop_err) = self.recorder.stop().await {
                    warn!("failed to stop recording session: {}", stop_err);
                }
                self.outcome.failure(&describe_steps(&timeline)).await;
                self.slot.finish(ReplayStatus::Failed);
                Err(err)
            }
        }
    }

    async fn run(
        &self,
        report: &mut Report,
        timeline: &[InteractionRecord],
        cancel: &CancellationToken,
    ) -> Result<ReplayOutcome, ReplayError> {
        let handle = self
            .recorder
            .start()
            .await
            .map_err(ReplayError::RecordingSessionFault)?;
        debug!("recording session started: {:?}", handle);

        let mut previous_offset = Duration::ZERO;
        for (index, record) in timeline.iter().enumerate() {
            let step = index + 1;

            self.pace(record, &mut previous_offset, cancel).await?;
            self.ensure_live(cancel)?;

            let resolved = self
                .resolver
                .resolve(&record.target, self.policy.max_attempts, cancel)
                .await
                .map_err(|source| match source {
                    ResolveError::Cancelled => ReplayError::Cancelled,
                    source => ReplayError::ElementNotResolvable { step, source },
                })?;
            self.ensure_live(cancel)?;

            self.player
                .perform(resolved.handle, record, cancel)
                .await
                .map_err(|source| match source {
                    PlayerError::Cancelled => ReplayError::Cancelled,
                    source => ReplayError::ActionFault { step, source },
                })?;

            if let Some((completed, total)) = self.slot.advance() {
                debug!("step {}/{} performed", completed, total);
                self.progress.publish(completed, total).await;
            }
        }

        let trace = self
            .recorder
            .stop()
            .await
            .map_err(ReplayError::RecordingSessionFault)?;

        let screenshot = self.screenshot.capture().await;
        if screenshot.is_none() {
            debug!("screenshot not captured, persisting without one");
        }

        let iteration = report.next_iteration();
        report.append_iteration(Recording::iteration(iteration, trace, screenshot));
        self.persist(report).await?;
        // The review flag follows the store ack; on a persistence fault
        // the appended recording is kept but the report is not flagged.
        report.mark_needs_review();

        let reference = format!("{}#{}", report.id, iteration);
        info!("replay complete, appended iteration {}", iteration);
        Ok(ReplayOutcome::Completed {
            iteration,
            reference,
        })
    }

    /// Wait out the step's pacing delay, honoring cancellation.
    async fn pace(
        &self,
        record: &InteractionRecord,
        previous_offset: &mut Duration,
        cancel: &CancellationToken,
    ) -> Result<(), ReplayError> {
        let wait = match self.policy.pacing {
            PacingMode::Fixed(delay) => delay,
            PacingMode::Relative => {
                let delta = record.relative_time.saturating_sub(*previous_offset);
                *previous_offset = record.relative_time;
                delta
            }
        };

        if wait.is_zero() {
            return Ok(());
        }

        tokio::select! {
            _ = cancel.cancelled() => Err(ReplayError::Cancelled),
            _ = self.tempo.sleep(wait) => Ok(()),
        }
    }

    fn ensure_live(&self, cancel: &CancellationToken) -> Result<(), ReplayError> {
        if cancel.is_cancelled() {
            return Err(ReplayError::Cancelled);
        }
        Ok(())
    }

    async fn persist(&self, report: &Report) -> Result<(), ReplayError> {
        match self.store.save(report).await {
            Ok(()) => Ok(()),
            Err(err) if self.policy.retry_persist => {
                warn!("persistence failed, retrying once: {}", err);
                self.store
                    .save(report)
                    .await
                    .map_err(ReplayError::TransportFault)
            }
            Err(err) => Err(ReplayError::TransportFault(err)),
        }
    }
}

/// Ordered human-readable rendering of the filtered timeline, used for
/// the manual fallback path.
fn describe_steps(timeline: &[InteractionRecord]) -> Vec<StepDescription> {
    timeline
        .iter()
        .enumerate()
        .map(|(index, record)| StepDescription::from_record(index + 1, record))
        .collect()
}

pub struct ReplayOrchestratorBuilder {
    policy: ReplayPolicy,
    resolver: Option<Arc<dyn ElementResolver>>,
    player: Option<Arc<dyn ActionPlayer>>,
    recorder: Option<Arc<dyn RecorderPort>>,
    progress: Option<Arc<dyn ProgressPort>>,
    store: Option<Arc<dyn StorePort>>,
    screenshot: Option<Arc<dyn ScreenshotPort>>,
    outcome: Option<Arc<dyn OutcomePort>>,
    tempo: Option<Arc<dyn TempoPort>>,
}

impl ReplayOrchestratorBuilder {
    pub fn new(policy: ReplayPolicy) -> Self {
        Self {
            policy,
            resolver: None,
            player: None,
            recorder: None,
            progress: None,
            store: None,
            screenshot: None,
            outcome: None,
            tempo: None,
        }
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn ElementResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn with_player(mut self, player: Arc<dyn ActionPlayer>) -> Self {
        self.player = Some(player);
        self
    }

    pub fn with_recorder(mut self, recorder: Arc<dyn RecorderPort>) -> Self {
        self.recorder = Some(recorder);
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressPort>) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn with_store(mut self, store: Arc<dyn StorePort>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_screenshot(mut self, screenshot: Arc<dyn ScreenshotPort>) -> Self {
        self.screenshot = Some(screenshot);
        self
    }

    pub fn with_outcome(mut self, outcome: Arc<dyn OutcomePort>) -> Self {
        self.outcome = Some(outcome);
        self
    }

    /// Override the tempo, mainly for deterministic tests. Defaults to
    /// the tokio timer.
    pub fn with_tempo(mut self, tempo: Arc<dyn TempoPort>) -> Self {
        self.tempo = Some(tempo);
        self
    }

    pub fn build(self) -> Result<ReplayOrchestrator, ReplayError> {
        Ok(ReplayOrchestrator {
            resolver: self
                .resolver
                .ok_or_else(|| ReplayError::Internal("resolver not configured".into()))?,
            player: self
                .player
                .ok_or_else(|| ReplayError::Internal("player not configured".into()))?,
            recorder: self
                .recorder
                .ok_or_else(|| ReplayError::Internal("recorder port not configured".into()))?,
            progress: self
                .progress
                .ok_or_else(|| ReplayError::Internal("progress port not configured".into()))?,
            store: self
                .store
                .ok_or_else(|| ReplayError::Internal("store port not configured".into()))?,
            screenshot: self
                .screenshot
                .ok_or_else(|| ReplayError::Internal("screenshot port not configured".into()))?,
            outcome: self
                .outcome
                .ok_or_else(|| ReplayError::Internal("outcome port not configured".into()))?,
            tempo: self.tempo.unwrap_or_else(|| Arc::new(TokioTempo)),
            policy: self.policy,
            slot: SessionSlot::new(),
        })
    }
}
