//! Player runtime.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use retrace_core_types::{ElementHandle, InteractionKind, InteractionRecord, TempoPort};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

use crate::errors::PlayerError;
use crate::ports::DomActionPort;

/// Default pause after each phase, letting page reactions (re-render,
/// validation) complete before the next phase begins.
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(300);

/// Default duration the transient highlight stays applied.
pub const DEFAULT_HIGHLIGHT: Duration = Duration::from_millis(600);

#[async_trait]
pub trait ActionPlayer: Send + Sync {
    /// Perform `record` against the resolved element.
    ///
    /// Non-replayable kinds are a no-op; they are filtered upstream, but
    /// the player stays total over [`InteractionKind`]. The token
    /// interrupts settle and highlight waits; a cancelled perform never
    /// dispatches the action.
    async fn perform(
        &self,
        handle: ElementHandle,
        record: &InteractionRecord,
        cancel: &CancellationToken,
    ) -> Result<(), PlayerError>;
}

pub struct DefaultActionPlayer {
    dom: Arc<dyn DomActionPort>,
    tempo: Arc<dyn TempoPort>,
    settle: Duration,
    highlight_for: Duration,
}

impl DefaultActionPlayer {
    pub fn new(dom: Arc<dyn DomActionPort>, tempo: Arc<dyn TempoPort>) -> Self {
        Self {
            dom,
            tempo,
            settle: DEFAULT_SETTLE,
            highlight_for: DEFAULT_HIGHLIGHT,
        }
    }

    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    pub fn with_highlight(mut self, highlight_for: Duration) -> Self {
        self.highlight_for = highlight_for;
        self
    }

    /// Settle pause between phases, interruptible by cancellation.
    async fn pause(&self, cancel: &CancellationToken) -> Result<(), PlayerError> {
        tokio::select! {
            _ = cancel.cancelled() => Err(PlayerError::Cancelled),
            _ = self.tempo.sleep(self.settle) => Ok(()),
        }
    }

    /// Apply the highlight, hold it, then restore the prior style. Purely
    /// cosmetic: port failures here are logged and swallowed so they cannot
    /// disturb the action or later resolution. Cancellation interrupts the
    /// hold; the prior style is still restored before returning.
    async fn flash_highlight(
        &self,
        handle: ElementHandle,
        cancel: &CancellationToken,
    ) -> Result<(), PlayerError> {
        let snapshot = match self.dom.apply_highlight(handle).await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!("failed to highlight {}: {}", handle, err);
                return Ok(());
            }
        };

        let hold = tokio::select! {
            _ = cancel.cancelled() => Err(PlayerError::Cancelled),
            _ = self.tempo.sleep(self.highlight_for) => Ok(()),
        };
        if let Err(err) = self.dom.restore_style(handle, snapshot).await {
            warn!("failed to restore style on {}: {}", handle, err);
        }
        hold
    }

    async fn dispatch(
        &self,
        handle: ElementHandle,
        record: &InteractionRecord,
    ) -> Result<(), PlayerError> {
        match record.kind {
            InteractionKind::Click => {
                // Both paths: some elements intercept the synthetic event,
                // others only react to direct activation.
                self.dom.dispatch_click(handle).await?;
                self.dom.activate(handle).await?;
            }
            InteractionKind::Input => {
                self.dom.focus(handle).await?;
                self.dom
                    .set_value(handle, record.value.as_deref().unwrap_or(""))
                    .await?;
                self.dom.emit_value_changed(handle).await?;
                self.dom.emit_commit_changed(handle).await?;
            }
            other => {
                debug!("skipping non-replayable interaction kind: {}", other.name());
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ActionPlayer for DefaultActionPlayer {
    #[instrument(skip_all, fields(kind = record.kind.name(), node = %handle))]
    async fn perform(
        &self,
        handle: ElementHandle,
        record: &InteractionRecord,
        cancel: &CancellationToken,
    ) -> Result<(), PlayerError> {
        self.dom.scroll_into_view(handle).await?;
        self.pause(cancel).await?;

        self.flash_highlight(handle, cancel).await?;
        self.pause(cancel).await?;

        self.dispatch(handle, record).await?;

        // Post-action settle: the next step's resolution must not begin
        // before page reactions to this action have had time to land.
        self.pause(cancel).await?;
        Ok(())
    }
}
