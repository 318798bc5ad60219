//! Retry loop around the strategy fallback chain.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use retrace_core_types::{ElementDescriptor, TempoPort};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::errors::ResolveError;
use crate::ports::DomQueryPort;
use crate::strategies::run_strategy;
use crate::types::{ResolveStrategy, ResolvedElement};

/// Default attempt budget per step.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default pause between attempts.
pub const DEFAULT_BACKOFF: Duration = Duration::from_millis(500);

/// Element resolver trait.
#[async_trait]
pub trait ElementResolver: Send + Sync {
    /// Resolve a descriptor onto a live, attached element.
    ///
    /// Within a single attempt every strategy is tried in fallback order;
    /// between attempts the resolver sleeps a fixed backoff. Exhausting
    /// `max_attempts` yields [`ResolveError::NotFound`]. The token is
    /// checked before each attempt and interrupts the backoff wait.
    async fn resolve(
        &self,
        descriptor: &ElementDescriptor,
        max_attempts: u32,
        cancel: &CancellationToken,
    ) -> Result<ResolvedElement, ResolveError>;
}

/// Default resolver implementation over a [`DomQueryPort`].
pub struct DefaultElementResolver {
    dom: Arc<dyn DomQueryPort>,
    tempo: Arc<dyn TempoPort>,
    backoff: Duration,
}

impl DefaultElementResolver {
    pub fn new(dom: Arc<dyn DomQueryPort>, tempo: Arc<dyn TempoPort>) -> Self {
        Self {
            dom,
            tempo,
            backoff: DEFAULT_BACKOFF,
        }
    }

    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    /// One full pass over the strategy chain. A candidate is accepted only
    /// if it is still attached to the document.
    async fn try_once(&self, descriptor: &ElementDescriptor) -> Option<ResolvedElement> {
        for strategy in ResolveStrategy::fallback_chain() {
            let Some(handle) = run_strategy(self.dom.as_ref(), strategy, descriptor).await else {
                continue;
            };

            match self.dom.is_attached(handle).await {
                Ok(true) => {
                    return Some(ResolvedElement {
                        handle,
                        strategy,
                        attempt: 0,
                    });
                }
                Ok(false) => {
                    debug!(
                        "strategy {} matched detached node {}, rejecting",
                        strategy.name(),
                        handle
                    );
                }
                Err(err) => {
                    warn!(
                        "liveness check failed for {} ({}), treating as miss",
                        handle, err
                    );
                }
            }
        }
        None
    }
}

#[async_trait]
impl ElementResolver for DefaultElementResolver {
    async fn resolve(
        &self,
        descriptor: &ElementDescriptor,
        max_attempts: u32,
        cancel: &CancellationToken,
    ) -> Result<ResolvedElement, ResolveError> {
        let target = descriptor.describe();

        if !descriptor.is_resolvable() {
            warn!("descriptor carries no lookup fields: {}", target);
            return Err(ResolveError::NotFound {
                attempts: 0,
                target,
            });
        }

        let budget = max_attempts.max(1);
        for attempt in 1..=budget {
            if cancel.is_cancelled() {
                debug!("resolution of {} cancelled before attempt {}", target, attempt);
                return Err(ResolveError::Cancelled);
            }
            debug!("resolution attempt {}/{} for {}", attempt, budget, target);

            if let Some(mut resolved) = self.try_once(descriptor).await {
                resolved.attempt = attempt;
                info!(
                    "resolved {} via {} on attempt {}",
                    target,
                    resolved.strategy.name(),
                    attempt
                );
                return Ok(resolved);
            }

            if attempt < budget {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        debug!("resolution of {} cancelled during backoff", target);
                        return Err(ResolveError::Cancelled);
                    }
                    _ = self.tempo.sleep(self.backoff) => {}
                }
            }
        }

        Err(ResolveError::NotFound {
            attempts: budget,
            target,
        })
    }
}
