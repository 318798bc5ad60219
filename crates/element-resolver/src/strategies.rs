//! Individual resolution strategies.
//!
//! Each strategy is a pure lookup over [`DomQueryPort`]: it either yields
//! a candidate handle or misses. A lookup error (malformed selector or
//! XPath, backend fault) is downgraded to a miss so the chain can fall
//! through to the next strategy.

use retrace_core_types::{ElementDescriptor, ElementHandle};
use tracing::debug;

use crate::ports::DomQueryPort;
use crate::types::ResolveStrategy;

/// Run a single strategy against the live document.
///
/// Returns `None` when the descriptor lacks the field the strategy needs,
/// when the lookup misses, or when the lookup errors.
pub async fn run_strategy(
    dom: &dyn DomQueryPort,
    strategy: ResolveStrategy,
    descriptor: &ElementDescriptor,
) -> Option<ElementHandle> {
    let outcome = match strategy {
        ResolveStrategy::Id => {
            let id = descriptor.id.as_deref()?;
            dom.by_id(id).await
        }
        ResolveStrategy::Selector => {
            let selector = descriptor.selector.as_deref()?;
            dom.by_selector(selector).await
        }
        ResolveStrategy::Text => {
            let text = descriptor.text.as_deref()?;
            dom.by_text(text, descriptor.tag.as_deref()).await
        }
        ResolveStrategy::XPath => {
            let xpath = descriptor.xpath.as_deref()?;
            dom.by_xpath(xpath).await
        }
    };

    match outcome {
        Ok(found) => found,
        Err(err) => {
            debug!("strategy {} errored, treating as miss: {}", strategy.name(), err);
            None
        }
    }
}
