use async_trait::async_trait;
use retrace_core_types::{ElementHandle, PortError};

/// Read-only view of the live document.
///
/// `Ok(None)` is a miss; `Err` means the lookup itself failed (malformed
/// selector or expression, backend fault) and is also treated as a miss
/// by the resolver.
#[async_trait]
pub trait DomQueryPort: Send + Sync {
    async fn by_id(&self, id: &str) -> Result<Option<ElementHandle>, PortError>;

    async fn by_selector(&self, selector: &str) -> Result<Option<ElementHandle>, PortError>;

    /// Text containment match, scoped to `tag` when present.
    async fn by_text(
        &self,
        text: &str,
        tag: Option<&str>,
    ) -> Result<Option<ElementHandle>, PortError>;

    async fn by_xpath(&self, xpath: &str) -> Result<Option<ElementHandle>, PortError>;

    /// Whether the node is still attached to the document.
    async fn is_attached(&self, handle: ElementHandle) -> Result<bool, PortError>;
}
