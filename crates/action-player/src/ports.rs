use async_trait::async_trait;
use retrace_core_types::{ElementHandle, PortError};

/// Inline style captured before the transient highlight so it can be
/// restored afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleSnapshot {
    pub css_text: String,
}

/// Mutating view of the live document.
#[async_trait]
pub trait DomActionPort: Send + Sync {
    /// Scroll the element into view, centered in the viewport.
    async fn scroll_into_view(&self, handle: ElementHandle) -> Result<(), PortError>;

    /// Apply the transient highlight, returning the prior inline style.
    async fn apply_highlight(&self, handle: ElementHandle) -> Result<StyleSnapshot, PortError>;

    async fn restore_style(
        &self,
        handle: ElementHandle,
        snapshot: StyleSnapshot,
    ) -> Result<(), PortError>;

    /// Raise a synthetic pointer-click event on the element.
    async fn dispatch_click(&self, handle: ElementHandle) -> Result<(), PortError>;

    /// Invoke the element's direct activation behavior. Paired with
    /// [`dispatch_click`](Self::dispatch_click) to cover handlers bound to
    /// either path.
    async fn activate(&self, handle: ElementHandle) -> Result<(), PortError>;

    async fn focus(&self, handle: ElementHandle) -> Result<(), PortError>;

    async fn set_value(&self, handle: ElementHandle, value: &str) -> Result<(), PortError>;

    /// Raise the value-changed ("input") notification.
    async fn emit_value_changed(&self, handle: ElementHandle) -> Result<(), PortError>;

    /// Raise the commit-changed ("change") notification.
    async fn emit_commit_changed(&self, handle: ElementHandle) -> Result<(), PortError>;
}
