use retrace_core_types::PortError;
use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum PlayerError {
    /// Dispatching the action against the page failed.
    #[error("page action failed: {0}")]
    Page(#[from] PortError),

    /// The caller cancelled before the action was dispatched.
    #[error("action cancelled")]
    Cancelled,
}
