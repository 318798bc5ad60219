//! Shared primitives for the retrace replay engine crates.

pub mod model;
pub mod session;
pub mod tempo;

use thiserror::Error;
use uuid::Uuid;

pub use model::*;
pub use session::*;
pub use tempo::*;

/// Error carried across the port boundaries to external collaborators.
///
/// Collaborator adapters map their own failures into this type; the
/// engine crates wrap it into their typed errors.
#[derive(Debug, Error, Clone)]
pub enum PortError {
    #[error("{message}")]
    Message { message: String },
}

impl PortError {
    pub fn new(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ReportId(pub String);

impl ReportId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for ReportId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ReportId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub struct RecordingId(pub String);

impl RecordingId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for RecordingId {
    fn default() -> Self {
        Self::new()
    }
}
