//! Recorded data model shared by the replay engine crates.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::RecordingId;

/// Kind of a recorded user interaction.
///
/// Every kind the recorder captures is kept so traces stay faithful;
/// only `Click` and `Input` are replayable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    Click,
    Input,
    Scroll,
    KeyPress,
    Navigation,
}

impl InteractionKind {
    pub fn is_replayable(&self) -> bool {
        matches!(self, InteractionKind::Click | InteractionKind::Input)
    }

    pub fn name(&self) -> &'static str {
        match self {
            InteractionKind::Click => "click",
            InteractionKind::Input => "input",
            InteractionKind::Scroll => "scroll",
            InteractionKind::KeyPress => "keypress",
            InteractionKind::Navigation => "navigation",
        }
    }
}

/// One recorded user interaction. Immutable once captured.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionRecord {
    pub kind: InteractionKind,

    /// Offset from the start of the recording session.
    pub relative_time: Duration,

    pub target: ElementDescriptor,

    /// Value entered for `Input` interactions.
    pub value: Option<String>,
}

impl InteractionRecord {
    pub fn new(kind: InteractionKind, relative_time: Duration, target: ElementDescriptor) -> Self {
        Self {
            kind,
            relative_time,
            target,
            value: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// Best-effort fingerprint of a DOM element captured at recording time.
///
/// Every field is optional; the descriptor is a hint set, not a key. Ids
/// and selectors rot faster than visible text, which drives the resolver's
/// strategy ordering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElementDescriptor {
    pub id: Option<String>,
    pub selector: Option<String>,
    pub text: Option<String>,
    pub tag: Option<String>,
    pub xpath: Option<String>,
}

impl ElementDescriptor {
    /// At least one field must be present for resolution to be attemptable.
    pub fn is_resolvable(&self) -> bool {
        self.id.is_some()
            || self.selector.is_some()
            || self.text.is_some()
            || self.xpath.is_some()
    }

    /// Human-readable rendering used by progress and fallback surfaces.
    pub fn describe(&self) -> String {
        if let Some(text) = self.text.as_deref().filter(|t| !t.trim().is_empty()) {
            let tag = self.tag.as_deref().unwrap_or("element");
            return format!("{} \"{}\"", tag, text.trim());
        }
        if let Some(id) = &self.id {
            return format!("element #{}", id);
        }
        if let Some(selector) = &self.selector {
            return format!("element matching {}", selector);
        }
        if let Some(xpath) = &self.xpath {
            return format!("element at {}", xpath);
        }
        match &self.tag {
            Some(tag) => format!("unidentified <{}>", tag),
            None => "unidentified element".to_string(),
        }
    }
}

/// Opaque backend node reference into the live document.
///
/// Ownership-free and only valid for the current replay step; liveness
/// must be re-checked before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementHandle(pub u64);

impl fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

/// Single timestamped event captured by the recording collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEvent {
    pub at: DateTime<Utc>,
    pub kind: String,
    #[serde(default)]
    pub detail: serde_json::Value,
}

/// Ordered event sequence produced by the recording infrastructure.
/// Opaque to the engine beyond being appended to a report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Trace {
    pub events: Vec<TraceEvent>,
}

impl Trace {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Captured page image attached to a persisted iteration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Screenshot(pub Vec<u8>);

/// One recording attached to a report: the original capture or a replay
/// iteration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recording {
    pub id: RecordingId,

    /// 1-based position in the report's recording history.
    pub iteration: u32,

    /// Interaction timeline; empty for replay iterations, whose content
    /// lives in the opaque `trace`.
    #[serde(default)]
    pub timeline: Vec<InteractionRecord>,

    #[serde(default)]
    pub trace: Trace,

    /// `None` means capture was unavailable, which is a valid outcome.
    pub screenshot: Option<Screenshot>,

    pub captured_at: DateTime<Utc>,
}

impl Recording {
    pub fn original(timeline: Vec<InteractionRecord>) -> Self {
        Self {
            id: RecordingId::new(),
            iteration: 1,
            timeline,
            trace: Trace::default(),
            screenshot: None,
            captured_at: Utc::now(),
        }
    }

    pub fn iteration(iteration: u32, trace: Trace, screenshot: Option<Screenshot>) -> Self {
        Self {
            id: RecordingId::new(),
            iteration,
            timeline: Vec::new(),
            trace,
            screenshot,
            captured_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Open,
    NeedsReview,
    Closed,
}

/// Externally owned bug report aggregate.
///
/// The engine only appends iterations and refreshes review metadata; prior
/// recordings are never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: crate::ReportId,
    pub title: String,
    pub status: ReportStatus,
    pub recordings: Vec<Recording>,
    pub updated_at: DateTime<Utc>,
}

impl Report {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: crate::ReportId::new(),
            title: title.into(),
            status: ReportStatus::Open,
            recordings: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    /// The recording replay runs against.
    pub fn source_recording(&self) -> Option<&Recording> {
        self.recordings.first()
    }

    pub fn next_iteration(&self) -> u32 {
        self.recordings.len() as u32 + 1
    }

    /// Append a replay iteration. Review flagging is a separate step,
    /// taken only once the store has acknowledged the save.
    pub fn append_iteration(&mut self, recording: Recording) {
        self.recordings.push(recording);
    }

    /// Flag the report for review and refresh its update timestamp.
    pub fn mark_needs_review(&mut self) {
        self.status = ReportStatus::NeedsReview;
        self.updated_at = Utc::now();
    }
}

/// Ordered human-readable step rendering for the manual fallback path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDescription {
    /// 1-based position in the original interaction order.
    pub index: usize,
    pub action: String,
    pub target: String,
}

impl StepDescription {
    pub fn from_record(index: usize, record: &InteractionRecord) -> Self {
        let action = match record.kind {
            InteractionKind::Input => match &record.value {
                Some(value) => format!("enter \"{}\" into", value),
                None => "clear".to_string(),
            },
            other => other.name().to_string(),
        };
        Self {
            index,
            action,
            target: record.target.describe(),
        }
    }
}

impl fmt::Display for StepDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {} {}", self.index, self.action, self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_resolvable_needs_a_lookup_field() {
        let empty = ElementDescriptor::default();
        assert!(!empty.is_resolvable());

        let tag_only = ElementDescriptor {
            tag: Some("button".into()),
            ..Default::default()
        };
        assert!(!tag_only.is_resolvable());

        let with_id = ElementDescriptor {
            id: Some("submit".into()),
            ..Default::default()
        };
        assert!(with_id.is_resolvable());
    }

    #[test]
    fn describe_prefers_visible_text() {
        let descriptor = ElementDescriptor {
            id: Some("go".into()),
            text: Some("Sign in".into()),
            tag: Some("button".into()),
            ..Default::default()
        };
        assert_eq!(descriptor.describe(), "button \"Sign in\"");
    }

    #[test]
    fn append_iteration_leaves_review_metadata_alone() {
        let mut report = Report::new("broken checkout");
        report.recordings.push(Recording::original(Vec::new()));
        let before = report.updated_at;

        let next = report.next_iteration();
        assert_eq!(next, 2);
        report.append_iteration(Recording::iteration(next, Trace::default(), None));

        assert_eq!(report.status, ReportStatus::Open);
        assert_eq!(report.recordings.len(), 2);
        assert_eq!(report.updated_at, before);
    }

    #[test]
    fn mark_needs_review_flags_and_touches() {
        let mut report = Report::new("broken checkout");
        let before = report.updated_at;

        report.mark_needs_review();

        assert_eq!(report.status, ReportStatus::NeedsReview);
        assert!(report.updated_at >= before);
    }

    #[test]
    fn step_description_renders_input_value() {
        let record = InteractionRecord::new(
            InteractionKind::Input,
            Duration::from_millis(1200),
            ElementDescriptor {
                id: Some("email".into()),
                ..Default::default()
            },
        )
        .with_value("user@example.com");

        let step = StepDescription::from_record(1, &record);
        assert_eq!(
            step.to_string(),
            "1. enter \"user@example.com\" into element #email"
        );
    }
}
