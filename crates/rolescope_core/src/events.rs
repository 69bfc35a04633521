//! Progress events published by the pipeline.
//!
//! Presentation layers subscribe by implementing [`EventSink`]; the core
//! never writes to the console itself.

use std::fmt;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

/// Pipeline step an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PipelineStep {
    Acquire,
    Extract,
    Recommend,
    Validate,
}

impl PipelineStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStep::Acquire => "acquire",
            PipelineStep::Extract => "extract",
            PipelineStep::Recommend => "recommend",
            PipelineStep::Validate => "validate",
        }
    }
}

impl fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    Started,
    Succeeded,
    Failed,
    Warning,
}

/// A single progress notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineEvent {
    pub ts: DateTime<Utc>,
    pub step: PipelineStep,
    pub kind: EventKind,
    pub message: String,
}

impl PipelineEvent {
    pub fn new(step: PipelineStep, kind: EventKind, message: impl Into<String>) -> Self {
        Self {
            ts: Utc::now(),
            step,
            kind,
            message: message.into(),
        }
    }

    pub fn started(step: PipelineStep, message: impl Into<String>) -> Self {
        Self::new(step, EventKind::Started, message)
    }

    pub fn succeeded(step: PipelineStep, message: impl Into<String>) -> Self {
        Self::new(step, EventKind::Succeeded, message)
    }

    pub fn failed(step: PipelineStep, message: impl Into<String>) -> Self {
        Self::new(step, EventKind::Failed, message)
    }

    pub fn warning(step: PipelineStep, message: impl Into<String>) -> Self {
        Self::new(step, EventKind::Warning, message)
    }
}

/// Receiver of pipeline events.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &PipelineEvent);
}

/// Forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: &PipelineEvent) {
        match event.kind {
            EventKind::Started | EventKind::Succeeded => {
                info!(step = %event.step, kind = ?event.kind, "{}", event.message)
            }
            EventKind::Warning => warn!(step = %event.step, "{}", event.message),
            EventKind::Failed => error!(step = %event.step, "{}", event.message),
        }
    }
}

/// Keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<PipelineEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<PipelineEvent> {
        self.events.lock().clone()
    }

    /// `(step, kind)` pairs in emission order.
    pub fn trace(&self) -> Vec<(PipelineStep, EventKind)> {
        self.events.lock().iter().map(|e| (e.step, e.kind)).collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: &PipelineEvent) {
        self.events.lock().push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        sink.emit(&PipelineEvent::started(PipelineStep::Extract, "scanning"));
        sink.emit(&PipelineEvent::warning(PipelineStep::Extract, "bad line"));
        sink.emit(&PipelineEvent::succeeded(PipelineStep::Extract, "done"));

        assert_eq!(
            sink.trace(),
            vec![
                (PipelineStep::Extract, EventKind::Started),
                (PipelineStep::Extract, EventKind::Warning),
                (PipelineStep::Extract, EventKind::Succeeded),
            ]
        );
        assert_eq!(sink.events()[1].message, "bad line");
    }

    #[test]
    fn test_event_serialization() {
        let event = PipelineEvent::failed(PipelineStep::Recommend, "HTTP 500");
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["step"], "recommend");
        assert_eq!(json["kind"], "failed");
        assert_eq!(json["message"], "HTTP 500");
    }
}
