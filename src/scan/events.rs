// src/scan/events.rs
// =============================================================================
// Everything the scanner tells the outside world goes through ScanEvent.
//
// The scanner pushes events into a Reporter; what the reporter does with
// them (progress bar, JSON lines, a Vec in a test) is up to it.
// =============================================================================

use serde::Serialize;

use super::progress::Progress;
use crate::probe::{describe, label, Label, Outcome};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScanEvent {
    /// A pass over one base URL is starting (depth 0 is the target itself)
    PassStarted {
        url: String,
        depth: usize,
        total: usize,
    },
    /// Counters for the pass currently being drained
    Progress(Progress),
    /// An HTTP response that was not excluded
    Result {
        url: String,
        status: u16,
        label: Label,
        description: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        location: Option<String>,
    },
    /// A request that never got a response
    ErrorResult { url: String, message: String },
    /// The scan was cancelled; nothing follows
    Interrupted,
    /// Every pass finished; nothing follows
    Completed,
}

impl ScanEvent {
    /// Report event for a non-excluded outcome.
    ///
    /// Returns None for cancelled outcomes, which are never reported.
    pub fn from_outcome(url: &str, outcome: &Outcome) -> Option<Self> {
        let event = match outcome {
            Outcome::TransportError { message } => ScanEvent::ErrorResult {
                url: url.to_string(),
                message: message.clone(),
            },
            Outcome::Cancelled => return None,
            _ => ScanEvent::Result {
                url: url.to_string(),
                status: outcome.status().map(|s| s.as_u16()).unwrap_or_default(),
                label: label(outcome),
                description: describe(outcome),
                location: match outcome {
                    Outcome::Redirect { location, .. } => Some(location.clone()),
                    _ => None,
                },
            },
        };
        Some(event)
    }
}

/// How a scan ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Completed,
    Interrupted,
}

/// Sink for scan events
pub trait Reporter {
    fn report(&mut self, event: ScanEvent);
}

/// Collects every event, handy for tests and for callers that post-process
impl Reporter for Vec<ScanEvent> {
    fn report(&mut self, event: ScanEvent) {
        self.push(event);
    }
}
