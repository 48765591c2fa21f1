// src/probe/classify.rs
// =============================================================================
// Turns a finished HTTP exchange into an Outcome and answers questions about
// it: how to describe it, whether it is excluded from reporting, and whether
// it looks like an auto-generated directory index.
//
// Categories:
// - 200            -> Success (body kept for directory-listing detection)
// - 301 / 302      -> Redirect (Location header kept)
// - anything else  -> OtherStatus
// - no response    -> TransportError
// =============================================================================

use reqwest::header::{HeaderMap, LOCATION};
use reqwest::StatusCode;
use serde::Serialize;
use std::collections::HashSet;

/// Substring that marks an auto-generated directory index page.
///
/// Matched literally and case-sensitively anywhere in the body. Custom index
/// pages are missed and pages that merely mention the phrase match; both are
/// accepted behaviour.
pub const DIRECTORY_LISTING_MARKER: &str = "Index of";

/// What happened when a candidate URL was requested
#[derive(Debug, Clone)]
pub enum Outcome {
    /// 200 OK
    Success {
        status: StatusCode,
        headers: HeaderMap,
        body: String,
    },
    /// 301 or 302, with whatever the Location header said
    Redirect { status: StatusCode, location: String },
    /// Any other HTTP status
    OtherStatus { status: StatusCode },
    /// No HTTP response at all (timeout, refused connection, DNS...)
    TransportError { message: String },
    /// The scan was cancelled before this request was sent
    Cancelled,
}

impl Outcome {
    /// Classifies a response by its status code
    pub fn from_response(status: StatusCode, headers: HeaderMap, body: String) -> Self {
        match status {
            StatusCode::OK => Outcome::Success {
                status,
                headers,
                body,
            },
            StatusCode::MOVED_PERMANENTLY | StatusCode::FOUND => {
                // Missing or non-UTF-8 Location still counts as a redirect
                let location = headers
                    .get(LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("")
                    .to_string();
                Outcome::Redirect { status, location }
            }
            _ => Outcome::OtherStatus { status },
        }
    }

    /// The HTTP status, if a response was received
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Outcome::Success { status, .. }
            | Outcome::Redirect { status, .. }
            | Outcome::OtherStatus { status } => Some(*status),
            Outcome::TransportError { .. } | Outcome::Cancelled => None,
        }
    }
}

/// Coarse category used by renderers to pick a colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    Success,
    Redirect,
    Other,
    Error,
    Cancelled,
}

pub fn label(outcome: &Outcome) -> Label {
    match outcome {
        Outcome::Success { .. } => Label::Success,
        Outcome::Redirect { .. } => Label::Redirect,
        Outcome::OtherStatus { .. } => Label::Other,
        Outcome::TransportError { .. } => Label::Error,
        Outcome::Cancelled => Label::Cancelled,
    }
}

/// Human-readable description, e.g. `[301] Moved Permanently -> /admin/`
pub fn describe(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Success { status, .. } | Outcome::OtherStatus { status } => {
            format!("[{}] {}", status.as_u16(), reason_phrase(*status))
        }
        Outcome::Redirect { status, location } => {
            format!("[{}] {} -> {}", status.as_u16(), reason_phrase(*status), location)
        }
        Outcome::TransportError { message } => format!("Error: {}", message),
        Outcome::Cancelled => "Cancelled".to_string(),
    }
}

fn reason_phrase(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("Unknown")
}

/// Status codes whose results are dropped from reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionSet(HashSet<u16>);

impl ExclusionSet {
    pub fn contains(&self, code: u16) -> bool {
        self.0.contains(&code)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Codes in ascending order, for display
    pub fn codes(&self) -> Vec<u16> {
        let mut codes: Vec<u16> = self.0.iter().copied().collect();
        codes.sort_unstable();
        codes
    }
}

impl Default for ExclusionSet {
    fn default() -> Self {
        ExclusionSet(HashSet::from([404]))
    }
}

impl FromIterator<u16> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = u16>>(iter: I) -> Self {
        ExclusionSet(iter.into_iter().collect())
    }
}

/// True iff the outcome has an HTTP status listed in `exclusions`.
/// Transport errors have no status and are always reported.
pub fn is_excluded(outcome: &Outcome, exclusions: &ExclusionSet) -> bool {
    outcome
        .status()
        .map(|status| exclusions.contains(status.as_u16()))
        .unwrap_or(false)
}

pub fn contains_directory_listing_marker(body: &str) -> bool {
    body.contains(DIRECTORY_LISTING_MARKER)
}

/// A 200 response whose body carries the directory-listing marker
pub fn is_directory_listing(outcome: &Outcome) -> bool {
    match outcome {
        Outcome::Success { body, .. } => contains_directory_listing_marker(body),
        _ => false,
    }
}
