// src/probe/mod.rs
// =============================================================================
// This module sends one request per candidate URL and classifies the answer.
//
// Submodules:
// - http: The Fetcher trait and the reqwest-backed implementation
// - classify: Outcome type, descriptions, exclusion and listing detection
// =============================================================================

mod classify;
mod http;

pub use classify::{
    contains_directory_listing_marker, describe, is_directory_listing, is_excluded, label,
    ExclusionSet, Label, Outcome, DIRECTORY_LISTING_MARKER,
};
pub use http::{Fetcher, HttpFetcher};
