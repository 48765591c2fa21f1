// src/lib.rs
// =============================================================================
// dirscan: concurrent web path discovery.
//
// Given a base URL and a wordlist, dirscan requests every word (and every
// word.extension) under the base URL, reports what answers, and can descend
// into directory listings it finds.
//
// Modules:
// - scan: the engine (candidates, worker pool, recursion, events)
// - probe: HTTP requests and response classification
// - report: terminal and JSON renderers for scan events
// - wordlist: reading the wordlist file
// - error: the library error type
// =============================================================================

pub mod error;
pub mod probe;
pub mod report;
pub mod scan;
pub mod wordlist;

pub use error::ScanError;
pub use scan::{CancellationToken, ScanEvent, ScanSession, Scanner, Termination};
