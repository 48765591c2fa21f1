// src/scan/mod.rs
// =============================================================================
// The scanning engine.
//
// Submodules:
// - session: ScanSession (configuration) and ScanTarget (one recursion level)
// - candidates: wordlist x extensions -> candidate URLs
// - dispatch: bounded concurrent worker pool
// - recursion: the Scanner, which drives passes depth-first
// - progress: per-pass processed/total counter
// - events: ScanEvent and the Reporter sink
// - cancel: the write-once cancellation token
// =============================================================================

mod cancel;
mod candidates;
mod dispatch;
mod events;
mod progress;
mod recursion;
mod session;

#[cfg(test)]
mod testing;

pub use cancel::CancellationToken;
pub use candidates::generate;
pub use dispatch::{dispatch, Batch};
pub use events::{Reporter, ScanEvent, Termination};
pub use progress::{Progress, ProgressCounter};
pub use recursion::{Connector, Scanner};
pub use session::{
    normalize_base_url, ScanSession, ScanTarget, DEFAULT_EXTENSIONS, DEFAULT_MAX_DEPTH,
    DEFAULT_THREADS, DEFAULT_TIMEOUT,
};
