// src/scan/recursion.rs
// =============================================================================
// The Scanner: drives passes over the base URL and, when recursion is on,
// over every directory listing it finds.
//
// How it works:
// 1. Open a pass for the base URL (generate candidates, dispatch them)
// 2. Drain its outcomes, reporting progress and non-excluded results
// 3. A 200 whose body says "Index of" (and depth < max_depth) opens a new
//    pass for that URL on top of the stack; the new pass is drained before
//    the rest of its parent (depth-first)
// 4. A finished pass is popped and its parent resumes
// 5. Cancellation ends everything at once
//
// There is no visited set: a listing that links back to itself is
// followed until max_depth.
//
// Rust concepts:
// - Vec as a stack: push/pop/last_mut instead of recursive async calls
// - Boxed closures: the connector that opens one Fetcher per pass
// =============================================================================

use futures::StreamExt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::cancel::CancellationToken;
use super::candidates::generate;
use super::dispatch::{dispatch, Batch};
use super::events::{Reporter, ScanEvent, Termination};
use super::session::{normalize_base_url, ScanSession, ScanTarget};
use crate::error::Result;
use crate::probe::{is_directory_listing, is_excluded, Fetcher, HttpFetcher, Outcome};

/// Opens a Fetcher (and with it a connection pool) for one pass
pub type Connector = Box<dyn Fn(&ScanSession) -> Result<Arc<dyn Fetcher>> + Send + Sync>;

pub struct Scanner {
    base_url: String,
    wordlist: Arc<Vec<String>>,
    session: Arc<ScanSession>,
    token: CancellationToken,
    connect: Connector,
}

// A pass in progress: the target it scans and its remaining outcomes
struct Pass {
    target: ScanTarget,
    batch: Batch,
}

impl Scanner {
    /// Validates everything up front; a Scanner that exists can run.
    pub fn new(base_url: &str, wordlist: Vec<String>, session: ScanSession) -> Result<Self> {
        session.validate()?;
        let base_url = normalize_base_url(base_url)?;

        Ok(Scanner {
            base_url,
            wordlist: Arc::new(wordlist),
            session: Arc::new(session),
            token: CancellationToken::new(),
            connect: Box::new(|session: &ScanSession| -> Result<Arc<dyn Fetcher>> {
                Ok(Arc::new(HttpFetcher::connect(session)?))
            }),
        })
    }

    /// Replaces the HTTP fetcher factory
    pub fn with_connector<F>(mut self, connect: F) -> Self
    where
        F: Fn(&ScanSession) -> Result<Arc<dyn Fetcher>> + Send + Sync + 'static,
    {
        self.connect = Box::new(connect);
        self
    }

    /// Handle for the signal handler. Cancelling it stops the scan.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Runs the whole scan, pushing events into `reporter`.
    ///
    /// The last event is always Completed or Interrupted. Errors only come
    /// from failing to open a fetcher for a pass.
    pub async fn run<R: Reporter + ?Sized>(&self, reporter: &mut R) -> Result<Termination> {
        // The stack of live passes. The top one is the pass being drained;
        // everything below it is paused until the passes above it finish.
        let mut frontier: Vec<Pass> = Vec::new();

        if self.token.is_cancelled() {
            return Ok(self.interrupt(reporter));
        }
        frontier.push(self.open_pass(ScanTarget::root(self.base_url.clone()), reporter)?);

        while let Some(pass) = frontier.last_mut() {
            // Only the top pass is polled, so a parent sends nothing new
            // while one of its children is running
            let next = pass.batch.next().await;

            // Checked after every outcome: once the flag is set, nothing
            // more is reported, at any level
            if self.token.is_cancelled() {
                return Ok(self.interrupt(reporter));
            }

            // An exhausted pass is popped and its parent picks up where it
            // left off
            let Some((url, outcome)) = next else {
                if let Some(done) = frontier.pop() {
                    info!(
                        url = %done.target.base_url,
                        depth = done.target.depth,
                        elapsed_ms = done.batch.progress().elapsed().as_millis() as u64,
                        "pass finished"
                    );
                }
                continue;
            };

            // Every outcome counts towards progress, excluded or not
            reporter.report(ScanEvent::Progress(pass.batch.progress().snapshot()));

            if is_excluded(&outcome, &self.session.exclusions) {
                continue;
            }
            if let Some(event) = ScanEvent::from_outcome(&url, &outcome) {
                reporter.report(event);
            }

            if self.should_descend(&pass.target, &outcome) {
                // The reporter may have taken a while (or triggered the
                // cancel itself); don't open a pass that would never run
                if self.token.is_cancelled() {
                    return Ok(self.interrupt(reporter));
                }
                let child = pass.target.child(url);
                debug!(url = %child.base_url, depth = child.depth, "directory listing found");
                frontier.push(self.open_pass(child, reporter)?);
            }
        }

        reporter.report(ScanEvent::Completed);
        Ok(Termination::Completed)
    }

    // Recursion needs all three: the flag, room below max_depth, and a
    // listing (a 200 whose body contains the marker)
    fn should_descend(&self, target: &ScanTarget, outcome: &Outcome) -> bool {
        self.session.recursive
            && target.depth < self.session.max_depth
            && is_directory_listing(outcome)
    }

    // Generates the pass's candidates, opens its fetcher and starts the
    // dispatch. Nothing is sent until the batch is first polled.
    fn open_pass<R: Reporter + ?Sized>(&self, target: ScanTarget, reporter: &mut R) -> Result<Pass> {
        let candidates = generate(&target.base_url, &self.wordlist, &self.session.extensions);
        let fetcher = (self.connect)(&self.session)?;

        info!(url = %target.base_url, depth = target.depth, candidates = candidates.len(), "pass started");
        reporter.report(ScanEvent::PassStarted {
            url: target.base_url.clone(),
            depth: target.depth,
            total: candidates.len(),
        });

        let batch = dispatch(candidates, fetcher, &self.session, self.token.clone());
        Ok(Pass { target, batch })
    }

    fn interrupt<R: Reporter + ?Sized>(&self, reporter: &mut R) -> Termination {
        warn!(url = %self.base_url, "scan interrupted");
        reporter.report(ScanEvent::Interrupted);
        Termination::Interrupted
    }
}
