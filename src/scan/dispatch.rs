// src/scan/dispatch.rs
// =============================================================================
// The bounded worker pool.
//
// How it works:
// 1. The candidate list becomes a lazy stream of request futures
// 2. buffer_unordered(threads) keeps at most `threads` of them running
// 3. Outcomes come out in completion order, not submission order
//
// Cancellation:
// - A worker checks the token before sending and yields Outcome::Cancelled
//   instead of doing I/O
// - The consumer stops polling once it sees cancellation; futures that were
//   never polled are simply dropped
// - Each request runs in its own spawned task, so dropping the stream never
//   aborts a request that is already on the wire
// =============================================================================

use futures::stream::{self, BoxStream, Stream, StreamExt};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tracing::debug;

use super::cancel::CancellationToken;
use super::progress::ProgressCounter;
use super::session::ScanSession;
use crate::probe::{Fetcher, Outcome};

/// Outcomes of one dispatched batch, plus its progress counter.
///
/// Implements Stream<Item = (url, Outcome)>.
pub struct Batch {
    outcomes: BoxStream<'static, (String, Outcome)>,
    progress: Arc<ProgressCounter>,
}

impl Batch {
    pub fn progress(&self) -> &Arc<ProgressCounter> {
        &self.progress
    }
}

impl Stream for Batch {
    type Item = (String, Outcome);

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.outcomes.poll_next_unpin(cx)
    }
}

/// Starts requesting `candidates`, at most `session.threads` at a time.
///
/// Nothing is sent until the returned batch is polled. Must be polled from
/// inside a tokio runtime.
pub fn dispatch(
    candidates: Vec<String>,
    fetcher: Arc<dyn Fetcher>,
    session: &ScanSession,
    token: CancellationToken,
) -> Batch {
    // One counter per batch; the stream bumps it, the scanner reads it
    let progress = Arc::new(ProgressCounter::new(candidates.len()));
    let counter = Arc::clone(&progress);
    let delay = session.delay;

    // Turn each candidate into a future that requests it.
    // Nothing runs yet: buffer_unordered decides when each one starts.
    let outcomes = stream::iter(candidates)
        .map(move |url| {
            // Every worker gets its own handle to the shared fetcher and token
            let fetcher = Arc::clone(&fetcher);
            let token = token.clone();
            async move {
                // Last chance to skip the request entirely
                if token.is_cancelled() {
                    return (url, Outcome::Cancelled);
                }

                let requested = url.clone();
                let worker = tokio::spawn(async move {
                    debug!(url = %url, "requesting");
                    let outcome = fetcher.get(&url).await;
                    // Throttle: the slot stays busy for `delay` after the response
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    (url, outcome)
                });

                // A JoinError means the task panicked; report it like any
                // other failed request instead of taking the scan down
                match worker.await {
                    Ok(done) => done,
                    Err(e) => (
                        requested,
                        Outcome::TransportError {
                            message: format!("worker failed: {}", e),
                        },
                    ),
                }
            }
        })
        // At most `threads` workers at once, results in completion order
        .buffer_unordered(session.threads.max(1))
        // Count each outcome as it leaves the pool
        .inspect(move |_| {
            counter.record();
        })
        .boxed();

    Batch { outcomes, progress }
}
