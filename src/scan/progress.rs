// src/scan/progress.rs
// =============================================================================
// Per-pass progress counter.
//
// The dispatcher bumps `processed` every time an outcome completes; anyone
// holding the Arc can take a snapshot for rendering. Only counts and times
// live here, drawing a bar is the reporter's job.
// =============================================================================

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct ProgressCounter {
    processed: AtomicUsize,
    total: usize,
    started: Instant,
}

/// A point-in-time copy of a ProgressCounter
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    pub processed: usize,
    pub total: usize,
    pub elapsed_secs: f64,
}

impl ProgressCounter {
    pub fn new(total: usize) -> Self {
        ProgressCounter {
            processed: AtomicUsize::new(0),
            total,
            started: Instant::now(),
        }
    }

    /// Counts one finished candidate and returns the new processed count
    pub fn record(&self) -> usize {
        self.processed.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn processed(&self) -> usize {
        self.processed.load(Ordering::Relaxed)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn snapshot(&self) -> Progress {
        Progress {
            processed: self.processed(),
            total: self.total,
            elapsed_secs: self.elapsed().as_secs_f64(),
        }
    }
}

impl Progress {
    /// Requests per second so far
    pub fn rate(&self) -> f64 {
        if self.elapsed_secs > 0.0 {
            self.processed as f64 / self.elapsed_secs
        } else {
            0.0
        }
    }

    /// Completion in percent, 100 for an empty batch
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            self.processed as f64 * 100.0 / self.total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_record_counts_up() {
        let counter = ProgressCounter::new(3);
        assert_eq!(counter.record(), 1);
        assert_eq!(counter.record(), 2);

        let snapshot = counter.snapshot();
        assert_eq!(snapshot.processed, 2);
        assert_eq!(snapshot.total, 3);
    }

    #[test]
    fn test_concurrent_records() {
        let counter = Arc::new(ProgressCounter::new(800));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let counter = Arc::clone(&counter);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        counter.record();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(counter.processed(), 800);
    }

    #[test]
    fn test_rate_and_percent() {
        let progress = Progress {
            processed: 50,
            total: 200,
            elapsed_secs: 2.0,
        };
        assert_eq!(progress.rate(), 25.0);
        assert_eq!(progress.percent(), 25.0);

        let idle = Progress {
            processed: 0,
            total: 0,
            elapsed_secs: 0.0,
        };
        assert_eq!(idle.rate(), 0.0);
        assert_eq!(idle.percent(), 100.0);
    }
}
