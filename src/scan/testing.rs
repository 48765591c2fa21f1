// In-memory Fetcher for dispatcher and scanner tests.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use super::cancel::CancellationToken;
use crate::probe::{Fetcher, Outcome};

pub struct FakeFetcher {
    pages: HashMap<String, Outcome>,
    fallback: Outcome,
    latency: HashMap<String, Duration>,
    default_latency: Duration,
    cancel_on: Option<(usize, CancellationToken)>,
    requests: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    completed: AtomicUsize,
}

impl FakeFetcher {
    /// Every URL answers 404 until told otherwise
    pub fn new() -> Self {
        FakeFetcher {
            pages: HashMap::new(),
            fallback: status(404),
            latency: HashMap::new(),
            default_latency: Duration::ZERO,
            cancel_on: None,
            requests: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
        }
    }

    pub fn with_page(mut self, url: &str, outcome: Outcome) -> Self {
        self.pages.insert(url.to_string(), outcome);
        self
    }

    pub fn with_status(self, url: &str, code: u16) -> Self {
        self.with_page(url, status(code))
    }

    pub fn with_listing(self, url: &str) -> Self {
        self.with_page(url, body("<html><h1>Index of /</h1></html>"))
    }

    pub fn with_fallback(mut self, outcome: Outcome) -> Self {
        self.fallback = outcome;
        self
    }

    pub fn with_latency(mut self, url: &str, latency: Duration) -> Self {
        self.latency.insert(url.to_string(), latency);
        self
    }

    pub fn with_default_latency(mut self, latency: Duration) -> Self {
        self.default_latency = latency;
        self
    }

    /// Cancels `token` while the n-th request (1-based) is in flight
    pub fn cancel_on_request(mut self, n: usize, token: CancellationToken) -> Self {
        self.cancel_on = Some((n, token));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn completed_count(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn get(&self, url: &str) -> Outcome {
        let nth = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(url.to_string());
            requests.len()
        };
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some((n, token)) = &self.cancel_on {
            if *n == nth {
                token.cancel();
            }
        }

        let latency = self.latency.get(url).copied().unwrap_or(self.default_latency);
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.completed.fetch_add(1, Ordering::SeqCst);
        self.pages.get(url).cloned().unwrap_or_else(|| self.fallback.clone())
    }
}

pub fn status(code: u16) -> Outcome {
    Outcome::from_response(
        StatusCode::from_u16(code).unwrap(),
        HeaderMap::new(),
        String::new(),
    )
}

pub fn body(text: &str) -> Outcome {
    Outcome::from_response(StatusCode::OK, HeaderMap::new(), text.to_string())
}
