// src/probe/http.rs
// =============================================================================
// This module makes the actual HTTP requests.
//
// Key functionality:
// - Fetcher trait: "GET this URL and tell me what happened"
// - HttpFetcher: the real implementation on top of a reqwest Client
// - Translates reqwest failures into readable transport-error messages
//
// One HttpFetcher is built per scan pass. Its Client owns the connection
// pool, so dropping the fetcher at the end of a pass closes the pool.
//
// Rust concepts:
// - Traits: Fetcher lets the scanner run against a fake in tests
// - async-trait: Async methods on a trait we use as Arc<dyn Fetcher>
// =============================================================================

use async_trait::async_trait;
use reqwest::{redirect, Client, Proxy};
use tracing::debug;

use super::classify::Outcome;
use crate::error::{Result, ScanError};
use crate::scan::ScanSession;

/// Issues one GET and classifies the result.
///
/// Implementations never fail: anything that goes wrong on the wire comes
/// back as `Outcome::TransportError`.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn get(&self, url: &str) -> Outcome;
}

/// reqwest-backed fetcher configured from a ScanSession
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a client with the session's headers, proxy and timeout.
    ///
    /// Redirects are not followed, otherwise 301/302 and their Location
    /// header would never be seen.
    pub fn connect(session: &ScanSession) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(session.timeout)
            .redirect(redirect::Policy::none())
            .default_headers(session.header_map()?);

        if let Some(proxy_url) = &session.proxy {
            // The same proxy is used for both http and https targets
            let proxy = Proxy::all(proxy_url.as_str())
                .map_err(|e| ScanError::config(format!("invalid proxy '{}': {}", proxy_url, e)))?;
            builder = builder.proxy(proxy);
        }

        Ok(HttpFetcher {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get(&self, url: &str) -> Outcome {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => return categorize_error(e),
        };

        let status = response.status();
        let headers = response.headers().clone();

        // Read the whole body so the connection can go back to the pool
        match response.text().await {
            Ok(body) => {
                debug!(url, status = status.as_u16(), bytes = body.len(), "response");
                Outcome::from_response(status, headers, body)
            }
            Err(e) => categorize_error(e),
        }
    }
}

// Turns a reqwest error into a short message
//
// reqwest errors can happen for many reasons:
// - Network timeout
// - Connection refused / DNS resolution failure
// - Body that could not be decoded
fn categorize_error(error: reqwest::Error) -> Outcome {
    let message = if error.is_timeout() {
        "Request timed out".to_string()
    } else if error.is_connect() {
        format!("Connection failed: {}", error)
    } else if error.is_builder() {
        format!("Invalid request: {}", error)
    } else {
        error.to_string()
    };

    Outcome::TransportError { message }
}
