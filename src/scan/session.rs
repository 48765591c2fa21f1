// src/scan/session.rs
// =============================================================================
// Configuration for one scan, and the unit of work for one recursion level.
//
// A ScanSession is built once (usually from the command line), validated,
// and then shared read-only by every pass of the scan.
// =============================================================================

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Proxy;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

use crate::error::{Result, ScanError};
use crate::probe::ExclusionSet;

pub const DEFAULT_THREADS: usize = 25;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_MAX_DEPTH: usize = 2;
pub const DEFAULT_EXTENSIONS: [&str; 5] = ["php", "txt", "jsp", "html", "js"];

#[derive(Debug, Clone)]
pub struct ScanSession {
    /// Maximum number of requests in flight at once
    pub threads: usize,
    /// Per-request timeout
    pub timeout: Duration,
    /// Pause a worker takes after each request
    pub delay: Duration,
    /// Extra headers sent with every request
    pub headers: HashMap<String, String>,
    /// Proxy URL used for both http and https
    pub proxy: Option<String>,
    /// Extensions tried after each bare word, in this order
    pub extensions: Vec<String>,
    /// Status codes that are not reported
    pub exclusions: ExclusionSet,
    /// Descend into directory listings
    pub recursive: bool,
    /// Deepest recursion level that will be scanned (0 = base URL only)
    pub max_depth: usize,
}

impl Default for ScanSession {
    fn default() -> Self {
        ScanSession {
            threads: DEFAULT_THREADS,
            timeout: DEFAULT_TIMEOUT,
            delay: Duration::ZERO,
            headers: HashMap::new(),
            proxy: None,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            exclusions: ExclusionSet::default(),
            recursive: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ScanSession {
    /// Rejects values the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.threads == 0 {
            return Err(ScanError::config("thread count must be at least 1"));
        }
        if self.timeout.is_zero() {
            return Err(ScanError::config("timeout must be greater than zero"));
        }
        if self.extensions.iter().any(|e| e.is_empty()) {
            return Err(ScanError::config("extensions must not be empty strings"));
        }
        self.header_map()?;
        if let Some(proxy) = &self.proxy {
            Proxy::all(proxy.as_str())
                .map_err(|e| ScanError::config(format!("invalid proxy '{}': {}", proxy, e)))?;
        }
        Ok(())
    }

    /// The configured headers as a reqwest HeaderMap
    pub fn header_map(&self) -> Result<HeaderMap> {
        let mut map = HeaderMap::new();
        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ScanError::config(format!("invalid header name '{}'", name)))?;
            let header_value = HeaderValue::from_str(value).map_err(|_| {
                ScanError::config(format!("invalid value for header '{}'", name))
            })?;
            map.insert(header_name, header_value);
        }
        Ok(map)
    }
}

/// One recursion level: scan everything under `base_url`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanTarget {
    pub base_url: String,
    pub depth: usize,
}

impl ScanTarget {
    pub fn root(base_url: impl Into<String>) -> Self {
        ScanTarget {
            base_url: base_url.into(),
            depth: 0,
        }
    }

    /// A directory found in this target, one level deeper
    pub fn child(&self, url: impl Into<String>) -> Self {
        ScanTarget {
            base_url: url.into(),
            depth: self.depth + 1,
        }
    }
}

/// Checks the base URL and strips trailing slashes
///
/// Example: "http://example.com/app/" -> "http://example.com/app"
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ScanError::config("base URL is empty"));
    }

    let parsed = Url::parse(trimmed)
        .map_err(|e| ScanError::config(format!("invalid base URL '{}': {}", raw, e)))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ScanError::config(format!(
            "base URL must be http or https, got '{}'",
            parsed.scheme()
        )));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_session_is_valid() {
        assert!(ScanSession::default().validate().is_ok());
    }

    #[test]
    fn test_zero_threads_rejected() {
        let session = ScanSession {
            threads: 0,
            ..ScanSession::default()
        };
        assert!(matches!(session.validate(), Err(ScanError::Configuration(_))));
    }

    #[test]
    fn test_bad_header_rejected() {
        let mut session = ScanSession::default();
        session.headers.insert("Bad Header".to_string(), "x".to_string());
        assert!(session.validate().is_err());

        let mut session = ScanSession::default();
        session.headers.insert("X-Ok".to_string(), "line\nbreak".to_string());
        assert!(session.validate().is_err());
    }

    #[test]
    fn test_header_map() {
        let mut session = ScanSession::default();
        session.headers.insert("Authorization".to_string(), "Bearer t".to_string());

        let map = session.header_map().unwrap();
        assert_eq!(map.get("authorization").unwrap(), "Bearer t");
    }

    #[test]
    fn test_normalize_strips_trailing_slashes() {
        assert_eq!(normalize_base_url("http://x/").unwrap(), "http://x");
        assert_eq!(normalize_base_url(" http://x/app// ").unwrap(), "http://x/app");
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        assert!(normalize_base_url("").is_err());
        assert!(normalize_base_url("/").is_err());
        assert!(normalize_base_url("example.com").is_err());
        assert!(normalize_base_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_child_target_goes_one_deeper() {
        let root = ScanTarget::root("http://x");
        let child = root.child("http://x/backup");
        assert_eq!(child.depth, 1);
        assert_eq!(child.child("http://x/backup/old").depth, 2);
    }
}
