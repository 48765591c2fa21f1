// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things), then turn the parsed
// arguments into a ScanSession for the engine.
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Derive macros: Automatically generate code for our types
// - anyhow::Context: Attach a readable message to an error
// =============================================================================

use anyhow::{bail, Context, Result};
use clap::Parser;
use dirscan::probe::ExclusionSet;
use dirscan::ScanSession;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
#[derive(Parser, Debug)]
#[command(
    name = "dirscan",
    version,
    about = "Discover hidden paths on a web server from a wordlist",
    long_about = "dirscan requests every word from a wordlist (plus each word with every extension) \
                  under a target URL and reports what answers. With --recursive it also descends \
                  into directory listings it finds. Press Ctrl-C to stop early."
)]
pub struct Cli {
    /// Target URL (e.g., http://example.com)
    #[arg(short = 'u', long)]
    pub url: String,

    /// Path to the wordlist file (one word per line)
    #[arg(short = 'w', long)]
    pub wordlist: PathBuf,

    /// Comma-separated list of extensions (e.g. php,txt,jsp,html,js)
    #[arg(short = 'e', long, default_value = "php,txt,jsp,html,js")]
    pub extensions: String,

    /// Number of concurrent requests
    #[arg(short = 't', long, default_value_t = 25)]
    pub threads: usize,

    /// Timeout for each request, in seconds
    #[arg(long, default_value_t = 5)]
    pub timeout: u64,

    /// Delay after each request, in seconds (fractions allowed)
    #[arg(long, default_value_t = 0.0)]
    pub delay: f64,

    /// Custom headers as a JSON object, e.g. '{"Cookie": "a=b"}'
    #[arg(long)]
    pub headers: Option<String>,

    /// Proxy URL (e.g., http://proxy:port), used for http and https
    #[arg(long)]
    pub proxy: Option<String>,

    /// Descend into directory listings
    #[arg(long)]
    pub recursive: bool,

    /// Maximum recursion depth
    #[arg(long, default_value_t = 2)]
    pub max_depth: usize,

    /// Comma-separated list of status codes to ignore
    #[arg(long, default_value = "404")]
    pub exclude: String,

    /// Print events as JSON lines instead of the progress display
    #[arg(long)]
    pub json: bool,

    /// Log engine activity to stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Cli {
    /// Builds the engine configuration from the parsed arguments
    pub fn to_session(&self) -> Result<ScanSession> {
        if self.timeout == 0 {
            bail!("--timeout must be at least 1 second");
        }
        let delay = Duration::try_from_secs_f64(self.delay)
            .with_context(|| format!("invalid --delay value: {}", self.delay))?;

        let headers = match &self.headers {
            Some(raw) => parse_headers(raw)?,
            None => HashMap::new(),
        };

        Ok(ScanSession {
            threads: self.threads,
            timeout: Duration::from_secs(self.timeout),
            delay,
            headers,
            proxy: self.proxy.clone(),
            extensions: parse_extensions(&self.extensions),
            exclusions: parse_exclusions(&self.exclude)?,
            recursive: self.recursive,
            max_depth: self.max_depth,
        })
    }
}

// "php, txt,,html," -> ["php", "txt", "html"]
fn parse_extensions(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|ext| !ext.is_empty())
        .map(String::from)
        .collect()
}

// "404, 403" -> {404, 403}; an empty string excludes nothing
fn parse_exclusions(raw: &str) -> Result<ExclusionSet> {
    raw.split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(|code| {
            code.parse::<u16>()
                .with_context(|| format!("invalid status code in --exclude: '{}'", code))
        })
        .collect()
}

// '{"X-Api-Key": "secret"}' -> {"X-Api-Key": "secret"}
fn parse_headers(raw: &str) -> Result<HashMap<String, String>> {
    serde_json::from_str(raw).context("Invalid JSON for headers (expected an object of strings)")
}
