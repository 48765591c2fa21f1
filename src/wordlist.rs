// src/wordlist.rs
// =============================================================================
// Loads the wordlist: one word per line, surrounding whitespace trimmed,
// blank lines skipped, order and duplicates kept.
// =============================================================================

use std::io;
use std::path::Path;

pub async fn load(path: impl AsRef<Path>) -> io::Result<Vec<String>> {
    let text = tokio::fs::read_to_string(path).await?;
    Ok(parse(&text))
}

pub fn parse(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
