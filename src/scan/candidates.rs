// src/scan/candidates.rs
// =============================================================================
// Builds the list of URLs to request for one base URL.
//
// For every word: the bare path first, then one variant per extension.
// Duplicates (from repeated words, or a word that already carries one of the
// extensions) are dropped, keeping the first occurrence.
//
// Example:
//   base = "http://x", words = ["admin"], extensions = ["php"]
//   -> ["http://x/admin", "http://x/admin.php"]
// =============================================================================

use std::collections::HashSet;

pub fn generate(base_url: &str, wordlist: &[String], extensions: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut candidates = Vec::with_capacity(wordlist.len() * (extensions.len() + 1));

    for word in wordlist {
        let url = format!("{}/{}", base_url, word.trim_start_matches('/'));
        let variants = extensions.iter().map(|ext| format!("{}.{}", url, ext));

        for candidate in std::iter::once(url.clone()).chain(variants) {
            if seen.insert(candidate.clone()) {
                candidates.push(candidate);
            }
        }
    }

    candidates
}
