// src/report/mod.rs
// =============================================================================
// Presentation: turns scan events into something a person (or a script)
// can read.
//
// - terminal: progress bar and coloured result lines
// - json: one JSON object per line, for piping into other tools
// - print_banner: the run summary shown before scanning starts
// =============================================================================

mod json;
mod terminal;

pub use json::JsonReporter;
pub use terminal::TerminalReporter;

use crate::scan::ScanSession;

const LOGO: &str = r#"
  ___  _     ___
 |   \(_)_ _/ __| __ __ _ _ _
 | |) | | '_\__ \/ _/ _` | ' \
 |___/|_|_| |___/\__\__,_|_||_|
"#;

/// Renders the banner with the scan settings
pub fn banner(target: &str, wordlist: &str, session: &ScanSession) -> String {
    let rule = "=".repeat(88);
    format!(
        "{logo}    v{version}\n\n{rule}\nExts: {exts:?} | Threads: {threads} | Timeout: {timeout}s | Excluding: {excluding:?}\n\nTarget:       {target}\nWordlist:     {wordlist}\n{rule}\n",
        logo = LOGO,
        version = env!("CARGO_PKG_VERSION"),
        rule = rule,
        exts = session.extensions,
        threads = session.threads,
        timeout = session.timeout.as_secs_f64(),
        excluding = session.exclusions.codes(),
        target = target,
        wordlist = wordlist,
    )
}

pub fn print_banner(target: &str, wordlist: &str, session: &ScanSession) {
    println!("{}", banner(target, wordlist, session));
}
