// src/report/terminal.rs
// =============================================================================
// Renders scan events in the terminal.
//
// - One indicatif progress bar on stderr, re-sized whenever a Progress event
//   arrives (so it follows whichever pass is being drained)
// - Result lines on stdout, coloured by category
// - A summary (or the interruption notice) at the end
//
// Result lines are written inside bar.suspend(): the bar is cleared, the line
// is printed, the bar is redrawn. This also works when the bar is hidden
// (stderr is not a terminal), where bar.println() would print nothing.
//
// Rust concepts:
// - Generic with a default type parameter: TerminalReporter<W = Stdout>
//   writes to stdout in the binary and to a Vec<u8> in tests
// =============================================================================

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Stdout, Write};

use crate::probe::Label;
use crate::scan::{Reporter, ScanEvent};

const BAR_TEMPLATE: &str = "Scanning: [{bar:40.cyan}] {msg}";

pub struct TerminalReporter<W: Write = Stdout> {
    bar: ProgressBar,
    out: W,
    found: usize,
    errors: usize,
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self::with_output(io::stdout())
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalReporter<W> {
    /// Reporter whose result lines go to `out` instead of stdout
    pub fn with_output(out: W) -> Self {
        let bar = ProgressBar::new(0);
        // The template is a constant; fall back to the plain bar just in case
        let style = ProgressStyle::with_template(BAR_TEMPLATE)
            .map(|s| s.progress_chars("#  "))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);

        TerminalReporter {
            bar,
            out,
            found: 0,
            errors: 0,
        }
    }

    // Prints one line above the bar. A closed stdout (e.g. `| head`) is not
    // worth aborting the scan for, so write errors are ignored.
    fn line(&mut self, text: String) {
        let out = &mut self.out;
        self.bar.suspend(|| {
            let _ = writeln!(out, "{}", text);
        });
    }
}

impl<W: Write> Reporter for TerminalReporter<W> {
    fn report(&mut self, event: ScanEvent) {
        match event {
            ScanEvent::PassStarted { url, depth, total } => {
                if depth > 0 {
                    self.line(format!("Recursively scanning: {}", url).cyan().to_string());
                }
                self.bar.set_length(total as u64);
                self.bar.set_position(0);
            }
            ScanEvent::Progress(progress) => {
                self.bar.set_length(progress.total as u64);
                self.bar.set_position(progress.processed as u64);
                self.bar.set_message(format!(
                    "{:.0}% ({:.2} req/s)",
                    progress.percent(),
                    progress.rate()
                ));
            }
            ScanEvent::Result {
                url,
                label,
                description,
                ..
            } => {
                self.found += 1;
                self.line(format!("{} Found: {}", paint(label, &description), url.blue()));
            }
            ScanEvent::ErrorResult { url, message } => {
                self.errors += 1;
                self.line(format!("{} Error requesting {}: {}", "[!]".red(), url, message));
            }
            ScanEvent::Interrupted => {
                self.bar.abandon();
                self.line(format!("\n{} Scan interrupted by user.", "[!]".red()));
            }
            ScanEvent::Completed => {
                self.bar.finish_and_clear();
                let summary = format!(
                    "Scan complete: {} result(s), {} error(s)",
                    self.found, self.errors
                );
                self.line(summary);
            }
        }
    }
}

fn paint(label: Label, description: &str) -> ColoredString {
    match label {
        Label::Success => description.green(),
        Label::Redirect => description.yellow(),
        Label::Other | Label::Error | Label::Cancelled => description.red(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::Progress;
    use indicatif::ProgressDrawTarget;

    fn hidden() -> TerminalReporter<Vec<u8>> {
        let reporter = TerminalReporter::with_output(Vec::new());
        reporter.bar.set_draw_target(ProgressDrawTarget::hidden());
        reporter
    }

    fn printed(reporter: &TerminalReporter<Vec<u8>>) -> String {
        String::from_utf8_lossy(&reporter.out).to_string()
    }

    #[test]
    fn test_counts_results_and_errors() {
        let mut reporter = hidden();

        reporter.report(ScanEvent::PassStarted {
            url: "http://x".to_string(),
            depth: 0,
            total: 2,
        });
        reporter.report(ScanEvent::Progress(Progress {
            processed: 1,
            total: 2,
            elapsed_secs: 1.0,
        }));
        reporter.report(ScanEvent::ErrorResult {
            url: "http://x/a".to_string(),
            message: "Request timed out".to_string(),
        });

        assert_eq!(reporter.bar.position(), 1);
        assert_eq!(reporter.bar.length(), Some(2));
        assert_eq!(reporter.bar.message(), "50% (1.00 req/s)");
        assert_eq!(reporter.errors, 1);
        assert_eq!(reporter.found, 0);
    }

    #[test]
    fn test_lines_are_printed_with_hidden_bar() {
        let mut reporter = hidden();

        reporter.report(ScanEvent::PassStarted {
            url: "http://x/backup".to_string(),
            depth: 1,
            total: 1,
        });
        reporter.report(ScanEvent::Result {
            url: "http://x/backup/admin".to_string(),
            status: 200,
            label: Label::Success,
            description: "[200] OK".to_string(),
            location: None,
        });
        reporter.report(ScanEvent::ErrorResult {
            url: "http://x/backup/slow".to_string(),
            message: "Request timed out".to_string(),
        });
        reporter.report(ScanEvent::Completed);

        let output = printed(&reporter);
        assert!(output.contains("Recursively scanning: http://x/backup"));
        assert!(output.contains("[200] OK"));
        assert!(output.contains("Found: "));
        assert!(output.contains("http://x/backup/admin"));
        assert!(output.contains("Error requesting http://x/backup/slow: Request timed out"));
        assert!(output.contains("Scan complete: 1 result(s), 1 error(s)"));
    }

    #[test]
    fn test_interrupted_notice() {
        let mut reporter = hidden();
        reporter.report(ScanEvent::Interrupted);

        assert!(printed(&reporter).contains("Scan interrupted by user."));
    }
}
