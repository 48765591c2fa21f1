// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Load the wordlist and build a Scanner
// 3. Wire Ctrl-C to the scanner's cancellation token
// 4. Run the scan, rendering events in the terminal (or as JSON lines)
// 5. Exit with proper code (0 = completed, 130 = interrupted, 2 = error)
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use dirscan::report::{print_banner, JsonReporter, TerminalReporter};
use dirscan::{wordlist, Scanner, Termination};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Everything that can be wrong with the input is caught here,
    // before the first request goes out
    let session = cli.to_session()?;
    let words = wordlist::load(&cli.wordlist)
        .await
        .with_context(|| format!("Error getting wordlist: {}", cli.wordlist.display()))?;

    if !cli.json {
        print_banner(&cli.url, &cli.wordlist.display().to_string(), &session);
    }

    let scanner = Scanner::new(&cli.url, words, session)?;

    // Ctrl-C sets the token; further presses are ignored
    let token = scanner.cancellation_token();
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            if token.cancel() {
                warn!("interrupt received, finishing in-flight requests");
            }
        }
    });

    let termination = if cli.json {
        scanner.run(&mut JsonReporter::new()).await?
    } else {
        scanner.run(&mut TerminalReporter::new()).await?
    };

    Ok(match termination {
        Termination::Completed => 0,
        Termination::Interrupted => 130,
    })
}

// Logs go to stderr so they never mix with results on stdout.
// RUST_LOG wins over --verbose when both are given.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "dirscan=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
