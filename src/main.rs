//! Planchette - a terminal ouija board
//!
//! Type ASCII codes and watch the planchette spell them out.
//!
//! ## Usage
//!
//! ```bash
//! planchette                         # interactive board
//! planchette --decode "72 101 108"   # print the decoding and exit
//! planchette --ascii                 # plain ASCII glyphs
//! ```
//!
//! ## Keys
//!
//! - `Enter`: decipher
//! - `Esc`: reset
//! - `F1`: help
//! - `Ctrl+C`: quit

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use planchette::clock::MonotonicClock;
use planchette::controller::run_app;
use planchette::decoder::{decode, DecodedMessage};
use planchette::logging;
use planchette::model::AppState;
use planchette::reveal::transcript;
use planchette::session::Session;
use planchette::ui::glyphs;

/// Runs CLI mode: decode the codes and print the transcript to stdout.
fn run_cli_mode(codes: &str) -> Result<()> {
    let codes = decode(codes)?;
    let message = DecodedMessage::from_codes(&codes);

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write!(handle, "{}", transcript(&message))?;
    Ok(())
}

/// Planchette - a terminal ouija board that spells out ASCII codes
///
/// Without --decode, opens the interactive board.
/// With --decode, prints the decoded message and exits.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Whitespace-separated ASCII codes to decode without the TUI (e.g. "72 105")
    #[arg(short = 'd', long = "decode", allow_hyphen_values = true)]
    decode: Option<String>,

    /// Use plain ASCII glyphs instead of Unicode symbols
    #[arg(long = "ascii")]
    ascii: bool,

    /// Directory for log files (default: system temp directory)
    #[arg(long = "log-dir")]
    log_dir: Option<PathBuf>,

    /// Screen refresh interval in milliseconds (10-1000)
    #[arg(long = "tick-ms", default_value = "33")]
    tick_ms: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Validate refresh interval
    if args.tick_ms < 10 || args.tick_ms > 1000 {
        anyhow::bail!("Tick interval must be 10-1000 ms (got {})", args.tick_ms);
    }

    // CLI mode: decode and print
    if let Some(codes) = args.decode {
        return run_cli_mode(&codes);
    }

    let log_dir = args.log_dir.unwrap_or_else(std::env::temp_dir);
    let log_path = logging::init(&log_dir)?;

    let state = AppState::new(Session::default(), Box::new(MonotonicClock::new()));
    run_app(
        state,
        glyphs::select(!args.ascii),
        Duration::from_millis(args.tick_ms),
    )?;

    eprintln!("Log written to {}", log_path.display());
    Ok(())
}
