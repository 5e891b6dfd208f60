//! Command-line configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Play a word-guessing game against a remote guess service
#[derive(Parser, Debug)]
#[command(name = "wordle-at-home")]
#[command(version, long_about = None)]
pub struct Cli {
    /// Base URL of the guess service
    #[arg(
        long,
        env = "WORDLE_SERVER_URL",
        default_value = "http://localhost:5000",
        value_parser = parse_server_url
    )]
    pub server_url: String,

    /// Give up on a request after this many seconds
    #[arg(long, env = "WORDLE_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    /// Write logs to this file. Nothing is logged without it
    #[arg(long, env = "WORDLE_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Do not print the guesses after quitting
    #[arg(long)]
    pub no_summary: bool,
}

impl Cli {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn parse_server_url(raw: &str) -> Result<String, String> {
    let url = reqwest::Url::parse(raw).map_err(|e| format!("invalid URL `{raw}`: {e}"))?;
    match url.scheme() {
        "http" | "https" => Ok(raw.trim_end_matches('/').to_string()),
        scheme => Err(format!("unsupported scheme `{scheme}`, expected http or https")),
    }
}
