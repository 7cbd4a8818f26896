//! CLI command definitions for the `journallm` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod ask;
pub mod chat;
pub mod status;

use chrono::{Duration, NaiveDate};
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use journallm_types::range::{DateRange, parse_date};

/// Chat with your journal assistant.
#[derive(Parser)]
#[command(name = "journallm", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Journal backend base URL (overrides config.toml).
    #[arg(long, global = true, env = "JOURNALLM_API_URL")]
    pub api_url: Option<String>,

    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat session.
    Chat {
        #[command(flatten)]
        range: RangeArgs,
    },

    /// Ask a single question and print the reply.
    Ask {
        /// The question to send.
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,

        #[command(flatten)]
        range: RangeArgs,
    },

    /// Check that the journal backend is reachable.
    Status,

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

/// Journal date window for the conversation.
#[derive(Args, Debug, Clone, Default)]
pub struct RangeArgs {
    /// First journal date to include (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date_arg)]
    pub start: Option<NaiveDate>,

    /// Last journal date to include (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date_arg)]
    pub end: Option<NaiveDate>,
}

impl RangeArgs {
    /// Fill in whichever side is missing from the default window ending
    /// `today`. The ordering of the two sides is checked later, on submit.
    pub fn resolve(&self, today: NaiveDate, window_days: u32) -> DateRange {
        let span = i64::from(window_days.max(1)) - 1;
        let start = self.start.unwrap_or(today - Duration::days(span));
        let end = self.end.unwrap_or(today);
        DateRange::from_dates(start, end)
    }
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_date(value).map_err(|e| e.to_string())
}
