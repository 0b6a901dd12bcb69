use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the config file (market_indicators.toml). Defaults apply when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print reports as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print daily indicators and the premarket session for each symbol
    Analyze {
        /// Comma-separated list of symbols (e.g. "AAPL,TSLA")
        #[arg(long)]
        symbols: String,

        /// Reference time in RFC 3339 format (e.g. "2025-03-07T13:00:00Z"). Defaults to now.
        #[arg(long)]
        now: Option<String>,
    },

    /// Print only the premarket session for a symbol
    Premarket {
        #[arg(long)]
        symbol: String,

        /// Reference time in RFC 3339 format. Defaults to now.
        #[arg(long)]
        now: Option<String>,
    },
}
