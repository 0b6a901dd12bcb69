use anyhow::Context;
use clap::Parser;
use market_indicators::{
    analysis::{analyze_symbol, premarket_report},
    cli::{
        commands::{Cli, Commands},
        params::{parse_now, parse_symbols},
    },
    config::Config,
    errors::{Error, IndicatorError},
    providers::alpaca_rest::AlpacaProvider,
};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let tz = config.analysis.timezone()?;

    // One provider handle for the whole run.
    let provider =
        AlpacaProvider::new(&config.alpaca).context("failed to set up Alpaca data provider")?;

    match &cli.command {
        Commands::Analyze { symbols, now } => {
            let symbols = parse_symbols(symbols)?;
            let now = parse_now(now.as_deref())?;

            let mut failures = 0;
            for symbol in &symbols {
                match analyze_symbol(&provider, symbol, now, &config.analysis).await {
                    Ok(report) if cli.json => println!("{}", serde_json::to_string_pretty(&report)?),
                    Ok(report) => println!("{report}"),
                    Err(Error::Indicator(IndicatorError::EmptySeries { .. })) => {
                        println!("{symbol}: no data returned for symbol\n");
                    }
                    Err(e) => {
                        error!(%symbol, error = %e, "analysis failed");
                        failures += 1;
                    }
                }
            }

            // Summary goes to stderr so stdout stays report-only.
            eprintln!(
                "SUMMARY: {} analyzed, {} failed",
                symbols.len() - failures,
                failures
            );
        }

        Commands::Premarket { symbol, now } => {
            let now = parse_now(now.as_deref())?;
            let report = premarket_report(&provider, &symbol.to_uppercase(), now, tz).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{report}");
            }
        }
    }

    Ok(())
}
