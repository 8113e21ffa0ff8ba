mod output;

use anyhow::{anyhow, Result};
use athtracker_lib::{
    scan, validate_eod, AlphaVantageConfig, AlphaVantageFetcher, DateBoundary, SeriesFetcher,
    YahooClient,
};
use clap::{Parser, ValueEnum};

use crate::output::OutputFormat;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Source {
    /// Alpha Vantage TIME_SERIES_DAILY (requires ALPHA_VANTAGE_KEY)
    Alphavantage,
    /// Yahoo Finance chart data, full history
    Yahoo,
}

#[derive(Parser)]
#[command(name = "athtracker")]
#[command(about = "Print every all-time high in a stock's daily price history")]
struct Cli {
    /// Stock symbol (e.g., AAPL)
    symbol: String,

    /// End of date (e.g., 2025-02-14)
    #[arg(long, default_value = "", value_parser = parse_eod)]
    eod: DateBoundary,

    /// Where to fetch daily prices from
    #[arg(long, value_enum, default_value_t = Source::Alphavantage)]
    source: Source,

    /// Output format: text, table, markdown, csv, or json
    #[arg(long, default_value = "text")]
    output: String,
}

fn parse_eod(input: &str) -> Result<DateBoundary, String> {
    validate_eod(input).map_err(|e| e.to_string())
}

fn parse_output(input: &str) -> OutputFormat {
    match input {
        "table" => OutputFormat::Table,
        "markdown" => OutputFormat::Markdown,
        "csv" => OutputFormat::Csv,
        "json" => OutputFormat::Json,
        _ => OutputFormat::Text,
    }
}

async fn run<F: SeriesFetcher>(fetcher: &F, cli: &Cli, format: &OutputFormat) -> Result<()> {
    tracing::debug!("Fetching {} from {}", cli.symbol, fetcher.source_name());
    let series = fetcher.fetch_series(&cli.symbol).await?;
    let report = scan(&cli.symbol, &series, &cli.eod)?;
    output::print_report(&report, fetcher.price_format(), format)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("athtracker=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = parse_output(&cli.output);

    match cli.source {
        Source::Alphavantage => {
            let config = AlphaVantageConfig::from_env()?;
            run(&AlphaVantageFetcher::new(&config), &cli, &format).await?
        }
        Source::Yahoo => {
            let client =
                YahooClient::new().map_err(|e| anyhow!("Failed to create Yahoo client: {}", e))?;
            run(&client, &cli, &format).await?
        }
    }

    Ok(())
}
