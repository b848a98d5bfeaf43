mod harvest;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rentscan_core::Channel;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "rentscan")]
#[command(about = "Harvest portal property listings as JSON lines")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve a free-text location to portal location identifiers
    Locate {
        /// Location text, e.g. "camden" or "st albans"
        query: String,
    },
    /// Search a location and write one summary record per listing
    Search {
        query: String,
        /// Soft cap on listings collected (page granularity)
        #[arg(long)]
        max_results: Option<usize>,
        /// RENT or BUY
        #[arg(long)]
        channel: Option<Channel>,
        /// Ceiling on in-flight page requests
        #[arg(long, value_parser = parse_concurrency)]
        max_concurrent: Option<usize>,
        /// Write records here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Scrape listing pages and write one detail record per listing
    Details {
        /// Listing URLs; site-relative links are joined to the portal origin
        #[arg(required = true)]
        urls: Vec<String>,
        #[arg(long, value_parser = parse_concurrency)]
        max_concurrent: Option<usize>,
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

fn parse_concurrency(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_owned()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = rentscan_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Locate { query } => harvest::run_locate(&config, &query).await,
        Commands::Search {
            query,
            max_results,
            channel,
            max_concurrent,
            output,
        } => {
            let overrides = harvest::Overrides {
                max_results,
                channel,
                max_concurrent,
            };
            harvest::run_search(&config, &overrides, &query, output.as_deref()).await
        }
        Commands::Details {
            urls,
            max_concurrent,
            output,
        } => {
            let overrides = harvest::Overrides {
                max_concurrent,
                ..harvest::Overrides::default()
            };
            harvest::run_details(&config, &overrides, &urls, output.as_deref()).await
        }
    }
}
