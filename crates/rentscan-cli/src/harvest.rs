//! Command handlers for the CLI.
//!
//! Each handler builds one `PortalClient` from the loaded config plus the
//! per-invocation overrides, runs a pipeline, and streams the records to a
//! JSON-lines sink.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use rentscan_core::{AppConfig, Channel};
use rentscan_scraper::{
    collect_listings, detail_mapping, scrape_properties, summary_mapping, ClientConfig,
    JsonLinesSink, PortalClient, RecordSink,
};

/// Command-line values that take precedence over the environment config.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct Overrides {
    pub max_results: Option<usize>,
    pub channel: Option<Channel>,
    pub max_concurrent: Option<usize>,
}

pub(crate) fn client_config(config: &AppConfig, overrides: &Overrides) -> ClientConfig {
    let mut client_config = ClientConfig::from_app_config(config);
    if let Some(channel) = overrides.channel {
        client_config.channel = channel;
    }
    if let Some(limit) = overrides.max_concurrent {
        client_config.limits.max_concurrency = Some(limit);
    }
    client_config
}

fn build_client(config: &AppConfig, overrides: &Overrides) -> anyhow::Result<PortalClient> {
    PortalClient::new(client_config(config, overrides)).context("failed to build portal client")
}

fn open_sink(output: Option<&Path>) -> anyhow::Result<JsonLinesSink<Box<dyn Write>>> {
    let writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };
    Ok(JsonLinesSink::new(writer))
}

/// Prints each candidate location identifier on its own line, best first.
pub(crate) async fn run_locate(config: &AppConfig, query: &str) -> anyhow::Result<()> {
    let client = build_client(config, &Overrides::default())?;
    let ids = client
        .resolve_locations(query)
        .await
        .with_context(|| format!("failed to resolve location \"{query}\""))?;

    let mut stdout = io::stdout().lock();
    for id in ids {
        writeln!(stdout, "{id}")?;
    }
    Ok(())
}

pub(crate) async fn run_search(
    config: &AppConfig,
    overrides: &Overrides,
    query: &str,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let client = build_client(config, overrides)?;
    let max_results = overrides.max_results.unwrap_or(config.max_results);

    let records = collect_listings(&client, query, max_results, summary_mapping())
        .await
        .with_context(|| format!("search for \"{query}\" failed"))?;

    let mut sink = open_sink(output)?;
    sink.write_records(&records)?;
    tracing::info!(query, records = sink.written(), "search records written");
    Ok(())
}

pub(crate) async fn run_details(
    config: &AppConfig,
    overrides: &Overrides,
    urls: &[String],
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let client = build_client(config, overrides)?;
    let urls = urls
        .iter()
        .map(|href| client.absolute_url(href))
        .collect::<Result<Vec<_>, _>>()?;

    let records = scrape_properties(&client, &urls, detail_mapping())
        .await
        .context("detail scrape failed")?;

    let mut sink = open_sink(output)?;
    sink.write_records(&records)?;
    tracing::info!(
        requested = urls.len(),
        records = sink.written(),
        "detail records written"
    );
    Ok(())
}
