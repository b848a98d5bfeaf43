use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no locations matched query \"{query}\"")]
    EmptyResult { query: String },

    #[error(
        "{} search page(s) failed for {location_id} at offsets {failed_offsets:?}: {first_error}",
        .failed_offsets.len()
    )]
    PartialPageFailure {
        location_id: String,
        failed_offsets: Vec<usize>,
        first_error: String,
    },

    #[error("{} detail page(s) failed: {failed_urls:?}: {first_error}", .failed_urls.len())]
    PartialDetailFailure {
        failed_urls: Vec<String>,
        first_error: String,
    },

    #[error("{what} did not finish within {after:?}")]
    BatchTimeout { what: String, after: Duration },
}
