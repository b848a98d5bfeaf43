//! Offset pagination over the search endpoint.
//!
//! The first page is fetched on its own because it carries the total result
//! count. Every other page offset is then known up front, so the remaining
//! pages go out as one concurrent batch instead of a sequential walk.

use crate::batch::run_unordered;
use crate::error::ScraperError;
use crate::types::{ListingSummary, LocationId, SearchPage};

use super::PortalClient;

/// Listings per search page, sent as `numberOfPropertiesPerPage`.
pub const PAGE_SIZE: usize = 24;

/// The server refuses offsets at or beyond this many results.
pub const SERVER_RESULT_CAP: usize = 1000;

/// Offsets of the pages still needed after page 0.
///
/// Every multiple of `page_size` strictly below
/// `min(total_results, max_results, hard_cap)`, excluding 0.
#[must_use]
pub fn page_offsets(
    total_results: usize,
    max_results: usize,
    hard_cap: usize,
    page_size: usize,
) -> Vec<usize> {
    if page_size == 0 {
        return Vec::new();
    }
    let limit = total_results.min(max_results).min(hard_cap);
    (page_size..limit).step_by(page_size).collect()
}

impl PortalClient {
    /// Collects listing summaries for `location_id`, up to roughly
    /// `max_results` (page granularity; page 0 is always returned whole).
    ///
    /// The order of listings across pages is unspecified: pages are merged
    /// as they complete. Within a page the server's order is kept.
    ///
    /// # Errors
    ///
    /// - Any error from fetching page 0 is returned as-is.
    /// - [`ScraperError::PartialPageFailure`] if one or more later pages
    ///   failed. All scheduled pages are still awaited first.
    /// - [`ScraperError::BatchTimeout`] if the configured batch deadline
    ///   elapses; outstanding page requests are cancelled.
    pub async fn search(
        &self,
        location_id: &LocationId,
        max_results: usize,
    ) -> Result<Vec<ListingSummary>, ScraperError> {
        let first = self.fetch_search_page(location_id, 0).await?;
        let total_results = first.result_count.unwrap_or(first.properties.len());
        let mut listings = first.properties;

        let offsets = page_offsets(total_results, max_results, SERVER_RESULT_CAP, PAGE_SIZE);
        tracing::info!(
            location = %location_id,
            total_results,
            max_results,
            extra_pages = offsets.len(),
            "search page 0 fetched"
        );

        let tasks: Vec<_> = offsets
            .iter()
            .map(|&offset| async move {
                let page = self.fetch_search_page(location_id, offset).await;
                (offset, page)
            })
            .collect();

        let outcomes = run_unordered(&self.config.limits, "search pages", tasks).await?;

        let mut failed_offsets = Vec::new();
        let mut first_error: Option<String> = None;
        for (offset, outcome) in outcomes {
            match outcome {
                Ok(page) => listings.extend(page.properties),
                Err(err) => {
                    tracing::warn!(
                        location = %location_id,
                        offset,
                        error = %err,
                        "search page failed"
                    );
                    failed_offsets.push(offset);
                    first_error.get_or_insert_with(|| err.to_string());
                }
            }
        }

        if let Some(first_error) = first_error {
            failed_offsets.sort_unstable();
            return Err(ScraperError::PartialPageFailure {
                location_id: location_id.to_string(),
                failed_offsets,
                first_error,
            });
        }

        tracing::info!(location = %location_id, listings = listings.len(), "search complete");
        Ok(listings)
    }

    async fn fetch_search_page(
        &self,
        location_id: &LocationId,
        offset: usize,
    ) -> Result<SearchPage, ScraperError> {
        let url = self.search_url(location_id, offset)?;
        tracing::debug!(url = %url, offset, "fetching search page");

        let mut page: SearchPage = self
            .get_json(&url, || format!("search page at offset {offset} for {location_id}"))
            .await?;

        if page.properties.len() > PAGE_SIZE {
            tracing::warn!(
                offset,
                returned = page.properties.len(),
                "search page larger than requested; truncating"
            );
            page.properties.truncate(PAGE_SIZE);
        }
        Ok(page)
    }

    /// Builds the `api/_search` URL for one page. Parameters other than the
    /// location, channel and offset are fixed for this portal.
    pub(super) fn search_url(
        &self,
        location_id: &LocationId,
        offset: usize,
    ) -> Result<String, ScraperError> {
        let mut url = self.base()?.join("api/_search").map_err(|e| ScraperError::InvalidUrl {
            url: self.config.base_url.clone(),
            reason: e.to_string(),
        })?;

        url.query_pairs_mut()
            .append_pair("areaSizeUnit", "sqm")
            .append_pair("channel", self.config.channel.as_str())
            .append_pair("currencyCode", "GBP")
            .append_pair("includeSSTC", "false")
            .append_pair("index", &offset.to_string())
            .append_pair("isFetching", "false")
            .append_pair("locationIdentifier", location_id.as_str())
            .append_pair("numberOfPropertiesPerPage", &PAGE_SIZE.to_string())
            .append_pair("radius", "0.0")
            .append_pair("sortType", "6")
            .append_pair("viewType", "LIST");

        Ok(url.into())
    }
}
