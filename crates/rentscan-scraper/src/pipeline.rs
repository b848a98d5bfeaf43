//! End-to-end flows: location query → summary records, and listing URLs →
//! detail records.

use crate::client::{DetailPage, PortalClient};
use crate::embed::extract_property_data;
use crate::error::ScraperError;
use crate::projection::{FieldMapping, ProjectedRecord};

/// Resolves `query`, searches the best-ranked location and projects every
/// listing summary through `mapping`.
///
/// # Errors
///
/// Any error from [`PortalClient::resolve_locations`] or
/// [`PortalClient::search`].
pub async fn collect_listings(
    client: &PortalClient,
    query: &str,
    max_results: usize,
    mapping: &FieldMapping,
) -> Result<Vec<ProjectedRecord>, ScraperError> {
    let locations = client.resolve_locations(query).await?;
    let Some(location) = locations.first() else {
        return Err(ScraperError::EmptyResult {
            query: query.to_owned(),
        });
    };

    let listings = client.search(location, max_results).await?;
    Ok(mapping.project_all(&listings))
}

/// Fetches every listing page, extracts its `propertyData` and projects it
/// through `mapping`.
///
/// Pages without an embedded page model (delisted or redirected listings)
/// are skipped with a warning, so the result may be shorter than `urls`.
/// Records are in fetch completion order.
///
/// # Errors
///
/// - [`ScraperError::PartialDetailFailure`] if any page could not be fetched.
/// - [`ScraperError::BatchTimeout`] if the batch deadline elapsed.
pub async fn scrape_properties<S>(
    client: &PortalClient,
    urls: &[S],
    mapping: &FieldMapping,
) -> Result<Vec<ProjectedRecord>, ScraperError>
where
    S: AsRef<str>,
{
    let pages = client.fetch_detail_pages(urls).await?;
    let documents = DetailPage::into_documents(pages)?;

    let mut records = Vec::with_capacity(documents.len());
    for document in &documents {
        if let Some(data) = extract_property_data(&document.html) {
            records.push(mapping.project(&data));
        } else {
            tracing::warn!(url = %document.url, "no embedded property data; skipping");
        }
    }

    tracing::info!(
        requested = urls.len(),
        extracted = records.len(),
        "detail records projected"
    );
    Ok(records)
}
