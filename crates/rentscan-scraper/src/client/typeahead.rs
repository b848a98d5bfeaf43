//! Location lookup through the typeahead endpoint.

use crate::error::ScraperError;
use crate::tokenize::tokenize_query;
use crate::types::{LocationId, TypeAheadResponse};

use super::PortalClient;

impl PortalClient {
    /// Resolves a free-text location to candidate location identifiers,
    /// most relevant first, in exactly the order the server ranked them.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::EmptyResult`]: the server returned no candidates,
    ///   or `query` is blank (no request is made then).
    /// - [`ScraperError::Http`] / [`ScraperError::UnexpectedStatus`]: transport failure.
    /// - [`ScraperError::Deserialize`]: the body is not the expected JSON.
    pub async fn resolve_locations(&self, query: &str) -> Result<Vec<LocationId>, ScraperError> {
        if query.trim().is_empty() {
            return Err(ScraperError::EmptyResult {
                query: query.to_owned(),
            });
        }

        let url = self.typeahead_url(query)?;
        tracing::debug!(query, url = %url, "resolving location");

        let response: TypeAheadResponse = self
            .get_json(&url, || format!("typeahead response for \"{query}\""))
            .await?;

        let ids: Vec<LocationId> = response
            .type_ahead_locations
            .into_iter()
            .map(|location| LocationId(location.location_identifier))
            .collect();

        if ids.is_empty() {
            return Err(ScraperError::EmptyResult {
                query: query.to_owned(),
            });
        }

        tracing::info!(query, candidates = ids.len(), first = %ids[0], "resolved location");
        Ok(ids)
    }

    /// Builds `<base>/typeAhead/<region>/<token>/`, percent-encoding each
    /// token segment.
    pub(super) fn typeahead_url(&self, query: &str) -> Result<String, ScraperError> {
        let token = tokenize_query(query);
        let mut url = self.base()?;
        {
            let mut segments = url.path_segments_mut().map_err(|()| ScraperError::InvalidUrl {
                url: self.config.base_url.clone(),
                reason: "cannot be used as a base URL".to_owned(),
            })?;
            segments
                .pop_if_empty()
                .push("typeAhead")
                .push(&self.config.typeahead_region)
                .extend(token.split('/'))
                .push("");
        }
        Ok(url.into())
    }
}
