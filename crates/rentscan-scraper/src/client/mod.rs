//! HTTP client for the property portal's typeahead, search and detail pages.

mod detail;
mod search;
mod typeahead;

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{redirect, Client, Url};
use serde::de::DeserializeOwned;

use rentscan_core::{AppConfig, Channel};

use crate::batch::BatchLimits;
use crate::error::ScraperError;

pub use detail::{DetailPage, RawDetailDocument};
pub use search::{page_offsets, PAGE_SIZE, SERVER_RESULT_CAP};

const JSON_ACCEPT: &str = "application/json";
const HTML_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Construction parameters for [`PortalClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Portal origin without trailing slash, e.g. `https://www.rightmove.co.uk`.
    pub base_url: String,
    pub typeahead_region: String,
    pub channel: Channel,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Redirects followed per request. `0` disables redirects.
    pub max_redirects: usize,
    pub limits: BatchLimits,
}

impl ClientConfig {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            typeahead_region: rentscan_core::config::DEFAULT_TYPEAHEAD_REGION.to_owned(),
            channel: Channel::Rent,
            user_agent: rentscan_core::config::DEFAULT_USER_AGENT.to_owned(),
            timeout_secs: 30,
            max_redirects: 10,
            limits: BatchLimits::default(),
        }
    }

    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            typeahead_region: config.typeahead_region.clone(),
            channel: config.channel,
            user_agent: config.user_agent.clone(),
            timeout_secs: config.request_timeout_secs,
            limits: BatchLimits {
                max_concurrency: config.max_concurrent_requests,
                timeout: config.batch_timeout_secs.map(Duration::from_secs),
            },
            ..Self::new(&config.base_url)
        }
    }
}

/// Client for the portal's undocumented JSON endpoints and listing pages.
///
/// Owns one pooled `reqwest::Client`; clone-free sharing across concurrent
/// requests happens through `&self`. Nothing is retried: transport failures,
/// non-2xx statuses and malformed JSON surface as typed errors.
pub struct PortalClient {
    client: Client,
    config: ClientConfig,
}

impl PortalClient {
    /// Builds the client with static browser-like headers, the configured
    /// timeout and redirect policy.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidUrl`] if `base_url` cannot be used as a base
    ///   or a `Referer` header.
    /// - [`ScraperError::Http`] if the underlying `reqwest::Client` cannot be
    ///   constructed.
    pub fn new(config: ClientConfig) -> Result<Self, ScraperError> {
        Url::parse(&config.base_url).map_err(|e| ScraperError::InvalidUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        let mut headers = HeaderMap::new();
        let referer = HeaderValue::from_str(&format!("{}/", config.base_url)).map_err(|e| {
            ScraperError::InvalidUrl {
                url: config.base_url.clone(),
                reason: e.to_string(),
            }
        })?;
        headers.insert(reqwest::header::REFERER, referer);
        headers.insert(
            reqwest::header::ACCEPT_LANGUAGE,
            HeaderValue::from_static("en-GB,en;q=0.9"),
        );

        let redirect_policy = if config.max_redirects == 0 {
            redirect::Policy::none()
        } else {
            redirect::Policy::limited(config.max_redirects)
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .redirect(redirect_policy)
            .build()?;

        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Resolves a listing link (often site-relative, e.g.
    /// `/properties/163907069#/`) against the portal origin.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidUrl`] if the link cannot be joined.
    pub fn absolute_url(&self, href: &str) -> Result<String, ScraperError> {
        let base = self.base()?;
        base.join(href)
            .map(String::from)
            .map_err(|e| ScraperError::InvalidUrl {
                url: href.to_owned(),
                reason: e.to_string(),
            })
    }

    fn base(&self) -> Result<Url, ScraperError> {
        Url::parse(&self.config.base_url).map_err(|e| ScraperError::InvalidUrl {
            url: self.config.base_url.clone(),
            reason: e.to_string(),
        })
    }

    /// GETs `url` and returns the body of a 2xx response.
    async fn get_text(&self, url: &str, accept: &'static str) -> Result<String, ScraperError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, accept)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(response.text().await?)
    }

    /// GETs `url` and decodes a 2xx JSON body into `T`.
    async fn get_json<T, C>(&self, url: &str, context: C) -> Result<T, ScraperError>
    where
        T: DeserializeOwned,
        C: FnOnce() -> String,
    {
        let body = self.get_text(url, JSON_ACCEPT).await?;
        serde_json::from_str::<T>(&body).map_err(|source| ScraperError::Deserialize {
            context: context(),
            source,
        })
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
