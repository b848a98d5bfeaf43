//! Concurrent retrieval of listing detail pages.

use crate::batch::run_unordered;
use crate::error::ScraperError;

use super::{PortalClient, HTML_ACCEPT};

/// Outcome of fetching one detail page. Failures are kept per URL so one
/// bad link does not discard the rest of the batch.
#[derive(Debug)]
pub struct DetailPage {
    pub url: String,
    pub body: Result<String, ScraperError>,
}

/// A successfully fetched detail page, paired with the URL it came from.
#[derive(Debug, Clone)]
pub struct RawDetailDocument {
    pub url: String,
    pub html: String,
}

impl DetailPage {
    /// Converts a fetched batch into documents, failing the whole batch if
    /// any page failed.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::PartialDetailFailure`] listing every failed URL
    /// (in batch order) and the first failure's message.
    pub fn into_documents(pages: Vec<DetailPage>) -> Result<Vec<RawDetailDocument>, ScraperError> {
        let mut documents = Vec::with_capacity(pages.len());
        let mut failed_urls = Vec::new();
        let mut first_error: Option<String> = None;

        for page in pages {
            match page.body {
                Ok(html) => documents.push(RawDetailDocument {
                    url: page.url,
                    html,
                }),
                Err(err) => {
                    first_error.get_or_insert_with(|| err.to_string());
                    failed_urls.push(page.url);
                }
            }
        }

        match first_error {
            Some(first_error) => Err(ScraperError::PartialDetailFailure {
                failed_urls,
                first_error,
            }),
            None => Ok(documents),
        }
    }
}

impl PortalClient {
    /// Fetches every URL concurrently and returns one [`DetailPage`] per URL
    /// in completion order.
    ///
    /// # Errors
    ///
    /// Only [`ScraperError::BatchTimeout`]; per-URL failures are reported in
    /// each page's `body`.
    pub async fn fetch_detail_pages<S>(&self, urls: &[S]) -> Result<Vec<DetailPage>, ScraperError>
    where
        S: AsRef<str>,
    {
        let tasks: Vec<_> = urls
            .iter()
            .map(|url| {
                let url = url.as_ref();
                async move {
                    let body = self.fetch_detail_page(url).await;
                    if let Err(err) = &body {
                        tracing::warn!(url, error = %err, "detail page fetch failed");
                    }
                    DetailPage {
                        url: url.to_owned(),
                        body,
                    }
                }
            })
            .collect();

        let pages = run_unordered(&self.config.limits, "detail pages", tasks).await?;
        tracing::info!(
            requested = urls.len(),
            fetched = pages.iter().filter(|p| p.body.is_ok()).count(),
            "detail pages fetched"
        );
        Ok(pages)
    }

    /// Fetches a single detail page body.
    ///
    /// # Errors
    ///
    /// [`ScraperError::Http`] or [`ScraperError::UnexpectedStatus`].
    pub async fn fetch_detail_page(&self, url: &str) -> Result<String, ScraperError> {
        tracing::debug!(url, "fetching detail page");
        self.get_text(url, HTML_ACCEPT).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(url: &str) -> DetailPage {
        DetailPage {
            url: url.to_owned(),
            body: Ok(format!("<html>{url}</html>")),
        }
    }

    fn failed(url: &str, status: u16) -> DetailPage {
        DetailPage {
            url: url.to_owned(),
            body: Err(ScraperError::UnexpectedStatus {
                status,
                url: url.to_owned(),
            }),
        }
    }

    #[test]
    fn into_documents_keeps_url_pairing() {
        let docs = DetailPage::into_documents(vec![ok("https://a/1"), ok("https://a/2")]).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].url, "https://a/1");
        assert_eq!(docs[0].html, "<html>https://a/1</html>");
        assert_eq!(docs[1].url, "https://a/2");
    }

    #[test]
    fn into_documents_fails_batch_and_lists_every_failed_url() {
        let err = DetailPage::into_documents(vec![
            ok("https://a/1"),
            failed("https://a/2", 404),
            failed("https://a/3", 503),
        ])
        .unwrap_err();

        match err {
            ScraperError::PartialDetailFailure {
                failed_urls,
                first_error,
            } => {
                assert_eq!(failed_urls, vec!["https://a/2", "https://a/3"]);
                assert!(first_error.contains("404"), "{first_error}");
            }
            other => panic!("expected PartialDetailFailure, got: {other:?}"),
        }
    }

    #[test]
    fn into_documents_empty_batch() {
        assert!(DetailPage::into_documents(Vec::new()).unwrap().is_empty());
    }
}
