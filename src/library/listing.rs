//! Paginated enumeration of bucket keys.
//!
//! The store returns keys in key order, so the continuation cursor is simply
//! the greatest key seen so far (`start-after`), not a server-issued token.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::error::LibraryError;

/// One page of a bucket listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingPage {
    pub keys: Vec<String>,
    pub is_truncated: bool,
}

/// Fetches a single listing page, resuming after `start_after` when given.
pub trait PageFetcher {
    fn fetch_page(&self, start_after: Option<&str>) -> Result<ListingPage, LibraryError>;
}

/// Enumerate every object key, one page at a time.
///
/// Directory markers (keys ending in `/`) are dropped. Any page failure
/// aborts the listing; no partial result is returned.
pub fn list_all(fetcher: &dyn PageFetcher) -> Result<Vec<String>, LibraryError> {
    let mut keys: Vec<String> = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page = fetcher.fetch_page(cursor.as_deref())?;
        pages += 1;

        let next_cursor = page.keys.iter().max().cloned();
        keys.extend(page.keys.into_iter().filter(|k| !k.ends_with('/')));

        if !page.is_truncated {
            break;
        }

        match next_cursor {
            // An empty truncated page would request the same page forever.
            None => break,
            Some(next) => {
                if cursor.as_deref().is_some_and(|prev| next.as_str() <= prev) {
                    warn!(cursor = %next, "listing cursor did not advance; stopping");
                    break;
                }
                cursor = Some(next);
            }
        }
    }

    debug!(pages, keys = keys.len(), "listing complete");
    Ok(keys)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ListBucketResult {
    #[serde(default)]
    is_truncated: bool,
    #[serde(default)]
    contents: Vec<ObjectEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ObjectEntry {
    key: String,
}

/// Parse an S3-style `ListBucketResult` document.
pub fn parse_page(xml: &str) -> Result<ListingPage, LibraryError> {
    let result: ListBucketResult = quick_xml::de::from_str(xml)
        .map_err(|e| LibraryError::ListingFailed(format!("invalid listing document: {e}")))?;

    Ok(ListingPage {
        keys: result.contents.into_iter().map(|c| c.key).collect(),
        is_truncated: result.is_truncated,
    })
}

/// Fetches listing pages over HTTP.
pub struct HttpPageFetcher {
    client: Client,
    list_url: String,
}

impl HttpPageFetcher {
    pub fn new(list_url: impl Into<String>, timeout: Duration) -> Result<Self, LibraryError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LibraryError::ListingFailed(e.to_string()))?;

        Ok(Self {
            client,
            list_url: list_url.into(),
        })
    }

    /// The listing URL with `start-after` appended when resuming.
    pub fn page_url(&self, start_after: Option<&str>) -> String {
        match start_after {
            None => self.list_url.clone(),
            Some(after) => {
                let sep = if self.list_url.contains('?') { '&' } else { '?' };
                format!(
                    "{}{}start-after={}",
                    self.list_url,
                    sep,
                    urlencoding::encode(after)
                )
            }
        }
    }
}

impl PageFetcher for HttpPageFetcher {
    fn fetch_page(&self, start_after: Option<&str>) -> Result<ListingPage, LibraryError> {
        let url = self.page_url(start_after);
        debug!(%url, "fetching listing page");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| LibraryError::ListingFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LibraryError::ListingFailed(format!(
                "listing request returned status {status}"
            )));
        }

        let body = response
            .text()
            .map_err(|e| LibraryError::ListingFailed(e.to_string()))?;
        parse_page(&body)
    }
}
