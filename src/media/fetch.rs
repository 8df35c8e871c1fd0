//! Reading a media reference into memory.

use std::time::Duration;

use reqwest::blocking::Client;

use super::error::MediaError;

pub(super) fn is_remote(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Whole-file reader for `http(s)` URLs and filesystem paths.
pub(super) struct Fetcher {
    client: Option<Client>,
}

impl Fetcher {
    pub(super) fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| tracing::warn!(error = %e, "http client unavailable, remote media disabled"))
            .ok();
        Self { client }
    }

    pub(super) fn fetch(&self, url: &str) -> Result<Vec<u8>, MediaError> {
        if !is_remote(url) {
            return Ok(std::fs::read(url)?);
        }
        let Some(client) = &self.client else {
            return Err(MediaError::Io(std::io::Error::other(
                "no http client available",
            )));
        };
        let bytes = client.get(url).send()?.error_for_status()?.bytes()?;
        Ok(bytes.to_vec())
    }
}
