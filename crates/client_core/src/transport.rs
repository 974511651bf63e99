use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::{domain::SearchPage, protocol::SearchResponse};
use tracing::debug;

use crate::{controller::StoryFetcher, error::FetchError, query::QueryUrl};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// [`StoryFetcher`] over HTTP. Non-2xx statuses and network errors are
/// transport failures; bodies that do not map onto story records are
/// malformed responses.
#[derive(Clone)]
pub struct HttpStoryFetcher {
    http: Client,
}

impl HttpStoryFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build http client")?;
        Ok(Self { http })
    }

    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl StoryFetcher for HttpStoryFetcher {
    async fn fetch(&self, url: &QueryUrl) -> Result<SearchPage, FetchError> {
        debug!(url = %url, "fetching search page");
        let response = self
            .http
            .get(url.as_str())
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|err| FetchError::transport(url, err))?;

        let body: SearchResponse = response.json().await.map_err(|err| {
            if err.is_decode() {
                FetchError::malformed(url, err)
            } else {
                FetchError::transport(url, err)
            }
        })?;

        body.into_page()
            .map_err(|err| FetchError::malformed(url, err))
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
