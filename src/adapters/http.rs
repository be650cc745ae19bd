use crate::domain::ports::Fetcher;
use crate::utils::error::{Result, SitewireError};
use async_trait::async_trait;
use reqwest::Client;

/// Fragment retrieval over HTTP.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        tracing::debug!("Requesting fragment: {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        tracing::debug!("Fragment response status: {}", status);

        if !status.is_success() {
            return Err(SitewireError::FetchStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}
