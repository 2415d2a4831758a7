use std::time::Duration;

use futures_util::StreamExt;
use reqwest::{Client, StatusCode};
use tracing::debug;

use super::DownloadError;

/// Upper bound for the body buffer pre-allocated from `Content-Length`.
const MAX_PREALLOCATION: usize = 64 << 20;

/// Remote source of artifact bytes.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, DownloadError>;
}

/// [`Fetcher`] over HTTP.
///
/// The timeout bounds connecting and every single read, not the whole
/// transfer, so a slow but steady body is never cut off.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder()
            .user_agent(format!("{}/{}", crate::LAUNCHER_NAME, crate::LAUNCHER_VERSION))
            .connect_timeout(timeout)
            .read_timeout(timeout)
            .build()?;

        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, DownloadError> {
        let transport = |err: reqwest::Error| DownloadError::Transport {
            url: url.to_string(),
            error: err.to_string(),
        };

        let res = self.client.get(url).send().await.map_err(transport)?;

        match res.status() {
            StatusCode::NOT_FOUND => {
                return Err(DownloadError::NotFound {
                    url: url.to_string(),
                })
            }
            status if !status.is_success() => {
                return Err(DownloadError::Status {
                    url: url.to_string(),
                    status: status.as_u16(),
                })
            }
            _ => {}
        }

        let capacity = res
            .content_length()
            .map_or(0, |len| usize::try_from(len).unwrap_or(usize::MAX).min(MAX_PREALLOCATION));
        let mut body = Vec::with_capacity(capacity);
        let mut stream = res.bytes_stream();

        while let Some(chunk) = stream.next().await {
            body.extend_from_slice(&chunk.map_err(transport)?);
        }

        debug!("Fetched {url} ({} bytes)", body.len());

        Ok(body)
    }
}
