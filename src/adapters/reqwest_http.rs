//! Reqwest-based streaming transport.

use async_trait::async_trait;
use futures_util::StreamExt;

use crate::config::ClientConfig;
use crate::error::{classify_reqwest_error, NetworkError};
use crate::traits::{ByteStream, Headers, HttpClient};

/// [`HttpClient`] backed by a `reqwest::Client`.
///
/// Dropping the returned [`ByteStream`] drops the response body and closes the
/// connection, which is how an abandoned stream is cancelled.
///
/// # Example
///
/// ```ignore
/// use streamchat::adapters::ReqwestHttpClient;
/// use streamchat::traits::{sse_request_headers, HttpClient};
///
/// let client = ReqwestHttpClient::new();
/// let chunks = client
///     .post_stream("http://localhost:8000/run_sse", body, &sse_request_headers())
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Create a new ReqwestHttpClient with default settings.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Wrap a preconfigured reqwest::Client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Build a client honoring the configured request timeout.
    pub fn from_config(config: &ClientConfig) -> Result<Self, NetworkError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| classify_reqwest_error(&e, &config.base_url))?;
        Ok(Self { client })
    }

    /// Get a reference to the underlying reqwest::Client.
    pub fn inner(&self) -> &reqwest::Client {
        &self.client
    }

    fn apply_headers(
        builder: reqwest::RequestBuilder,
        headers: &Headers,
    ) -> reqwest::RequestBuilder {
        let mut builder = builder;
        for (key, value) in headers {
            builder = builder.header(key, value);
        }
        builder
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, NetworkError> {
        let builder = self.client.post(url).body(body.to_string());
        let builder = Self::apply_headers(builder, headers);

        let response = builder
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e, url))?;

        let status = response.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("Unknown error");
            let text = response.text().await.unwrap_or_default();
            let message = if text.trim().is_empty() {
                reason.to_string()
            } else {
                text
            };
            return Err(NetworkError::HttpStatus {
                status: status.as_u16(),
                message,
            });
        }

        tracing::debug!(url, status = status.as_u16(), "response stream opened");

        let url = url.to_string();
        let stream = response
            .bytes_stream()
            .map(move |result| result.map_err(|e| classify_reqwest_error(&e, &url)));

        Ok(Box::pin(stream))
    }
}
