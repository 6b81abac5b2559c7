//! Mock streaming transport for testing.
//!
//! Serves scripted chunk sequences so the decode pipeline can be exercised
//! with arbitrary chunk boundaries and mid-stream failures, without a server.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::NetworkError;
use crate::traits::{ByteStream, Headers, HttpClient};

/// A recorded request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Serialized request body
    pub body: String,
}

/// Scripted outcome of a `post_stream` call.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Yield these chunks in order, then end cleanly
    Stream(Vec<Bytes>),
    /// Yield these chunks, then fail with the error
    StreamThenError(Vec<Bytes>, NetworkError),
    /// Fail before any chunk is produced
    Error(NetworkError),
    /// Successful status with no body
    NoBody,
}

impl MockResponse {
    /// Stream the given text split into the given pieces verbatim.
    pub fn chunks<I, S>(pieces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MockResponse::Stream(
            pieces
                .into_iter()
                .map(|piece| Bytes::from(piece.into()))
                .collect(),
        )
    }
}

/// Mock HTTP client for testing.
///
/// Clones share responses and recorded requests.
///
/// # Example
///
/// ```ignore
/// use streamchat::adapters::mock::{MockHttpClient, MockResponse};
///
/// let client = MockHttpClient::new();
/// client.set_response(
///     "http://localhost:8000/run_sse",
///     MockResponse::chunks(["data: {\"text\":\"Hel", "lo\"}\n"]),
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    default_response: Arc<Mutex<Option<MockResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the response for a URL. Matched exactly first, then as a prefix.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.to_string(), response);
    }

    /// Response used when no URL matches.
    pub fn set_default_response(&self, response: MockResponse) {
        *self
            .default_response
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(response);
    }

    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear_requests(&self) {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn record_request(&self, url: &str, headers: &Headers, body: &str) {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedRequest {
                url: url.to_string(),
                headers: headers.clone(),
                body: body.to_string(),
            });
    }

    fn get_response(&self, url: &str) -> Option<MockResponse> {
        let responses = self.responses.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(response) = responses.get(url) {
            return Some(response.clone());
        }

        let prefixed = responses
            .iter()
            .filter(|(pattern, _)| url.starts_with(pattern.as_str()))
            .max_by_key(|(pattern, _)| pattern.len())
            .map(|(_, response)| response.clone());
        if prefixed.is_some() {
            return prefixed;
        }

        self.default_response
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, NetworkError> {
        self.record_request(url, headers, body);

        match self.get_response(url) {
            Some(MockResponse::Stream(chunks)) => {
                Ok(Box::pin(stream::iter(chunks.into_iter().map(Ok))))
            }
            Some(MockResponse::StreamThenError(chunks, err)) => {
                let items = chunks
                    .into_iter()
                    .map(Ok)
                    .chain(std::iter::once(Err(err)));
                Ok(Box::pin(stream::iter(items)))
            }
            Some(MockResponse::Error(err)) => Err(err),
            Some(MockResponse::NoBody) => Err(NetworkError::MissingBody),
            None => Err(NetworkError::Other {
                message: format!("No mock response for URL: {}", url),
            }),
        }
    }
}
