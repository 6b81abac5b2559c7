//! Streaming HTTP transport abstraction.
//!
//! The decoder never talks to the network itself. It consumes the ordered
//! chunk sequence produced by an [`HttpClient`], which lets tests swap in a
//! scripted transport.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::collections::HashMap;
use std::pin::Pin;

use crate::error::NetworkError;

/// HTTP headers represented as a key-value map.
pub type Headers = HashMap<String, String>;

/// Ordered response body chunks, ending with end-of-stream or a transport error.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, NetworkError>> + Send>>;

/// Trait for the streaming transport.
///
/// # Example
///
/// ```ignore
/// use streamchat::traits::{Headers, HttpClient};
///
/// async fn open<C: HttpClient>(client: &C) -> Result<(), NetworkError> {
///     let mut chunks = client.post_stream("http://localhost:8000/run_sse", "{}", &Headers::new()).await?;
///     while let Some(chunk) = chunks.next().await {
///         println!("{} bytes", chunk?.len());
///     }
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// POST `body` and return the response body as a chunk stream.
    ///
    /// A non-2xx status is reported as [`NetworkError::HttpStatus`] before any
    /// chunk is yielded.
    ///
    /// # Arguments
    /// * `url` - The URL to request
    /// * `body` - Request body, already serialized
    /// * `headers` - Request headers
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, NetworkError>;
}

/// Headers for a JSON request that expects an event-stream response.
pub fn sse_request_headers() -> Headers {
    let mut headers = Headers::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    headers.insert("Accept".to_string(), "text/event-stream".to_string());
    headers
}
