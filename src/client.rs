//! Streaming chat client.
//!
//! Sends one message to the run endpoint and turns the response body into
//! decoded events and semantic deltas:
//!
//! ```text
//! HttpClient::post_stream -> ByteStream -> decode_events -> RawEventStream
//!                                                        -> interpret -> DeltaStream
//! ```

use bytes::Bytes;
use futures::stream::{self, Stream};
use futures_util::StreamExt;
use std::collections::VecDeque;
use std::pin::Pin;

use crate::adapters::ReqwestHttpClient;
use crate::config::ClientConfig;
use crate::error::{ChatError, ChatResult, NetworkError};
use crate::models::RunRequest;
use crate::sse::{interpret, EventStreamDecoder, RawEvent, SemanticDelta};
use crate::traits::{sse_request_headers, HttpClient, SseDecoderTrait, StreamObserver};

/// Decoded events of one response, ending with end-of-stream or one error.
pub type RawEventStream = Pin<Box<dyn Stream<Item = ChatResult<RawEvent>> + Send>>;

/// Semantic deltas of one response, ending with end-of-stream or one error.
pub type DeltaStream = Pin<Box<dyn Stream<Item = ChatResult<SemanticDelta>> + Send>>;

/// Client for the streaming run endpoint.
///
/// Each `send*` call is one independent stream with its own decoder. Dropping
/// a returned stream cancels it.
pub struct ChatClient<C: HttpClient = ReqwestHttpClient> {
    config: ClientConfig,
    http: C,
}

impl ChatClient<ReqwestHttpClient> {
    /// Create a client backed by reqwest, honoring the configured timeout.
    pub fn new(config: ClientConfig) -> ChatResult<Self> {
        let http = ReqwestHttpClient::from_config(&config)?;
        Ok(Self { config, http })
    }
}

impl<C: HttpClient> ChatClient<C> {
    /// Create a client over any transport.
    pub fn with_http_client(config: ClientConfig, http: C) -> Self {
        Self { config, http }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    /// Send `text` and return the decoded events.
    ///
    /// Fails before any event if the request cannot be sent or the server
    /// answers with a non-2xx status.
    pub async fn send_raw(&self, text: &str) -> ChatResult<RawEventStream> {
        let url = self.config.run_url();
        let body = serde_json::to_string(&RunRequest::new(&self.config, text))?;

        tracing::debug!(url = %url, chars = text.chars().count(), "sending message");

        let chunks = self
            .http
            .post_stream(&url, &body, &sse_request_headers())
            .await?;

        Ok(decode_events(chunks, EventStreamDecoder::new()))
    }

    /// Send `text` and return the interpreted deltas.
    ///
    /// `Noop` deltas are yielded too; callers that fold deltas ignore them.
    pub async fn send(&self, text: &str) -> ChatResult<DeltaStream> {
        let events = self.send_raw(text).await?;
        Ok(Box::pin(
            events.map(|event| event.map(|event| interpret(&event))),
        ))
    }

    /// Send `text` and drive `observer` to completion.
    ///
    /// The observer sees `on_delta` zero or more times, then exactly one of
    /// `on_error` or `on_stream_end`. The error given to `on_error` is also
    /// returned.
    pub async fn send_with_observer<O>(&self, text: &str, observer: &mut O) -> ChatResult<()>
    where
        O: StreamObserver + ?Sized,
    {
        let mut deltas = match self.send(text).await {
            Ok(deltas) => deltas,
            Err(e) => {
                observer.on_error(&e);
                return Err(e);
            }
        };

        while let Some(item) = deltas.next().await {
            match item {
                Ok(delta) => observer.on_delta(delta),
                Err(e) => {
                    observer.on_error(&e);
                    return Err(e);
                }
            }
        }

        observer.on_stream_end();
        Ok(())
    }
}

struct DecodeState<S, D> {
    chunks: S,
    decoder: D,
    pending: VecDeque<RawEvent>,
    done: bool,
}

/// Decode a chunk stream into events.
///
/// Events completed by a chunk are yielded before the next chunk is awaited.
/// At end of stream the decoder's residual buffer is given one best-effort
/// parse. A transport error is yielded once and ends the stream.
pub fn decode_events<S, D>(chunks: S, decoder: D) -> RawEventStream
where
    S: Stream<Item = Result<Bytes, NetworkError>> + Send + Unpin + 'static,
    D: SseDecoderTrait + 'static,
{
    let state = DecodeState {
        chunks,
        decoder,
        pending: VecDeque::new(),
        done: false,
    };

    let events = stream::unfold(state, |mut state| async move {
        loop {
            if let Some(event) = state.pending.pop_front() {
                tracing::trace!(event = %event, "decoded event");
                return Some((Ok(event), state));
            }
            if state.done {
                return None;
            }

            match state.chunks.next().await {
                Some(Ok(bytes)) => {
                    let events = state.decoder.feed_bytes(&bytes);
                    state.pending.extend(events);
                }
                Some(Err(e)) => {
                    tracing::debug!(error = %e, "response stream failed");
                    state.done = true;
                    return Some((Err(ChatError::from(e)), state));
                }
                None => {
                    let tail = state.decoder.finish();
                    tracing::debug!(
                        tail_events = tail.len(),
                        skipped_lines = state.decoder.skipped_lines(),
                        "response stream ended"
                    );
                    state.pending.extend(tail);
                    state.done = true;
                }
            }
        }
    });

    Box::pin(events)
}
