//! Conversation state that folds streamed deltas into a message history.

use crate::client::ChatClient;
use crate::error::{ChatError, ChatResult, StreamError};
use crate::models::MessageHistory;
use crate::sse::SemanticDelta;
use crate::traits::{HttpClient, StreamObserver};

/// A single conversation: its history and whether a reply is streaming.
///
/// Only one send may be in flight. Every outcome of a stream clears the
/// in-flight flag so the user can send again.
#[derive(Debug, Default)]
pub struct ChatSession {
    history: MessageHistory,
    in_flight: bool,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &MessageHistory {
        &self.history
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Record a user message and mark a send in flight.
    ///
    /// Rejects blank input and a second send while one is in flight, leaving
    /// the history untouched.
    pub fn begin_send(&mut self, text: &str) -> ChatResult<()> {
        if text.trim().is_empty() {
            return Err(StreamError::EmptyMessage.into());
        }
        if self.in_flight {
            return Err(StreamError::AlreadyStreaming.into());
        }

        self.history.push_user(text);
        self.in_flight = true;
        Ok(())
    }

    /// Send `text` through `client` and fold the reply into the history.
    ///
    /// Transport failures are recorded as a system message and returned.
    pub async fn submit<C: HttpClient>(&mut self, client: &ChatClient<C>, text: &str) -> ChatResult<()> {
        self.begin_send(text)?;
        client.send_with_observer(text, self).await
    }
}

impl StreamObserver for ChatSession {
    fn on_delta(&mut self, delta: SemanticDelta) {
        self.history.apply(delta);
    }

    fn on_error(&mut self, error: &ChatError) {
        tracing::debug!(
            code = error.error_code(),
            retryable = error.is_retryable(),
            "stream failed: {}",
            error
        );
        // No stream end follows an error, so close the partial reply here.
        self.history.complete_model_messages();
        self.history.push_system(format!("Error: {}", error));
        self.in_flight = false;
    }

    fn on_stream_end(&mut self) {
        self.history.complete_model_messages();
        self.in_flight = false;
    }
}
