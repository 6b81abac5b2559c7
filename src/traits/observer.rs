//! Caller-facing callback contract for one stream.

use crate::error::ChatError;
use crate::sse::SemanticDelta;

/// Receives the outcome of one stream.
///
/// Per stream: `on_delta` zero or more times, then exactly one of `on_error`
/// or `on_stream_end`. Nothing is delivered after the terminal call.
pub trait StreamObserver {
    fn on_delta(&mut self, delta: SemanticDelta);

    fn on_error(&mut self, error: &ChatError);

    fn on_stream_end(&mut self);
}

/// Observer that records every callback, in order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordingObserver {
    pub deltas: Vec<SemanticDelta>,
    pub errors: Vec<String>,
    pub ended: usize,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Concatenation of every `TextAppend` received.
    pub fn text(&self) -> String {
        self.deltas.iter().filter_map(SemanticDelta::text).collect()
    }
}

impl StreamObserver for RecordingObserver {
    fn on_delta(&mut self, delta: SemanticDelta) {
        self.deltas.push(delta);
    }

    fn on_error(&mut self, error: &ChatError) {
        self.errors.push(error.to_string());
    }

    fn on_stream_end(&mut self) {
        self.ended += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NetworkError;

    #[test]
    fn test_recording_observer() {
        let mut observer = RecordingObserver::new();
        observer.on_delta(SemanticDelta::TextAppend("a".to_string()));
        observer.on_delta(SemanticDelta::Noop);
        observer.on_delta(SemanticDelta::TextAppend("b".to_string()));
        observer.on_error(&NetworkError::MissingBody.into());

        assert_eq!(observer.text(), "ab");
        assert_eq!(observer.deltas.len(), 3);
        assert_eq!(observer.errors, vec!["Response body is null.".to_string()]);
        assert_eq!(observer.ended, 0);
    }
}
