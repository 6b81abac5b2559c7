//! SSE decoder trait abstraction.
//!
//! Lets the streaming pipeline be driven by any chunk-to-event decoder.

use crate::sse::{EventStreamDecoder, RawEvent};

/// Trait for incremental SSE decoding.
///
/// The decoder is stateful: it carries partial lines from one chunk to the
/// next. Neither method fails; malformed payloads are dropped internally.
pub trait SseDecoderTrait: Send {
    /// Feed raw body bytes, returning the events they complete.
    fn feed_bytes(&mut self, bytes: &[u8]) -> Vec<RawEvent>;

    /// Drain whatever is left at end of stream.
    fn finish(&mut self) -> Vec<RawEvent>;

    /// Payload lines dropped so far because they were not valid JSON.
    fn skipped_lines(&self) -> usize;
}

impl SseDecoderTrait for EventStreamDecoder {
    fn feed_bytes(&mut self, bytes: &[u8]) -> Vec<RawEvent> {
        EventStreamDecoder::feed_bytes(self, bytes)
    }

    fn finish(&mut self) -> Vec<RawEvent> {
        EventStreamDecoder::finish(self)
    }

    fn skipped_lines(&self) -> usize {
        EventStreamDecoder::skipped_lines(self)
    }
}
