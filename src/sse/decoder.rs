//! Incremental SSE decoder.
//!
//! Turns an ordered sequence of response chunks into [`RawEvent`]s. Chunk
//! boundaries are arbitrary: they may split a line, a JSON value or a
//! multi-byte UTF-8 character, and none of that changes the output.

use crate::error::StreamError;
use crate::sse::events::{RawEvent, DATA_PREFIX};

/// Longest payload excerpt kept in a parse-failure log record.
const LOG_EXCERPT_CHARS: usize = 120;

/// Stateful decoder for one response stream.
///
/// Holds the carry-over text between chunks. After every [`feed`](Self::feed)
/// the buffer holds at most one partial line and never a line that was already
/// emitted.
///
/// # Example
///
/// ```
/// use streamchat::sse::EventStreamDecoder;
///
/// let mut decoder = EventStreamDecoder::new();
/// assert!(decoder.feed("data: {\"text\":").is_empty());
/// let events = decoder.feed("\"hi\"}\n");
/// assert_eq!(events, vec![serde_json::json!({"text": "hi"})]);
/// ```
#[derive(Debug, Default)]
pub struct EventStreamDecoder {
    /// Text received but not yet resolved into complete lines
    buffer: String,
    /// Bytes of a UTF-8 sequence cut off by a chunk boundary
    utf8: Utf8Carry,
    /// Payload lines dropped because they were not valid JSON
    skipped: usize,
}

impl EventStreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk of text and return the events it completes, in order.
    pub fn feed(&mut self, chunk: &str) -> Vec<RawEvent> {
        self.buffer.push_str(chunk);

        let Some(last_newline) = self.buffer.rfind('\n') else {
            return Vec::new();
        };

        let carry = self.buffer.split_off(last_newline + 1);
        let mut complete = std::mem::replace(&mut self.buffer, carry);
        complete.truncate(last_newline);

        complete
            .split('\n')
            .filter_map(|line| self.parse_line(line))
            .collect()
    }

    /// Feed raw response bytes, decoding UTF-8 incrementally.
    ///
    /// An incomplete trailing character is held back until the next call.
    /// Invalid sequences become U+FFFD.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Vec<RawEvent> {
        let text = self.utf8.decode(bytes);
        self.feed(&text)
    }

    /// Drain the residual buffer at end of stream.
    ///
    /// The leftover fragment is treated as a final line that lost its
    /// terminator. Anything unparsable is discarded; this never fails.
    pub fn finish(&mut self) -> Vec<RawEvent> {
        let tail = self.utf8.flush();
        self.buffer.push_str(&tail);

        let residual = std::mem::take(&mut self.buffer);
        if residual.trim().is_empty() {
            return Vec::new();
        }

        tracing::debug!(
            residual_len = residual.len(),
            "parsing unterminated fragment at end of stream"
        );

        residual
            .split('\n')
            .filter_map(|line| self.parse_line(line))
            .collect()
    }

    /// Text currently held back as a partial line.
    pub fn buffered(&self) -> &str {
        &self.buffer
    }

    /// Number of `data: ` lines dropped so far because their payload was not JSON.
    pub fn skipped_lines(&self) -> usize {
        self.skipped
    }

    fn parse_line(&mut self, line: &str) -> Option<RawEvent> {
        let payload = line.strip_prefix(DATA_PREFIX)?.trim();
        if payload.is_empty() {
            return None;
        }

        match serde_json::from_str::<RawEvent>(payload) {
            Ok(event) => {
                tracing::trace!(payload_len = payload.len(), "decoded SSE event");
                Some(event)
            }
            Err(e) => {
                self.skipped += 1;
                let err = StreamError::InvalidJson {
                    payload: excerpt(payload),
                    message: e.to_string(),
                };
                tracing::warn!(error = %err, "dropping SSE data line");
                None
            }
        }
    }
}

fn excerpt(payload: &str) -> String {
    if payload.chars().count() <= LOG_EXCERPT_CHARS {
        payload.to_string()
    } else {
        let head: String = payload.chars().take(LOG_EXCERPT_CHARS).collect();
        format!("{}...", head)
    }
}

/// Incremental UTF-8 decoding state.
#[derive(Debug, Default)]
struct Utf8Carry {
    pending: Vec<u8>,
}

impl Utf8Carry {
    fn decode(&mut self, bytes: &[u8]) -> String {
        self.pending.extend_from_slice(bytes);
        let mut out = String::with_capacity(self.pending.len());

        loop {
            match std::str::from_utf8(&self.pending) {
                Ok(text) => {
                    out.push_str(text);
                    self.pending.clear();
                    break;
                }
                Err(e) => {
                    let valid = e.valid_up_to();
                    out.push_str(&String::from_utf8_lossy(&self.pending[..valid]));
                    match e.error_len() {
                        // Sequence cut short by the chunk boundary
                        None => {
                            self.pending.drain(..valid);
                            break;
                        }
                        Some(invalid) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            self.pending.drain(..valid + invalid);
                        }
                    }
                }
            }
        }

        out
    }

    fn flush(&mut self) -> String {
        let rest = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        rest
    }
}
