//! SSE (Server-Sent Events) stream decoding.
//!
//! The chat backend answers a run request with newline-delimited text where
//! only lines starting with `data: ` carry a JSON payload. Blank separator
//! lines, `event:`/`id:` fields and `:` comments are ignored.
//!
//! # Module structure
//! - `events` - `RawEvent` and `SemanticDelta`
//! - `decoder` - `EventStreamDecoder`, the chunk-to-event state machine
//! - `interpreter` - `interpret`, the event-to-delta shape table

mod decoder;
mod events;
mod interpreter;

pub use decoder::EventStreamDecoder;
pub use events::{RawEvent, SemanticDelta, DATA_PREFIX};
pub use interpreter::interpret;
