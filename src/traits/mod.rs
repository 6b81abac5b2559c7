//! Trait abstractions for dependency injection and testability.
//!
//! - [`HttpClient`] - streaming POST transport
//! - [`SseDecoderTrait`] - incremental chunk-to-event decoding
//! - [`StreamObserver`] - caller-facing stream callbacks

pub mod http;
pub mod observer;
pub mod sse;

pub use http::{sse_request_headers, ByteStream, Headers, HttpClient};
pub use observer::{RecordingObserver, StreamObserver};
pub use sse::SseDecoderTrait;
