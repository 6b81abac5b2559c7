//! Mock implementations for testing.
//!
//! - [`MockHttpClient`] - streaming transport with scripted responses

pub mod http;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
