//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - streaming HTTP transport using reqwest
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides a scripted transport:
//! - [`mock::MockHttpClient`] - configurable chunk sequences and failures

pub mod mock;
pub mod reqwest_http;

pub use mock::{MockHttpClient, MockResponse};
pub use reqwest_http::ReqwestHttpClient;
