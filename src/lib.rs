//! streamchat - a streaming chat client for agent backends that reply with
//! Server-Sent Events.
//!
//! The library decodes the `data: ` event stream incrementally, interprets
//! each JSON event into a semantic delta, and folds deltas into a message
//! history. It is exposed as a library for the binary and integration tests.

pub mod adapters;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod sse;
pub mod traits;
