//! Error handling for the chat client.
//!
//! - **Error Categories**: high-level classification for retry decisions
//! - **Domain errors**: transport (`NetworkError`) and stream/session
//!   (`StreamError`)
//! - **Unified error**: `ChatError`, with `ChatResult<T>` as the result alias
//!
//! Propagation policy: only transport errors cross from the decoding pipeline
//! to the caller. Malformed payloads are logged and dropped inside the
//! decoder; unrecognized event shapes are not errors at all.
//!
//! | Category | Description | Retryable |
//! |----------|-------------|-----------|
//! | Network | Connection, timeout, interrupted body | Yes |
//! | Server | HTTP 5xx, empty response | Yes |
//! | Client | HTTP 4xx, malformed data | No |
//! | User | Empty input, send in flight | No |
//! | Configuration | Bad config file or env value | No |

mod category;
mod chat_error;
mod network;
mod result;
mod stream;

pub use category::ErrorCategory;
pub use chat_error::ChatError;
pub use network::{classify_reqwest_error, NetworkError};
pub use result::ChatResult;
pub use stream::StreamError;
