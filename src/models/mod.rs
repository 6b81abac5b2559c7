//! Wire request and conversation history types.

mod message;
mod request;

pub use message::{ChatMessage, MessageHistory, Sender};
pub use request::{HumanMessage, RunRequest};
