use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::sse::SemanticDelta;

/// Who a history entry came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Model,
    System,
}

/// One entry in the conversation history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub id: Uuid,
    pub sender: Sender,
    pub text: String,
    /// Only meaningful for model messages; user and system entries are
    /// created complete.
    pub is_complete: bool,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    fn new(sender: Sender, text: String, is_complete: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
            text,
            is_complete,
            created_at: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text.into(), true)
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::new(Sender::System, text.into(), true)
    }

    /// A model message still receiving text.
    pub fn streaming(text: impl Into<String>) -> Self {
        Self::new(Sender::Model, text.into(), false)
    }

    pub fn is_incomplete_model(&self) -> bool {
        self.sender == Sender::Model && !self.is_complete
    }
}

/// Ordered conversation history that semantic deltas are folded into.
///
/// At most one model message is incomplete at a time, and it is always the
/// one a `TextAppend` extends.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageHistory {
    messages: Vec<ChatMessage>,
}

impl MessageHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage::user(text));
    }

    pub fn push_system(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage::system(text));
    }

    /// Fold one delta into the history.
    pub fn apply(&mut self, delta: SemanticDelta) {
        match delta {
            SemanticDelta::TextAppend(text) => self.append_model_text(&text),
            SemanticDelta::SegmentComplete => self.complete_model_messages(),
            SemanticDelta::Noop => {}
        }
    }

    fn append_model_text(&mut self, text: &str) {
        match self.messages.last_mut() {
            Some(last) if last.is_incomplete_model() => last.text.push_str(text),
            _ => self.messages.push(ChatMessage::streaming(text)),
        }
    }

    /// Mark every incomplete model message complete. Idempotent.
    pub fn complete_model_messages(&mut self) {
        self.messages
            .iter_mut()
            .filter(|m| m.is_incomplete_model())
            .for_each(|m| m.is_complete = true);
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn has_incomplete_model(&self) -> bool {
        self.messages.iter().any(ChatMessage::is_incomplete_model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn append(text: &str) -> SemanticDelta {
        SemanticDelta::TextAppend(text.to_string())
    }

    #[test]
    fn test_sender_serialization() {
        assert_eq!(serde_json::to_string(&Sender::Model).unwrap(), "\"model\"");
        assert_eq!(serde_json::to_string(&Sender::System).unwrap(), "\"system\"");
    }

    #[test]
    fn test_append_starts_then_extends_model_message() {
        let mut history = MessageHistory::new();
        history.push_user("hi");
        history.apply(append("Hel"));
        history.apply(append("lo"));

        assert_eq!(history.len(), 2);
        let last = history.last().unwrap();
        assert_eq!(last.sender, Sender::Model);
        assert_eq!(last.text, "Hello");
        assert!(!last.is_complete);
    }

    #[test]
    fn test_segment_complete_closes_message() {
        let mut history = MessageHistory::new();
        history.apply(append("one"));
        history.apply(SemanticDelta::SegmentComplete);
        history.apply(append("two"));

        let texts: Vec<&str> = history.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two"]);
        assert!(history.iter().next().unwrap().is_complete);
        assert!(history.has_incomplete_model());
    }

    #[test]
    fn test_segment_complete_is_idempotent() {
        let mut history = MessageHistory::new();
        history.apply(SemanticDelta::SegmentComplete);
        assert!(history.is_empty());

        history.apply(append("x"));
        history.apply(SemanticDelta::SegmentComplete);
        let snapshot = history.clone();
        history.apply(SemanticDelta::SegmentComplete);
        assert_eq!(history, snapshot);
    }

    #[test]
    fn test_noop_has_no_effect() {
        let mut history = MessageHistory::new();
        history.apply(append("x"));
        let snapshot = history.clone();
        history.apply(SemanticDelta::Noop);
        assert_eq!(history, snapshot);
    }

    #[test]
    fn test_append_after_system_message_starts_new_model_message() {
        let mut history = MessageHistory::new();
        history.push_system("Error: nope");
        history.apply(append("again"));

        assert_eq!(history.len(), 2);
        assert_eq!(history.last().unwrap().sender, Sender::Model);
    }
}
