use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;

/// The user turn carried inside a [`RunRequest`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HumanMessage {
    pub human_message: String,
}

/// Request body for the streaming run endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunRequest {
    /// Application the session belongs to
    pub app_name: String,
    pub user_id: String,
    pub session_id: String,
    /// The message to send
    pub message: HumanMessage,
    /// Always true; the endpoint answers with an event stream
    pub streaming: bool,
}

impl RunRequest {
    /// Build a streaming request for `text` using the configured identifiers.
    pub fn new(config: &ClientConfig, text: impl Into<String>) -> Self {
        Self {
            app_name: config.app_name.clone(),
            user_id: config.user_id.clone(),
            session_id: config.session_id.clone(),
            message: HumanMessage {
                human_message: text.into(),
            },
            streaming: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_run_request_defaults() {
        let request = RunRequest::new(&ClientConfig::default(), "Hello");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({
                "app_name": "chat_app",
                "user_id": "user_1",
                "session_id": "session_1",
                "message": {"human_message": "Hello"},
                "streaming": true
            })
        );
    }

    #[test]
    fn test_run_request_uses_configured_ids() {
        let config = ClientConfig::default()
            .with_app_name("other_app")
            .with_user_id("u9")
            .with_session_id("s9");
        let request = RunRequest::new(&config, "hi");

        assert_eq!(request.app_name, "other_app");
        assert_eq!(request.user_id, "u9");
        assert_eq!(request.session_id, "s9");
        assert!(request.streaming);
    }

    #[test]
    fn test_run_request_deserialize() {
        let json = r#"{"app_name":"a","user_id":"b","session_id":"c","message":{"human_message":"d"},"streaming":true}"#;
        let request: RunRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.message.human_message, "d");
    }
}
