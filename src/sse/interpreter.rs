//! Maps decoded events onto semantic deltas.
//!
//! Backends emit several envelope shapes for the same thing. Each shape is a
//! structural predicate over the JSON value; they are tried in a fixed order
//! and the first match wins.

use serde_json::{Map, Value};

use crate::sse::events::{RawEvent, SemanticDelta};

type Fields = Map<String, Value>;
type TextShape = fn(&Fields) -> Option<&str>;

/// Recognized text-carrying shapes, most specific first.
const TEXT_SHAPES: &[(&str, TextShape)] = &[
    ("content_block_delta", content_block_delta),
    ("delta_content", delta_content),
    ("content_parts", content_parts),
    ("top_level_text", top_level_text),
];

/// `type` values that close the in-progress message.
const STOP_TYPES: [&str; 2] = ["message_stop", "content_block_stop"];

/// Interpret one decoded event. Total: unknown shapes become [`SemanticDelta::Noop`].
///
/// The first text shape that matches decides the text. If that text is empty
/// nothing is appended and only the stop check remains.
///
/// # Example
///
/// ```
/// use streamchat::sse::{interpret, SemanticDelta};
///
/// let event = serde_json::json!({"type": "message_stop"});
/// assert_eq!(interpret(&event), SemanticDelta::SegmentComplete);
/// ```
pub fn interpret(event: &RawEvent) -> SemanticDelta {
    let Value::Object(fields) = event else {
        return SemanticDelta::Noop;
    };

    let matched = TEXT_SHAPES
        .iter()
        .find_map(|(name, shape)| shape(fields).map(|text| (*name, text)));

    if let Some((name, text)) = matched {
        tracing::trace!(shape = name, empty = text.is_empty(), "matched event shape");
        if !text.is_empty() {
            return SemanticDelta::TextAppend(text.to_string());
        }
    }

    if is_stop(fields) {
        SemanticDelta::SegmentComplete
    } else {
        SemanticDelta::Noop
    }
}

/// `{"type":"content_block_delta","delta":{"type":"text_delta","text":...}}`
fn content_block_delta(fields: &Fields) -> Option<&str> {
    match (fields.get("type"), fields.get("delta")) {
        (Some(Value::String(kind)), Some(Value::Object(delta))) if kind == "content_block_delta" => {
            match (delta.get("type"), delta.get("text")) {
                (Some(Value::String(delta_kind)), Some(Value::String(text)))
                    if delta_kind == "text_delta" =>
                {
                    Some(text.as_str())
                }
                _ => None,
            }
        }
        _ => None,
    }
}

/// `{"delta":{"content":[{"type":"text","text":...}, ...]}}`
fn delta_content(fields: &Fields) -> Option<&str> {
    let Some(Value::Object(delta)) = fields.get("delta") else {
        return None;
    };
    let Some(Value::Array(items)) = delta.get("content") else {
        return None;
    };

    match items.as_slice() {
        [Value::Object(first), ..] => match (first.get("type"), first.get("text")) {
            (Some(Value::String(kind)), Some(Value::String(text))) if kind == "text" => {
                Some(text.as_str())
            }
            _ => None,
        },
        _ => None,
    }
}

/// `{"content":{"parts":[{"text":...}, ...]}}`
///
/// Only a non-empty first part counts; otherwise later shapes are tried.
fn content_parts(fields: &Fields) -> Option<&str> {
    let Some(Value::Object(content)) = fields.get("content") else {
        return None;
    };
    let Some(Value::Array(parts)) = content.get("parts") else {
        return None;
    };

    match parts.as_slice() {
        [Value::Object(first), ..] => match first.get("text") {
            Some(Value::String(text)) if !text.is_empty() => Some(text.as_str()),
            _ => None,
        },
        _ => None,
    }
}

/// `{"text":...}`
fn top_level_text(fields: &Fields) -> Option<&str> {
    match fields.get("text") {
        Some(Value::String(text)) => Some(text.as_str()),
        _ => None,
    }
}

/// `{"type":"message_stop"}` or `{"type":"content_block_stop"}`
fn is_stop(fields: &Fields) -> bool {
    matches!(fields.get("type"), Some(Value::String(kind)) if STOP_TYPES.contains(&kind.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text(s: &str) -> SemanticDelta {
        SemanticDelta::TextAppend(s.to_string())
    }

    #[test]
    fn test_content_block_delta() {
        let event = json!({"type":"content_block_delta","delta":{"type":"text_delta","text":"hi"}});
        assert_eq!(interpret(&event), text("hi"));
    }

    #[test]
    fn test_content_block_delta_requires_text_delta() {
        let event = json!({"type":"content_block_delta","delta":{"type":"input_json_delta","partial_json":"{"}});
        assert_eq!(interpret(&event), SemanticDelta::Noop);
    }

    #[test]
    fn test_message_stop() {
        assert_eq!(
            interpret(&json!({"type":"message_stop"})),
            SemanticDelta::SegmentComplete
        );
    }

    #[test]
    fn test_content_block_stop() {
        assert_eq!(
            interpret(&json!({"type":"content_block_stop","index":0})),
            SemanticDelta::SegmentComplete
        );
    }

    #[test]
    fn test_delta_content_first_text_block() {
        let event = json!({
            "type": "message_delta",
            "delta": {"content": [{"type":"text","text":"from delta"}, {"type":"text","text":"ignored"}]}
        });
        assert_eq!(interpret(&event), text("from delta"));
    }

    #[test]
    fn test_delta_content_first_block_must_be_text() {
        let event = json!({"delta": {"content": [{"type":"image","text":"nope"}]}});
        assert_eq!(interpret(&event), SemanticDelta::Noop);

        let empty = json!({"delta": {"content": []}});
        assert_eq!(interpret(&empty), SemanticDelta::Noop);
    }

    #[test]
    fn test_content_parts() {
        let event = json!({"content": {"parts": [{"text":"part one"}, {"text":"part two"}], "role":"model"}});
        assert_eq!(interpret(&event), text("part one"));
    }

    #[test]
    fn test_content_parts_without_text_falls_through() {
        let event = json!({"content": {"parts": [{"function_call": {}}]}});
        assert_eq!(interpret(&event), SemanticDelta::Noop);
    }

    #[test]
    fn test_top_level_text() {
        assert_eq!(interpret(&json!({"text":"plain"})), text("plain"));
    }

    #[test]
    fn test_top_level_text_must_be_string() {
        assert_eq!(interpret(&json!({"text": 42})), SemanticDelta::Noop);
    }

    #[test]
    fn test_priority_content_block_delta_over_top_level_text() {
        let event = json!({
            "type":"content_block_delta",
            "delta":{"type":"text_delta","text":"specific"},
            "text":"generic"
        });
        assert_eq!(interpret(&event), text("specific"));
    }

    #[test]
    fn test_priority_content_parts_over_top_level_text() {
        let event = json!({"content": {"parts": [{"text":"parts"}]}, "text":"generic"});
        assert_eq!(interpret(&event), text("parts"));
    }

    #[test]
    fn test_priority_text_over_stop() {
        let event = json!({"type":"message_stop","text":"last words"});
        assert_eq!(interpret(&event), text("last words"));
    }

    #[test]
    fn test_empty_text_falls_through_to_stop() {
        let event = json!({"type":"message_stop","text":""});
        assert_eq!(interpret(&event), SemanticDelta::SegmentComplete);
    }

    #[test]
    fn test_empty_text_delta_is_noop() {
        let event = json!({"type":"content_block_delta","delta":{"type":"text_delta","text":""}});
        assert_eq!(interpret(&event), SemanticDelta::Noop);
    }

    #[test]
    fn test_empty_text_delta_stops_before_top_level_text() {
        let event = json!({
            "type":"content_block_delta",
            "delta":{"type":"text_delta","text":""},
            "text":"x"
        });
        assert_eq!(interpret(&event), SemanticDelta::Noop);
    }

    #[test]
    fn test_empty_delta_content_stops_before_top_level_text() {
        let event = json!({
            "type":"content_block_stop",
            "delta":{"content":[{"type":"text","text":""}]},
            "text":"x"
        });
        assert_eq!(interpret(&event), SemanticDelta::SegmentComplete);
    }

    #[test]
    fn test_empty_content_part_falls_through_to_top_level_text() {
        let event = json!({"content": {"parts": [{"text":""}]}, "text":"y"});
        assert_eq!(interpret(&event), text("y"));
    }

    #[test]
    fn test_unknown_shapes_are_noop() {
        for event in [
            json!({"type":"message_start","message":{"id":"msg_1"}}),
            json!({"type":"ping"}),
            json!({}),
            json!([{"text":"in array"}]),
            json!("text"),
            json!(null),
            json!(3.5),
        ] {
            assert_eq!(interpret(&event), SemanticDelta::Noop, "event: {}", event);
        }
    }

    #[test]
    fn test_shape_table_order() {
        let names: Vec<&str> = TEXT_SHAPES.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec!["content_block_delta", "delta_content", "content_parts", "top_level_text"]
        );
    }
}
