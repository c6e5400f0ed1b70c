use serde_json::Value;
use std::borrow::Cow;

/// A raw inbound payload before routing: plain text, a binary audio buffer,
/// or a structured envelope from a transport that tags its frames.
#[derive(Debug, Clone)]
pub enum InboundInput {
    Text(String),
    Binary(Vec<u8>),
    Structured(Value),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Audio,
}

/// Classify an inbound payload. Pure and total: no input shape errors.
///
/// Text is the fallback for every structured shape that is not explicitly
/// tagged `"type": "audio"`. That default is a documented convention, not a
/// validated contract; a malformed audio envelope will be routed as text.
pub fn classify(input: &InboundInput) -> InputKind {
    match input {
        InboundInput::Text(_) => InputKind::Text,
        InboundInput::Binary(_) => InputKind::Audio,
        InboundInput::Structured(value) => {
            if value.get("type").and_then(Value::as_str) == Some("audio") {
                InputKind::Audio
            } else {
                InputKind::Text
            }
        }
    }
}

impl InboundInput {
    /// Session identifier carried by a structured audio envelope, if any.
    pub fn requested_session_id(&self) -> Option<&str> {
        match self {
            InboundInput::Structured(value) => value.get("session_id").and_then(Value::as_str),
            _ => None,
        }
    }

    /// The text to hand to the inference path. Structured payloads use their
    /// `text` field when present, otherwise their JSON rendering; the model
    /// backend is the authority on whether that is acceptable input.
    pub fn text_content(&self) -> Cow<'_, str> {
        match self {
            InboundInput::Text(s) => Cow::Borrowed(s.as_str()),
            InboundInput::Binary(_) => Cow::Borrowed(""),
            InboundInput::Structured(value) => match value.get("text").and_then(Value::as_str) {
                Some(text) => Cow::Borrowed(text),
                None => Cow::Owned(value.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_string_is_text() {
        let input = InboundInput::Text("What is Amazon S3?".to_string());
        assert_eq!(classify(&input), InputKind::Text);
    }

    #[test]
    fn test_classify_empty_string_is_text() {
        let input = InboundInput::Text(String::new());
        assert_eq!(classify(&input), InputKind::Text);
    }

    #[test]
    fn test_classify_binary_is_audio() {
        let input = InboundInput::Binary(vec![1, 2, 3, 4]);
        assert_eq!(classify(&input), InputKind::Audio);
    }

    #[test]
    fn test_classify_empty_binary_is_audio() {
        let input = InboundInput::Binary(Vec::new());
        assert_eq!(classify(&input), InputKind::Audio);
    }

    #[test]
    fn test_classify_tagged_audio_envelope_is_audio() {
        let input = InboundInput::Structured(json!({"type": "audio"}));
        assert_eq!(classify(&input), InputKind::Audio);
    }

    #[test]
    fn test_classify_other_envelope_defaults_to_text() {
        // Documented default: untagged structured shapes route as text.
        let input = InboundInput::Structured(json!({"type": "video"}));
        assert_eq!(classify(&input), InputKind::Text);

        let input = InboundInput::Structured(json!({"payload": [1, 2, 3]}));
        assert_eq!(classify(&input), InputKind::Text);

        let input = InboundInput::Structured(json!(null));
        assert_eq!(classify(&input), InputKind::Text);
    }

    #[test]
    fn test_classify_non_string_type_tag_defaults_to_text() {
        let input = InboundInput::Structured(json!({"type": 7}));
        assert_eq!(classify(&input), InputKind::Text);
    }

    #[test]
    fn test_requested_session_id_from_envelope() {
        let input = InboundInput::Structured(json!({"type": "audio", "session_id": "s42"}));
        assert_eq!(input.requested_session_id(), Some("s42"));

        let input = InboundInput::Binary(vec![0]);
        assert_eq!(input.requested_session_id(), None);
    }

    #[test]
    fn test_text_content_prefers_text_field() {
        let input = InboundInput::Structured(json!({"text": "hello"}));
        assert_eq!(input.text_content(), "hello");

        let input = InboundInput::Structured(json!({"other": true}));
        assert_eq!(input.text_content(), r#"{"other":true}"#);

        let input = InboundInput::Text("plain".to_string());
        assert_eq!(input.text_content(), "plain");
    }
}
