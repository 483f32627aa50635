//! Request bodies for message creation and reactions.
//!
//! Field names and order follow the service's wire format, so the structs
//! below are serialized as-is.

use rand::Rng;
use serde::Serialize;

/// `imdisplayname` sent with new messages unless one is configured.
pub const DEFAULT_DISPLAY_NAME: &str = "Tom";

/// Lower bound of generated client message ids.
pub const CLIENT_MESSAGE_ID_MIN: u64 = 1_000_000_000_000_000_000;

/// Width of the client message id range.
pub const CLIENT_MESSAGE_ID_SPAN: u64 = 999_999_999_999_999_999;

/// Body of a new rich-text message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutboundMessage {
    pub content: String,
    pub messagetype: &'static str,
    pub contenttype: &'static str,
    pub amsreferences: Vec<String>,
    pub clientmessageid: String,
    pub imdisplayname: String,
    pub properties: MessageProperties,
}

/// `properties` object of a new message.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MessageProperties {
    pub importance: String,
    pub subject: String,
}

impl OutboundMessage {
    /// Wrap `text` in a paragraph and assign a fresh client message id.
    ///
    /// `text` is embedded as-is; HTML in it is rendered by the service.
    pub fn new(text: &str, display_name: &str) -> Self {
        Self {
            content: format!("<p>{}</p>", text),
            messagetype: "RichText/Html",
            contenttype: "text",
            amsreferences: Vec::new(),
            clientmessageid: client_message_id(),
            imdisplayname: display_name.to_string(),
            properties: MessageProperties::default(),
        }
    }
}

/// Random id used by the service to de-duplicate sends. Not a secret.
pub fn client_message_id() -> String {
    let offset = rand::rng().random_range(0..CLIENT_MESSAGE_ID_SPAN);
    (CLIENT_MESSAGE_ID_MIN + offset).to_string()
}

/// Body of a reaction add/remove on the `emotions` property.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReactionBody {
    pub emotions: Emotion,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Emotion {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
}

impl ReactionBody {
    /// Add `key`, stamped with a millisecond epoch timestamp.
    pub fn react(key: &str, timestamp_ms: i64) -> Self {
        Self {
            emotions: Emotion {
                key: key.to_string(),
                value: Some(timestamp_ms),
            },
        }
    }

    /// Remove `key`.
    pub fn unreact(key: &str) -> Self {
        Self {
            emotions: Emotion {
                key: key.to_string(),
                value: None,
            },
        }
    }
}
