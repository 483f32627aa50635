//! Request and response types for the message endpoints.
//!
//! Response types capture fields they do not model in `extra`, which is how
//! strict decoding detects upstream schema changes.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::response::StrictDecode;

// ─────────────────────────────────────────────────────────────────────────────
// Channels
// ─────────────────────────────────────────────────────────────────────────────

/// A conversation, identified by its thread id (e.g. `19:abc@thread.v2`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
}

impl Channel {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl From<&str> for Channel {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Messages
// ─────────────────────────────────────────────────────────────────────────────

/// A single message as returned by the messages endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Server-assigned message id.
    pub id: String,
    #[serde(rename = "sequenceId", default, skip_serializing_if = "Option::is_none")]
    pub sequence_id: Option<u64>,
    #[serde(rename = "clientmessageid", default, skip_serializing_if = "Option::is_none")]
    pub client_message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(rename = "conversationid", default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    #[serde(rename = "conversationLink", default, skip_serializing_if = "Option::is_none")]
    pub conversation_link: Option<String>,
    /// Envelope type, usually `Message`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Payload type such as `RichText/Html` or `Text`.
    #[serde(rename = "messagetype", default, skip_serializing_if = "Option::is_none")]
    pub message_type: Option<String>,
    #[serde(rename = "contenttype", default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Message body, HTML for rich text messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Contact URL of the sender.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(rename = "imdisplayname", default, skip_serializing_if = "Option::is_none")]
    pub im_display_name: Option<String>,
    #[serde(rename = "composetime", default, skip_serializing_if = "Option::is_none")]
    pub compose_time: Option<String>,
    #[serde(rename = "originalarrivaltime", default, skip_serializing_if = "Option::is_none")]
    pub original_arrival_time: Option<String>,
    #[serde(
        rename = "amsreferences",
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub ams_references: Vec<serde_json::Value>,
    /// Free-form message properties (emotions, edit time, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<serde_json::Value>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Paging metadata returned alongside a page of messages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessagesMetadata {
    #[serde(rename = "backwardLink", default, skip_serializing_if = "Option::is_none")]
    pub backward_link: Option<String>,
    #[serde(rename = "syncState", default, skip_serializing_if = "Option::is_none")]
    pub sync_state: Option<String>,
    #[serde(
        rename = "lastCompleteSegmentStartTime",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub last_complete_segment_start_time: Option<i64>,
    #[serde(
        rename = "lastCompleteSegmentEndTime",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub last_complete_segment_end_time: Option<i64>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Envelope of the messages endpoint. `messages` keeps server order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessagesResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub messages: Vec<ChatMessage>,
    #[serde(rename = "tenantId", default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(rename = "_metadata", default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MessagesMetadata>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// An explicit `null` array reads as empty, like a missing one.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn push_extra(extra: &HashMap<String, serde_json::Value>, prefix: &str, out: &mut Vec<String>) {
    let mut keys: Vec<&String> = extra.keys().collect();
    keys.sort();
    out.extend(keys.into_iter().map(|key| format!("{}{}", prefix, key)));
}

impl StrictDecode for ChatMessage {
    const TYPE_NAME: &'static str = "ChatMessage";

    fn unknown_fields(&self, prefix: &str, out: &mut Vec<String>) {
        push_extra(&self.extra, prefix, out);
    }
}

impl StrictDecode for MessagesMetadata {
    const TYPE_NAME: &'static str = "MessagesMetadata";

    fn unknown_fields(&self, prefix: &str, out: &mut Vec<String>) {
        push_extra(&self.extra, prefix, out);
    }
}

impl StrictDecode for MessagesResponse {
    const TYPE_NAME: &'static str = "MessagesResponse";

    fn unknown_fields(&self, prefix: &str, out: &mut Vec<String>) {
        push_extra(&self.extra, prefix, out);
        if let Some(metadata) = &self.metadata {
            metadata.unknown_fields(&format!("{}_metadata.", prefix), out);
        }
        for (i, message) in self.messages.iter().enumerate() {
            message.unknown_fields(&format!("{}messages[{}].", prefix, i), out);
        }
    }
}
