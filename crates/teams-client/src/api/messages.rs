//! Messages API.
//!
//! Every operation is a single request: resolve the endpoint, build an
//! authenticated request, send it, check the one status the operation
//! accepts, and decode the body where there is one.

use reqwest::Method;

use crate::body::{OutboundMessage, ReactionBody};
use crate::client::TeamsClient;
use crate::endpoint::{Endpoint, escape_segment};
use crate::error::{Error, Result};
use crate::types::{Channel, ChatMessage, MessagesResponse};

/// View flags requested when listing messages.
const MESSAGES_VIEW: &str = "msnp24Equivalent|supportsMessageProperties";

/// Only the first page is ever requested.
const PAGE_SIZE: &str = "200";
const START_TIME: &str = "1";

const STATUS_OK: u16 = 200;
const STATUS_CREATED: u16 = 201;

/// Messages API client.
pub struct MessagesApi {
    client: TeamsClient,
}

impl MessagesApi {
    pub(crate) fn new(client: TeamsClient) -> Self {
        Self { client }
    }

    /// Fetch the first page (up to 200) of messages in a channel, in server order.
    pub fn fetch(&self, channel: &Channel) -> Result<Vec<ChatMessage>> {
        Ok(self.fetch_page(channel)?.messages)
    }

    /// Fetch the first page of messages together with its paging metadata.
    pub fn fetch_page(&self, channel: &Channel) -> Result<MessagesResponse> {
        let mut url = self
            .client
            .url(Endpoint::Messages, &messages_path(&channel.id)?)?;
        url.query_pairs_mut()
            .append_pair("view", MESSAGES_VIEW)
            .append_pair("pageSize", PAGE_SIZE)
            .append_pair("startTime", START_TIME);

        let response = self.client.execute(Method::GET, &url, None, STATUS_OK)?;
        let page: MessagesResponse = self.client.decode(&response)?;

        tracing::debug!(channel = %channel.id, count = page.messages.len(), "fetched messages");
        Ok(page)
    }

    /// Post `text` to a channel as a rich-text paragraph.
    ///
    /// `text` is not HTML-escaped; callers sending untrusted text must escape it.
    pub fn send(&self, channel: &str, text: &str) -> Result<()> {
        let url = self.client.url(Endpoint::Messages, &messages_path(channel)?)?;
        let body = OutboundMessage::new(text, &self.client.options().display_name);
        let body = serde_json::to_vec(&body).map_err(Error::Encode)?;

        self.client
            .execute(Method::POST, &url, Some(body), STATUS_CREATED)?;
        Ok(())
    }

    /// Add an `emote` reaction to a message.
    pub fn react(&self, channel: &str, message_id: &str, emote: &str) -> Result<()> {
        let url = self.client.url(
            Endpoint::Messages,
            &format!(
                "{}?name=emotions&replace=true",
                properties_path(channel, message_id)?
            ),
        )?;
        let now = chrono::Utc::now().timestamp_millis();
        let body = serde_json::to_vec(&ReactionBody::react(emote, now)).map_err(Error::Encode)?;

        self.client.execute(Method::PUT, &url, Some(body), STATUS_OK)?;
        Ok(())
    }

    /// Remove an `emote` reaction from a message.
    pub fn unreact(&self, channel: &str, message_id: &str, emote: &str) -> Result<()> {
        let url = self.client.url(
            Endpoint::Messages,
            &format!("{}?name=emotions", properties_path(channel, message_id)?),
        )?;
        let body = serde_json::to_vec(&ReactionBody::unreact(emote)).map_err(Error::Encode)?;

        self.client
            .execute(Method::DELETE, &url, Some(body), STATUS_OK)?;
        Ok(())
    }

    /// Soft-delete a message. The service keeps it, marked as deleted.
    pub fn delete(&self, channel: &str, message_id: &str) -> Result<()> {
        let url = self.client.url(
            Endpoint::Messages,
            &format!("{}?behavior=softDelete", message_path(channel, message_id)?),
        )?;

        self.client.execute(Method::DELETE, &url, None, STATUS_OK)?;
        Ok(())
    }
}

fn messages_path(channel: &str) -> Result<String> {
    Ok(format!(
        "/users/ME/conversations/{}/messages",
        escape_segment(channel)?
    ))
}

fn message_path(channel: &str, message_id: &str) -> Result<String> {
    Ok(format!(
        "{}/{}",
        messages_path(channel)?,
        escape_segment(message_id)?
    ))
}

fn properties_path(channel: &str, message_id: &str) -> Result<String> {
    Ok(format!("{}/properties", message_path(channel, message_id)?))
}
