//! Chat messages as persisted in the document store.

use crate::Sender;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User id recorded on assistant-authored messages.
pub const AI_USER_ID: &str = "StellarMindAI";

/// A single chat message.
///
/// # Examples
///
/// ```
/// use stellarmind_core::{ChatMessage, Sender};
///
/// let message = ChatMessage::user("uid-1", "Hello!");
/// assert_eq!(message.sender, Sender::User);
/// assert_eq!(message.user_id, "uid-1");
///
/// let reply = ChatMessage::ai("Hi there");
/// assert_eq!(reply.user_id, "StellarMindAI");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_builder::Builder)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct ChatMessage {
    /// Author of the message
    pub sender: Sender,
    /// Message body
    pub text: String,
    /// When the message was created
    #[builder(default = "Utc::now()")]
    pub timestamp: DateTime<Utc>,
    /// Display time (`HH:MM`)
    #[builder(default = "self.default_time()")]
    pub time: String,
    /// Owning user id
    pub user_id: String,
}

impl ChatMessageBuilder {
    fn default_time(&self) -> String {
        let timestamp = self.timestamp.unwrap_or_else(Utc::now);
        timestamp.format("%H:%M").to_string()
    }
}

impl ChatMessage {
    fn now(sender: Sender, user_id: String, text: String) -> Self {
        let timestamp = Utc::now();
        Self {
            sender,
            text,
            time: timestamp.format("%H:%M").to_string(),
            timestamp,
            user_id,
        }
    }

    /// Message typed by the user.
    pub fn user(user_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::now(Sender::User, user_id.into(), text.into())
    }

    /// Message produced by the assistant.
    pub fn ai(text: impl Into<String>) -> Self {
        Self::now(Sender::Ai, AI_USER_ID.to_string(), text.into())
    }

    /// Convert to the JSON document stored in the message collection.
    pub fn to_document(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}
