//! Origins of forwarded messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::{Chat, User};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageOriginUser {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub date: DateTime<Utc>,
    pub sender_user: User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageOriginHiddenUser {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub date: DateTime<Utc>,
    pub sender_user_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageOriginChat {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub date: DateTime<Utc>,
    pub sender_chat: Chat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_signature: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageOriginChannel {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub date: DateTime<Utc>,
    pub chat: Chat,
    pub message_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_signature: Option<String>,
}

hierarchy! {
    /// Where a forwarded message originally came from.
    pub enum MessageOrigin("message origin", tag = "type") {
        User(MessageOriginUser) = "user",
        HiddenUser(MessageOriginHiddenUser) = "hidden_user",
        Chat(MessageOriginChat) = "chat",
        Channel(MessageOriginChannel) = "channel",
    }
}

impl MessageOrigin {
    /// Date the original message was sent, when the variant is known.
    pub fn date(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::User(origin) => Some(origin.date),
            Self::HiddenUser(origin) => Some(origin.date),
            Self::Chat(origin) => Some(origin.date),
            Self::Channel(origin) => Some(origin.date),
            Self::Unknown(_) => None,
        }
    }
}
