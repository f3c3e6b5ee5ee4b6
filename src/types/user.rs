//! Users and chats.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::registry::SymbolTable;

/// A Telegram user or bot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub is_bot: bool,
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// IETF language tag of the user's client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_premium: Option<bool>,
    /// Only returned by `getMe`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_join_groups: Option<bool>,
    /// Only returned by `getMe`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supports_inline_queries: Option<bool>,
}

impl User {
    pub fn new(id: i64, first_name: impl Into<String>) -> Self {
        Self {
            id,
            is_bot: false,
            first_name: first_name.into(),
            last_name: None,
            username: None,
            language_code: None,
            is_premium: None,
            can_join_groups: None,
            supports_inline_queries: None,
        }
    }
}

/// Kind of a chat, keyed by its wire token.
///
/// Equality and hashing go by token, so `Other("group")` equals `Group`.
#[derive(Debug, Clone)]
pub enum ChatType {
    Private,
    Group,
    Supergroup,
    Channel,
    /// Chat of the inline query sender.
    Sender,
    /// A chat type added to the protocol after this build.
    Other(String),
}

static CHAT_TOKENS: [(ChatType, &str); 5] = [
    (ChatType::Private, "private"),
    (ChatType::Group, "group"),
    (ChatType::Supergroup, "supergroup"),
    (ChatType::Channel, "channel"),
    (ChatType::Sender, "sender"),
];

static CHAT_TYPES: SymbolTable<ChatType> = SymbolTable::new("chat type", &CHAT_TOKENS);

impl ChatType {
    pub fn from_token(token: &str) -> Self {
        CHAT_TYPES
            .lookup(token)
            .unwrap_or_else(|| Self::Other(token.to_string()))
    }

    pub fn token(&self) -> &str {
        match self {
            Self::Private => "private",
            Self::Group => "group",
            Self::Supergroup => "supergroup",
            Self::Channel => "channel",
            Self::Sender => "sender",
            Self::Other(token) => token,
        }
    }
}

impl PartialEq for ChatType {
    fn eq(&self, other: &Self) -> bool {
        self.token() == other.token()
    }
}

impl Eq for ChatType {}

impl Hash for ChatType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.token().hash(state);
    }
}

impl Serialize for ChatType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.token())
    }
}

impl<'de> Deserialize<'de> for ChatType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        if token.is_empty() {
            return Err(D::Error::custom("type mismatch: empty chat type"));
        }
        Ok(Self::from_token(&token))
    }
}

/// A private chat, group, supergroup or channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: ChatType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_forum: Option<bool>,
}

impl Chat {
    pub fn private(id: i64, first_name: impl Into<String>) -> Self {
        Self {
            id,
            kind: ChatType::Private,
            title: None,
            username: None,
            first_name: Some(first_name.into()),
            last_name: None,
            is_forum: None,
        }
    }
}

/// Target chat of a request: a numeric id or a `@channelusername`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatId {
    Id(i64),
    Username(String),
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for ChatId {
    fn from(username: &str) -> Self {
        Self::Username(username.to_string())
    }
}

impl From<String> for ChatId {
    fn from(username: String) -> Self {
        Self::Username(username)
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Username(username) => f.write_str(username),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec;
    use serde_json::json;

    #[test]
    fn test_chat_type_tokens() {
        let chat: Chat =
            codec::decode(json!({"id": -100, "type": "supergroup", "title": "T"})).unwrap();
        assert_eq!(chat.kind, ChatType::Supergroup);
        assert_eq!(codec::encode(&chat).unwrap()["type"], json!("supergroup"));
    }

    #[test]
    fn test_unlisted_chat_type_is_kept() {
        let chat: Chat = codec::decode(json!({"id": 5, "type": "guild"})).unwrap();
        assert_eq!(chat.kind, ChatType::Other("guild".to_string()));
        assert_eq!(codec::encode(&chat).unwrap()["type"], json!("guild"));
    }

    #[test]
    fn test_chat_type_equality_follows_token() {
        assert_eq!(ChatType::Other("group".to_string()), ChatType::Group);
        assert_eq!(ChatType::from_token("channel"), ChatType::Channel);
        assert!(codec::decode::<ChatType>(json!("")).is_err());
    }

    #[test]
    fn test_chat_id_untagged() {
        assert_eq!(codec::encode_value(&ChatId::from(42i64)).unwrap(), json!(42));
        assert_eq!(
            codec::encode_value(&ChatId::from("@news")).unwrap(),
            json!("@news")
        );
        let id: ChatId = codec::decode(json!("@news")).unwrap();
        assert_eq!(id, ChatId::Username("@news".to_string()));
    }

    #[test]
    fn test_user_round_trip() {
        let mut user = User::new(1, "Ada");
        user.is_premium = Some(false);
        let encoded = serde_json::Value::Object(codec::encode(&user).unwrap());
        let back: User = codec::decode(encoded).unwrap();
        assert_eq!(back, user);
    }
}
