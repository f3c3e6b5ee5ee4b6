//! Chat boosts and their sources.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::{Chat, User};

/// Boost obtained by subscribing to Telegram Premium.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatBoostSourcePremium {
    pub user: User,
}

/// Boost obtained through a gift code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatBoostSourceGiftCode {
    pub user: User,
}

/// Boost obtained through a giveaway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatBoostSourceGiveaway {
    /// May be `0` if the giveaway message was not sent yet.
    pub giveaway_message_id: i64,
    /// Winner of the giveaway, absent for unclaimed prizes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// Stars split among winners, Telegram Star giveaways only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prize_star_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_unclaimed: Option<bool>,
}

hierarchy! {
    /// Where a chat boost came from.
    pub enum ChatBoostSource("chat boost source", tag = "type") {
        Premium(ChatBoostSourcePremium) = "premium",
        GiftCode(ChatBoostSourceGiftCode) = "gift_code",
        Giveaway(ChatBoostSourceGiveaway) = "giveaway",
    }
}

impl ChatBoostSource {
    /// The boosting user, when the source names one.
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Premium(source) => Some(&source.user),
            Self::GiftCode(source) => Some(&source.user),
            Self::Giveaway(source) => source.user.as_ref(),
            Self::Unknown(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatBoost {
    pub boost_id: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub add_date: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub expiration_date: DateTime<Utc>,
    pub source: ChatBoostSource,
}

/// Result of `getUserChatBoosts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserChatBoosts {
    pub boosts: Vec<ChatBoost>,
}

/// A boost removed from a chat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatBoostRemoved {
    pub chat: Chat,
    pub boost_id: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub remove_date: DateTime<Utc>,
    pub source: ChatBoostSource,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec;
    use serde_json::json;

    #[test]
    fn test_user_accessor() {
        let source = ChatBoostSource::Premium(ChatBoostSourcePremium {
            user: User::new(5, "Eve"),
        });
        assert_eq!(source.user().map(|u| u.id), Some(5));
    }

    #[test]
    fn test_boost_list_decodes_mixed_sources() {
        let boosts: UserChatBoosts = codec::decode(json!({
            "boosts": [
                {
                    "boost_id": "a",
                    "add_date": 1_700_000_000,
                    "expiration_date": 1_710_000_000,
                    "source": {
                        "type": "gift_code",
                        "user": {"id": 2, "is_bot": false, "first_name": "B"}
                    }
                },
                {
                    "boost_id": "b",
                    "add_date": 1_700_000_000,
                    "expiration_date": 1_710_000_000,
                    "source": {"type": "giveaway", "giveaway_message_id": 12, "is_unclaimed": true}
                }
            ]
        }))
        .unwrap();

        assert!(matches!(boosts.boosts[0].source, ChatBoostSource::GiftCode(_)));
        match &boosts.boosts[1].source {
            ChatBoostSource::Giveaway(giveaway) => {
                assert_eq!(giveaway.is_unclaimed, Some(true));
                assert_eq!(giveaway.user, None);
            }
            other => panic!("unexpected source: {other:?}"),
        }
    }

    #[test]
    fn test_missing_source_discriminator_inside_boost() {
        let err = codec::decode::<ChatBoost>(json!({
            "boost_id": "a",
            "add_date": 0,
            "expiration_date": 0,
            "source": {"user": {"id": 2, "is_bot": false, "first_name": "B"}}
        }))
        .unwrap_err();
        assert_eq!(
            err,
            crate::error::CodecError::MissingDiscriminator {
                hierarchy: "chat boost source".to_string(),
                field: "type".to_string(),
            }
        );
    }
}
