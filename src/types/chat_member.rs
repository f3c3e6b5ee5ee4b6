//! Chat membership states, discriminated by `status`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::User;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMemberOwner {
    pub user: User,
    pub is_anonymous: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMemberAdministrator {
    pub user: User,
    pub can_be_edited: bool,
    pub is_anonymous: bool,
    pub can_manage_chat: bool,
    pub can_delete_messages: bool,
    pub can_manage_video_chats: bool,
    pub can_restrict_members: bool,
    pub can_promote_members: bool,
    pub can_change_info: bool,
    pub can_invite_users: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_post_messages: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_edit_messages: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_pin_messages: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMemberMember {
    pub user: User,
    /// Subscription expiry, if the membership is a paid subscription.
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub until_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMemberRestricted {
    pub user: User,
    pub is_member: bool,
    pub can_send_messages: bool,
    pub can_send_photos: bool,
    pub can_send_documents: bool,
    pub can_send_polls: bool,
    pub can_invite_users: bool,
    pub can_pin_messages: bool,
    /// `0` means restricted forever.
    pub until_date: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMemberLeft {
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMemberBanned {
    pub user: User,
    /// `0` means banned forever.
    pub until_date: i64,
}

hierarchy! {
    /// Information about one member of a chat.
    pub enum ChatMember("chat member", tag = "status") {
        Owner(ChatMemberOwner) = "creator",
        Administrator(ChatMemberAdministrator) = "administrator",
        Member(ChatMemberMember) = "member",
        Restricted(ChatMemberRestricted) = "restricted",
        Left(ChatMemberLeft) = "left",
        Banned(ChatMemberBanned) = "kicked",
    }
}

impl ChatMember {
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Owner(member) => Some(&member.user),
            Self::Administrator(member) => Some(&member.user),
            Self::Member(member) => Some(&member.user),
            Self::Restricted(member) => Some(&member.user),
            Self::Left(member) => Some(&member.user),
            Self::Banned(member) => Some(&member.user),
            Self::Unknown(_) => None,
        }
    }

    /// Whether the user currently belongs to the chat.
    pub fn is_present(&self) -> bool {
        match self {
            Self::Owner(_) | Self::Administrator(_) | Self::Member(_) => true,
            Self::Restricted(member) => member.is_member,
            Self::Left(_) | Self::Banned(_) | Self::Unknown(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec;
    use serde_json::json;

    #[test]
    fn test_status_discriminator() {
        let member: ChatMember = codec::decode(json!({
            "status": "kicked",
            "user": {"id": 9, "is_bot": false, "first_name": "Mallory"},
            "until_date": 0
        }))
        .unwrap();
        assert!(matches!(member, ChatMember::Banned(ref banned) if banned.until_date == 0));
        assert!(!member.is_present());
        assert_eq!(member.user().map(|u| u.id), Some(9));
    }

    #[test]
    fn test_member_until_date_optional() {
        let member: ChatMember = codec::decode(json!({
            "status": "member",
            "user": {"id": 1, "is_bot": false, "first_name": "A"}
        }))
        .unwrap();
        match member {
            ChatMember::Member(ref inner) => assert_eq!(inner.until_date, None),
            ref other => panic!("unexpected member: {other:?}"),
        }
        assert!(member.is_present());
    }
}
