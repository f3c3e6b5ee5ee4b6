//! Outgoing Bot API calls.
//!
//! Each request is a serde struct named after its method. Its `Response` is
//! the type of the envelope's `result` field, and `input_files` lists the
//! file-valued fields the multipart builder has to inspect.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::input_file::{FileSlot, InputFile};
use crate::types::{
    BotCommand, BotCommandScope, ChatId, ChatMember, DiceEmoji, InputMedia, MenuButton, Message,
    MessageEntity, ParseMode, ReactionType, ReplyParameters, User, UserChatBoosts,
};

/// A Bot API method call.
pub trait Method: Serialize {
    /// Method name as it appears in the request URL.
    const NAME: &'static str;

    /// Type of `result` on success.
    type Response: DeserializeOwned;

    /// File-valued fields, in declaration order.
    fn input_files(&mut self) -> Vec<FileSlot<'_>> {
        Vec::new()
    }
}

/// Returns basic information about the bot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetMe {}

impl Method for GetMe {
    const NAME: &'static str = "getMe";
    type Response = User;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendMessage {
    pub chat_id: ChatId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_thread_id: Option<i64>,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<MessageEntity>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_notification: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_parameters: Option<ReplyParameters>,
}

impl SendMessage {
    pub fn new(chat_id: impl Into<ChatId>, text: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            message_thread_id: None,
            text: text.into(),
            parse_mode: None,
            entities: None,
            disable_notification: None,
            reply_parameters: None,
        }
    }
}

impl Method for SendMessage {
    const NAME: &'static str = "sendMessage";
    type Response = Message;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendPhoto {
    pub chat_id: ChatId,
    pub photo: InputFile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<InputFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_spoiler: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_notification: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_parameters: Option<ReplyParameters>,
}

impl SendPhoto {
    pub fn new(chat_id: impl Into<ChatId>, photo: InputFile) -> Self {
        Self {
            chat_id: chat_id.into(),
            photo,
            thumbnail: None,
            caption: None,
            parse_mode: None,
            has_spoiler: None,
            disable_notification: None,
            reply_parameters: None,
        }
    }
}

impl Method for SendPhoto {
    const NAME: &'static str = "sendPhoto";
    type Response = Message;

    fn input_files(&mut self) -> Vec<FileSlot<'_>> {
        let mut slots = vec![FileSlot::new("photo", &mut self.photo)];
        slots.extend(FileSlot::optional("thumbnail", self.thumbnail.as_mut()));
        slots
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendDocument {
    pub chat_id: ChatId,
    pub document: InputFile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<InputFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_content_type_detection: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_notification: Option<bool>,
}

impl SendDocument {
    pub fn new(chat_id: impl Into<ChatId>, document: InputFile) -> Self {
        Self {
            chat_id: chat_id.into(),
            document,
            thumbnail: None,
            caption: None,
            parse_mode: None,
            disable_content_type_detection: None,
            disable_notification: None,
        }
    }
}

impl Method for SendDocument {
    const NAME: &'static str = "sendDocument";
    type Response = Message;

    fn input_files(&mut self) -> Vec<FileSlot<'_>> {
        let mut slots = vec![FileSlot::new("document", &mut self.document)];
        slots.extend(FileSlot::optional("thumbnail", self.thumbnail.as_mut()));
        slots
    }
}

/// Sends 2-10 items as an album.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendMediaGroup {
    pub chat_id: ChatId,
    pub media: Vec<InputMedia>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_notification: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_parameters: Option<ReplyParameters>,
}

impl SendMediaGroup {
    pub fn new(chat_id: impl Into<ChatId>, media: Vec<InputMedia>) -> Self {
        Self {
            chat_id: chat_id.into(),
            media,
            disable_notification: None,
            reply_parameters: None,
        }
    }
}

impl Method for SendMediaGroup {
    const NAME: &'static str = "sendMediaGroup";
    type Response = Vec<Message>;

    fn input_files(&mut self) -> Vec<FileSlot<'_>> {
        self.media
            .iter_mut()
            .enumerate()
            .flat_map(|(index, item)| item.input_files(&format!("media.{index}")))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendDice {
    pub chat_id: ChatId,
    /// Defaults to 🎲 server-side when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<DiceEmoji>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_notification: Option<bool>,
}

impl SendDice {
    pub fn new(chat_id: impl Into<ChatId>) -> Self {
        Self {
            chat_id: chat_id.into(),
            emoji: None,
            disable_notification: None,
        }
    }
}

impl Method for SendDice {
    const NAME: &'static str = "sendDice";
    type Response = Message;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetMessageReaction {
    pub chat_id: ChatId,
    pub message_id: i64,
    /// An empty list removes the bot's reactions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reaction: Option<Vec<ReactionType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_big: Option<bool>,
}

impl Method for SetMessageReaction {
    const NAME: &'static str = "setMessageReaction";
    type Response = bool;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetChatMember {
    pub chat_id: ChatId,
    pub user_id: i64,
}

impl Method for GetChatMember {
    const NAME: &'static str = "getChatMember";
    type Response = ChatMember;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetUserChatBoosts {
    pub chat_id: ChatId,
    pub user_id: i64,
}

impl Method for GetUserChatBoosts {
    const NAME: &'static str = "getUserChatBoosts";
    type Response = UserChatBoosts;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetMyCommands {
    pub commands: Vec<BotCommand>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<BotCommandScope>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
}

impl Method for SetMyCommands {
    const NAME: &'static str = "setMyCommands";
    type Response = bool;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SetChatMenuButton {
    /// Private chat to change; the bot's default button when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_button: Option<MenuButton>,
}

impl Method for SetChatMenuButton {
    const NAME: &'static str = "setChatMenuButton";
    type Response = bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec;
    use crate::types::{BotCommandScopeAllGroupChats, MenuButtonCommands};
    use serde_json::{Value, json};

    #[test]
    fn test_get_me_is_empty_object() {
        assert_eq!(Value::Object(codec::encode(&GetMe {}).unwrap()), json!({}));
    }

    #[test]
    fn test_set_my_commands_encodes_scope() {
        let request = SetMyCommands {
            commands: vec![BotCommand::new("start", "Start the bot")],
            scope: Some(BotCommandScope::AllGroupChats(BotCommandScopeAllGroupChats {})),
            language_code: None,
        };
        assert_eq!(
            Value::Object(codec::encode(&request).unwrap()),
            json!({
                "commands": [{"command": "start", "description": "Start the bot"}],
                "scope": {"type": "all_group_chats"}
            })
        );
    }

    #[test]
    fn test_reaction_list_encodes_variants() {
        let request = SetMessageReaction {
            chat_id: ChatId::Id(1),
            message_id: 2,
            reaction: Some(vec![ReactionType::emoji("🔥")]),
            is_big: None,
        };
        let encoded = codec::encode(&request).unwrap();
        assert_eq!(encoded["reaction"], json!([{"type": "emoji", "emoji": "🔥"}]));
        assert!(!encoded.contains_key("is_big"));
    }

    #[test]
    fn test_menu_button_request() {
        let request = SetChatMenuButton {
            chat_id: Some(3),
            menu_button: Some(MenuButton::Commands(MenuButtonCommands {})),
        };
        let encoded = codec::encode(&request).unwrap();
        assert_eq!(encoded["menu_button"], json!({"type": "commands"}));
    }

    #[test]
    fn test_media_group_paths() {
        let mut request = SendMediaGroup::new(
            1i64,
            vec![
                InputMedia::photo(InputFile::file_id("a")),
                InputMedia::video(InputFile::file_id("b")),
            ],
        );
        let paths: Vec<String> = request.input_files().into_iter().map(|s| s.path).collect();
        assert_eq!(paths, vec!["media.0.media", "media.1.media"]);
    }
}
