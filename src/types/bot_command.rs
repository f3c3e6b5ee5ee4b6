//! Bot commands, command scopes and the chat menu button.

use serde::{Deserialize, Serialize};

use super::user::ChatId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotCommand {
    /// 1-32 characters: lowercase letters, digits and underscores.
    pub command: String,
    pub description: String,
}

impl BotCommand {
    pub fn new(command: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotCommandScopeDefault {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotCommandScopeAllPrivateChats {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotCommandScopeAllGroupChats {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotCommandScopeAllChatAdministrators {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotCommandScopeChat {
    pub chat_id: ChatId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotCommandScopeChatAdministrators {
    pub chat_id: ChatId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotCommandScopeChatMember {
    pub chat_id: ChatId,
    pub user_id: i64,
}

hierarchy! {
    /// Which users a command list applies to.
    pub enum BotCommandScope("bot command scope", tag = "type") {
        Default(BotCommandScopeDefault) = "default",
        AllPrivateChats(BotCommandScopeAllPrivateChats) = "all_private_chats",
        AllGroupChats(BotCommandScopeAllGroupChats) = "all_group_chats",
        AllChatAdministrators(BotCommandScopeAllChatAdministrators) = "all_chat_administrators",
        Chat(BotCommandScopeChat) = "chat",
        ChatAdministrators(BotCommandScopeChatAdministrators) = "chat_administrators",
        ChatMember(BotCommandScopeChatMember) = "chat_member",
    }
}

/// A Web App launched from a button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebAppInfo {
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuButtonCommands {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuButtonWebApp {
    pub text: String,
    pub web_app: WebAppInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuButtonDefault {}

hierarchy! {
    /// Behaviour of the bot's menu button in a private chat.
    pub enum MenuButton("menu button", tag = "type") {
        Commands(MenuButtonCommands) = "commands",
        WebApp(MenuButtonWebApp) = "web_app",
        Default(MenuButtonDefault) = "default",
    }
}
