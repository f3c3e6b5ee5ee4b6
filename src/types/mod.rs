//! Bot API entities.
//!
//! Plain objects are serde structs; polymorphic objects are declared with
//! `hierarchy!` and decoded through their discriminator registry.

pub mod boost;
pub mod bot_command;
pub mod chat_member;
pub mod dice;
pub mod file;
pub mod input_media;
pub mod message;
pub mod origin;
pub mod reaction;
pub mod user;

pub use boost::{
    ChatBoost, ChatBoostRemoved, ChatBoostSource, ChatBoostSourceGiftCode,
    ChatBoostSourceGiveaway, ChatBoostSourcePremium, UserChatBoosts,
};
pub use bot_command::{
    BotCommand, BotCommandScope, BotCommandScopeAllChatAdministrators,
    BotCommandScopeAllGroupChats, BotCommandScopeAllPrivateChats, BotCommandScopeChat,
    BotCommandScopeChatAdministrators, BotCommandScopeChatMember, BotCommandScopeDefault,
    MenuButton, MenuButtonCommands, MenuButtonDefault, MenuButtonWebApp, WebAppInfo,
};
pub use chat_member::{
    ChatMember, ChatMemberAdministrator, ChatMemberBanned, ChatMemberLeft, ChatMemberMember,
    ChatMemberOwner, ChatMemberRestricted,
};
pub use dice::{Dice, DiceEmoji};
pub use file::{Animation, Audio, Document, FileMeta, PhotoSize, Video, Voice};
pub use input_media::{
    InputMedia, InputMediaAnimation, InputMediaAudio, InputMediaDocument, InputMediaPhoto,
    InputMediaVideo,
};
pub use message::{Message, MessageEntity, ParseMode, ReplyParameters};
pub use origin::{
    MessageOrigin, MessageOriginChannel, MessageOriginChat, MessageOriginHiddenUser,
    MessageOriginUser,
};
pub use reaction::{
    ReactionCount, ReactionType, ReactionTypeCustomEmoji, ReactionTypeEmoji, ReactionTypePaid,
};
pub use user::{Chat, ChatId, ChatType, User};
