//! Message reactions.

use serde::{Deserialize, Serialize};

/// Reaction with a standard emoji.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionTypeEmoji {
    pub emoji: String,
}

/// Reaction with a custom emoji sticker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionTypeCustomEmoji {
    pub custom_emoji_id: String,
}

/// Paid (star) reaction. Carries no fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionTypePaid {}

hierarchy! {
    /// Type of a reaction.
    pub enum ReactionType("reaction type", tag = "type") {
        Emoji(ReactionTypeEmoji) = "emoji",
        CustomEmoji(ReactionTypeCustomEmoji) = "custom_emoji",
        Paid(ReactionTypePaid) = "paid",
    }
}

impl ReactionType {
    pub fn emoji(emoji: impl Into<String>) -> Self {
        Self::Emoji(ReactionTypeEmoji {
            emoji: emoji.into(),
        })
    }

    pub fn custom_emoji(custom_emoji_id: impl Into<String>) -> Self {
        Self::CustomEmoji(ReactionTypeCustomEmoji {
            custom_emoji_id: custom_emoji_id.into(),
        })
    }
}

/// A reaction added to a message together with how often it was added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionCount {
    #[serde(rename = "type")]
    pub reaction: ReactionType,
    pub total_count: u32,
}
