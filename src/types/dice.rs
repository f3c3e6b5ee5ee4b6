//! Animated dice.
//!
//! The dice emoji is a soft enum: its wire value is the emoji itself, looked
//! up through a symbol table rather than a structural tag.

use std::hash::{Hash, Hasher};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::registry::SymbolTable;

/// Equality and hashing go by symbol, so `Other("🎲")` equals `Dice`.
#[derive(Debug, Clone, Default)]
pub enum DiceEmoji {
    /// 🎲, values 1-6.
    #[default]
    Dice,
    /// 🎯, values 1-6.
    Darts,
    /// 🏀, values 1-5.
    Basketball,
    /// ⚽, values 1-5.
    Football,
    /// 🎳, values 1-6.
    Bowling,
    /// 🎰, values 1-64.
    SlotMachine,
    /// An emoji added to the protocol after this build.
    Other(String),
}

static DICE_SYMBOLS: [(DiceEmoji, &str); 6] = [
    (DiceEmoji::Dice, "🎲"),
    (DiceEmoji::Darts, "🎯"),
    (DiceEmoji::Basketball, "🏀"),
    (DiceEmoji::Football, "⚽"),
    (DiceEmoji::Bowling, "🎳"),
    (DiceEmoji::SlotMachine, "🎰"),
];

static DICE_EMOJI: SymbolTable<DiceEmoji> = SymbolTable::new("dice emoji", &DICE_SYMBOLS);

impl DiceEmoji {
    pub fn table() -> &'static SymbolTable<DiceEmoji> {
        &DICE_EMOJI
    }

    pub fn from_symbol(symbol: &str) -> Self {
        DICE_EMOJI
            .lookup(symbol)
            .unwrap_or_else(|| Self::Other(symbol.to_string()))
    }

    pub fn symbol(&self) -> &str {
        match self {
            Self::Dice => "🎲",
            Self::Darts => "🎯",
            Self::Basketball => "🏀",
            Self::Football => "⚽",
            Self::Bowling => "🎳",
            Self::SlotMachine => "🎰",
            Self::Other(symbol) => symbol,
        }
    }

    /// Highest value the animation can land on, if known.
    pub fn max_value(&self) -> Option<u8> {
        match self {
            Self::Dice | Self::Darts | Self::Bowling => Some(6),
            Self::Basketball | Self::Football => Some(5),
            Self::SlotMachine => Some(64),
            Self::Other(_) => None,
        }
    }
}

impl PartialEq for DiceEmoji {
    fn eq(&self, other: &Self) -> bool {
        self.symbol() == other.symbol()
    }
}

impl Eq for DiceEmoji {}

impl Hash for DiceEmoji {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.symbol().hash(state);
    }
}

impl Serialize for DiceEmoji {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.symbol())
    }
}

impl<'de> Deserialize<'de> for DiceEmoji {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let symbol = String::deserialize(deserializer)?;
        if symbol.is_empty() {
            return Err(D::Error::custom("type mismatch: empty dice emoji"));
        }
        Ok(Self::from_symbol(&symbol))
    }
}

/// A dice with a random value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dice {
    pub emoji: DiceEmoji,
    pub value: u8,
}
