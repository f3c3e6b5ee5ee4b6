use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::io::Read;
use std::path::PathBuf;
use tgwire::args::CommonArgs;
use tgwire::cache::{Cache, EntitySnapshot, FileCache};
use tgwire::config::Config;
use tgwire::types::{
    BotCommandScope, ChatBoostSource, ChatMember, InputMedia, MenuButton, Message, MessageOrigin,
    ReactionType,
};
use tgwire::{codec, logging, response};

// ── Decodable kinds ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Kind {
    Reaction,
    BoostSource,
    MessageOrigin,
    ChatMember,
    CommandScope,
    MenuButton,
    InputMedia,
    Snapshot,
    Message,
    /// A full `{"ok": ...}` response envelope
    Envelope,
}

// ── CLI ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name = "tgwire",
    version,
    about = "Inspect Telegram Bot API payloads and manage the entity cache"
)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Decode a JSON object and print its normalized encoding
    Decode {
        #[arg(value_enum)]
        kind: Kind,
        /// Input file (default: stdin)
        file: Option<PathBuf>,
    },
    /// Entity cache maintenance
    Cache {
        #[command(subcommand)]
        action: CacheCommands,
    },
}

#[derive(Debug, Subcommand)]
enum CacheCommands {
    /// Remove every cached entry
    Clear,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load(cli.common.config_path())?;
    cli.common.apply_overrides(&mut config);
    logging::init(config.log_config());

    match cli.command {
        Commands::Decode { kind, file } => {
            let input = read_input(file.as_ref())?;
            let value: Value = codec::decode_slice(&input).context("Input is not JSON")?;
            let normalized = normalize(kind, value)?;
            println!("{}", serde_json::to_string_pretty(&normalized)?);
        }
        Commands::Cache {
            action: CacheCommands::Clear,
        } => {
            let cache = FileCache::new(&config.cache_dir);
            cache.clear()?;
            println!("Cleared {}", cache.dir().display());
        }
    }
    Ok(())
}

fn read_input(file: Option<&PathBuf>) -> Result<Vec<u8>> {
    match file {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
        }
        None => {
            let mut input = Vec::new();
            std::io::stdin().read_to_end(&mut input)?;
            Ok(input)
        }
    }
}

/// Decode `value` as `kind` and encode it back.
fn normalize(kind: Kind, value: Value) -> Result<Value> {
    let normalized = match kind {
        Kind::Reaction => round_trip::<ReactionType>(value)?,
        Kind::BoostSource => round_trip::<ChatBoostSource>(value)?,
        Kind::MessageOrigin => round_trip::<MessageOrigin>(value)?,
        Kind::ChatMember => round_trip::<ChatMember>(value)?,
        Kind::CommandScope => round_trip::<BotCommandScope>(value)?,
        Kind::MenuButton => round_trip::<MenuButton>(value)?,
        Kind::InputMedia => round_trip::<InputMedia>(value)?,
        Kind::Snapshot => round_trip::<EntitySnapshot>(value)?,
        Kind::Message => round_trip::<Message>(value)?,
        Kind::Envelope => {
            let decoded = response::decode_envelope::<Value>(value)?;
            Value::Object(response::encode_envelope(&decoded)?)
        }
    };
    Ok(normalized)
}

fn round_trip<T: Serialize + DeserializeOwned>(value: Value) -> Result<Value> {
    let decoded: T = codec::decode(value)?;
    Ok(codec::encode_value(&decoded)?)
}
