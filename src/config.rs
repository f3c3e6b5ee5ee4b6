use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::logging::{LogConfig, LogFormat};

const DEFAULT_API_URL: &str = "https://api.telegram.org";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Bot API server, without trailing slash
    pub api_url: String,
    /// Bot token issued by @BotFather
    pub token: String,
    /// Directory of the keyed entity cache
    pub cache_dir: PathBuf,
    /// Log filter directive (e.g. "tgwire=debug,warn")
    pub log_filter: String,
    /// Log output format: pretty, compact or json
    pub log_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: String::new(),
            cache_dir: settings_dir().join("cache"),
            log_filter: "tgwire=info,warn".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

/// `~/.tgwire`, or `./.tgwire` when there is no home directory.
pub fn settings_dir() -> PathBuf {
    let home_dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home_dir.join(".tgwire")
}

impl Config {
    /// Load configuration from file, falling back to defaults when absent
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = path.unwrap_or_else(|| settings_dir().join("config.toml"));

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            let config: Config = toml::from_str(&content)
                .with_context(|| format!("Invalid config {}", config_path.display()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: Option<PathBuf>) -> Result<()> {
        let config_path = path.unwrap_or_else(|| settings_dir().join("config.toml"));

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Full URL of a Bot API method.
    pub fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.api_url.trim_end_matches('/'),
            self.token,
            method
        )
    }

    /// Logging settings, with `TGWIRE_LOG`/`RUST_LOG` taking precedence.
    pub fn log_config(&self) -> LogConfig {
        let mut log = LogConfig::from_env();
        if std::env::var_os("TGWIRE_LOG").is_none() && std::env::var_os("RUST_LOG").is_none() {
            log.filter = self.log_filter.clone();
        }
        if std::env::var_os("TGWIRE_LOG_FORMAT").is_none() {
            log.format = LogFormat::parse(&self.log_format);
        }
        log
    }
}
