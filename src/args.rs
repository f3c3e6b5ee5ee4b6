use crate::config::Config;
use clap::{ArgAction, Args};
use std::path::PathBuf;

// Global flags shared across every subcommand.
//
//   -c / --config   Path to a config.toml file
//   --cache-dir     Entity cache directory override
//   --api-url       Bot API server override
//   -v / --verbose  Debug logging
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Path to a config.toml file (default: ~/.tgwire/config.toml)
    #[arg(
        short = 'c',
        long,
        value_name = "PATH",
        env = "TGWIRE_CONFIG",
        global = true
    )]
    pub config: Option<PathBuf>,

    /// Entity cache directory
    #[arg(long, value_name = "DIR", env = "TGWIRE_CACHE_DIR", global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Bot API server URL
    #[arg(long, value_name = "URL", env = "TGWIRE_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Log at debug level
    #[arg(short, long, action = ArgAction::SetTrue, global = true)]
    pub verbose: bool,
}

impl CommonArgs {
    pub fn config_path(&self) -> Option<PathBuf> {
        self.config.clone()
    }

    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(cache_dir) = &self.cache_dir {
            config.cache_dir = cache_dir.clone();
        }
        if let Some(api_url) = &self.api_url {
            config.api_url = api_url.clone();
        }
        if self.verbose {
            config.log_filter = "tgwire=debug,info".to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct Cli {
        #[command(flatten)]
        common: CommonArgs,
    }

    #[test]
    fn test_overrides_apply() {
        let cli = Cli::parse_from([
            "tgwire",
            "--cache-dir",
            "/tmp/tg",
            "--api-url",
            "http://local",
            "-v",
        ]);
        let mut config = Config::default();
        cli.common.apply_overrides(&mut config);
        assert_eq!(config.cache_dir, PathBuf::from("/tmp/tg"));
        assert_eq!(config.api_url, "http://local");
        assert!(config.log_filter.starts_with("tgwire=debug"));
    }

    #[test]
    fn test_no_flags_keep_config() {
        let cli = Cli::parse_from(["tgwire"]);
        let mut config = Config::default();
        let before = config.clone();
        cli.common.apply_overrides(&mut config);
        if std::env::var_os("TGWIRE_CACHE_DIR").is_none()
            && std::env::var_os("TGWIRE_API_URL").is_none()
        {
            assert_eq!(config, before);
        }
    }
}
