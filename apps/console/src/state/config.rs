//! # Shop Configuration
//!
//! Settings loaded once at startup and read-only afterwards.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. CLI flags (highest priority)                                        │
//! │     --db ./shop.db --mode employee --currency '$'                       │
//! │                                                                         │
//! │  2. Environment Variables (.env is loaded first)                        │
//! │     GAMESHOP_DB_PATH, GAMESHOP_FRONTEND, GAMESHOP_CURRENCY,             │
//! │     GAMESHOP_SHOP_NAME, GAMESHOP_LOG                                    │
//! │                                                                         │
//! │  3. TOML Config File                                                    │
//! │     --config <path>, or shop.toml in the platform config dir:           │
//! │     ~/.config/gameshop/shop.toml (Linux)                                │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # shop.toml
//! shop_name = "CapeTown Gaming"
//! currency_symbol = "€"
//! database_path = "/var/lib/gameshop/gameshop.db"
//! frontend = "employee"   # customer | employee
//! log_filter = "warn,gameshop=debug"
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::frontend::Frontend;
use crate::Cli;

/// File name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "shop.toml";

/// Database file name inside the platform data directory.
pub const DATABASE_FILE_NAME: &str = "gameshop.db";

const ENV_PREFIX: &str = "GAMESHOP_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Could not create data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShopConfig {
    /// Shown in the welcome banner
    pub shop_name: String,

    /// Appended to every amount, e.g. `59.50€`
    pub currency_symbol: String,

    /// SQLite file. `None` means the platform data directory.
    pub database_path: Option<PathBuf>,

    /// Front end started by the binary
    pub frontend: Frontend,

    /// Default tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for ShopConfig {
    fn default() -> Self {
        ShopConfig {
            shop_name: "CapeTown Gaming".to_string(),
            currency_symbol: "€".to_string(),
            database_path: None,
            frontend: Frontend::Customer,
            log_filter: "warn,gameshop=info,sqlx=warn".to_string(),
        }
    }
}

impl ShopConfig {
    /// Loads every layer in priority order and validates the result.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match config_file_path(cli.config.as_deref()) {
            Some(path) => ShopConfig::from_file(&path)?,
            None => ShopConfig::default(),
        };

        config.apply_env_with(|key| std::env::var(key).ok())?;
        config.apply_cli(cli);
        config.validate()?;

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        debug!(?path, "Reading config file");

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies `GAMESHOP_*` variables found through `lookup`.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));

        if let Some(name) = var("SHOP_NAME") {
            self.shop_name = name;
        }
        if let Some(symbol) = var("CURRENCY") {
            self.currency_symbol = symbol;
        }
        if let Some(path) = var("DB_PATH") {
            self.database_path = Some(PathBuf::from(path));
        }
        if let Some(frontend) = var("FRONTEND") {
            self.frontend = frontend.parse().map_err(ConfigError::Invalid)?;
        }
        if let Some(filter) = var("LOG") {
            self.log_filter = filter;
        }

        Ok(())
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(name) = &cli.shop_name {
            self.shop_name = name.clone();
        }
        if let Some(symbol) = &cli.currency {
            self.currency_symbol = symbol.clone();
        }
        if let Some(path) = &cli.db {
            self.database_path = Some(path.clone());
        }
        if let Some(frontend) = cli.mode {
            self.frontend = frontend;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.shop_name.trim().is_empty() {
            return Err(ConfigError::Invalid("shop_name must not be empty".into()));
        }
        if self.currency_symbol.chars().count() > 4 {
            return Err(ConfigError::Invalid(format!(
                "currency_symbol '{}' is longer than 4 characters",
                self.currency_symbol
            )));
        }
        if let Some(path) = &self.database_path {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Invalid("database_path must not be empty".into()));
            }
        }
        Ok(())
    }

    /// The configured database path, or `gameshop.db` in the platform data
    /// directory (created if missing).
    pub fn resolve_database_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }

        let dirs = project_dirs().ok_or_else(|| {
            ConfigError::Invalid("could not determine the platform data directory".into())
        })?;
        let data_dir = dirs.data_dir();

        std::fs::create_dir_all(data_dir).map_err(|source| ConfigError::DataDir {
            path: data_dir.to_path_buf(),
            source,
        })?;

        Ok(data_dir.join(DATABASE_FILE_NAME))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "gameshop", "gameshop")
}

/// An explicit path is always used; the default location only when it exists.
fn config_file_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let path = project_dirs()?.config_dir().join(CONFIG_FILE_NAME);
    path.exists().then_some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = ShopConfig::default();
        assert_eq!(config.currency_symbol, "€");
        assert_eq!(config.frontend, Frontend::Customer);
        assert!(config.database_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_fills_missing_fields_with_defaults() {
        let config: ShopConfig = toml::from_str(
            r#"
            shop_name = "Retro Corner"
            frontend = "employee"
            "#,
        )
        .unwrap();

        assert_eq!(config.shop_name, "Retro Corner");
        assert_eq!(config.frontend, Frontend::Employee);
        assert_eq!(config.currency_symbol, "€");
    }

    #[test]
    fn test_toml_rejects_unknown_keys() {
        assert!(toml::from_str::<ShopConfig>("tax_rate = 20").is_err());
    }

    #[test]
    fn test_env_overrides_file_values() {
        let vars = env(&[
            ("GAMESHOP_CURRENCY", "$"),
            ("GAMESHOP_DB_PATH", "/tmp/shop.db"),
            ("GAMESHOP_FRONTEND", "Employee"),
        ]);
        let mut config = ShopConfig::default();
        config.apply_env_with(|k| vars.get(k).cloned()).unwrap();

        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.database_path, Some(PathBuf::from("/tmp/shop.db")));
        assert_eq!(config.frontend, Frontend::Employee);
    }

    #[test]
    fn test_env_rejects_unknown_frontend() {
        let vars = env(&[("GAMESHOP_FRONTEND", "kiosk")]);
        let mut config = ShopConfig::default();
        let err = config.apply_env_with(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_cli_wins_over_env() {
        let vars = env(&[("GAMESHOP_CURRENCY", "$")]);
        let mut config = ShopConfig::default();
        config.apply_env_with(|k| vars.get(k).cloned()).unwrap();

        let cli = Cli {
            currency: Some("£".into()),
            mode: Some(Frontend::Employee),
            ..Cli::default()
        };
        config.apply_cli(&cli);

        assert_eq!(config.currency_symbol, "£");
        assert_eq!(config.frontend, Frontend::Employee);
    }

    #[test]
    fn test_validate_rejects_blank_shop_name() {
        let config = ShopConfig {
            shop_name: "   ".into(),
            ..ShopConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_explicit_database_path_is_used_as_is() {
        let config = ShopConfig {
            database_path: Some(PathBuf::from("./local.db")),
            ..ShopConfig::default()
        };
        assert_eq!(
            config.resolve_database_path().unwrap(),
            PathBuf::from("./local.db")
        );
    }
}
