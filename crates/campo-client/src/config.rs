//! # Configuration
//!
//! Settings shared by every `campo` command: who the store is, where the
//! backend lives and where the local ledger is kept.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     CAMPO_STORE_NAME, CAMPO_API_URL, CAMPO_DB_PATH, CAMPO_API_TOKEN    │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config PATH, or                                                  │
//! │     ~/.config/admin/campo.toml (Linux)                                 │
//! │     ~/Library/Application Support/co.campo.admin/campo.toml (macOS)    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://localhost:3001, <data dir>/campo.db                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [store]
//! name = "AGRO INSUMOS EL CAMPO"
//! tagline = "EL ALIADO PARA TUS CULTIVOS"
//! currency_symbol = "$"
//! currency_decimals = 2
//!
//! [backend]
//! base_url = "http://localhost:3001"
//!
//! [database]
//! path = "/var/lib/campo/campo.db"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ClientError, ClientResult};

/// File name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "campo.toml";

/// Backend used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

// =============================================================================
// Store Settings
// =============================================================================

/// How the store presents itself on printed and listed output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(default = "default_store_name")]
    pub name: String,

    #[serde(default = "default_tagline")]
    pub tagline: String,

    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Fraction digits shown for amounts (0 to 2).
    #[serde(default = "default_currency_decimals")]
    pub currency_decimals: u8,
}

fn default_store_name() -> String {
    campo_core::STORE_NAME.to_string()
}

fn default_tagline() -> String {
    campo_core::STORE_TAGLINE.to_string()
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_currency_decimals() -> u8 {
    2
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: default_store_name(),
            tagline: default_tagline(),
            currency_symbol: default_currency_symbol(),
            currency_decimals: default_currency_decimals(),
        }
    }
}

// =============================================================================
// Backend Settings
// =============================================================================

/// Where the products/customers backend lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token from a previous `campo login`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for BackendSettings {
    fn default() -> Self {
        BackendSettings {
            base_url: default_base_url(),
            token: None,
        }
    }
}

impl BackendSettings {
    /// Parsed base URL; only http and https are accepted.
    pub fn parsed_url(&self) -> ClientResult<Url> {
        let url = Url::parse(self.base_url.trim())?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ClientError::InvalidUrl(format!(
                "Backend URL must start with http:// or https://, got scheme '{}'",
                other
            ))),
        }
    }
}

// =============================================================================
// Database Settings
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite file for audits, sales and quotations.
    /// `None` means `<platform data dir>/campo.db`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete `campo.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampoConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub backend: BackendSettings,

    #[serde(default)]
    pub database: DatabaseSettings,
}

impl CampoConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`campo.toml`)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns defaults if the load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            let mut config = Self::default();
            config.apply_env_overrides();
            config
        })
    }

    /// Writes the configuration, creating the parent directory if needed.
    pub fn save(&self, config_path: Option<PathBuf>) -> ClientResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ClientError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Config saved");
        Ok(path)
    }

    pub fn validate(&self) -> ClientResult<()> {
        self.backend.parsed_url()?;

        if self.store.name.trim().is_empty() {
            return Err(ClientError::InvalidConfig("store.name must not be empty".into()));
        }

        if self.store.currency_decimals > 2 {
            return Err(ClientError::InvalidConfig(format!(
                "store.currency_decimals must be 0, 1 or 2, got {}",
                self.store.currency_decimals
            )));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `CAMPO_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("CAMPO_STORE_NAME") {
            debug!(store = %name, "Overriding store name from environment");
            self.store.name = name;
        }

        if let Some(url) = lookup("CAMPO_API_URL") {
            debug!(url = %url, "Overriding backend URL from environment");
            self.backend.base_url = url;
        }

        if let Some(path) = lookup("CAMPO_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = Some(PathBuf::from(path));
        }

        if let Some(token) = lookup("CAMPO_API_TOKEN") {
            if token.trim().is_empty() {
                warn!("CAMPO_API_TOKEN is set but empty, ignoring");
            } else {
                self.backend.token = Some(token);
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("co", "campo", "admin")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Configured ledger path, or `campo.db` in the platform data directory.
    pub fn database_path(&self) -> PathBuf {
        if let Some(path) = &self.database.path {
            return path.clone();
        }
        directories::ProjectDirs::from("co", "campo", "admin")
            .map(|dirs| dirs.data_dir().join("campo.db"))
            .unwrap_or_else(|| PathBuf::from("campo.db"))
    }
}
