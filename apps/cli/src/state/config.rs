//! # Configuration State
//!
//! The loaded `campo.toml` plus where it came from.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`CAMPO_*`)
//! 2. Config file (`--config` or the platform config dir)
//! 3. Defaults
//!
//! Read-only for the duration of a command. `login` is the one command that
//! writes the file back.

use campo_client::{BackendClient, CampoConfig};
use campo_core::Money;
use std::path::PathBuf;
use tracing::warn;

use crate::error::ApiResult;

#[derive(Debug, Clone)]
pub struct ConfigState {
    config: CampoConfig,
    /// Explicit `--config` path, if any.
    config_path: Option<PathBuf>,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState::new(CampoConfig::default(), None)
    }
}

impl ConfigState {
    pub fn new(config: CampoConfig, config_path: Option<PathBuf>) -> Self {
        ConfigState { config, config_path }
    }

    /// Loads from `path` (or the default location) and the environment.
    pub fn load(path: Option<PathBuf>) -> ApiResult<Self> {
        let config = CampoConfig::load(path.clone())?;
        Ok(ConfigState::new(config, path))
    }

    pub fn config(&self) -> &CampoConfig {
        &self.config
    }

    pub fn store_name(&self) -> &str {
        &self.config.store.name
    }

    /// Client for the configured backend, authenticated when a token is saved.
    pub fn backend(&self) -> ApiResult<BackendClient> {
        let client = BackendClient::new(&self.config.backend)?;
        if !client.has_token() {
            warn!(
                backend = %client.base_url(),
                "No API token saved; run `campo login` if the backend requires one"
            );
        }
        Ok(client)
    }

    /// Stores `token` and writes the config file. Returns the written path.
    pub fn save_token(&mut self, token: String) -> ApiResult<PathBuf> {
        self.config.backend.token = Some(token);
        Ok(self.config.save(self.config_path.clone())?)
    }

    /// Formats an amount with the store's symbol and decimals.
    ///
    /// Amounts are kept in cents; with fewer than two decimals the value is
    /// rounded half away from zero.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let decimals = u32::from(self.config.store.currency_decimals.min(2));
        let step = 10_i64.pow(2 - decimals);
        let cents = amount.cents();
        let scaled = (cents.abs() + step / 2) / step;

        let divisor = 10_i64.pow(decimals);
        let whole = scaled / divisor;
        let frac = scaled % divisor;

        format!(
            "{}{}{}",
            if cents < 0 && scaled != 0 { "-" } else { "" },
            self.config.store.currency_symbol,
            if decimals > 0 {
                format!("{}.{:0width$}", whole, frac, width = decimals as usize)
            } else {
                whole.to_string()
            }
        )
    }
}
