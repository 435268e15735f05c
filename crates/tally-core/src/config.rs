//! User settings
//!
//! Loaded from an explicit path, else `<config dir>/tally/config.toml` when
//! present, else the defaults embedded at build time. Keys missing from a
//! user file fall back to the embedded values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::format::MoneyFormat;
use crate::period::TimeFilter;

const DEFAULT_CONFIG: &str = include_str!("../config/tally.toml");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// SQLite database path
    pub database: String,
    pub default_filter: TimeFilter,
    pub currency_symbol: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database: "tally.db".to_string(),
            default_filter: TimeFilter::AllTime,
            currency_symbol: "$".to_string(),
        }
    }
}

/// Raw settings for TOML parsing
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSettings {
    database: Option<String>,
    default_filter: Option<String>,
    currency_symbol: Option<String>,
}

/// Default user override location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tally").join("config.toml"))
}

impl Settings {
    /// Load settings (explicit path first, then user override, then defaults)
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let defaults = Self::parse(DEFAULT_CONFIG)?;

        let path = match explicit {
            Some(path) if !path.exists() => {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )))
            }
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path().filter(|p| p.exists()),
        };

        match path {
            Some(path) => {
                let content = fs::read_to_string(&path).map_err(|e| {
                    Error::Config(format!("Failed to read {}: {}", path.display(), e))
                })?;
                tracing::debug!(path = %path.display(), "Loading settings");
                defaults.merged(&content)
            }
            None => Ok(defaults),
        }
    }

    /// Parse a complete settings file over the built-in defaults
    pub fn parse(content: &str) -> Result<Self> {
        Self::default().merged(content)
    }

    fn merged(mut self, content: &str) -> Result<Self> {
        let raw: RawSettings = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

        if let Some(database) = raw.database {
            self.database = database;
        }
        if let Some(filter) = raw.default_filter {
            self.default_filter = filter.parse().map_err(Error::Config)?;
        }
        if let Some(symbol) = raw.currency_symbol {
            self.currency_symbol = symbol;
        }
        Ok(self)
    }

    pub fn money_format(&self) -> MoneyFormat {
        MoneyFormat::with_symbol(self.currency_symbol.clone())
    }
}
