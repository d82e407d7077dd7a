//! Settings file loading.
//!
//! Settings live in a single TOML file (`bot_settings.toml` by default) with
//! `[bot]`, `[roll]` and `[message]` sections. Keys owned by the transport or
//! the scheduler (token, cron, timezone) are accepted and ignored.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{NumrollError, Result};
use crate::migrate::migrate_legacy_rules;
use crate::types::RuleConfig;

/// Default settings file name, resolved against the working directory.
pub const DEFAULT_SETTINGS_FILE: &str = "bot_settings.toml";

/// Placeholder replaced by the rolled number in `number_message`.
pub const NUMBER_PLACEHOLDER: &str = "{number}";

/// Full settings file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub roll: RollConfig,
    #[serde(default)]
    pub message: MessageConfig,
}

/// Who gets a number and where notifications go.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BotConfig {
    /// Delivery channel id.
    #[serde(default)]
    pub channel: u64,
    /// Tracked user ids, in roll order.
    #[serde(default)]
    pub users: Vec<u64>,
}

/// Inclusive bounds for rolled numbers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RollConfig {
    #[serde(default = "default_min_number")]
    pub min_number: i64,
    #[serde(default = "default_max_number")]
    pub max_number: i64,
}

fn default_min_number() -> i64 { 1 }
fn default_max_number() -> i64 { 1000 }

impl Default for RollConfig {
    fn default() -> Self {
        Self {
            min_number: default_min_number(),
            max_number: default_max_number(),
        }
    }
}

impl RollConfig {
    /// `(min, max)` pair used for rule bound checks.
    pub fn bounds(&self) -> (i64, i64) {
        (self.min_number, self.max_number)
    }
}

/// Message template and rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageConfig {
    #[serde(default)]
    pub default_message: String,
    #[serde(default = "default_number_message")]
    pub number_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<RuleConfig>>,
    /// Legacy `[condition, message, replace, stop]` tuples.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cond_messages: Option<Vec<toml::Value>>,
}

fn default_number_message() -> String {
    NUMBER_PLACEHOLDER.to_string()
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            default_message: String::new(),
            number_message: default_number_message(),
            rules: None,
            cond_messages: None,
        }
    }
}

impl MessageConfig {
    /// Rule records in effect: `rules` when present, otherwise the migrated
    /// legacy `cond_messages`, otherwise none.
    pub fn rule_configs(&self) -> Vec<RuleConfig> {
        if let Some(rules) = &self.rules {
            return rules.clone();
        }
        if let Some(legacy) = &self.cond_messages {
            tracing::info!("Using legacy cond_messages ({} entries); run `numroll migrate` to convert", legacy.len());
            return migrate_legacy_rules(legacy);
        }
        Vec::new()
    }
}

impl Settings {
    /// Default settings path.
    pub fn default_path() -> PathBuf {
        PathBuf::from(DEFAULT_SETTINGS_FILE)
    }

    /// Load and check a settings file.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(NumrollError::ConfigNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let settings = Self::parse(&content)?;
        tracing::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Parse and check settings from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(content)?;
        settings.check()?;
        Ok(settings)
    }

    /// Structural checks that do not involve rule semantics.
    pub fn check(&self) -> Result<()> {
        if self.roll.min_number > self.roll.max_number {
            return Err(NumrollError::config(format!(
                "roll.min_number ({}) is greater than roll.max_number ({})",
                self.roll.min_number, self.roll.max_number
            )));
        }
        if self.message.rules.is_some() && self.message.cond_messages.is_some() {
            tracing::warn!("Both message.rules and message.cond_messages are set; cond_messages is ignored");
        }
        Ok(())
    }
}
