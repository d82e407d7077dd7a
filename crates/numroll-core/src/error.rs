//! Unified error types for numroll.

use thiserror::Error;

/// Result type alias using NumrollError.
pub type Result<T> = std::result::Result<T, NumrollError>;

#[derive(Error, Debug)]
pub enum NumrollError {
    // Config errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Settings file not found: {0}")]
    ConfigNotFound(String),

    #[error("Migration error: {0}")]
    Migration(String),

    // Channel errors
    #[error("Channel error: {0}")]
    Channel(String),

    #[error("Channel not connected: {0}")]
    ChannelNotConnected(String),

    // General errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl NumrollError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn channel(msg: impl Into<String>) -> Self {
        Self::Channel(msg.into())
    }

    pub fn migration(msg: impl Into<String>) -> Self {
        Self::Migration(msg.into())
    }
}
