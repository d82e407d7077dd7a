//! # numroll core
//! Shared error type, settings, rule records, and the delivery channel trait.

pub mod config;
pub mod error;
pub mod migrate;
pub mod traits;
pub mod types;

pub use config::{BotConfig, MessageConfig, RollConfig, Settings};
pub use error::{NumrollError, Result};
pub use traits::Channel;
pub use types::{ConditionValue, MessageMode, OutgoingMessage, RuleConfig};
