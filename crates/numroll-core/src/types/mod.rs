//! Shared data types.

pub mod message;
pub mod rule;

pub use message::{OutgoingMessage, mention};
pub use rule::{ConditionValue, MessageMode, RuleConfig};
