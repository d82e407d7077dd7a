//! Rule records as they appear in the settings file.
//!
//! These are raw, unvalidated shapes. `numroll-rules` parses and validates
//! them into an executable rule set.

use serde::{Deserialize, Serialize};

/// How a matching rule mutates the message under construction.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MessageMode {
    /// Append to the end.
    #[default]
    Add,
    /// Replace the most recently added segment.
    ReplaceLast,
    /// Keep only the default message, then append.
    ReplaceExceptDefault,
    /// Drop everything, default message included, then append.
    ReplaceAll,
}

impl std::fmt::Display for MessageMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageMode::Add => write!(f, "add"),
            MessageMode::ReplaceLast => write!(f, "replace_last"),
            MessageMode::ReplaceExceptDefault => write!(f, "replace_except_default"),
            MessageMode::ReplaceAll => write!(f, "replace_all"),
        }
    }
}

/// A condition as written in TOML: `"=50"`, `50` or `[1, 5]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ConditionValue {
    Number(i64),
    Range([i64; 2]),
    Text(String),
}

impl std::fmt::Display for ConditionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConditionValue::Number(n) => write!(f, "={n}"),
            ConditionValue::Range([start, end]) => write!(f, "{start}-{end}"),
            ConditionValue::Text(text) => write!(f, "{text}"),
        }
    }
}

impl From<&str> for ConditionValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// One `[[message.rules]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuleConfig {
    pub condition: ConditionValue,
    pub message: String,
    #[serde(default)]
    pub mode: MessageMode,
    #[serde(default)]
    pub stop_on_trigger: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jump_to_rule: Option<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mutually_exclusive: Vec<usize>,
}

impl RuleConfig {
    pub fn new(condition: impl Into<ConditionValue>, message: impl Into<String>) -> Self {
        Self {
            condition: condition.into(),
            message: message.into(),
            mode: MessageMode::Add,
            stop_on_trigger: false,
            jump_to_rule: None,
            mutually_exclusive: Vec::new(),
        }
    }
}
