//! Load-time rule configuration errors.

use thiserror::Error;

/// A rule set that cannot be loaded. Every variant names the zero-based index
/// of the offending rule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("rule {index}: invalid condition '{expr}'")]
    InvalidCondition { index: usize, expr: String },

    #[error("rule {index}: range {start}-{end} starts above its end")]
    InvertedRange { index: usize, start: i64, end: i64 },

    #[error("rule {index}: jump_to_rule {target} is out of bounds ({len} rules)")]
    JumpOutOfBounds { index: usize, target: usize, len: usize },

    #[error("rule {index}: jump_to_rule {target} jumps back without disabling rule {index} and can loop")]
    JumpCycle { index: usize, target: usize },

    #[error("rule {index}: jump_to_rule {target} exceeds the limit of {limit} backward jumps")]
    TooManyBackwardJumps { index: usize, target: usize, limit: usize },

    #[error("rule {index}: mutually_exclusive index {target} is out of bounds ({len} rules)")]
    ExclusionOutOfBounds { index: usize, target: usize, len: usize },

    #[error("rule {index}: condition '{condition}' can never match within the roll range {min}..={max}")]
    ConditionOutOfBounds {
        index: usize,
        condition: String,
        min: i64,
        max: i64,
    },
}

impl RuleError {
    /// Index of the rule that failed validation.
    pub fn index(&self) -> usize {
        match self {
            RuleError::InvalidCondition { index, .. }
            | RuleError::InvertedRange { index, .. }
            | RuleError::JumpOutOfBounds { index, .. }
            | RuleError::JumpCycle { index, .. }
            | RuleError::TooManyBackwardJumps { index, .. }
            | RuleError::ExclusionOutOfBounds { index, .. }
            | RuleError::ConditionOutOfBounds { index, .. } => *index,
        }
    }
}

pub type Result<T, E = RuleError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_names_rule() {
        let err = RuleError::JumpOutOfBounds { index: 2, target: 9, len: 3 };
        assert_eq!(err.to_string(), "rule 2: jump_to_rule 9 is out of bounds (3 rules)");
        assert_eq!(err.index(), 2);
    }

    #[test]
    fn test_out_of_bounds_display() {
        let err = RuleError::ConditionOutOfBounds {
            index: 0,
            condition: "=200".into(),
            min: 1,
            max: 100,
        };
        assert!(err.to_string().contains("1..=100"));
    }
}
