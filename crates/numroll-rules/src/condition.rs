//! Condition expressions over a rolled number.
//!
//! Accepted forms: `=N`, `!=N`, `>N`, `>=N`, `<N`, `<=N`, a bare integer
//! (equality), an inclusive range `A-B`, and the keywords `highest` and
//! `lowest` (case-insensitive). Operands may be negative.

use std::str::FromStr;

use numroll_core::ConditionValue;
use thiserror::Error;

/// Why an expression could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseConditionError {
    #[error("malformed condition '{0}'")]
    Malformed(String),

    #[error("range {start}-{end} starts above its end")]
    InvertedRange { start: i64, end: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

impl CompareOp {
    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "!=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
        }
    }

    fn apply(self, lhs: i64, rhs: i64) -> bool {
        match self {
            CompareOp::Eq => lhs == rhs,
            CompareOp::Ne => lhs != rhs,
            CompareOp::Gt => lhs > rhs,
            CompareOp::Ge => lhs >= rhs,
            CompareOp::Lt => lhs < rhs,
            CompareOp::Le => lhs <= rhs,
        }
    }
}

// Two-character operators first so `>=` is not read as `>` followed by `=5`.
const OPERATORS: [CompareOp; 6] = [
    CompareOp::Ge,
    CompareOp::Le,
    CompareOp::Ne,
    CompareOp::Gt,
    CompareOp::Lt,
    CompareOp::Eq,
];

/// A parsed predicate over the rolled number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    Compare { op: CompareOp, value: i64 },
    /// Inclusive on both ends.
    Range { start: i64, end: i64 },
    Highest,
    Lowest,
}

impl Condition {
    pub fn parse(expr: &str) -> Result<Self, ParseConditionError> {
        let trimmed = expr.trim();
        let malformed = || ParseConditionError::Malformed(expr.to_string());

        if trimmed.eq_ignore_ascii_case("highest") {
            return Ok(Condition::Highest);
        }
        if trimmed.eq_ignore_ascii_case("lowest") {
            return Ok(Condition::Lowest);
        }

        for op in OPERATORS {
            if let Some(operand) = trimmed.strip_prefix(op.symbol()) {
                let value = operand.trim().parse::<i64>().map_err(|_| malformed())?;
                return Ok(Condition::Compare { op, value });
            }
        }

        if let Ok(value) = trimmed.parse::<i64>() {
            return Ok(Condition::Compare { op: CompareOp::Eq, value });
        }

        // The separator is the first '-' after the first character, which
        // may itself be the sign of a negative start.
        let (split, _) = trimmed
            .char_indices()
            .skip(1)
            .find(|&(_, c)| c == '-')
            .ok_or_else(malformed)?;
        let start = trimmed[..split].trim().parse::<i64>().map_err(|_| malformed())?;
        let end = trimmed[split + 1..].trim().parse::<i64>().map_err(|_| malformed())?;
        Self::range(start, end)
    }

    /// Build an inclusive range, rejecting `start > end`.
    pub fn range(start: i64, end: i64) -> Result<Self, ParseConditionError> {
        if start > end {
            return Err(ParseConditionError::InvertedRange { start, end });
        }
        Ok(Condition::Range { start, end })
    }

    /// Convert a settings-file condition.
    pub fn from_value(value: &ConditionValue) -> Result<Self, ParseConditionError> {
        match value {
            ConditionValue::Number(value) => Ok(Condition::Compare { op: CompareOp::Eq, value: *value }),
            ConditionValue::Range([start, end]) => Self::range(*start, *end),
            ConditionValue::Text(expr) => Self::parse(expr),
        }
    }

    pub fn matches(&self, value: i64, is_highest: bool, is_lowest: bool) -> bool {
        match *self {
            Condition::Compare { op, value: operand } => op.apply(value, operand),
            Condition::Range { start, end } => (start..=end).contains(&value),
            Condition::Highest => is_highest,
            Condition::Lowest => is_lowest,
        }
    }

    /// Whether some roll in `min..=max` can satisfy the condition. Keywords
    /// always can.
    pub fn can_match_within(&self, min: i64, max: i64) -> bool {
        match *self {
            Condition::Compare { op, value } => match op {
                CompareOp::Eq => (min..=max).contains(&value),
                CompareOp::Ne => min != max || min != value,
                CompareOp::Gt => max > value,
                CompareOp::Ge => max >= value,
                CompareOp::Lt => min < value,
                CompareOp::Le => min <= value,
            },
            Condition::Range { start, end } => start <= max && end >= min,
            Condition::Highest | Condition::Lowest => true,
        }
    }
}

impl FromStr for Condition {
    type Err = ParseConditionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Condition::Compare { op, value } => write!(f, "{}{value}", op.symbol()),
            Condition::Range { start, end } => write!(f, "{start}-{end}"),
            Condition::Highest => write!(f, "highest"),
            Condition::Lowest => write!(f, "lowest"),
        }
    }
}
