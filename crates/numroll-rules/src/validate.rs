//! Load-time validation. Every check here runs before the first evaluation so
//! the engine itself never has to fail.

use numroll_core::{RuleConfig, Settings};

use crate::condition::{Condition, ParseConditionError};
use crate::engine::MAX_VISITS_PER_RULE;
use crate::error::{Result, RuleError};
use crate::rule::{Rule, RuleSet};

/// Parse one settings-file rule.
pub fn parse_rule(index: usize, config: &RuleConfig) -> Result<Rule> {
    let condition = Condition::from_value(&config.condition).map_err(|err| match err {
        ParseConditionError::Malformed(_) => RuleError::InvalidCondition {
            index,
            expr: config.condition.to_string(),
        },
        ParseConditionError::InvertedRange { start, end } => {
            RuleError::InvertedRange { index, start, end }
        }
    })?;

    Ok(Rule {
        condition,
        message: config.message.clone(),
        mode: config.mode,
        stop_on_trigger: config.stop_on_trigger,
        jump_to_rule: config.jump_to_rule,
        mutually_exclusive: config.mutually_exclusive.clone(),
    })
}

fn check_rule(index: usize, rule: &Rule, len: usize, bounds: Option<(i64, i64)>) -> Result<()> {
    if let Condition::Range { start, end } = rule.condition {
        if start > end {
            return Err(RuleError::InvertedRange { index, start, end });
        }
    }

    if let Some((min, max)) = bounds {
        if !rule.condition.can_match_within(min, max) {
            return Err(RuleError::ConditionOutOfBounds {
                index,
                condition: rule.condition.to_string(),
                min,
                max,
            });
        }
    }

    if let Some(target) = rule.jump_to_rule {
        if target >= len {
            return Err(RuleError::JumpOutOfBounds { index, target, len });
        }
        // Conditions are pure in the roll, so a rule that jumps back to (or
        // before) itself fires again on the next pass unless it disabled
        // itself.
        if is_backward_jump(index, rule) && !rule.mutually_exclusive.contains(&index) {
            return Err(RuleError::JumpCycle { index, target });
        }
    }

    if let Some(&target) = rule.mutually_exclusive.iter().find(|&&target| target >= len) {
        return Err(RuleError::ExclusionOutOfBounds { index, target, len });
    }

    Ok(())
}

/// A jump that can move the cursor back. `stop_on_trigger` wins over the
/// jump, so a stopping rule never takes it.
fn is_backward_jump(index: usize, rule: &Rule) -> bool {
    !rule.stop_on_trigger && rule.jump_to_rule.is_some_and(|target| target <= index)
}

impl RuleSet {
    /// Validate already-parsed rules. `bounds` is the inclusive roll range;
    /// when given, conditions no roll in it can satisfy are rejected.
    pub fn validate(rules: Vec<Rule>, bounds: Option<(i64, i64)>) -> Result<Self> {
        let len = rules.len();
        for (index, rule) in rules.iter().enumerate() {
            check_rule(index, rule, len, bounds)?;
        }

        // Each accepted backward jump fires at most once and every pass
        // between them visits at most `len` rules. Keep the walk inside the
        // engine's visit cap.
        let mut backward = rules
            .iter()
            .enumerate()
            .filter(|(index, rule)| is_backward_jump(*index, rule));
        if let Some((index, rule)) = backward.nth(MAX_VISITS_PER_RULE - 1) {
            return Err(RuleError::TooManyBackwardJumps {
                index,
                target: rule.jump_to_rule.unwrap_or(index),
                limit: MAX_VISITS_PER_RULE - 1,
            });
        }
        tracing::debug!("Validated {len} message rules");
        Ok(Self { rules })
    }

    /// Parse and validate settings-file rules.
    pub fn from_configs(configs: &[RuleConfig], bounds: Option<(i64, i64)>) -> Result<Self> {
        let rules = configs
            .iter()
            .enumerate()
            .map(|(index, config)| parse_rule(index, config))
            .collect::<Result<Vec<_>>>()?;
        Self::validate(rules, bounds)
    }

    /// Rules in effect for `settings`, checked against its roll range.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::from_configs(&settings.message.rule_configs(), Some(settings.roll.bounds()))
    }
}
