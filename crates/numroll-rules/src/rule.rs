//! Parsed rules and validated rule sets.

use numroll_core::MessageMode;

use crate::condition::Condition;

/// One condition-to-effect mapping. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub condition: Condition,
    pub message: String,
    pub mode: MessageMode,
    pub stop_on_trigger: bool,
    pub jump_to_rule: Option<usize>,
    /// Rules disabled for the rest of the session once this one fires.
    pub mutually_exclusive: Vec<usize>,
}

impl Rule {
    /// An `add` rule with no control directives.
    pub fn new(condition: Condition, message: impl Into<String>) -> Self {
        Self {
            condition,
            message: message.into(),
            mode: MessageMode::Add,
            stop_on_trigger: false,
            jump_to_rule: None,
            mutually_exclusive: Vec::new(),
        }
    }

    pub fn with_mode(mut self, mode: MessageMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn stop(mut self) -> Self {
        self.stop_on_trigger = true;
        self
    }

    pub fn jump_to(mut self, index: usize) -> Self {
        self.jump_to_rule = Some(index);
        self
    }

    pub fn exclusive_with(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.mutually_exclusive.extend(indices);
        self
    }
}

/// An ordered list of rules that passed load-time validation.
///
/// Only constructed through [`RuleSet::validate`] or
/// [`RuleSet::from_configs`], so every index is in bounds and every backward
/// jump can fire at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    pub(crate) rules: Vec<Rule>,
}

impl RuleSet {
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
