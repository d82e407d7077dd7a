//! Final notification text: number message followed by the rule output.

use numroll_core::MessageConfig;
use numroll_core::config::NUMBER_PLACEHOLDER;

use crate::engine::{EvalContext, RollInput, evaluate};
use crate::rule::{Rule, RuleSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    pub default_message: String,
    /// Text with `{number}` placeholders.
    pub number_message: String,
}

impl MessageTemplate {
    pub fn new(default_message: impl Into<String>, number_message: impl Into<String>) -> Self {
        Self {
            default_message: default_message.into(),
            number_message: number_message.into(),
        }
    }

    pub fn render_number(&self, number: i64) -> String {
        self.number_message.replace(NUMBER_PLACEHOLDER, &number.to_string())
    }

    /// Number message and evaluated rules joined by a space; empty parts are
    /// left out. Part text is kept as written.
    pub fn compose(&self, rules: &[Rule], roll: &RollInput) -> String {
        let ctx = EvalContext::new(&self.default_message, *roll);
        let parts = [self.render_number(roll.number), evaluate(rules, &ctx)];
        parts
            .iter()
            .filter(|part| !part.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<&MessageConfig> for MessageTemplate {
    fn from(config: &MessageConfig) -> Self {
        Self::new(config.default_message.clone(), config.number_message.clone())
    }
}

impl RuleSet {
    pub fn compose(&self, template: &MessageTemplate, roll: &RollInput) -> String {
        template.compose(self.rules(), roll)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use numroll_core::{MessageMode, RuleConfig, Settings};

    fn example_rules() -> RuleSet {
        let mut unlucky = RuleConfig::new("=1", "Unlucky!");
        unlucky.mode = MessageMode::ReplaceAll;
        unlucky.stop_on_trigger = true;
        let high = RuleConfig::new(">=90", "High roll!");
        let mut highest = RuleConfig::new("highest", "You have the highest number.");
        highest.stop_on_trigger = true;

        RuleSet::from_configs(&[unlucky, high, highest], Some((1, 100))).unwrap()
    }

    fn example_template() -> MessageTemplate {
        MessageTemplate::new("Cool!", "Your number is {number}.")
    }

    #[test]
    fn test_render_number() {
        let template = MessageTemplate::new("", "{number} / {number}");
        assert_eq!(template.render_number(7), "7 / 7");
        assert_eq!(template.render_number(-3), "-3 / -3");
    }

    #[test]
    fn test_unlucky_roll_replaces_default() {
        let out = example_rules().compose(&example_template(), &RollInput::new(1));
        assert_eq!(out, "Your number is 1. Unlucky!");
    }

    #[test]
    fn test_high_and_highest_roll() {
        let out = example_rules().compose(&example_template(), &RollInput::new(94).highest(true));
        assert_eq!(out, "Your number is 94. Cool! High roll! You have the highest number.");
    }

    #[test]
    fn test_no_match_keeps_default() {
        let out = example_rules().compose(&example_template(), &RollInput::new(57));
        assert_eq!(out, "Your number is 57. Cool!");
    }

    #[test]
    fn test_blank_parts_are_dropped() {
        let template = MessageTemplate::new("", "");
        assert_eq!(template.compose(&[], &RollInput::new(5)), "");

        let template = MessageTemplate::new("", "Rolled {number}");
        assert_eq!(template.compose(&[], &RollInput::new(5)), "Rolled 5");
    }

    #[test]
    fn test_part_whitespace_preserved() {
        let template = MessageTemplate::new("Cool!", "  Number: {number}  ");
        assert_eq!(template.compose(&[], &RollInput::new(8)), "  Number: 8   Cool!");
    }

    #[test]
    fn test_template_from_settings() {
        let settings = Settings::parse(
            r#"
[message]
default_message = "Default"
number_message = "Number {number}"
"#,
        )
        .unwrap();
        let template = MessageTemplate::from(&settings.message);
        assert_eq!(template.compose(&[], &RollInput::new(3)), "Number 3 Default");
    }
}
