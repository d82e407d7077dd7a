//! Rule evaluation.
//!
//! The rule list acts as a transition table: a cursor walks it in order,
//! `jump_to_rule` moves the cursor, `stop_on_trigger` ends the walk,
//! and `mutually_exclusive` grows a set of indices that are skipped for the
//! rest of the session. Evaluation is pure and never fails.

use std::collections::HashSet;

use crate::queue::MessageQueue;
use crate::rule::{Rule, RuleSet};

/// Upper bound on visits per rule in one session. Validated rule sets stay
/// below it; this only trips on unvalidated jump cycles.
pub const MAX_VISITS_PER_RULE: usize = 4;

/// A user's roll plus the round's extremum flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollInput {
    pub number: i64,
    pub is_highest: bool,
    pub is_lowest: bool,
}

impl RollInput {
    pub fn new(number: i64) -> Self {
        Self { number, is_highest: false, is_lowest: false }
    }

    pub fn highest(mut self, is_highest: bool) -> Self {
        self.is_highest = is_highest;
        self
    }

    pub fn lowest(mut self, is_lowest: bool) -> Self {
        self.is_lowest = is_lowest;
        self
    }
}

/// Everything one evaluation session needs besides the rules.
#[derive(Debug, Clone, Copy)]
pub struct EvalContext<'a> {
    pub roll: RollInput,
    /// Seed of the message queue.
    pub default_message: &'a str,
}

impl<'a> EvalContext<'a> {
    pub fn new(default_message: &'a str, roll: RollInput) -> Self {
        Self { roll, default_message }
    }
}

/// Ephemeral state for one user's roll.
struct Session<'r> {
    rules: &'r [Rule],
    cursor: usize,
    disabled: HashSet<usize>,
    queue: MessageQueue,
    visits: usize,
}

impl<'r> Session<'r> {
    fn new(rules: &'r [Rule], default_message: &str) -> Self {
        Self {
            rules,
            cursor: 0,
            disabled: HashSet::new(),
            queue: MessageQueue::seeded(default_message),
            visits: 0,
        }
    }

    fn run(mut self, ctx: &EvalContext<'_>) -> String {
        let max_visits = self.rules.len().saturating_mul(MAX_VISITS_PER_RULE);
        let roll = ctx.roll;

        while let Some(rule) = self.rules.get(self.cursor) {
            self.visits += 1;
            if self.visits > max_visits {
                tracing::warn!(
                    "Rule evaluation exceeded {max_visits} visits at rule {}; jump cycle suspected, using default message",
                    self.cursor
                );
                return MessageQueue::seeded(ctx.default_message).render();
            }

            if self.disabled.contains(&self.cursor) {
                self.cursor += 1;
                continue;
            }

            if !rule.condition.matches(roll.number, roll.is_highest, roll.is_lowest) {
                self.cursor += 1;
                continue;
            }

            tracing::debug!(
                "Rule {} ({}) fired for {}: {} {:?}",
                self.cursor, rule.condition, roll.number, rule.mode, rule.message
            );
            self.queue.apply(rule.mode, &rule.message);
            self.disabled.extend(rule.mutually_exclusive.iter().copied());

            if rule.stop_on_trigger {
                break;
            }
            self.cursor = rule.jump_to_rule.unwrap_or(self.cursor + 1);
        }

        self.queue.render()
    }
}

/// Run `rules` against one roll and return the composed text.
///
/// Jump targets are not checked here. A target past the end finishes the
/// walk; a cycle is cut off after `MAX_VISITS_PER_RULE` visits per rule and
/// yields the default message alone.
pub fn evaluate(rules: &[Rule], ctx: &EvalContext<'_>) -> String {
    Session::new(rules, ctx.default_message).run(ctx)
}

impl RuleSet {
    pub fn evaluate(&self, ctx: &EvalContext<'_>) -> String {
        evaluate(&self.rules, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;
    use numroll_core::MessageMode;

    const DEFAULT: &str = "Default message";

    fn rule(cond: &str, msg: &str) -> Rule {
        Rule::new(Condition::parse(cond).unwrap(), msg)
    }

    fn eval(rules: &[Rule], number: i64) -> String {
        evaluate(rules, &EvalContext::new(DEFAULT, RollInput::new(number)))
    }

    #[test]
    fn test_empty_rules_returns_default() {
        assert_eq!(eval(&[], 50), DEFAULT);
    }

    #[test]
    fn test_empty_default_and_rules_returns_empty() {
        assert_eq!(evaluate(&[], &EvalContext::new("", RollInput::new(50))), "");
    }

    #[test]
    fn test_non_matching_rule_leaves_default() {
        assert_eq!(eval(&[rule("25-75", "In range")], 10), DEFAULT);
        assert_eq!(eval(&[rule("25-75", "In range")], 25), "Default message In range");
    }

    #[test]
    fn test_add_mode_accumulates() {
        let rules = [rule("=50", "First"), rule(">=50", "Second")];
        assert_eq!(eval(&rules, 50), "Default message First Second");
    }

    #[test]
    fn test_replace_modes() {
        let base = || vec![rule("=50", "First"), rule(">49", "Second")];

        let mut rules = base();
        rules.push(rule(">=50", "Third").with_mode(MessageMode::ReplaceLast));
        assert_eq!(eval(&rules, 50), "Default message First Third");

        let mut rules = base();
        rules.push(rule(">=50", "Third").with_mode(MessageMode::ReplaceExceptDefault));
        assert_eq!(eval(&rules, 50), "Default message Third");

        let mut rules = base();
        rules.push(rule(">=50", "Third").with_mode(MessageMode::ReplaceAll));
        assert_eq!(eval(&rules, 50), "Third");
    }

    #[test]
    fn test_replace_last_on_empty_queue() {
        let rules = [rule("=50", "Only message").with_mode(MessageMode::ReplaceLast)];
        assert_eq!(evaluate(&rules, &EvalContext::new("", RollInput::new(50))), "Only message");
    }

    #[test]
    fn test_mixed_modes() {
        let rules = [
            rule(">=40", "First"),
            rule(">=50", "Second").with_mode(MessageMode::ReplaceLast),
            rule(">=50", "Third"),
        ];
        assert_eq!(eval(&rules, 50), "Default message Second Third");
    }

    #[test]
    fn test_empty_messages_never_enqueued() {
        for mode in [MessageMode::Add, MessageMode::ReplaceLast, MessageMode::ReplaceAll] {
            let rules = [rule("=50", "First"), rule("=50", "").with_mode(mode), rule("=50", "  ").with_mode(mode)];
            assert_eq!(eval(&rules, 50), "Default message First");
        }
    }

    #[test]
    fn test_stop_on_trigger_halts() {
        let rules = [rule("=40", "First"), rule("=50", "Second").stop(), rule("=50", "Should not appear")];
        assert_eq!(eval(&rules, 50), "Default message Second");
    }

    #[test]
    fn test_stop_only_when_matching() {
        let rules = [rule("=40", "Forty").stop(), rule("=50", "Fifty")];
        assert_eq!(eval(&rules, 50), "Default message Fifty");
    }

    #[test]
    fn test_stop_wins_over_jump() {
        let rules = [rule("=50", "First").stop().jump_to(1), rule("=50", "Second")];
        assert_eq!(eval(&rules, 50), "Default message First");
    }

    #[test]
    fn test_jump_skips_intermediate_rules() {
        let rules = [rule("=50", "Rule 0").jump_to(2), rule("=50", "Rule 1"), rule("=50", "Rule 2")];
        assert_eq!(eval(&rules, 50), "Default message Rule 0 Rule 2");
    }

    #[test]
    fn test_jump_only_applies_when_matching() {
        let rules = [rule("=40", "Forty").jump_to(2), rule("=50", "Fifty"), rule("=50", "Again")];
        assert_eq!(eval(&rules, 50), "Default message Fifty Again");
    }

    #[test]
    fn test_jump_past_end_finishes() {
        let rules = [rule("=50", "First").jump_to(10), rule("=50", "Second")];
        assert_eq!(eval(&rules, 50), "Default message First");
    }

    #[test]
    fn test_mutually_exclusive_rules_skipped() {
        let rules = [
            rule("=50", "First").exclusive_with([1, 2]),
            rule("=50", "Should be excluded"),
            rule("=50", "Also excluded"),
            rule("=50", "Fourth"),
        ];
        assert_eq!(eval(&rules, 50), "Default message First Fourth");
    }

    #[test]
    fn test_exclusion_only_when_fired() {
        let rules = [rule("=40", "Forty").exclusive_with([1]), rule("=50", "Fifty")];
        assert_eq!(eval(&rules, 50), "Default message Fifty");
    }

    #[test]
    fn test_exclusion_beats_jump_into_disabled_rule() {
        let rules = [
            rule("=50", "First").exclusive_with([2]),
            rule("=50", "Second").jump_to(2),
            rule("=50", "Excluded"),
            rule("=50", "Fourth"),
        ];
        assert_eq!(eval(&rules, 50), "Default message First Second Fourth");
    }

    #[test]
    fn test_jump_with_mutual_exclusion() {
        let rules = [
            rule("=50", "First").jump_to(3).exclusive_with([1, 2]),
            rule("=50", "Should be excluded"),
            rule("=50", "Also excluded"),
            rule("=50", "Jumped to"),
        ];
        assert_eq!(eval(&rules, 50), "Default message First Jumped to");
    }

    #[test]
    fn test_complex_rule_interaction() {
        let rules = [
            rule(">=40", "At least 40"),
            rule("=50", "Exactly 50").exclusive_with([3]),
            rule("<=60", "At most 60"),
            rule("50-55", "In special range"),
            rule(">45", "Greater than 45").stop(),
            rule("=50", "Never reached"),
        ];
        assert_eq!(eval(&rules, 50), "Default message At least 40 Exactly 50 At most 60 Greater than 45");
    }

    #[test]
    fn test_negative_numbers() {
        let rules = [rule("=0", "Zero"), rule("=-5", "Negative five"), rule(">0", "Positive")];
        let eval_default = |n| evaluate(&rules, &EvalContext::new("Default", RollInput::new(n)));
        assert_eq!(eval_default(0), "Default Zero");
        assert_eq!(eval_default(-5), "Default Negative five");
        assert_eq!(eval_default(5), "Default Positive");
    }

    #[test]
    fn test_extremum_keywords() {
        let rules = [rule("highest", "Maximum value"), rule("lowest", "Minimum value")];
        let ctx = |roll| EvalContext::new(DEFAULT, roll);
        assert_eq!(evaluate(&rules, &ctx(RollInput::new(100).highest(true))), "Default message Maximum value");
        assert_eq!(evaluate(&rules, &ctx(RollInput::new(1).lowest(true))), "Default message Minimum value");
        assert_eq!(
            evaluate(&rules, &ctx(RollInput::new(5).highest(true).lowest(true))),
            "Default message Maximum value Minimum value"
        );
    }

    #[test]
    fn test_self_jump_cycle_is_capped() {
        let rules = [rule("=50", "Loop").jump_to(0)];
        assert_eq!(eval(&rules, 50), DEFAULT);
    }

    #[test]
    fn test_two_rule_cycle_is_capped() {
        let rules = [
            rule("=50", "A").jump_to(1),
            rule("=50", "B").jump_to(0),
            rule("=50", "Unreachable"),
        ];
        assert_eq!(eval(&rules, 50), DEFAULT);
        assert_eq!(evaluate(&rules, &EvalContext::new("", RollInput::new(50))), "");
    }

    #[test]
    fn test_backward_jump_ends_when_excluded() {
        // The second pass lands on a rule that disabled itself, so the walk
        // moves on instead of looping.
        let rules = [
            rule("=50", "Once").exclusive_with([0]),
            rule("=50", "Back").jump_to(0).exclusive_with([1]),
            rule("=50", "Done"),
        ];
        assert_eq!(eval(&rules, 50), "Default message Once Back Done");
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let rules = [
            rule(">=10", "A").jump_to(2),
            rule("=50", "B"),
            rule("10-60", "C").with_mode(MessageMode::ReplaceLast).exclusive_with([3]),
            rule("!=7", "D"),
        ];
        let first = eval(&rules, 50);
        let second = eval(&rules, 50);
        assert_eq!(first, second);
        assert_eq!(first, "Default message C");
    }

    #[test]
    fn test_rule_set_evaluate_matches_free_function() {
        let rules = vec![rule("=50", "First").jump_to(2), rule("=50", "Skipped"), rule("=50", "Third")];
        let set = RuleSet::validate(rules.clone(), Some((1, 100))).unwrap();
        let ctx = EvalContext::new(DEFAULT, RollInput::new(50));
        assert_eq!(set.evaluate(&ctx), evaluate(&rules, &ctx));
    }
}
