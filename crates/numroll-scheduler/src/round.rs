//! One round: every tracked user's roll plus the round's extremes.

use numroll_rules::RollInput;
use serde::Serialize;

/// A user's roll with extremum flags already resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UserRoll {
    pub user_id: u64,
    pub number: i64,
    pub is_highest: bool,
    pub is_lowest: bool,
}

impl UserRoll {
    pub fn input(&self) -> RollInput {
        RollInput::new(self.number)
            .highest(self.is_highest)
            .lowest(self.is_lowest)
    }
}

/// All rolls of a round. Extremes are computed once, after every number is
/// known; ties flag every tied user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Round {
    entries: Vec<UserRoll>,
    highest: Option<i64>,
    lowest: Option<i64>,
}

impl Round {
    pub fn new(rolls: impl IntoIterator<Item = (u64, i64)>) -> Self {
        let rolls: Vec<(u64, i64)> = rolls.into_iter().collect();
        let highest = rolls.iter().map(|&(_, n)| n).max();
        let lowest = rolls.iter().map(|&(_, n)| n).min();

        let entries = rolls
            .into_iter()
            .map(|(user_id, number)| UserRoll {
                user_id,
                number,
                is_highest: Some(number) == highest,
                is_lowest: Some(number) == lowest,
            })
            .collect();

        Self { entries, highest, lowest }
    }

    pub fn entries(&self) -> &[UserRoll] {
        &self.entries
    }

    pub fn highest(&self) -> Option<i64> {
        self.highest
    }

    pub fn lowest(&self) -> Option<i64> {
        self.lowest
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
