//! # numroll scheduler
//!
//! Rolls a number for every tracked user and fans the composed notifications
//! out to a delivery channel. Timing (cron, intervals) is owned by whatever
//! invokes a round.
//!
//! ## Flow
//! ```text
//! Roller::roll_round(users)
//!   └── Round            all numbers known, highest/lowest resolved
//!         └── RoundRunner::run
//!               ├── RuleSet::compose   per user, independent sessions
//!               └── Channel::send      failures counted, round continues
//! ```

pub mod roller;
pub mod round;
pub mod runner;

pub use roller::{RollBounds, Roller};
pub use round::{Round, UserRoll};
pub use runner::{RoundReport, RoundRunner};
