//! # numroll rules
//! Message-rule evaluation engine.
//!
//! ## Pipeline
//! ```text
//! [[message.rules]] (RuleConfig)
//!   └── RuleSet::from_configs  ── load-time validation (RuleError)
//!         └── RuleSet::evaluate(EvalContext)
//!               ├── Condition::matches   (number, highest, lowest)
//!               └── MessageQueue::apply  (add | replace_last | replace_except_default | replace_all)
//! ```

pub mod condition;
pub mod engine;
pub mod error;
pub mod queue;
pub mod rule;
pub mod template;
pub mod validate;

pub use condition::{CompareOp, Condition, ParseConditionError};
pub use engine::{EvalContext, MAX_VISITS_PER_RULE, RollInput, evaluate};
pub use error::RuleError;
pub use numroll_core::MessageMode;
pub use queue::MessageQueue;
pub use rule::{Rule, RuleSet};
pub use template::MessageTemplate;
