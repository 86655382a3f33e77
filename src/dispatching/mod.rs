//! Dispatching rules and rule engine for serving order.
//!
//! Each record is resolved once into a [`ServingKey`]; rules score keys
//! and the [`RuleEngine`] sorts by the scores, rule by rule.
//!
//! # Usage
//!
//! ```
//! use u_triage::dispatching::{rules, RuleEngine, TieBreaker};
//!
//! let engine = RuleEngine::new()
//!     .with_rule(rules::PriorityRank)
//!     .with_rule(rules::EarliestDue)
//!     .with_rule(rules::ArrivalTime)
//!     .with_final_tie_breaker(TieBreaker::Stable);
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Jackson (1955), earliest due date sequencing

mod engine;
mod key;
pub mod rules;

pub use engine::{RuleEngine, TieBreaker};
pub use key::{parse_due_time, parse_timestamp, ServingKey};

use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = served earlier.
pub type RuleScore = i64;

/// A dispatching rule that scores a resolved serving key.
///
/// # Score Convention
/// **Lower score = served earlier.** Rules return smaller values for
/// records that should come first.
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "PRIORITY", "EDD").
    fn name(&self) -> &'static str;

    /// Scores a record's serving key.
    fn evaluate(&self, key: &ServingKey) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
