//! Built-in dispatching rules.
//!
//! | Rule | Score |
//! |------|-------|
//! | `PRIORITY` | priority rank, 0 = critical |
//! | `EDD` | due time, microseconds since epoch |
//! | `FIFO` | creation time, microseconds since epoch |
//!
//! Applied in that order they yield the standard serving order.

use chrono::NaiveDateTime;

use super::{DispatchingRule, RuleScore, ServingKey};

fn micros(at: NaiveDateTime) -> RuleScore {
    at.and_utc().timestamp_micros()
}

/// Most urgent priority level first.
#[derive(Debug, Clone, Copy)]
pub struct PriorityRank;

impl DispatchingRule for PriorityRank {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn evaluate(&self, key: &ServingKey) -> RuleScore {
        RuleScore::from(key.rank())
    }

    fn description(&self) -> &'static str {
        "Priority Rank"
    }
}

/// Earliest due time first.
///
/// Records without a usable date/time are due at their creation time.
#[derive(Debug, Clone, Copy)]
pub struct EarliestDue;

impl DispatchingRule for EarliestDue {
    fn name(&self) -> &'static str {
        "EDD"
    }

    fn evaluate(&self, key: &ServingKey) -> RuleScore {
        micros(key.due)
    }

    fn description(&self) -> &'static str {
        "Earliest Due Date"
    }
}

/// Earliest registration first.
///
/// Records with an unusable creation time score as the minimum
/// timestamp and so come first among their ties.
#[derive(Debug, Clone, Copy)]
pub struct ArrivalTime;

impl DispatchingRule for ArrivalTime {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn evaluate(&self, key: &ServingKey) -> RuleScore {
        micros(key.created)
    }

    fn description(&self) -> &'static str {
        "First In, First Out"
    }
}
