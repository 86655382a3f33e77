//! Rule engine for multi-criteria serving order.
//!
//! Applies rules in sequence: a later rule is consulted only when every
//! earlier rule ties. The sort is stable, so records that tie on every
//! rule keep their input order unless a final tie-breaker says otherwise.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::Arc;

use super::{rules, DispatchingRule, RuleScore, ServingKey};

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreaker {
    /// Keep input (arrival) order.
    #[default]
    Stable,
    /// Ascending record id.
    ById,
}

/// A composable rule engine for serving order.
///
/// # Example
/// ```
/// use u_triage::dispatching::{RuleEngine, ServingKey};
/// use u_triage::models::AppointmentRecord;
///
/// let keys: Vec<ServingKey> = [
///     AppointmentRecord::new(1).with_priority("normal"),
///     AppointmentRecord::new(2).with_priority("critical"),
/// ]
/// .iter()
/// .map(ServingKey::resolve)
/// .collect();
///
/// let engine = RuleEngine::serving_order();
/// assert_eq!(engine.sort_indices(&keys), vec![1, 0]);
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn DispatchingRule>>,
    tie_breaker: TieBreaker,
}

impl RuleEngine {
    /// Creates an empty rule engine.
    ///
    /// With no rules every record ties, so sorting keeps input order.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            tie_breaker: TieBreaker::Stable,
        }
    }

    /// The standard chain: priority rank, then due time, then arrival.
    pub fn serving_order() -> Self {
        Self::new()
            .with_rule(rules::PriorityRank)
            .with_rule(rules::EarliestDue)
            .with_rule(rules::ArrivalTime)
    }

    /// Appends a rule to the chain.
    pub fn with_rule<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Names of the configured rules, in order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Sorts keys by the rule chain.
    ///
    /// Returns indices into `keys`, first-served first. Each key is
    /// scored once.
    pub fn sort_indices(&self, keys: &[ServingKey]) -> Vec<usize> {
        if keys.is_empty() {
            return Vec::new();
        }

        let scores: Vec<Vec<RuleScore>> = keys.iter().map(|k| self.evaluate(k)).collect();
        let mut indices: Vec<usize> = (0..keys.len()).collect();

        // slice::sort_by is stable
        indices.sort_by(|&a, &b| {
            scores[a]
                .cmp(&scores[b])
                .then_with(|| self.break_tie(&keys[a], &keys[b]))
        });

        indices
    }

    /// Scores from each rule for one key.
    pub fn evaluate(&self, key: &ServingKey) -> Vec<RuleScore> {
        self.rules.iter().map(|r| r.evaluate(key)).collect()
    }

    fn break_tie(&self, a: &ServingKey, b: &ServingKey) -> Ordering {
        match self.tie_breaker {
            TieBreaker::Stable => Ordering::Equal,
            TieBreaker::ById => a.id.cmp(&b.id),
        }
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}
