//! Serving-order scheduler.
//!
//! # Algorithm
//!
//! 1. Ingest the snapshot into a fresh [`RecordStore`], in given order.
//! 2. Traverse the store to get the working sequence.
//! 3. Resolve a [`ServingKey`] `(rank, due, created)` per record.
//! 4. Stable-sort by the rule chain (priority, due time, arrival).
//! 5. Enqueue the sorted records into a fresh [`LayeredQueue`].
//! 6. Drain the queue; the drained sequence is the serving order.
//!
//! The queue guarantees level precedence even when a custom rule chain
//! does not rank by priority; the sort fixes the order inside each lane.
//!
//! # Complexity
//! O(n log n) in the number of records.

use tracing::debug;

use crate::dispatching::{RuleEngine, ServingKey};
use crate::models::{AppointmentRecord, PriorityLevel};
use crate::queue::LayeredQueue;
use crate::store::RecordStore;

/// Priority-driven serving-order scheduler.
///
/// Stateless between calls: every pass builds its own store and queue.
///
/// # Example
///
/// ```
/// use u_triage::models::AppointmentRecord;
/// use u_triage::scheduler::QueueScheduler;
///
/// let snapshot = vec![
///     AppointmentRecord::new(1).with_priority("normal").with_due("2025-02-01", "10:00"),
///     AppointmentRecord::new(2).with_priority("critical").with_due("2025-02-02", "09:00"),
///     AppointmentRecord::new(3).with_priority("critical").with_due("2025-02-01", "08:00"),
/// ];
///
/// let ordered = QueueScheduler::new().schedule(&snapshot);
/// let ids: Vec<i64> = ordered.iter().map(|r| r.id).collect();
/// assert_eq!(ids, vec![3, 2, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct QueueScheduler {
    rule_engine: RuleEngine,
}

impl QueueScheduler {
    /// Creates a scheduler with the standard rule chain.
    pub fn new() -> Self {
        Self {
            rule_engine: RuleEngine::serving_order(),
        }
    }

    /// Replaces the rule engine used for intra-lane ordering.
    pub fn with_rule_engine(mut self, engine: RuleEngine) -> Self {
        self.rule_engine = engine;
        self
    }

    /// Orders a snapshot of scheduled records.
    ///
    /// Pure with respect to the input. Empty input yields empty output.
    pub fn schedule(&self, snapshot: &[AppointmentRecord]) -> Vec<AppointmentRecord> {
        self.build_queue(snapshot).drain_all()
    }

    /// Builds the populated queue without draining it.
    ///
    /// For consumers that serve one record at a time.
    pub fn build_queue(&self, snapshot: &[AppointmentRecord]) -> LayeredQueue {
        let store: RecordStore = snapshot.iter().cloned().collect();

        let keys: Vec<ServingKey> = store
            .traverse_all()
            .iter()
            .map(ServingKey::resolve)
            .collect();
        let order = self.rule_engine.sort_indices(&keys);

        let mut working: Vec<Option<AppointmentRecord>> =
            store.into_records().into_iter().map(Some).collect();
        let queue: LayeredQueue = order
            .into_iter()
            .filter_map(|i| working[i].take())
            .collect();

        debug!(
            records = queue.len(),
            critical = queue.lane_len(PriorityLevel::Critical),
            emergency = queue.lane_len(PriorityLevel::Emergency),
            accident = queue.lane_len(PriorityLevel::Accident),
            normal = queue.lane_len(PriorityLevel::Normal),
            fallbacks = keys.iter().map(|k| k.fallbacks.len()).sum::<usize>(),
            "serving queue built"
        );

        queue
    }
}

impl Default for QueueScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Orders a snapshot with the default scheduler.
pub fn schedule(snapshot: &[AppointmentRecord]) -> Vec<AppointmentRecord> {
    QueueScheduler::new().schedule(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::{rules, TieBreaker};
    use proptest::prelude::*;

    fn rec(id: i64, priority: &str, date: &str, time: &str, created: &str) -> AppointmentRecord {
        AppointmentRecord::new(id)
            .with_name(format!("P{id}"))
            .with_priority(priority)
            .with_due(date, time)
            .with_created_at(created)
    }

    fn ids(records: &[AppointmentRecord]) -> Vec<i64> {
        records.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_priority_then_due() {
        let snapshot = vec![
            rec(1, "normal", "2025-02-01", "10:00", "2025-01-01T00:00:00"),
            rec(2, "critical", "2025-02-02", "09:00", "2025-01-01T00:00:00"),
            rec(3, "critical", "2025-02-01", "08:00", "2025-01-01T00:00:00"),
        ];
        assert_eq!(ids(&schedule(&snapshot)), vec![3, 2, 1]);
    }

    #[test]
    fn test_creation_time_tiebreak() {
        let snapshot = vec![
            rec(2, "emergency", "2025-02-01", "09:00", "2025-01-01T10:00:05"),
            rec(1, "emergency", "2025-02-01", "09:00", "2025-01-01T10:00:00"),
        ];
        assert_eq!(ids(&schedule(&snapshot)), vec![1, 2]);
    }

    #[test]
    fn test_sub_microsecond_creation_times_keep_snapshot_order() {
        let snapshot = vec![
            rec(1, "normal", "", "", "2025-02-01T10:00:00.000000900"),
            rec(2, "normal", "", "", "2025-02-01T10:00:00.000000100"),
        ];
        let out = schedule(&snapshot);
        assert_eq!(ids(&out), vec![1, 2]);

        let (first, second) = (ServingKey::resolve(&out[0]), ServingKey::resolve(&out[1]));
        assert_eq!(first.tuple(), second.tuple());
    }

    #[test]
    fn test_unpadded_due_orders_by_creation() {
        let snapshot = vec![
            rec(1, "normal", "2025-02-01", "08:00", "2025-01-01T00:00:00"),
            rec(2, "normal", "2025-02-01", "9:30", "2025-01-15T00:00:00"),
            rec(3, "normal", "2025-2-1", "07:00", "2025-03-01T00:00:00"),
        ];
        // 2 and 3 are due at their creation times
        assert_eq!(ids(&schedule(&snapshot)), vec![2, 1, 3]);
    }

    #[test]
    fn test_empty_snapshot() {
        assert!(schedule(&[]).is_empty());
        assert!(QueueScheduler::new().build_queue(&[]).is_empty());
    }

    #[test]
    fn test_blank_record_is_scheduled() {
        let snapshot = vec![rec(1, "", "", "", "2025-01-01T00:00:00")];
        let out = schedule(&snapshot);
        assert_eq!(out, snapshot);
    }

    #[test]
    fn test_one_of_each_level() {
        let snapshot = vec![
            rec(1, "normal", "2025-02-01", "08:00", ""),
            rec(2, "accident", "2025-02-01", "08:00", ""),
            rec(3, "critical", "2025-02-01", "08:00", ""),
            rec(4, "emergency", "2025-02-01", "08:00", ""),
        ];
        assert_eq!(ids(&schedule(&snapshot)), vec![3, 4, 2, 1]);
    }

    #[test]
    fn test_unrecognized_label_ranks_as_normal() {
        let snapshot = vec![
            rec(1, "URGENT!", "2025-02-01", "08:00", ""),
            rec(2, "normal", "2025-02-01", "09:00", ""),
            rec(3, "accident", "2025-02-01", "10:00", ""),
        ];
        assert_eq!(ids(&schedule(&snapshot)), vec![3, 1, 2]);
    }

    #[test]
    fn test_blank_due_orders_by_creation_among_peers() {
        let snapshot = vec![
            rec(1, "normal", "2025-02-01", "12:00", "2025-01-01T00:00:00"),
            rec(2, "normal", "", "", "2025-02-01T09:00:00"),
            rec(3, "normal", "2025-02-01", "08:00", "2025-01-01T00:00:00"),
        ];
        assert_eq!(ids(&schedule(&snapshot)), vec![3, 2, 1]);
    }

    #[test]
    fn test_malformed_creation_sorts_first_in_tie_group() {
        let snapshot = vec![
            rec(1, "accident", "2025-02-01", "08:00", "2025-01-01T00:00:00"),
            rec(2, "accident", "2025-02-01", "08:00", "not-a-date"),
        ];
        assert_eq!(ids(&schedule(&snapshot)), vec![2, 1]);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let snapshot = vec![
            rec(1, "normal", "2025-02-01", "08:00", ""),
            rec(2, "critical", "2025-02-01", "08:00", ""),
        ];
        let before = snapshot.clone();
        let _ = schedule(&snapshot);
        assert_eq!(snapshot, before);
    }

    #[test]
    fn test_repeated_calls_do_not_share_state() {
        let scheduler = QueueScheduler::new();
        let first = scheduler.schedule(&[rec(1, "critical", "", "", "")]);
        let second = scheduler.schedule(&[rec(2, "normal", "", "", "")]);
        assert_eq!(ids(&first), vec![1]);
        assert_eq!(ids(&second), vec![2]);
    }

    #[test]
    fn test_build_queue_serves_incrementally() {
        let snapshot = vec![
            rec(1, "normal", "2025-02-01", "08:00", ""),
            rec(2, "emergency", "2025-02-01", "10:00", ""),
            rec(3, "emergency", "2025-02-01", "09:00", ""),
        ];
        let mut queue = QueueScheduler::new().build_queue(&snapshot);
        assert_eq!(queue.peek().map(|r| r.id), Some(3));
        assert_eq!(queue.dequeue().map(|r| r.id), Some(3));
        assert_eq!(queue.dequeue().map(|r| r.id), Some(2));

        // A late critical arrival is served before the waiting normal.
        queue.enqueue(rec(4, "critical", "2025-02-03", "08:00", ""));
        assert_eq!(queue.dequeue().map(|r| r.id), Some(4));
        assert_eq!(queue.dequeue().map(|r| r.id), Some(1));
        assert!(queue.dequeue().is_none());
    }

    #[test]
    fn test_custom_rules_keep_level_precedence() {
        // Due time only: the queue still separates levels.
        let engine = RuleEngine::new().with_rule(rules::EarliestDue);
        let scheduler = QueueScheduler::new().with_rule_engine(engine);
        let snapshot = vec![
            rec(1, "normal", "2025-02-01", "07:00", ""),
            rec(2, "critical", "2025-02-01", "11:00", ""),
            rec(3, "critical", "2025-02-01", "10:00", ""),
        ];
        assert_eq!(ids(&scheduler.schedule(&snapshot)), vec![3, 2, 1]);
    }

    #[test]
    fn test_by_id_tie_breaker() {
        let engine = RuleEngine::serving_order().with_final_tie_breaker(TieBreaker::ById);
        let scheduler = QueueScheduler::new().with_rule_engine(engine);
        let snapshot = vec![
            rec(8, "normal", "2025-02-01", "08:00", "2025-01-01T00:00:00"),
            rec(5, "normal", "2025-02-01", "08:00", "2025-01-01T00:00:00"),
        ];
        assert_eq!(ids(&scheduler.schedule(&snapshot)), vec![5, 8]);
    }

    const LABELS: &[&str] = &["critical", "emergency", "accident", "normal", "", "URGENT!"];

    fn arb_snapshot() -> impl Strategy<Value = Vec<AppointmentRecord>> {
        prop::collection::vec(
            (
                prop::sample::select(LABELS),
                prop::option::of((1u32..4, 8u32..11)),
                prop::option::of(0u32..4),
            ),
            0..40,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (label, due, created))| {
                    let (date, time) = match due {
                        Some((day, hour)) => {
                            (format!("2025-02-{day:02}"), format!("{hour:02}:00"))
                        }
                        None => (String::new(), String::new()),
                    };
                    let created = created
                        .map(|m| format!("2025-02-02T09:{m:02}:00"))
                        .unwrap_or_else(|| "bad".to_string());
                    rec(i as i64, label, &date, &time, &created)
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_no_data_loss(snapshot in arb_snapshot()) {
            let out = schedule(&snapshot);
            prop_assert_eq!(out.len(), snapshot.len());
            let mut got = ids(&out);
            got.sort_unstable();
            prop_assert_eq!(got, ids(&snapshot));
        }

        #[test]
        fn prop_total_order_and_stability(snapshot in arb_snapshot()) {
            let out = schedule(&snapshot);
            for pair in out.windows(2) {
                let (x, y) = (ServingKey::resolve(&pair[0]), ServingKey::resolve(&pair[1]));
                prop_assert!(x.tuple() <= y.tuple());
                if x.tuple() == y.tuple() {
                    // ids follow snapshot order
                    prop_assert!(x.id < y.id);
                }
            }
        }

        #[test]
        fn prop_level_precedence(snapshot in arb_snapshot()) {
            let out = schedule(&snapshot);
            let ranks: Vec<u8> = out.iter().map(|r| r.priority().rank()).collect();
            prop_assert!(ranks.windows(2).all(|w| w[0] <= w[1]));
        }

        #[test]
        fn prop_idempotent(snapshot in arb_snapshot()) {
            let once = schedule(&snapshot);
            let twice = schedule(&once);
            prop_assert_eq!(once, twice);
        }
    }
}
