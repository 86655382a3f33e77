//! Serving queue summary.
//!
//! Computes dashboard indicators from an ordered serving sequence.
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total | Records waiting |
//! | Per level | Records waiting at each priority level |
//! | Fallbacks | Records resolved with each fallback kind |
//! | Next up | Id of the first record |
//! | Precedence | Whether levels appear in rank order |

use serde::{Deserialize, Serialize};

use crate::dispatching::ServingKey;
use crate::error::Fallback;
use crate::models::{AppointmentRecord, PriorityLevel};

/// Indicators for one serving sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueSummary {
    /// Records in the sequence.
    pub total: usize,
    /// Records per level, indexed by rank.
    pub per_level: [usize; PriorityLevel::COUNT],
    /// Records whose priority label was not recognized.
    pub invalid_priority_labels: usize,
    /// Records whose due time fell back to creation time.
    pub unparsable_due_times: usize,
    /// Records whose creation time fell back to the minimum timestamp.
    pub unparsable_creation_times: usize,
    /// Id of the record served next.
    pub next_up: Option<i64>,
    /// Whether no record follows a less urgent one.
    pub precedence_respected: bool,
}

impl QueueSummary {
    /// Computes the summary of an ordered sequence.
    ///
    /// Keys are re-resolved without logging; fallbacks were already
    /// logged when the sequence was scheduled.
    pub fn calculate(ordered: &[AppointmentRecord]) -> Self {
        let mut summary = Self {
            total: ordered.len(),
            next_up: ordered.first().map(|r| r.id),
            precedence_respected: true,
            ..Default::default()
        };

        let mut last_rank = 0u8;
        for record in ordered {
            let key = ServingKey::resolve_unlogged(record);
            let rank = key.rank();

            summary.per_level[rank as usize] += 1;
            if rank < last_rank {
                summary.precedence_respected = false;
            }
            last_rank = rank;

            for fallback in &key.fallbacks {
                match fallback {
                    Fallback::InvalidPriorityLabel => summary.invalid_priority_labels += 1,
                    Fallback::UnparsableDueTime => summary.unparsable_due_times += 1,
                    Fallback::UnparsableCreationTime => summary.unparsable_creation_times += 1,
                }
            }
        }

        summary
    }

    /// Records waiting at one level.
    pub fn count(&self, level: PriorityLevel) -> usize {
        self.per_level[level.rank() as usize]
    }

    /// Records resolved with the given fallback.
    pub fn fallback_count(&self, fallback: Fallback) -> usize {
        match fallback {
            Fallback::InvalidPriorityLabel => self.invalid_priority_labels,
            Fallback::UnparsableDueTime => self.unparsable_due_times,
            Fallback::UnparsableCreationTime => self.unparsable_creation_times,
        }
    }
}
