//! Four-lane priority queue.
//!
//! One FIFO lane per [`PriorityLevel`]. Dequeue scans lanes in rank
//! order and serves the first non-empty one, so no record is served
//! while a more urgent one is waiting, whatever order they arrived in.
//!
//! Within a lane, records leave in enqueue order. Ordering inside a lane
//! is the caller's responsibility.

use tracing::trace;

use super::FifoQueue;
use crate::models::{AppointmentRecord, PriorityLevel};

/// Priority-leveled FIFO queue of appointment records.
#[derive(Debug, Clone, Default)]
pub struct LayeredQueue {
    lanes: [FifoQueue<AppointmentRecord>; PriorityLevel::COUNT],
}

impl LayeredQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record to the lane for its classified priority.
    pub fn enqueue(&mut self, record: AppointmentRecord) {
        let level = record.priority();
        trace!(id = record.id, %level, "enqueue");
        self.lanes[level.rank() as usize].enqueue(record);
    }

    /// Removes the front record of the most urgent non-empty lane.
    ///
    /// Returns `None` when every lane is empty.
    pub fn dequeue(&mut self) -> Option<AppointmentRecord> {
        let record = self.lanes.iter_mut().find_map(|lane| lane.dequeue());
        if let Some(ref r) = record {
            trace!(id = r.id, "dequeue");
        }
        record
    }

    /// Record the next [`dequeue`](Self::dequeue) would return.
    pub fn peek(&self) -> Option<&AppointmentRecord> {
        self.lanes.iter().find_map(|lane| lane.peek())
    }

    /// Dequeues until empty, returning records in serving order.
    pub fn drain_all(&mut self) -> Vec<AppointmentRecord> {
        let mut out = Vec::with_capacity(self.len());
        while let Some(record) = self.dequeue() {
            out.push(record);
        }
        out
    }

    /// Iterates in serving order without removing anything.
    pub fn iter(&self) -> impl Iterator<Item = &AppointmentRecord> + '_ {
        self.lanes.iter().flat_map(|lane| lane.iter())
    }

    /// Total records across all lanes.
    pub fn len(&self) -> usize {
        self.lanes.iter().map(FifoQueue::len).sum()
    }

    /// Whether every lane is empty.
    pub fn is_empty(&self) -> bool {
        self.lanes.iter().all(FifoQueue::is_empty)
    }

    /// Records waiting at one level.
    pub fn lane_len(&self, level: PriorityLevel) -> usize {
        self.lanes[level.rank() as usize].len()
    }
}

impl Extend<AppointmentRecord> for LayeredQueue {
    fn extend<I: IntoIterator<Item = AppointmentRecord>>(&mut self, iter: I) {
        for record in iter {
            self.enqueue(record);
        }
    }
}

impl FromIterator<AppointmentRecord> for LayeredQueue {
    fn from_iter<I: IntoIterator<Item = AppointmentRecord>>(iter: I) -> Self {
        let mut queue = LayeredQueue::new();
        queue.extend(iter);
        queue
    }
}
