//! Serving-order scheduling and queue indicators.
//!
//! # Algorithm
//!
//! `QueueScheduler` ingests a snapshot, resolves each record's composite
//! key `(priority rank, due time, creation time)`, stable-sorts by it and
//! redistributes the result through a four-lane FIFO queue. The output is
//! deterministic for a given snapshot.
//!
//! # Summary
//!
//! `QueueSummary` reports per-level counts and how many records needed a
//! fallback while their key was resolved.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Knuth (1998), TAOCP Vol. 3, Sec. 5.2.4 (stable merge sorting)

mod serving;
mod summary;

pub use serving::{schedule, QueueScheduler};
pub use summary::QueueSummary;
