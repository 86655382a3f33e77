//! Priority serving-order engine for patient appointment queues.
//!
//! Takes a snapshot of pending appointments and produces a deterministic
//! serving order: most urgent level first, then earliest due, then
//! earliest registered, then arrival order.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `AppointmentRecord`, `AppointmentStatus`,
//!   `PriorityLevel` (the priority classifier)
//! - **`store`**: `RecordStore`, the insertion-ordered record container
//! - **`queue`**: `FifoQueue` lanes and the four-lane `LayeredQueue`
//! - **`dispatching`**: `ServingKey` resolution, dispatching rules, `RuleEngine`
//! - **`scheduler`**: `QueueScheduler` and `QueueSummary`
//! - **`validation`**: Snapshot integrity checks (duplicate IDs, stale status)
//! - **`filter`**: Doctor selection and substring search helpers
//!
//! # Failure Model
//!
//! Scheduling never fails. Malformed labels and timestamps degrade to a
//! fixed fallback (see [`error::Fallback`]) and are logged with `tracing`.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Cormen et al. (2009), "Introduction to Algorithms", Ch. 6 & 10

pub mod dispatching;
pub mod error;
pub mod filter;
pub mod models;
pub mod queue;
pub mod scheduler;
pub mod store;
pub mod validation;

pub use error::{Fallback, ParseError};
pub use models::{AppointmentRecord, AppointmentStatus, PriorityLevel};
pub use queue::LayeredQueue;
pub use scheduler::{schedule, QueueScheduler, QueueSummary};
pub use store::RecordStore;
