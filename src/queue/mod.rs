//! Serving-order queue structures.
//!
//! - [`FifoQueue`]: one first-in, first-out lane.
//! - [`LayeredQueue`]: four lanes indexed by priority rank, drained most
//!   urgent first. This is the structure a live "who's next" view
//!   consumes one record at a time.

mod fifo;
mod layered;

pub use fifo::FifoQueue;
pub use layered::LayeredQueue;
