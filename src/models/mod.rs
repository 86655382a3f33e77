//! Appointment domain models.
//!
//! Provides the record type the engine orders and the priority levels
//! that classify it.
//!
//! # Domain Mappings
//!
//! | u-triage | Clinic | Emergency Dept | Dispatch Desk |
//! |----------|--------|----------------|---------------|
//! | AppointmentRecord | Booking | Arrival | Call |
//! | PriorityLevel | Urgency | Triage Level | Severity |
//! | Serving order | Doctor queue | Treatment order | Dispatch order |

mod appointment;
mod priority;

pub use appointment::{AppointmentRecord, AppointmentStatus};
pub use priority::{rank, PriorityLevel};
