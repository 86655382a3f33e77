//! Appointment record model.
//!
//! An appointment record is the unit the scheduling engine orders. Records
//! arrive from the persistence layer as raw rows: labels and timestamps
//! are kept as the strings that were stored, and interpreted only when
//! the serving key is resolved.

use serde::{Deserialize, Deserializer, Serialize};

use super::PriorityLevel;

/// Lifecycle state of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    /// Waiting to be served. Only these records are scheduled.
    #[default]
    Scheduled,
    /// Served and retired from the queue.
    Completed,
}

/// A pending patient appointment, as stored.
///
/// # Time Representation
/// `appointment_date` (`YYYY-MM-DD`), `appointment_time` (`HH:MM[:SS]`)
/// and `created_at` (ISO 8601) are raw strings and may be blank or
/// malformed. See [`ServingKey`](crate::dispatching::ServingKey) for how
/// they are interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    /// Unique appointment identifier.
    pub id: i64,
    /// Patient display name. Not used for ordering.
    #[serde(default, alias = "patient_name", deserialize_with = "null_as_blank")]
    pub name: String,
    /// Raw priority label (`normal`, `accident`, `emergency`, `critical`).
    #[serde(
        rename = "priority",
        default,
        deserialize_with = "null_as_blank"
    )]
    pub priority_label: String,
    /// Due date component.
    #[serde(default, deserialize_with = "null_as_blank")]
    pub appointment_date: String,
    /// Due time-of-day component.
    #[serde(default, deserialize_with = "null_as_blank")]
    pub appointment_time: String,
    /// Registration timestamp.
    #[serde(default, deserialize_with = "null_as_blank")]
    pub created_at: String,
    /// Lifecycle state.
    #[serde(default)]
    pub status: AppointmentStatus,
    /// Assigned doctor, if any.
    #[serde(default)]
    pub doctor_id: Option<i64>,
}

fn null_as_blank<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl AppointmentRecord {
    /// Creates a scheduled record with blank fields and `normal` priority.
    pub fn new(id: i64) -> Self {
        Self {
            id,
            name: String::new(),
            priority_label: PriorityLevel::Normal.as_str().to_string(),
            appointment_date: String::new(),
            appointment_time: String::new(),
            created_at: String::new(),
            status: AppointmentStatus::Scheduled,
            doctor_id: None,
        }
    }

    /// Sets the patient name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the raw priority label.
    pub fn with_priority(mut self, label: impl Into<String>) -> Self {
        self.priority_label = label.into();
        self
    }

    /// Sets the due date and time components.
    pub fn with_due(mut self, date: impl Into<String>, time: impl Into<String>) -> Self {
        self.appointment_date = date.into();
        self.appointment_time = time.into();
        self
    }

    /// Sets the registration timestamp.
    pub fn with_created_at(mut self, created_at: impl Into<String>) -> Self {
        self.created_at = created_at.into();
        self
    }

    /// Sets the lifecycle status.
    pub fn with_status(mut self, status: AppointmentStatus) -> Self {
        self.status = status;
        self
    }

    /// Assigns a doctor.
    pub fn with_doctor(mut self, doctor_id: i64) -> Self {
        self.doctor_id = Some(doctor_id);
        self
    }

    /// Classified urgency level.
    pub fn priority(&self) -> PriorityLevel {
        PriorityLevel::classify(&self.priority_label)
    }

    /// Whether the record is waiting to be served.
    pub fn is_scheduled(&self) -> bool {
        self.status == AppointmentStatus::Scheduled
    }
}
