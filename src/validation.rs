//! Snapshot validation.
//!
//! Checks a snapshot before it is handed to the scheduler. Detects:
//! - Duplicate appointment IDs
//! - Records that are not in the `scheduled` state
//!
//! The scheduler never calls this; it orders whatever it is given.
//! Callers use it to catch stale or inconsistent snapshots.

use crate::models::{AppointmentRecord, AppointmentStatus};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Offending appointment ID.
    pub appointment_id: i64,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two records share the same ID.
    DuplicateId,
    /// A record has already been served.
    NotScheduled,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, appointment_id: i64, message: impl Into<String>) -> Self {
        Self {
            kind,
            appointment_id,
            message: message.into(),
        }
    }
}

/// Validates a scheduling snapshot.
///
/// Checks:
/// 1. No duplicate appointment IDs
/// 2. Every record is `scheduled`
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues
/// in snapshot order.
pub fn validate_snapshot(records: &[AppointmentRecord]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for record in records {
        if !seen.insert(record.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                record.id,
                format!("Duplicate appointment ID: {}", record.id),
            ));
        }

        if record.status != AppointmentStatus::Scheduled {
            errors.push(ValidationError::new(
                ValidationErrorKind::NotScheduled,
                record.id,
                format!("Appointment {} is not scheduled", record.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_snapshot() {
        let records = vec![AppointmentRecord::new(1), AppointmentRecord::new(2)];
        assert!(validate_snapshot(&records).is_ok());
    }

    #[test]
    fn test_empty_snapshot() {
        assert!(validate_snapshot(&[]).is_ok());
    }

    #[test]
    fn test_duplicate_id() {
        let records = vec![
            AppointmentRecord::new(1),
            AppointmentRecord::new(2),
            AppointmentRecord::new(1),
        ];
        let errors = validate_snapshot(&records).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateId);
        assert_eq!(errors[0].appointment_id, 1);
    }

    #[test]
    fn test_completed_record() {
        let records = vec![
            AppointmentRecord::new(1),
            AppointmentRecord::new(2).with_status(AppointmentStatus::Completed),
        ];
        let errors = validate_snapshot(&records).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::NotScheduled);
        assert!(errors[0].message.contains('2'));
    }

    #[test]
    fn test_reports_all_errors() {
        let records = vec![
            AppointmentRecord::new(5).with_status(AppointmentStatus::Completed),
            AppointmentRecord::new(5),
        ];
        let errors = validate_snapshot(&records).unwrap_err();
        let kinds: Vec<_> = errors.iter().map(|e| e.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![ValidationErrorKind::NotScheduled, ValidationErrorKind::DuplicateId]
        );
    }
}
