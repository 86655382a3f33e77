//! Snapshot selection and search helpers.
//!
//! Both keep the input order, so they can be applied before scheduling
//! (selection) or after it (search) without disturbing the serving order.

use crate::models::AppointmentRecord;

/// Scheduled records assigned to one doctor, in input order.
pub fn scheduled_for_doctor(
    records: &[AppointmentRecord],
    doctor_id: i64,
) -> Vec<AppointmentRecord> {
    records
        .iter()
        .filter(|r| r.is_scheduled() && r.doctor_id == Some(doctor_id))
        .cloned()
        .collect()
}

/// Case-insensitive substring match over name, date, time and priority.
///
/// The query is trimmed; a blank query matches every record.
pub fn matches_search(record: &AppointmentRecord, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    [
        &record.name,
        &record.appointment_date,
        &record.appointment_time,
        &record.priority_label,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&needle))
}

/// Records matching a search query, in input order.
pub fn search<'a>(records: &'a [AppointmentRecord], query: &str) -> Vec<&'a AppointmentRecord> {
    records.iter().filter(|r| matches_search(r, query)).collect()
}
