//! Insertion-ordered record store.
//!
//! Holds a snapshot of appointment records in arrival order. The
//! scheduling engine ingests every snapshot into a fresh store and
//! traverses it once; the completion workflow retires served records
//! with [`RecordStore::remove_by_id`].
//!
//! Identifiers are assumed unique; the persistence layer enforces this.

use crate::models::AppointmentRecord;

/// Arrival-ordered container of appointment records.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<AppointmentRecord>,
}

impl RecordStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record after all existing ones.
    pub fn append(&mut self, record: AppointmentRecord) {
        self.records.push(record);
    }

    /// All records in insertion order.
    pub fn traverse_all(&self) -> &[AppointmentRecord] {
        &self.records
    }

    /// Iterates records in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, AppointmentRecord> {
        self.records.iter()
    }

    /// Removes the first record with the given id.
    ///
    /// Returns `true` if a record was removed. Order of the remaining
    /// records is unchanged.
    pub fn remove_by_id(&mut self, id: i64) -> bool {
        match self.records.iter().position(|r| r.id == id) {
            Some(index) => {
                self.records.remove(index);
                true
            }
            None => false,
        }
    }

    /// Finds the first record with the given id.
    pub fn find_by_id(&self, id: i64) -> Option<&AppointmentRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Removes all records.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Consumes the store, returning records in insertion order.
    pub fn into_records(self) -> Vec<AppointmentRecord> {
        self.records
    }
}

impl FromIterator<AppointmentRecord> for RecordStore {
    fn from_iter<I: IntoIterator<Item = AppointmentRecord>>(iter: I) -> Self {
        let mut store = RecordStore::new();
        store.extend(iter);
        store
    }
}

impl Extend<AppointmentRecord> for RecordStore {
    fn extend<I: IntoIterator<Item = AppointmentRecord>>(&mut self, iter: I) {
        for record in iter {
            self.append(record);
        }
    }
}
