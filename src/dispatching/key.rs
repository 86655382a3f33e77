//! Serving key resolution.
//!
//! Turns a raw record into the composite key `(rank, due, created)` used
//! for ordering. Every field has a fallback, so resolution never fails:
//!
//! | Field | Source | Fallback |
//! |-------|--------|----------|
//! | rank | priority label | `normal` |
//! | due | date + time | `created` |
//! | created | `created_at` | `NaiveDateTime::MIN` |

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SubsecRound};
use tracing::debug;

use crate::error::{Fallback, ParseError};
use crate::models::{AppointmentRecord, PriorityLevel};

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];

/// Timestamps are compared at microsecond resolution.
const SUBSEC_DIGITS: u16 = 6;

fn is_digits(bytes: &[u8]) -> bool {
    !bytes.is_empty() && bytes.iter().all(u8::is_ascii_digit)
}

/// `YYYY-MM-DD`, zero-padded.
fn is_iso_date(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && is_digits(&b[..4])
        && is_digits(&b[5..7])
        && is_digits(&b[8..])
}

/// `HH:MM`, `HH:MM:SS` or `HH:MM:SS.f+`, zero-padded.
fn is_iso_time(s: &str) -> bool {
    let b = s.as_bytes();
    if b.len() < 5 || b[2] != b':' || !is_digits(&b[..2]) || !is_digits(&b[3..5]) {
        return false;
    }
    match &b[5..] {
        [] => true,
        [b':', s1, s2, rest @ ..] if s1.is_ascii_digit() && s2.is_ascii_digit() => match rest {
            [] => true,
            [b'.', frac @ ..] => is_digits(frac),
            _ => false,
        },
        _ => false,
    }
}

/// Strips a trailing `Z` or `+HH:MM` / `-HH:MM` offset.
fn strip_offset(s: &str) -> &str {
    if let Some(head) = s.strip_suffix('Z').or_else(|| s.strip_suffix('z')) {
        return head;
    }
    let b = s.as_bytes();
    if b.len() > 6 {
        let tail = &b[b.len() - 6..];
        if matches!(tail[0], b'+' | b'-')
            && is_digits(&tail[1..3])
            && tail[3] == b':'
            && is_digits(&tail[4..])
        {
            return &s[..s.len() - 6];
        }
    }
    s
}

/// `YYYY-MM-DD`, optionally followed by `T` or a space, a time and an offset.
fn is_iso_timestamp(s: &str) -> bool {
    let Some(date) = s.get(..10) else {
        return false;
    };
    if !is_iso_date(date) {
        return false;
    }
    let rest = &s[10..];
    match rest.as_bytes().first() {
        None => true,
        Some(b'T' | b' ') => is_iso_time(strip_offset(&rest[1..])),
        Some(_) => false,
    }
}

/// Parses an ISO 8601 timestamp.
///
/// Dates and times must be zero-padded. Offsets are normalized to UTC and
/// dropped. A bare date means midnight. Sub-microsecond digits are
/// truncated.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, ParseError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ParseError::BlankTimestamp);
    }
    if !is_iso_timestamp(value) {
        return Err(ParseError::InvalidTimestamp(value.to_string()));
    }

    let parsed = DateTime::parse_from_rfc3339(value)
        .ok()
        .or_else(|| {
            OFFSET_FORMATS
                .iter()
                .find_map(|fmt| DateTime::parse_from_str(value, fmt).ok())
        })
        .map(|dt| dt.naive_utc())
        .or_else(|| {
            NAIVE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(value, DATE_FORMAT)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        });

    parsed
        .map(|dt| dt.trunc_subsecs(SUBSEC_DIGITS))
        .ok_or_else(|| ParseError::InvalidTimestamp(value.to_string()))
}

/// Combines separate date and time-of-day strings into one point in time.
///
/// Both parts are required and zero-padded: `YYYY-MM-DD` and `HH:MM` or
/// `HH:MM:SS[.f]`. Sub-microsecond digits are truncated.
pub fn parse_due_time(date: &str, time: &str) -> Result<NaiveDateTime, ParseError> {
    let (date, time) = (date.trim(), time.trim());
    if date.is_empty() || time.is_empty() {
        return Err(ParseError::BlankTimestamp);
    }
    if !is_iso_date(date) {
        return Err(ParseError::InvalidDate(date.to_string()));
    }
    if !is_iso_time(time) {
        return Err(ParseError::InvalidTime(time.to_string()));
    }

    let day = NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|_| ParseError::InvalidDate(date.to_string()))?;
    let clock = TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(time, fmt).ok())
        .ok_or_else(|| ParseError::InvalidTime(time.to_string()))?;

    Ok(day.and_time(clock).trunc_subsecs(SUBSEC_DIGITS))
}

/// Resolved ordering key of one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServingKey {
    /// Record identifier.
    pub id: i64,
    /// Classified priority level.
    pub level: PriorityLevel,
    /// When the patient is due.
    pub due: NaiveDateTime,
    /// When the record was registered.
    pub created: NaiveDateTime,
    /// Fallbacks applied during resolution, in resolution order.
    pub fallbacks: Vec<Fallback>,
}

impl ServingKey {
    /// Resolves the key for a record. Never fails.
    ///
    /// Each applied fallback is logged at `debug` level.
    pub fn resolve(record: &AppointmentRecord) -> Self {
        let key = Self::resolve_unlogged(record);
        for fallback in &key.fallbacks {
            debug!(id = record.id, %fallback, "serving key fallback");
        }
        key
    }

    /// Resolves the key without logging fallbacks.
    pub(crate) fn resolve_unlogged(record: &AppointmentRecord) -> Self {
        let mut fallbacks = Vec::new();

        let (level, recognized) = PriorityLevel::classify_checked(&record.priority_label);
        if !recognized {
            fallbacks.push(Fallback::InvalidPriorityLabel);
        }

        // Due time falls back to the creation time, so resolve that first.
        let created = parse_timestamp(&record.created_at).unwrap_or_else(|_| {
            fallbacks.push(Fallback::UnparsableCreationTime);
            NaiveDateTime::MIN
        });

        let due = parse_due_time(&record.appointment_date, &record.appointment_time)
            .unwrap_or_else(|_| {
                fallbacks.push(Fallback::UnparsableDueTime);
                created
            });

        Self {
            id: record.id,
            level,
            due,
            created,
            fallbacks,
        }
    }

    /// Priority rank, `0..=3`.
    pub fn rank(&self) -> u8 {
        self.level.rank()
    }

    /// The composite `(rank, due, created)` tuple.
    pub fn tuple(&self) -> (u8, NaiveDateTime, NaiveDateTime) {
        (self.rank(), self.due, self.created)
    }

    /// Whether a given fallback was applied.
    pub fn has_fallback(&self, fallback: Fallback) -> bool {
        self.fallbacks.contains(&fallback)
    }
}
