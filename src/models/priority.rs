//! Priority classification.
//!
//! Four urgency levels on a fixed total order, most urgent first:
//!
//! | Level | Rank |
//! |-------|------|
//! | `critical` | 0 |
//! | `emergency` | 1 |
//! | `accident` | 2 |
//! | `normal` | 3 |
//!
//! [`PriorityLevel::classify`] is the single normalization point for
//! priority labels: every other component works with a valid level.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// Urgency level of an appointment.
///
/// Ordering follows rank: `Critical < Emergency < Accident < Normal`,
/// so sorting ascending puts the most urgent first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PriorityLevel {
    /// Rank 0.
    Critical = 0,
    /// Rank 1.
    Emergency = 1,
    /// Rank 2.
    Accident = 2,
    /// Rank 3. Also the level of any unrecognized label.
    #[default]
    Normal = 3,
}

impl PriorityLevel {
    /// Number of levels.
    pub const COUNT: usize = 4;

    /// All levels in rank order (most urgent first).
    pub const ALL: [PriorityLevel; Self::COUNT] = [
        PriorityLevel::Critical,
        PriorityLevel::Emergency,
        PriorityLevel::Accident,
        PriorityLevel::Normal,
    ];

    /// Classifies a raw label. Never fails.
    ///
    /// The label is trimmed and lowercased before lookup. Blank and
    /// unrecognized labels resolve to [`PriorityLevel::Normal`].
    pub fn classify(label: &str) -> Self {
        label.parse().unwrap_or(PriorityLevel::Normal)
    }

    /// Classifies a raw label and reports whether it was recognized.
    pub fn classify_checked(label: &str) -> (Self, bool) {
        match label.parse() {
            Ok(level) => (level, true),
            Err(_) => (PriorityLevel::Normal, false),
        }
    }

    /// Integer rank in `0..=3`, lower is more urgent.
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Canonical lowercase label.
    pub fn as_str(self) -> &'static str {
        match self {
            PriorityLevel::Critical => "critical",
            PriorityLevel::Emergency => "emergency",
            PriorityLevel::Accident => "accident",
            PriorityLevel::Normal => "normal",
        }
    }
}

impl FromStr for PriorityLevel {
    type Err = ParseError;

    /// Strict parse: trimmed, case-insensitive, errors on unknown labels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "critical" => Ok(PriorityLevel::Critical),
            "emergency" => Ok(PriorityLevel::Emergency),
            "accident" => Ok(PriorityLevel::Accident),
            "normal" => Ok(PriorityLevel::Normal),
            _ => Err(ParseError::UnknownPriority(s.to_string())),
        }
    }
}

impl fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rank of a raw priority label, in `0..=3`.
///
/// Shorthand for `PriorityLevel::classify(label).rank()`.
pub fn rank(label: &str) -> u8 {
    PriorityLevel::classify(label).rank()
}
