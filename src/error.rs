//! Error and fallback types.
//!
//! Strict parsers return [`ParseError`]. The scheduling pass never
//! propagates them: each failure is converted into a [`Fallback`] and the
//! record is ordered with a substitute value instead.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of a strict parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown priority label: '{0}'")]
    UnknownPriority(String),

    #[error("timestamp is blank")]
    BlankTimestamp,

    #[error("invalid timestamp: '{0}'")]
    InvalidTimestamp(String),

    #[error("invalid appointment date: '{0}'")]
    InvalidDate(String),

    #[error("invalid appointment time: '{0}'")]
    InvalidTime(String),
}

/// A silent degradation applied while resolving a record's serving key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum Fallback {
    /// Priority label was blank or unrecognized; ranked as `normal`.
    #[error("priority label not recognized, treated as normal")]
    InvalidPriorityLabel,

    /// Date or time was blank or unparsable; due time taken from `created_at`.
    #[error("appointment date/time unusable, due time falls back to creation time")]
    UnparsableDueTime,

    /// `created_at` was blank or unparsable; minimum timestamp used.
    #[error("creation time unusable, minimum timestamp used")]
    UnparsableCreationTime,
}

impl Fallback {
    /// All fallback kinds, in resolution order.
    pub const ALL: [Fallback; 3] = [
        Fallback::InvalidPriorityLabel,
        Fallback::UnparsableCreationTime,
        Fallback::UnparsableDueTime,
    ];
}
