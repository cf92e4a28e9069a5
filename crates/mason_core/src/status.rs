//! Row status lifecycle.

use serde::{Deserialize, Serialize};

/// Header name the status column is resolved by.
pub const STATUS_HEADER: &str = "Status";

/// 1-based column the status cell falls back to when the header row does
/// not carry a `Status` header.
pub const DEFAULT_STATUS_COLUMN: usize = 5;

/// Lifecycle state of a queue row.
///
/// Rows are created externally as `pending` and transition to `done` or
/// `error` exactly once per processing pass. Non-pending rows are never
/// re-processed; resetting an errored row to `pending` is a human action.
///
/// # Examples
///
/// ```
/// use mason_core::RowStatus;
/// use std::str::FromStr;
///
/// assert_eq!(RowStatus::from_str("Pending").unwrap(), RowStatus::Pending);
/// assert_eq!(format!("{}", RowStatus::Done), "done");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RowStatus {
    /// Awaiting processing.
    Pending,
    /// Processed successfully.
    Done,
    /// Processing failed; needs a human reset.
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(RowStatus::from_str("PENDING").unwrap(), RowStatus::Pending);
        assert_eq!(RowStatus::from_str("done").unwrap(), RowStatus::Done);
        assert!(RowStatus::from_str("queued").is_err());
    }

    #[test]
    fn displays_lowercase() {
        assert_eq!(RowStatus::Error.to_string(), "error");
    }
}
