//! Typed queue rows.

use crate::{DEFAULT_STATUS_COLUMN, RowStatus, STATUS_HEADER};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// One unit of work from the command queue, keyed by sheet position.
///
/// Built from a row's header-keyed cells; every field is trimmed and the
/// status is parsed eagerly. A blank or unrecognized status parses to
/// `None` and gates the row out of processing, matching the sheet's role
/// as the single source of lifecycle truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueRow {
    /// 1-based row number in the sheet (row 1 is the header).
    pub index: usize,
    /// Raw Action cell, trimmed.
    pub action: String,
    /// Category cell, trimmed; empty when absent.
    pub category: String,
    /// Channel Name cell, trimmed; empty when absent.
    pub channel_name: String,
    /// Type cell, trimmed; empty when absent.
    pub channel_type: String,
    /// Role cell, trimmed; empty when absent.
    pub role: String,
    /// Permission cell (allow/deny), trimmed; empty when absent.
    pub access: String,
    /// Permissions cell (comma-separated list), trimmed; empty when absent.
    pub permissions: String,
    /// Parsed Status cell; `None` for blank or unrecognized values.
    pub status: Option<RowStatus>,
}

fn cell(cells: &HashMap<String, String>, header: &str) -> String {
    cells
        .get(header)
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

impl QueueRow {
    /// Build a typed row from header-keyed cells.
    ///
    /// # Examples
    ///
    /// ```
    /// use mason_core::{QueueRow, RowStatus};
    /// use std::collections::HashMap;
    ///
    /// let cells = HashMap::from([
    ///     ("Action".to_string(), "create".to_string()),
    ///     ("Category".to_string(), " Events ".to_string()),
    ///     ("Status".to_string(), "pending".to_string()),
    /// ]);
    /// let row = QueueRow::from_cells(2, &cells);
    /// assert_eq!(row.category, "Events");
    /// assert_eq!(row.status, Some(RowStatus::Pending));
    /// ```
    pub fn from_cells(index: usize, cells: &HashMap<String, String>) -> Self {
        let status = RowStatus::from_str(&cell(cells, STATUS_HEADER)).ok();
        Self {
            index,
            action: cell(cells, "Action"),
            category: cell(cells, "Category"),
            channel_name: cell(cells, "Channel Name"),
            channel_type: cell(cells, "Type"),
            role: cell(cells, "Role"),
            access: cell(cells, "Permission"),
            permissions: cell(cells, "Permissions"),
            status,
        }
    }

    /// Whether this row is awaiting processing.
    pub fn is_pending(&self) -> bool {
        self.status == Some(RowStatus::Pending)
    }
}

/// Resolve the 1-based status column from a header row.
///
/// Falls back to [`DEFAULT_STATUS_COLUMN`] when no `Status` header exists,
/// preserving the sheet's historical fixed layout.
pub fn resolve_status_column(headers: &[String]) -> usize {
    headers
        .iter()
        .position(|h| h.trim() == STATUS_HEADER)
        .map(|pos| pos + 1)
        .unwrap_or(DEFAULT_STATUS_COLUMN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn trims_and_types_fields() {
        let row = QueueRow::from_cells(
            3,
            &cells(&[
                ("Action", " delete "),
                ("Channel Name", "old-news "),
                ("Status", "PENDING"),
            ]),
        );
        assert_eq!(row.index, 3);
        assert_eq!(row.action, "delete");
        assert_eq!(row.channel_name, "old-news");
        assert!(row.is_pending());
    }

    #[test]
    fn unrecognized_status_is_not_pending() {
        let row = QueueRow::from_cells(2, &cells(&[("Action", "create"), ("Status", "queued")]));
        assert_eq!(row.status, None);
        assert!(!row.is_pending());
    }

    #[test]
    fn missing_columns_default_to_empty() {
        let row = QueueRow::from_cells(2, &cells(&[("Action", "create")]));
        assert_eq!(row.category, "");
        assert_eq!(row.permissions, "");
    }

    #[test]
    fn status_column_resolves_by_header() {
        let headers: Vec<String> = ["Action", "Category", "Status", "Notes"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(resolve_status_column(&headers), 3);
    }

    #[test]
    fn status_column_defaults_without_header() {
        let headers: Vec<String> = ["Action", "Category"].iter().map(|s| s.to_string()).collect();
        assert_eq!(resolve_status_column(&headers), DEFAULT_STATUS_COLUMN);
    }
}
