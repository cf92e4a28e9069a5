//! Queue row validation error types.
//!
//! Rows are parsed into typed commands before dispatch; a row that names an
//! unknown action or omits a field its action requires is rejected here
//! rather than discovered mid-execution.

/// Row validation error variants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum RowErrorKind {
    /// Action column value is not one of create/delete/assign/deassign.
    #[display("Unknown action: '{_0}'")]
    UnknownAction(String),

    /// A field required by the row's action is empty or missing.
    #[display("Missing field '{}' for action '{}'", field, action)]
    MissingField {
        /// The action being parsed.
        action: String,
        /// The absent column.
        field: String,
    },

    /// Channel type is neither text nor voice.
    #[display("Unsupported channel type: '{_0}'")]
    UnsupportedChannelType(String),

    /// Permission column value is neither allow nor deny.
    #[display("Unsupported permission access: '{_0}'")]
    UnsupportedAccess(String),

    /// Every name in the permission list failed the whitelist.
    #[display("No known permissions in list: '{_0}'")]
    EmptyPermissionList(String),
}

/// Row validation error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Row Error: {} at line {} in {}", kind, line, file)]
pub struct RowError {
    /// The failure variant.
    pub kind: RowErrorKind,
    /// Line number where the error occurred.
    pub line: u32,
    /// File where the error occurred.
    pub file: &'static str,
}

impl RowError {
    /// Create a new RowError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RowErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for row parsing.
pub type RowResult<T> = Result<T, RowError>;
