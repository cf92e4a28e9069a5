//! Spreadsheet store error types.

/// Spreadsheet error variants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum SheetErrorKind {
    /// Service-account token grant was rejected.
    #[display("Authentication failed: {_0}")]
    AuthFailed(String),

    /// HTTP transport or non-success status from the Sheets/Drive API.
    #[display("Sheets API error: {_0}")]
    ApiError(String),

    /// No spreadsheet with the configured display title.
    #[display("Spreadsheet not found: {_0}")]
    SpreadsheetNotFound(String),

    /// Response body did not match the expected shape.
    #[display("Malformed response: {_0}")]
    MalformedResponse(String),

    /// Service-account credential blob failed to parse.
    #[display("Invalid credentials: {_0}")]
    InvalidCredentials(String),
}

/// Spreadsheet error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Sheet Error: {} at line {} in {}", kind, line, file)]
pub struct SheetError {
    /// The failure variant.
    pub kind: SheetErrorKind,
    /// Line number where the error occurred.
    pub line: u32,
    /// File where the error occurred.
    pub file: &'static str,
}

impl SheetError {
    /// Create a new SheetError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SheetErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for spreadsheet operations.
pub type SheetResult<T> = Result<T, SheetError>;
