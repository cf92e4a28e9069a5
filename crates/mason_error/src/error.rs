//! Top-level error wrapper types.

use crate::{ConfigError, DiscordError, RowError, SheetError};

/// Union of the per-concern error types.
///
/// # Examples
///
/// ```
/// use mason_error::{ConfigError, MasonError};
///
/// let cfg = ConfigError::new("SHEET_NAME not set");
/// let err: MasonError = cfg.into();
/// assert!(format!("{}", err).contains("Configuration"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum MasonErrorKind {
    /// Configuration error (fatal at startup)
    #[from(ConfigError)]
    Config(ConfigError),
    /// Spreadsheet store error
    #[from(SheetError)]
    Sheet(SheetError),
    /// Chat-platform error
    #[from(DiscordError)]
    Discord(DiscordError),
    /// Queue row validation error
    #[from(RowError)]
    Row(RowError),
}

/// Mason error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Mason Error: {}", _0)]
pub struct MasonError(Box<MasonErrorKind>);

impl MasonError {
    /// Create a new error from a kind.
    pub fn new(kind: MasonErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &MasonErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to MasonErrorKind
impl<T> From<T> for MasonError
where
    T: Into<MasonErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Mason operations.
///
/// # Examples
///
/// ```
/// use mason_error::{MasonResult, SheetError, SheetErrorKind};
///
/// fn fetch_rows() -> MasonResult<Vec<String>> {
///     Err(SheetError::new(SheetErrorKind::ApiError("503".into())))?
/// }
/// ```
pub type MasonResult<T> = std::result::Result<T, MasonError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DiscordErrorKind, RowErrorKind, SheetErrorKind};

    #[test]
    fn wraps_each_concern() {
        let errs: Vec<MasonError> = vec![
            ConfigError::new("missing token").into(),
            SheetError::new(SheetErrorKind::SpreadsheetNotFound("Ledger".into())).into(),
            DiscordError::new(DiscordErrorKind::RoleNotFound("Moderator".into())).into(),
            RowError::new(RowErrorKind::UnknownAction("rename".into())).into(),
        ];
        assert!(matches!(errs[0].kind(), MasonErrorKind::Config(_)));
        assert!(matches!(errs[1].kind(), MasonErrorKind::Sheet(_)));
        assert!(matches!(errs[2].kind(), MasonErrorKind::Discord(_)));
        assert!(matches!(errs[3].kind(), MasonErrorKind::Row(_)));
    }

    #[test]
    fn display_includes_kind_and_location() {
        let err = DiscordError::new(DiscordErrorKind::ChannelNotFound("town-hall".into()));
        let text = format!("{err}");
        assert!(text.contains("town-hall"));
        assert!(text.contains("error.rs"));
    }
}
