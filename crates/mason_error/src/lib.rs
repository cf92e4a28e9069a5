//! Error types for Mason.
//!
//! Each concern gets its own error struct: a kind enum describing the
//! failure plus the source location captured at construction time. The
//! per-concern errors fold into [`MasonError`] via `From`, so `?` works
//! across crate boundaries.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod discord;
mod error;
mod row;
mod sheet;

pub use config::ConfigError;
pub use discord::{DiscordError, DiscordErrorKind, DiscordResult};
pub use error::{MasonError, MasonErrorKind, MasonResult};
pub use row::{RowError, RowErrorKind, RowResult};
pub use sheet::{SheetError, SheetErrorKind, SheetResult};
