//! Core domain types for Mason.
//!
//! This crate models the command queue's vocabulary: the typed queue row,
//! the closed set of actions, channel kinds, the permission whitelist, and
//! the [`Command`] tagged union the processor dispatches on. Parsing happens
//! here, up front; malformed rows are rejected before any platform call.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod channel;
mod command;
mod permission;
mod row;
mod status;

pub use channel::ChannelKind;
pub use command::{Action, Command, OverwriteSpec};
pub use permission::{Access, Permission, PermissionSet, parse_permission_list};
pub use row::{QueueRow, resolve_status_column};
pub use status::{DEFAULT_STATUS_COLUMN, RowStatus, STATUS_HEADER};
