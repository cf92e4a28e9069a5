//! Mason - sheet-driven Discord provisioning bot.
//!
//! Mason watches a Google spreadsheet used as a command queue and builds
//! out Discord communities from it: categories, text and voice channels,
//! channel permission overwrites, and role permission grants. Each sheet
//! row is one command; the bot polls on a fixed interval, applies pending
//! rows to every community it belongs to, and writes `done` or `error`
//! back into the row's Status cell.
//!
//! # Architecture
//!
//! Mason is organized as a workspace with focused crates:
//!
//! - `mason_core` - Domain types (rows, commands, permissions)
//! - `mason_error` - Error types
//! - `mason_sheets` - Google Sheets command-queue store
//! - `mason_social` - Discord host adapter over serenity
//! - `mason_queue` - Queue processor and tick scheduler
//!
//! This crate (`mason`) wires configuration, logging, the gateway client,
//! and the scheduler into the `mason` binary, and re-exports the pieces
//! for library use.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod config;

pub use client::MasonBot;
pub use config::MasonConfig;

pub use mason_core::{
    Access, Action, ChannelKind, Command, Permission, PermissionSet, QueueRow, RowStatus,
};
pub use mason_error::{MasonError, MasonErrorKind, MasonResult};
pub use mason_queue::{QueueProcessor, Scheduler, TICK_INTERVAL};
pub use mason_sheets::{GoogleSheetsClient, SheetStore};
pub use mason_social::{ChatHost, SerenityHost};
