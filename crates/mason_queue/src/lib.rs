//! Command-queue processing.
//!
//! One sequential pass per tick: fetch every queue row, interpret each
//! pending row as a command, apply it to every joined community, and write
//! the row's terminal status back to the sheet. The scheduler guarantees a
//! tick never starts while the previous pass is still running.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod processor;
mod scheduler;

pub use processor::{QueueProcessor, TickSummary};
pub use scheduler::{Scheduler, TICK_INTERVAL};
