//! Chat-platform host adapter.
//!
//! The processor mutates communities through the [`ChatHost`] seam:
//! enumeration of joined communities, channel/role snapshots, channel and
//! category CRUD, and permission edits. [`SerenityHost`] is the Discord
//! implementation, driven entirely through serenity's HTTP client so it can
//! share the gateway client's handle.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod host;
mod serenity_host;

pub use host::{ChatHost, ChannelNodeKind, ChannelRecord, CommunityInfo, OverwriteRecord, RoleRecord};
pub use serenity_host::SerenityHost;
