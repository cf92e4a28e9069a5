//! Permission vocabulary.
//!
//! The queue names permissions by their snake_case API identifiers
//! (`kick_members`, `ban_members`, ...). Only names in the closed
//! [`Permission`] whitelist are honored; unknown names in a list are
//! skipped with a warning rather than failing the row.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

/// Whether an overwrite grants or withholds the channel bits.
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
pub enum Access {
    /// Explicitly allow the overwrite bits.
    Allow,
    /// Explicitly deny the overwrite bits.
    Deny,
}

/// Known permission identifiers and their Discord bit positions.
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
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Permission {
    /// Create invite links.
    CreateInstantInvite,
    /// Remove members from the community.
    KickMembers,
    /// Ban members from the community.
    BanMembers,
    /// Edit, reorder, and delete channels.
    ManageChannels,
    /// Add reactions to messages.
    AddReactions,
    /// See a channel and its messages.
    ViewChannel,
    /// Send messages in text channels.
    SendMessages,
    /// Delete or pin other members' messages.
    ManageMessages,
    /// Post embedded links.
    EmbedLinks,
    /// Upload files.
    AttachFiles,
    /// Read a channel's message history.
    ReadMessageHistory,
    /// Use @everyone and @here.
    MentionEveryone,
    /// Join voice channels.
    Connect,
    /// Talk in voice channels.
    Speak,
    /// Server-mute members in voice channels.
    MuteMembers,
    /// Server-deafen members in voice channels.
    DeafenMembers,
    /// Move members between voice channels.
    MoveMembers,
    /// Change other members' nicknames.
    ManageNicknames,
    /// Edit roles below this role.
    ManageRoles,
}

impl Permission {
    /// The Discord permission bit for this identifier.
    pub fn bit(self) -> u64 {
        match self {
            Permission::CreateInstantInvite => 1 << 0,
            Permission::KickMembers => 1 << 1,
            Permission::BanMembers => 1 << 2,
            Permission::ManageChannels => 1 << 4,
            Permission::AddReactions => 1 << 6,
            Permission::ViewChannel => 1 << 10,
            Permission::SendMessages => 1 << 11,
            Permission::ManageMessages => 1 << 13,
            Permission::EmbedLinks => 1 << 14,
            Permission::AttachFiles => 1 << 15,
            Permission::ReadMessageHistory => 1 << 16,
            Permission::MentionEveryone => 1 << 17,
            Permission::Connect => 1 << 20,
            Permission::Speak => 1 << 21,
            Permission::MuteMembers => 1 << 22,
            Permission::DeafenMembers => 1 << 23,
            Permission::MoveMembers => 1 << 24,
            Permission::ManageNicknames => 1 << 27,
            Permission::ManageRoles => 1 << 28,
        }
    }
}

/// A set of permission bits.
///
/// Thin wrapper over the raw bitfield so the processor and the platform
/// adapters agree on representation without pulling serenity types into
/// the domain layer.
///
/// # Examples
///
/// ```
/// use mason_core::{Permission, PermissionSet};
///
/// let mut set = PermissionSet::empty();
/// set.insert(Permission::KickMembers);
/// assert!(set.contains(Permission::KickMembers));
/// assert!(!set.contains(Permission::BanMembers));
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[display("{bits:#x}")]
pub struct PermissionSet {
    bits: u64,
}

impl PermissionSet {
    /// The empty set.
    pub fn empty() -> Self {
        Self { bits: 0 }
    }

    /// Build a set from raw Discord permission bits.
    pub fn from_bits(bits: u64) -> Self {
        Self { bits }
    }

    /// Build a set from a slice of known permissions.
    pub fn from_permissions(perms: &[Permission]) -> Self {
        let bits = perms.iter().fold(0, |acc, p| acc | p.bit());
        Self { bits }
    }

    /// The bits a channel overwrite toggles: view, send, connect, speak.
    ///
    /// An `allow` overwrite grants all four; a `deny` overwrite withholds
    /// all four. Text channels simply never act on connect/speak.
    pub fn channel_bundle() -> Self {
        Self::from_permissions(&[
            Permission::ViewChannel,
            Permission::SendMessages,
            Permission::Connect,
            Permission::Speak,
        ])
    }

    /// The raw bitfield.
    pub fn bits(self) -> u64 {
        self.bits
    }

    /// Add a permission to the set.
    pub fn insert(&mut self, perm: Permission) {
        self.bits |= perm.bit();
    }

    /// Remove a permission from the set.
    pub fn remove(&mut self, perm: Permission) {
        self.bits &= !perm.bit();
    }

    /// Whether the set holds the permission.
    pub fn contains(self, perm: Permission) -> bool {
        self.bits & perm.bit() != 0
    }

    /// Union with the given permissions.
    pub fn with(self, perms: &[Permission]) -> Self {
        Self {
            bits: self.bits | Self::from_permissions(perms).bits,
        }
    }

    /// Difference with the given permissions.
    pub fn without(self, perms: &[Permission]) -> Self {
        Self {
            bits: self.bits & !Self::from_permissions(perms).bits,
        }
    }
}

/// Parse a comma-separated permission list against the whitelist.
///
/// Unknown names are skipped with a warning; the caller decides whether an
/// entirely-unknown list is an error. Order is preserved, duplicates are
/// kept (they are harmless under bitwise union).
pub fn parse_permission_list(raw: &str) -> Vec<Permission> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .filter_map(|name| match Permission::from_str(name) {
            Ok(perm) => Some(perm),
            Err(_) => {
                warn!(permission = name, "Skipping unknown permission name");
                None
            }
        })
        .collect()
}
