//! The chat-platform seam.

use async_trait::async_trait;
use mason_core::{Access, ChannelKind, PermissionSet};
use mason_error::DiscordResult;

/// A community (guild) the bot belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommunityInfo {
    /// Platform id.
    pub id: u64,
    /// Display name, used in log context.
    pub name: String,
}

/// What a channel node is, as far as the queue cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelNodeKind {
    /// Text channel.
    Text,
    /// Voice channel.
    Voice,
    /// Category container.
    Category,
    /// Anything else the platform models as a channel.
    Other,
}

impl From<ChannelKind> for ChannelNodeKind {
    fn from(kind: ChannelKind) -> Self {
        match kind {
            ChannelKind::Text => ChannelNodeKind::Text,
            ChannelKind::Voice => ChannelNodeKind::Voice,
        }
    }
}

/// A role's explicit overwrite on a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverwriteRecord {
    /// Role the overwrite targets.
    pub role_id: u64,
    /// Explicitly allowed bits.
    pub allow: PermissionSet,
    /// Explicitly denied bits.
    pub deny: PermissionSet,
}

/// Snapshot of one channel node in a community.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRecord {
    /// Platform id.
    pub id: u64,
    /// Channel name.
    pub name: String,
    /// Node kind.
    pub kind: ChannelNodeKind,
    /// Owning category, when grouped.
    pub parent_id: Option<u64>,
    /// Role overwrites currently set on the channel.
    pub overwrites: Vec<OverwriteRecord>,
}

/// Snapshot of one role in a community.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRecord {
    /// Platform id.
    pub id: u64,
    /// Role name.
    pub name: String,
    /// Guild-wide permission set.
    pub permissions: PermissionSet,
}

/// Mutating access to a chat platform's communities.
///
/// Categories are channels to the platform, so category deletion goes
/// through [`ChatHost::delete_channel`] with a category id; the processor
/// owns the child-then-parent ordering.
#[async_trait]
pub trait ChatHost: Send + Sync {
    /// Enumerate the communities the bot is currently a member of.
    async fn communities(&self) -> DiscordResult<Vec<CommunityInfo>>;

    /// Snapshot every channel node in a community.
    async fn channels(&self, community: u64) -> DiscordResult<Vec<ChannelRecord>>;

    /// Snapshot every role in a community.
    async fn roles(&self, community: u64) -> DiscordResult<Vec<RoleRecord>>;

    /// Create a category and return its record.
    async fn create_category(&self, community: u64, name: &str) -> DiscordResult<ChannelRecord>;

    /// Create a channel, optionally inside a category.
    async fn create_channel(
        &self,
        community: u64,
        name: &str,
        kind: ChannelKind,
        category: Option<u64>,
    ) -> DiscordResult<ChannelRecord>;

    /// Delete a channel node (category nodes included).
    async fn delete_channel(&self, community: u64, channel: u64) -> DiscordResult<()>;

    /// Set a role's overwrite on a channel to the standard access bundle,
    /// allowed or denied.
    async fn set_overwrite(
        &self,
        community: u64,
        channel: u64,
        role: u64,
        access: Access,
    ) -> DiscordResult<()>;

    /// Clear a role's overwrite on a channel. Clearing an absent overwrite
    /// is a platform no-op.
    async fn clear_overwrite(&self, community: u64, channel: u64, role: u64) -> DiscordResult<()>;

    /// Replace a role's guild-wide permission set.
    async fn set_role_permissions(
        &self,
        community: u64,
        role: u64,
        permissions: PermissionSet,
    ) -> DiscordResult<()>;
}
