//! Serenity-backed Discord host.

use crate::{
    ChannelNodeKind, ChannelRecord, ChatHost, CommunityInfo, OverwriteRecord, RoleRecord,
};
use async_trait::async_trait;
use mason_core::{Access, ChannelKind, PermissionSet};
use mason_error::{DiscordError, DiscordErrorKind, DiscordResult};
use serenity::builder::{CreateChannel, EditRole};
use serenity::http::Http;
use serenity::model::channel::{
    ChannelType, GuildChannel, PermissionOverwrite, PermissionOverwriteType,
};
use serenity::model::id::{ChannelId, GuildId, RoleId};
use serenity::model::permissions::Permissions;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// [`ChatHost`] implementation over serenity's HTTP client.
///
/// Holds only an `Arc<Http>`, so it can either run standalone from a bot
/// token or share the gateway client's handle and its rate-limit state.
pub struct SerenityHost {
    http: Arc<Http>,
}

impl SerenityHost {
    /// Create a standalone host from a bot token.
    #[instrument(skip(token), fields(token_len = token.as_ref().len()))]
    pub fn new(token: impl AsRef<str>) -> Self {
        info!("Creating standalone Discord host");
        Self {
            http: Arc::new(Http::new(token.as_ref())),
        }
    }

    /// Create a host sharing an existing HTTP client.
    ///
    /// Use this to share the client with the running gateway connection,
    /// coordinating rate limits and reducing connections.
    pub fn with_http_client(http: Arc<Http>) -> Self {
        Self { http }
    }

    fn convert_channel(channel: GuildChannel) -> ChannelRecord {
        let kind = match channel.kind {
            ChannelType::Text => ChannelNodeKind::Text,
            ChannelType::Voice => ChannelNodeKind::Voice,
            ChannelType::Category => ChannelNodeKind::Category,
            _ => ChannelNodeKind::Other,
        };
        let overwrites = channel
            .permission_overwrites
            .iter()
            .filter_map(|overwrite| match overwrite.kind {
                PermissionOverwriteType::Role(role_id) => Some(OverwriteRecord {
                    role_id: role_id.get(),
                    allow: PermissionSet::from_bits(overwrite.allow.bits()),
                    deny: PermissionSet::from_bits(overwrite.deny.bits()),
                }),
                _ => None,
            })
            .collect();
        ChannelRecord {
            id: channel.id.get(),
            name: channel.name.clone(),
            kind,
            parent_id: channel.parent_id.map(|id| id.get()),
            overwrites,
        }
    }

    fn bundle_overwrite(role: u64, access: Access) -> PermissionOverwrite {
        let bundle = Permissions::from_bits_truncate(PermissionSet::channel_bundle().bits());
        let (allow, deny) = match access {
            Access::Allow => (bundle, Permissions::empty()),
            Access::Deny => (Permissions::empty(), bundle),
        };
        PermissionOverwrite {
            allow,
            deny,
            kind: PermissionOverwriteType::Role(RoleId::new(role)),
        }
    }
}

#[async_trait]
impl ChatHost for SerenityHost {
    #[instrument(skip(self))]
    async fn communities(&self) -> DiscordResult<Vec<CommunityInfo>> {
        let guilds = self
            .http
            .get_guilds(None, None)
            .await
            .map_err(|e| DiscordError::new(DiscordErrorKind::ApiError(e.to_string())))?;

        Ok(guilds
            .into_iter()
            .map(|guild| CommunityInfo {
                id: guild.id.get(),
                name: guild.name,
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn channels(&self, community: u64) -> DiscordResult<Vec<ChannelRecord>> {
        let channels = self
            .http
            .get_channels(GuildId::new(community))
            .await
            .map_err(|e| DiscordError::new(DiscordErrorKind::ApiError(e.to_string())))?;

        debug!(count = channels.len(), "Fetched channel snapshot");
        Ok(channels.into_iter().map(Self::convert_channel).collect())
    }

    #[instrument(skip(self))]
    async fn roles(&self, community: u64) -> DiscordResult<Vec<RoleRecord>> {
        let roles = self
            .http
            .get_guild_roles(GuildId::new(community))
            .await
            .map_err(|e| DiscordError::new(DiscordErrorKind::ApiError(e.to_string())))?;

        Ok(roles
            .into_iter()
            .map(|role| RoleRecord {
                id: role.id.get(),
                name: role.name.clone(),
                permissions: PermissionSet::from_bits(role.permissions.bits()),
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn create_category(&self, community: u64, name: &str) -> DiscordResult<ChannelRecord> {
        let builder = CreateChannel::new(name).kind(ChannelType::Category);
        let channel = GuildId::new(community)
            .create_channel(&self.http, builder)
            .await
            .map_err(|e| DiscordError::new(DiscordErrorKind::ApiError(e.to_string())))?;

        info!(category = name, "Created category");
        Ok(Self::convert_channel(channel))
    }

    #[instrument(skip(self))]
    async fn create_channel(
        &self,
        community: u64,
        name: &str,
        kind: ChannelKind,
        category: Option<u64>,
    ) -> DiscordResult<ChannelRecord> {
        let channel_type = match kind {
            ChannelKind::Text => ChannelType::Text,
            ChannelKind::Voice => ChannelType::Voice,
        };
        let mut builder = CreateChannel::new(name).kind(channel_type);
        if let Some(parent) = category {
            builder = builder.category(ChannelId::new(parent));
        }

        let channel = GuildId::new(community)
            .create_channel(&self.http, builder)
            .await
            .map_err(|e| DiscordError::new(DiscordErrorKind::ApiError(e.to_string())))?;

        info!(channel = name, kind = %kind, "Created channel");
        Ok(Self::convert_channel(channel))
    }

    #[instrument(skip(self))]
    async fn delete_channel(&self, community: u64, channel: u64) -> DiscordResult<()> {
        ChannelId::new(channel)
            .delete(&self.http)
            .await
            .map_err(|e| DiscordError::new(DiscordErrorKind::ApiError(e.to_string())))?;

        info!(community, channel, "Deleted channel");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_overwrite(
        &self,
        community: u64,
        channel: u64,
        role: u64,
        access: Access,
    ) -> DiscordResult<()> {
        ChannelId::new(channel)
            .create_permission(&self.http, Self::bundle_overwrite(role, access))
            .await
            .map_err(|e| DiscordError::new(DiscordErrorKind::ApiError(e.to_string())))?;

        info!(community, channel, role, access = %access, "Set channel overwrite");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn clear_overwrite(&self, community: u64, channel: u64, role: u64) -> DiscordResult<()> {
        ChannelId::new(channel)
            .delete_permission(&self.http, PermissionOverwriteType::Role(RoleId::new(role)))
            .await
            .map_err(|e| DiscordError::new(DiscordErrorKind::ApiError(e.to_string())))?;

        info!(community, channel, role, "Cleared channel overwrite");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_role_permissions(
        &self,
        community: u64,
        role: u64,
        permissions: PermissionSet,
    ) -> DiscordResult<()> {
        let builder =
            EditRole::new().permissions(Permissions::from_bits_truncate(permissions.bits()));
        GuildId::new(community)
            .edit_role(&self.http, RoleId::new(role), builder)
            .await
            .map_err(|e| DiscordError::new(DiscordErrorKind::ApiError(e.to_string())))?;

        info!(community, role, permissions = %permissions, "Replaced role permissions");
        Ok(())
    }
}

impl std::fmt::Debug for SerenityHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerenityHost").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundle_overwrite_mirrors_access() {
        let allow = SerenityHost::bundle_overwrite(42, Access::Allow);
        assert!(allow.allow.contains(Permissions::VIEW_CHANNEL));
        assert!(allow.allow.contains(Permissions::SPEAK));
        assert!(allow.deny.is_empty());

        let deny = SerenityHost::bundle_overwrite(42, Access::Deny);
        assert!(deny.allow.is_empty());
        assert!(deny.deny.contains(Permissions::SEND_MESSAGES));
        assert!(deny.deny.contains(Permissions::CONNECT));
        assert!(matches!(deny.kind, PermissionOverwriteType::Role(id) if id.get() == 42));
    }

    #[test]
    fn node_kind_from_channel_kind() {
        assert_eq!(ChannelNodeKind::from(ChannelKind::Text), ChannelNodeKind::Text);
        assert_eq!(
            ChannelNodeKind::from(ChannelKind::Voice),
            ChannelNodeKind::Voice
        );
    }
}
