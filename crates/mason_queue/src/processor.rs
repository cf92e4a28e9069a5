//! The queue processor.

use mason_core::{
    Access, Command, PermissionSet, QueueRow, RowStatus, resolve_status_column,
};
use mason_error::{DiscordError, DiscordErrorKind, MasonResult};
use mason_sheets::SheetStore;
use mason_social::{ChannelNodeKind, ChannelRecord, ChatHost, CommunityInfo, RoleRecord};
use tracing::{debug, error, info, instrument, warn};

/// Counters for one full pass over the queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Rows skipped because their status was not pending.
    pub skipped: usize,
    /// Rows that finished as done.
    pub done: usize,
    /// Rows that finished as error.
    pub errored: usize,
}

/// Interprets queue rows and applies them to every joined community.
///
/// Construction takes the two collaborators explicitly; the processor owns
/// no ambient state and can run against in-memory fakes in tests.
pub struct QueueProcessor<S, H> {
    store: S,
    host: H,
}

impl<S: SheetStore, H: ChatHost> QueueProcessor<S, H> {
    /// Create a processor over a sheet store and a chat host.
    pub fn new(store: S, host: H) -> Self {
        Self { store, host }
    }

    /// Borrow the chat host for direct inspection.
    pub fn host_ref(&self) -> &H {
        &self.host
    }

    /// Consume the processor, returning its collaborators.
    pub fn into_parts(self) -> (S, H) {
        (self.store, self.host)
    }

    /// Run one full pass: every pending row against every community.
    ///
    /// Faults below the row/community level are captured into the row's
    /// terminal status and never abort the pass. A failed row fetch or
    /// community enumeration aborts the pass itself; the scheduler logs it
    /// and waits for the next tick.
    #[instrument(skip(self), fields(rows, communities))]
    pub async fn run_tick(&self) -> MasonResult<TickSummary> {
        let table = self.store.fetch_rows().await?;
        let status_column = resolve_status_column(&table.headers);
        let communities = self.host.communities().await?;

        tracing::Span::current().record("rows", table.rows.len());
        tracing::Span::current().record("communities", communities.len());

        let mut summary = TickSummary::default();
        if communities.is_empty() {
            // Leave rows pending rather than marking work done that never ran.
            warn!("No joined communities; leaving queue untouched");
            summary.skipped = table.rows.len();
            return Ok(summary);
        }
        for sheet_row in &table.rows {
            let row = QueueRow::from_cells(sheet_row.index, &sheet_row.cells);
            if !row.is_pending() {
                summary.skipped += 1;
                continue;
            }

            let outcome = self.process_row(&row, &communities).await;
            match outcome {
                RowStatus::Done => summary.done += 1,
                _ => summary.errored += 1,
            }

            // Last write wins if the sheet was edited mid-pass; the cell is
            // the only coordination point there is.
            if let Err(e) = self
                .store
                .write_cell(row.index, status_column, &outcome.to_string())
                .await
            {
                error!(row = row.index, error = %e, "Failed to write row status");
            }
        }

        Ok(summary)
    }

    /// Interpret one pending row and apply it to every community.
    ///
    /// Returns the terminal status for the row: done only when every
    /// community accepted the command.
    async fn process_row(&self, row: &QueueRow, communities: &[CommunityInfo]) -> RowStatus {
        let command = match Command::from_row(row) {
            Ok(command) => command,
            Err(e) => {
                error!(row = row.index, error = %e, "Rejected malformed row");
                return RowStatus::Error;
            }
        };

        let mut status = RowStatus::Done;
        for community in communities {
            match self.apply(community, &command).await {
                Ok(()) => {
                    info!(
                        community = %community.name,
                        row = row.index,
                        "Applied queue command"
                    );
                }
                Err(e) => {
                    error!(
                        community = %community.name,
                        row = row.index,
                        error = %e,
                        "Queue command failed"
                    );
                    status = RowStatus::Error;
                }
            }
        }
        status
    }

    /// Apply one command to one community.
    #[instrument(skip_all, fields(community = %community.name))]
    async fn apply(&self, community: &CommunityInfo, command: &Command) -> MasonResult<()> {
        match command {
            Command::CreateChannel {
                category,
                name,
                kind,
                grant,
            } => {
                let channels = self.host.channels(community.id).await?;
                let parent = match find_category(&channels, category) {
                    Some(existing) => existing.clone(),
                    None => self.host.create_category(community.id, category).await?,
                };

                let created = self
                    .host
                    .create_channel(community.id, name, *kind, Some(parent.id))
                    .await?;

                if let Some(grant) = grant {
                    let roles = self.host.roles(community.id).await?;
                    let role = find_role(&roles, &grant.role)?;
                    self.host
                        .set_overwrite(community.id, created.id, role.id, grant.access)
                        .await?;
                }
                Ok(())
            }

            Command::DeleteChannel { name } => {
                let channels = self.host.channels(community.id).await?;
                match find_channel(&channels, name) {
                    Some(channel) => self.host.delete_channel(community.id, channel.id).await?,
                    None => {
                        debug!(channel = %name, "Nothing to delete");
                    }
                }
                Ok(())
            }

            Command::DeleteCategory { category } => {
                let channels = self.host.channels(community.id).await?;
                let Some(parent) = find_category(&channels, category) else {
                    debug!(category = %category, "Nothing to delete");
                    return Ok(());
                };
                for child in channels.iter().filter(|c| c.parent_id == Some(parent.id)) {
                    self.host.delete_channel(community.id, child.id).await?;
                }
                self.host.delete_channel(community.id, parent.id).await?;
                Ok(())
            }

            Command::AssignChannelPermission {
                channel,
                role,
                access,
            } => {
                let channels = self.host.channels(community.id).await?;
                let target = find_channel(&channels, channel).ok_or_else(|| {
                    DiscordError::new(DiscordErrorKind::ChannelNotFound(channel.clone()))
                })?;
                let roles = self.host.roles(community.id).await?;
                let role = find_role(&roles, role)?;

                if overwrite_matches(target, role.id, *access) {
                    debug!(channel = %target.name, role = %role.name, "Overwrite already in place");
                    return Ok(());
                }
                self.host
                    .set_overwrite(community.id, target.id, role.id, *access)
                    .await?;
                Ok(())
            }

            Command::DeassignChannelPermission { channel, role } => {
                let channels = self.host.channels(community.id).await?;
                let target = find_channel(&channels, channel).ok_or_else(|| {
                    DiscordError::new(DiscordErrorKind::ChannelNotFound(channel.clone()))
                })?;
                let roles = self.host.roles(community.id).await?;
                let role = find_role(&roles, role)?;

                if !target.overwrites.iter().any(|o| o.role_id == role.id) {
                    debug!(channel = %target.name, role = %role.name, "No overwrite to clear");
                    return Ok(());
                }
                self.host
                    .clear_overwrite(community.id, target.id, role.id)
                    .await?;
                Ok(())
            }

            Command::AssignRolePermissions { role, permissions } => {
                let roles = self.host.roles(community.id).await?;
                let role = find_role(&roles, role)?;
                let desired = role.permissions.with(permissions);
                if desired == role.permissions {
                    debug!(role = %role.name, "Permissions already granted");
                    return Ok(());
                }
                self.host
                    .set_role_permissions(community.id, role.id, desired)
                    .await?;
                Ok(())
            }

            Command::DeassignRolePermissions { role, permissions } => {
                let roles = self.host.roles(community.id).await?;
                let role = find_role(&roles, role)?;
                let desired = role.permissions.without(permissions);
                if desired == role.permissions {
                    debug!(role = %role.name, "Permissions already absent");
                    return Ok(());
                }
                self.host
                    .set_role_permissions(community.id, role.id, desired)
                    .await?;
                Ok(())
            }
        }
    }
}

/// First category matching the name, in snapshot order.
fn find_category<'a>(channels: &'a [ChannelRecord], name: &str) -> Option<&'a ChannelRecord> {
    channels
        .iter()
        .find(|c| c.kind == ChannelNodeKind::Category && c.name == name)
}

/// First node matching the name, categories included, in snapshot order.
fn find_channel<'a>(channels: &'a [ChannelRecord], name: &str) -> Option<&'a ChannelRecord> {
    channels.iter().find(|c| c.name == name)
}

fn find_role<'a>(roles: &'a [RoleRecord], name: &str) -> Result<&'a RoleRecord, DiscordError> {
    roles
        .iter()
        .find(|r| r.name == name)
        .ok_or_else(|| DiscordError::new(DiscordErrorKind::RoleNotFound(name.to_string())))
}

/// Whether the role's overwrite on the channel already carries the bundle
/// on the requested side.
fn overwrite_matches(channel: &ChannelRecord, role_id: u64, access: Access) -> bool {
    let bundle = PermissionSet::channel_bundle().bits();
    channel
        .overwrites
        .iter()
        .find(|o| o.role_id == role_id)
        .is_some_and(|o| match access {
            Access::Allow => o.allow.bits() & bundle == bundle,
            Access::Deny => o.deny.bits() & bundle == bundle,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mason_core::Permission;
    use mason_social::OverwriteRecord;

    fn channel(id: u64, name: &str, kind: ChannelNodeKind) -> ChannelRecord {
        ChannelRecord {
            id,
            name: name.to_string(),
            kind,
            parent_id: None,
            overwrites: Vec::new(),
        }
    }

    #[test]
    fn category_lookup_ignores_plain_channels() {
        let channels = vec![
            channel(1, "Events", ChannelNodeKind::Text),
            channel(2, "Events", ChannelNodeKind::Category),
        ];
        assert_eq!(find_category(&channels, "Events").map(|c| c.id), Some(2));
    }

    #[test]
    fn channel_lookup_takes_first_match() {
        let channels = vec![
            channel(7, "general", ChannelNodeKind::Text),
            channel(8, "general", ChannelNodeKind::Voice),
        ];
        assert_eq!(find_channel(&channels, "general").map(|c| c.id), Some(7));
        assert!(find_channel(&channels, "missing").is_none());
    }

    #[test]
    fn overwrite_match_requires_full_bundle_on_requested_side() {
        let mut target = channel(1, "town-hall", ChannelNodeKind::Text);
        target.overwrites.push(OverwriteRecord {
            role_id: 42,
            allow: PermissionSet::channel_bundle(),
            deny: PermissionSet::empty(),
        });
        assert!(overwrite_matches(&target, 42, Access::Allow));
        assert!(!overwrite_matches(&target, 42, Access::Deny));
        assert!(!overwrite_matches(&target, 99, Access::Allow));

        let mut partial = channel(2, "lounge", ChannelNodeKind::Voice);
        partial.overwrites.push(OverwriteRecord {
            role_id: 42,
            allow: PermissionSet::from_permissions(&[Permission::ViewChannel]),
            deny: PermissionSet::empty(),
        });
        assert!(!overwrite_matches(&partial, 42, Access::Allow));
    }
}
