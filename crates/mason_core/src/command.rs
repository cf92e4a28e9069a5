//! The command tagged union and row-to-command parsing.
//!
//! Every queue row maps to exactly one [`Command`] variant, validated here
//! before the processor touches the platform. The variant chosen for
//! `assign`/`deassign` depends on which columns are populated: a channel
//! name selects the per-channel overwrite form, a permission list selects
//! the guild-wide role form.

use crate::{Access, ChannelKind, Permission, QueueRow, parse_permission_list};
use mason_error::{RowError, RowErrorKind, RowResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The closed set of queue actions.
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
pub enum Action {
    /// Provision a category/channel.
    Create,
    /// Remove a channel or a whole category.
    Delete,
    /// Grant permission state.
    Assign,
    /// Revoke permission state.
    Deassign,
}

/// An optional role overwrite applied to a freshly created channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverwriteSpec {
    /// Role name the overwrite targets.
    pub role: String,
    /// Whether the overwrite allows or denies the channel bits.
    pub access: Access,
}

/// One interpreted unit of work against a community.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Ensure the category exists and create a channel inside it.
    CreateChannel {
        /// Category to hold the channel, created on demand.
        category: String,
        /// Channel name.
        name: String,
        /// Channel kind.
        kind: ChannelKind,
        /// Optional role overwrite set on the new channel.
        grant: Option<OverwriteSpec>,
    },
    /// Delete the first channel matching the name; no-op when absent.
    DeleteChannel {
        /// Channel name.
        name: String,
    },
    /// Delete every channel in the category, then the category itself;
    /// no-op when the category is absent.
    DeleteCategory {
        /// Category name.
        category: String,
    },
    /// Set a role's overwrite on a named channel.
    AssignChannelPermission {
        /// Channel name.
        channel: String,
        /// Role name.
        role: String,
        /// Allow or deny; an empty Permission cell defaults to allow.
        access: Access,
    },
    /// Clear a role's overwrite on a named channel.
    DeassignChannelPermission {
        /// Channel name.
        channel: String,
        /// Role name.
        role: String,
    },
    /// Add the listed permissions to a role's guild-wide set.
    AssignRolePermissions {
        /// Role name.
        role: String,
        /// Whitelisted permissions to grant.
        permissions: Vec<Permission>,
    },
    /// Remove the listed permissions from a role's guild-wide set.
    DeassignRolePermissions {
        /// Role name.
        role: String,
        /// Whitelisted permissions to revoke.
        permissions: Vec<Permission>,
    },
}

fn require(action: Action, field: &str, value: &str) -> RowResult<String> {
    if value.is_empty() {
        Err(RowError::new(RowErrorKind::MissingField {
            action: action.to_string(),
            field: field.to_string(),
        }))
    } else {
        Ok(value.to_string())
    }
}

fn parse_access(raw: &str) -> RowResult<Access> {
    if raw.is_empty() {
        return Ok(Access::Allow);
    }
    Access::from_str(raw).map_err(|_| RowError::new(RowErrorKind::UnsupportedAccess(raw.to_string())))
}

impl Command {
    /// Interpret a typed row as a command.
    ///
    /// # Errors
    ///
    /// Returns a [`RowError`] when the action is unknown, a required field
    /// is empty, the channel type is unsupported, the Permission cell is
    /// neither allow nor deny, or a permission list contains no known
    /// names at all.
    ///
    /// # Examples
    ///
    /// ```
    /// use mason_core::{ChannelKind, Command, QueueRow};
    /// use std::collections::HashMap;
    ///
    /// let cells = HashMap::from([
    ///     ("Action".to_string(), "create".to_string()),
    ///     ("Category".to_string(), "Events".to_string()),
    ///     ("Channel Name".to_string(), "town-hall".to_string()),
    ///     ("Type".to_string(), "text".to_string()),
    ///     ("Status".to_string(), "pending".to_string()),
    /// ]);
    /// let row = QueueRow::from_cells(2, &cells);
    /// let command = Command::from_row(&row).unwrap();
    /// assert!(matches!(
    ///     command,
    ///     Command::CreateChannel { kind: ChannelKind::Text, .. }
    /// ));
    /// ```
    pub fn from_row(row: &QueueRow) -> RowResult<Self> {
        let action = Action::from_str(&row.action)
            .map_err(|_| RowError::new(RowErrorKind::UnknownAction(row.action.clone())))?;

        match action {
            Action::Create => {
                let category = require(action, "Category", &row.category)?;
                let name = require(action, "Channel Name", &row.channel_name)?;
                let kind_raw = require(action, "Type", &row.channel_type)?;
                let kind = ChannelKind::from_str(&kind_raw).map_err(|_| {
                    RowError::new(RowErrorKind::UnsupportedChannelType(kind_raw.clone()))
                })?;
                // Role and Permission travel as a pair; a lone value is ignored.
                let grant = if !row.role.is_empty() && !row.access.is_empty() {
                    Some(OverwriteSpec {
                        role: row.role.clone(),
                        access: parse_access(&row.access)?,
                    })
                } else {
                    None
                };
                Ok(Command::CreateChannel {
                    category,
                    name,
                    kind,
                    grant,
                })
            }
            Action::Delete => {
                if !row.channel_name.is_empty() {
                    Ok(Command::DeleteChannel {
                        name: row.channel_name.clone(),
                    })
                } else {
                    let category = require(action, "Category", &row.category)?;
                    Ok(Command::DeleteCategory { category })
                }
            }
            Action::Assign | Action::Deassign => {
                let role = require(action, "Role", &row.role)?;
                if !row.channel_name.is_empty() {
                    let channel = row.channel_name.clone();
                    match action {
                        Action::Assign => Ok(Command::AssignChannelPermission {
                            channel,
                            role,
                            access: parse_access(&row.access)?,
                        }),
                        _ => Ok(Command::DeassignChannelPermission { channel, role }),
                    }
                } else {
                    let list = require(action, "Permissions", &row.permissions)?;
                    let permissions = parse_permission_list(&list);
                    if permissions.is_empty() {
                        return Err(RowError::new(RowErrorKind::EmptyPermissionList(list)));
                    }
                    match action {
                        Action::Assign => Ok(Command::AssignRolePermissions { role, permissions }),
                        _ => Ok(Command::DeassignRolePermissions { role, permissions }),
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn row(pairs: &[(&str, &str)]) -> QueueRow {
        let cells: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        QueueRow::from_cells(2, &cells)
    }

    #[test]
    fn create_row_parses_with_optional_grant() {
        let parsed = Command::from_row(&row(&[
            ("Action", "Create"),
            ("Category", "Events"),
            ("Channel Name", "town-hall"),
            ("Type", "text"),
            ("Role", "Speaker"),
            ("Permission", "allow"),
        ]))
        .unwrap();
        match parsed {
            Command::CreateChannel {
                category,
                name,
                kind,
                grant,
            } => {
                assert_eq!(category, "Events");
                assert_eq!(name, "town-hall");
                assert_eq!(kind, ChannelKind::Text);
                let grant = grant.unwrap();
                assert_eq!(grant.role, "Speaker");
                assert_eq!(grant.access, Access::Allow);
            }
            other => panic!("expected CreateChannel, got {other:?}"),
        }
    }

    #[test]
    fn create_without_role_has_no_grant() {
        let parsed = Command::from_row(&row(&[
            ("Action", "create"),
            ("Category", "Events"),
            ("Channel Name", "lounge"),
            ("Type", "voice"),
        ]))
        .unwrap();
        assert!(matches!(
            parsed,
            Command::CreateChannel {
                kind: ChannelKind::Voice,
                grant: None,
                ..
            }
        ));
    }

    #[test]
    fn create_rejects_unknown_type() {
        let err = Command::from_row(&row(&[
            ("Action", "create"),
            ("Category", "Events"),
            ("Channel Name", "stream"),
            ("Type", "video"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err.kind,
            RowErrorKind::UnsupportedChannelType(ref t) if t == "video"
        ));
    }

    #[test]
    fn delete_prefers_channel_over_category() {
        let parsed = Command::from_row(&row(&[
            ("Action", "delete"),
            ("Category", "Events"),
            ("Channel Name", "town-hall"),
        ]))
        .unwrap();
        assert!(matches!(parsed, Command::DeleteChannel { ref name } if name == "town-hall"));
    }

    #[test]
    fn delete_without_channel_targets_category() {
        let parsed =
            Command::from_row(&row(&[("Action", "delete"), ("Category", "Events")])).unwrap();
        assert!(matches!(parsed, Command::DeleteCategory { ref category } if category == "Events"));
    }

    #[test]
    fn delete_with_nothing_named_is_invalid() {
        let err = Command::from_row(&row(&[("Action", "delete")])).unwrap_err();
        assert!(matches!(err.kind, RowErrorKind::MissingField { .. }));
    }

    #[test]
    fn assign_with_channel_selects_overwrite_variant() {
        let parsed = Command::from_row(&row(&[
            ("Action", "assign"),
            ("Role", "Moderator"),
            ("Channel Name", "town-hall"),
            ("Permission", "deny"),
        ]))
        .unwrap();
        assert!(matches!(
            parsed,
            Command::AssignChannelPermission {
                access: Access::Deny,
                ..
            }
        ));
    }

    #[test]
    fn assign_with_list_selects_role_variant() {
        let parsed = Command::from_row(&row(&[
            ("Action", "assign"),
            ("Role", "Moderator"),
            ("Permissions", "kick_members,ban_members"),
        ]))
        .unwrap();
        match parsed {
            Command::AssignRolePermissions { role, permissions } => {
                assert_eq!(role, "Moderator");
                assert_eq!(
                    permissions,
                    vec![Permission::KickMembers, Permission::BanMembers]
                );
            }
            other => panic!("expected AssignRolePermissions, got {other:?}"),
        }
    }

    #[test]
    fn assign_list_of_only_unknown_names_is_invalid() {
        let err = Command::from_row(&row(&[
            ("Action", "assign"),
            ("Role", "Moderator"),
            ("Permissions", "teleport, fly"),
        ]))
        .unwrap_err();
        assert!(matches!(err.kind, RowErrorKind::EmptyPermissionList(_)));
    }

    #[test]
    fn deassign_requires_role() {
        let err = Command::from_row(&row(&[
            ("Action", "deassign"),
            ("Channel Name", "town-hall"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err.kind,
            RowErrorKind::MissingField { ref field, .. } if field == "Role"
        ));
    }

    #[test]
    fn unknown_action_is_rejected() {
        let err = Command::from_row(&row(&[("Action", "rename")])).unwrap_err();
        assert!(matches!(err.kind, RowErrorKind::UnknownAction(ref a) if a == "rename"));
    }
}
