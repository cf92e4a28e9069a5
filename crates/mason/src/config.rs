//! Process configuration.

use mason_error::{ConfigError, MasonResult};

/// Environment variable holding the Discord bot token.
pub const DISCORD_TOKEN_VAR: &str = "DISCORD_TOKEN";
/// Environment variable holding the service-account credential JSON blob.
pub const SHEETS_CREDS_VAR: &str = "SHEETS_CREDS_JSON";
/// Environment variable holding the queue spreadsheet's display title.
pub const SHEET_NAME_VAR: &str = "SHEET_NAME";

/// Configuration for the bot process, read once at startup.
///
/// Missing or empty values are fatal: the process reports the fault and
/// exits before connecting to either service.
#[derive(Debug, Clone)]
pub struct MasonConfig {
    /// Discord bot token.
    pub discord_token: String,
    /// Service-account credential blob (JSON).
    pub sheets_creds_json: String,
    /// Display title of the queue spreadsheet.
    pub sheet_name: String,
}

impl MasonConfig {
    /// Read configuration from the environment.
    pub fn from_env() -> MasonResult<Self> {
        Ok(Self {
            discord_token: required(DISCORD_TOKEN_VAR)?,
            sheets_creds_json: required(SHEETS_CREDS_VAR)?,
            sheet_name: required(SHEET_NAME_VAR)?,
        })
    }
}

fn required(var: &str) -> MasonResult<String> {
    let value = std::env::var(var)
        .map_err(|_| ConfigError::new(format!("{var} environment variable not set")))?;
    if value.trim().is_empty() {
        return Err(ConfigError::new(format!("{var} is empty")).into());
    }
    Ok(value)
}
