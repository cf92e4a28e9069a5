//! Discord gateway client setup and lifecycle.
//!
//! The gateway connection exists to know which communities the bot is in
//! and to share its HTTP handle; all queue work happens on the scheduler
//! task spawned when the session first reports ready.

use crate::MasonConfig;
use mason_error::{DiscordError, DiscordErrorKind, MasonResult};
use mason_queue::{QueueProcessor, Scheduler};
use mason_sheets::GoogleSheetsClient;
use mason_social::SerenityHost;
use serenity::async_trait;
use serenity::client::{Client, Context, EventHandler};
use serenity::model::gateway::{GatewayIntents, Ready};
use std::sync::Mutex;
use tracing::{debug, info, instrument};

/// Gateway event handler that launches the queue scheduler on first ready.
struct ReadyHandler {
    /// Taken by the first ready event; a resumed session must not spawn a
    /// second scheduler.
    store: Mutex<Option<GoogleSheetsClient>>,
}

impl ReadyHandler {
    fn new(store: GoogleSheetsClient) -> Self {
        Self {
            store: Mutex::new(Some(store)),
        }
    }

    /// Gateway intents the bot needs: guild membership only. The queue
    /// never reads messages or voice state.
    fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS
    }
}

#[async_trait]
impl EventHandler for ReadyHandler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(
            user = %ready.user.name,
            guilds = ready.guilds.len(),
            "Gateway session ready"
        );

        let store = self.store.lock().ok().and_then(|mut guard| guard.take());
        let Some(store) = store else {
            debug!("Scheduler already running; ignoring repeated ready");
            return;
        };

        let host = SerenityHost::with_http_client(ctx.http.clone());
        let processor = QueueProcessor::new(store, host);
        tokio::spawn(Scheduler::new(processor).run());
    }
}

/// The Mason gateway client.
///
/// Owns the serenity client; the scheduler task is spawned by the ready
/// handler with a host sharing this client's HTTP handle.
pub struct MasonBot {
    client: Client,
}

impl MasonBot {
    /// Build the gateway client.
    ///
    /// # Errors
    ///
    /// Returns a connection error when the serenity client fails to
    /// initialize (an invalid token surfaces here).
    #[instrument(skip(config, store), fields(sheet = %config.sheet_name))]
    pub async fn new(config: &MasonConfig, store: GoogleSheetsClient) -> MasonResult<Self> {
        info!("Initializing Mason Discord client");

        let handler = ReadyHandler::new(store);
        let client = Client::builder(&config.discord_token, ReadyHandler::intents())
            .event_handler(handler)
            .await
            .map_err(|e| {
                DiscordError::new(DiscordErrorKind::ConnectionFailed(format!(
                    "Failed to build client: {e}"
                )))
            })?;

        Ok(Self { client })
    }

    /// Start the gateway connection.
    ///
    /// Blocks until the bot shuts down or hits a fatal gateway error.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> MasonResult<()> {
        info!("Starting gateway connection");

        self.client.start().await.map_err(|e| {
            DiscordError::new(DiscordErrorKind::ConnectionFailed(format!(
                "Client error: {e}"
            )))
        })?;

        Ok(())
    }
}
