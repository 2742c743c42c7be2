//! Gateway: the event loop connecting the Discord channel to the
//! command handlers, with audit mirroring and graceful shutdown.

use crate::commands::{self, Command, CommandReply, ExitAction};
use encore_channels::{DiscordChannel, LogLevel, LogWebhook};
use encore_core::config::Config;
use encore_core::message::{IncomingCommand, OutgoingReply};
use encore_core::traits::Channel;
use encore_locales::LocaleCatalog;
use encore_store::{AchievementStore, GuildLangStore};
use encore_tracks::TracksClient;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

pub struct Gateway {
    catalog: Arc<LocaleCatalog>,
    guild_langs: GuildLangStore,
    achievements: AchievementStore,
    tracks: TracksClient,
    channel: Arc<DiscordChannel>,
    webhook: LogWebhook,
    config: Config,
    locales_dir: PathBuf,
    started: Instant,
}

impl Gateway {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        catalog: Arc<LocaleCatalog>,
        guild_langs: GuildLangStore,
        achievements: AchievementStore,
        tracks: TracksClient,
        channel: Arc<DiscordChannel>,
        webhook: LogWebhook,
        config: Config,
        locales_dir: PathBuf,
    ) -> Self {
        Self {
            catalog,
            guild_langs,
            achievements,
            tracks,
            channel,
            webhook,
            config,
            locales_dir,
            started: Instant::now(),
        }
    }

    /// Run until a shutdown signal arrives or a command asks to exit.
    pub async fn run(&self) -> anyhow::Result<ExitAction> {
        let mut rx = self.channel.start().await?;

        info!(
            "Encore gateway running | channel: {} | languages: {} | default: {}",
            self.channel.name(),
            self.catalog.len(),
            self.guild_langs.default_code()
        );
        self.webhook.post(LogLevel::Info, "Encore is online.");

        let exit = loop {
            tokio::select! {
                Some(incoming) = rx.recv() => {
                    if let Some(exit) = self.handle_command(incoming).await {
                        break exit;
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Received shutdown signal");
                    break ExitAction::Shutdown;
                }
            }
        };

        self.shutdown().await;
        Ok(exit)
    }

    /// Dispatch one invocation. Returns the exit request, if the
    /// command made one, after its reply has been delivered.
    async fn handle_command(&self, incoming: IncomingCommand) -> Option<ExitAction> {
        let sub = incoming
            .subcommand
            .as_deref()
            .map(|s| format!(" {s}"))
            .unwrap_or_default();
        info!(
            "[{}] {} ran /{}{sub}",
            incoming.channel, incoming.user_tag, incoming.name
        );

        let Some(cmd) = Command::parse(&incoming.name) else {
            warn!("no handler for command '{}'", incoming.name);
            let lang = self.guild_langs.get(incoming.guild_id.as_deref());
            let content = self.catalog.resolve(&lang, "common.unknown_command");
            self.deliver(&incoming, CommandReply::text(content)).await;
            return None;
        };

        let ctx = commands::CommandContext {
            catalog: &self.catalog,
            guild_langs: &self.guild_langs,
            achievements: &self.achievements,
            tracks: &self.tracks,
            config: &self.config,
            locales_dir: &self.locales_dir,
            uptime: &self.started,
        };
        let dispatch = commands::handle(cmd, &incoming, &ctx).await;

        if let Some((level, line)) = &dispatch.audit {
            self.webhook.post(*level, line);
            let sync_log = &self.config.discord.sync_log_channel_id;
            if !sync_log.is_empty() {
                if let Err(e) = self.channel.post_message(sync_log, line).await {
                    warn!("failed to mirror audit line to {sync_log}: {e}");
                }
            }
        }

        self.deliver(&incoming, dispatch.reply).await;
        dispatch.exit
    }

    async fn deliver(&self, incoming: &IncomingCommand, reply: CommandReply) {
        let outgoing = OutgoingReply {
            reply_token: incoming.reply_token.clone(),
            content: reply.content,
            embeds: reply.embeds,
        };
        if let Err(e) = self.channel.send(outgoing).await {
            error!("failed to deliver reply for /{}: {e}", incoming.name);
            self.webhook.post(
                LogLevel::Error,
                &format!("Reply delivery failed for /{}: {e}", incoming.name),
            );
        }
    }

    async fn shutdown(&self) {
        if let Err(e) = self.channel.stop().await {
            warn!("failed to stop channel {}: {e}", self.channel.name());
        }
        info!("Shutdown complete. Goodbye.");
    }
}
