//! Built-in slash commands. Every handler answers from local state or
//! the track cache; replies are localized through the locale catalog.

mod achievements;
mod admin;
mod info;
mod language;
mod registry;
mod search;

#[cfg(test)]
mod tests;

pub use registry::{definitions, ephemeral_names};

use encore_channels::LogLevel;
use encore_core::config::Config;
use encore_core::message::{Embed, IncomingCommand};
use encore_locales::LocaleCatalog;
use encore_store::{AchievementStore, GuildLangStore};
use encore_tracks::TracksClient;
use std::path::Path;
use std::time::Instant;

/// Accent color for reply embeds.
pub(crate) const EMBED_COLOR: u32 = 0x5865f2;

/// Grouped context for command execution.
pub struct CommandContext<'a> {
    pub catalog: &'a LocaleCatalog,
    pub guild_langs: &'a GuildLangStore,
    pub achievements: &'a AchievementStore,
    pub tracks: &'a TracksClient,
    pub config: &'a Config,
    pub locales_dir: &'a Path,
    pub uptime: &'a Instant,
}

/// What the process should do once the reply is out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitAction {
    /// Exit nonzero so the supervisor brings the bot back up.
    Restart,
    /// Exit zero and stay down.
    Shutdown,
}

/// Reply content produced by a handler.
#[derive(Debug, Clone, Default)]
pub struct CommandReply {
    pub content: String,
    pub embeds: Vec<Embed>,
}

impl CommandReply {
    /// Plain text reply.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            embeds: Vec::new(),
        }
    }

    /// Embed-only reply.
    pub fn embed(embed: Embed) -> Self {
        Self {
            content: String::new(),
            embeds: vec![embed],
        }
    }
}

/// Everything a dispatched command wants done: the reply itself, an
/// optional audit line for the sync log mirror, and an optional exit
/// request.
pub struct Dispatch {
    pub reply: CommandReply,
    pub audit: Option<(LogLevel, String)>,
    pub exit: Option<ExitAction>,
}

impl From<CommandReply> for Dispatch {
    fn from(reply: CommandReply) -> Self {
        Self {
            reply,
            audit: None,
            exit: None,
        }
    }
}

/// Known slash commands.
pub enum Command {
    Ping,
    About,
    Credits,
    Language,
    Search,
    Achievements,
    SyncLocales,
    System,
}

impl Command {
    /// Parse a command from its registered name. Returns `None` for
    /// names no handler answers to.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "ping" => Some(Self::Ping),
            "about" => Some(Self::About),
            "credits" => Some(Self::Credits),
            "language" => Some(Self::Language),
            "search" => Some(Self::Search),
            "achievements" => Some(Self::Achievements),
            "sync-locales" => Some(Self::SyncLocales),
            "system" => Some(Self::System),
            _ => None,
        }
    }
}

/// Handle a command. The guild's language is resolved once, up front,
/// and passed to every handler.
pub async fn handle(
    cmd: Command,
    incoming: &IncomingCommand,
    ctx: &CommandContext<'_>,
) -> Dispatch {
    let lang = ctx.guild_langs.get(incoming.guild_id.as_deref());
    match cmd {
        Command::Ping => info::handle_ping(ctx, &lang).into(),
        Command::About => info::handle_about(ctx, &lang).into(),
        Command::Credits => info::handle_credits(ctx, &lang).into(),
        Command::Language => language::handle_language(incoming, ctx, &lang).into(),
        Command::Search => search::handle_search(incoming, ctx, &lang).await.into(),
        Command::Achievements => achievements::handle_achievements(incoming, ctx, &lang).into(),
        Command::SyncLocales => admin::handle_sync_locales(incoming, ctx, &lang),
        Command::System => admin::handle_system(incoming, ctx, &lang),
    }
}
