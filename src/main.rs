mod commands;
mod gateway;
mod init;

use clap::{Parser, Subcommand};
use encore_channels::{DiscordChannel, LogWebhook};
use encore_core::config::{self, shellexpand, Config};
use encore_locales::{
    bootstrap, sync_all, LocaleCatalog, MergePolicy, SyncOptions, DEFAULT_BOOTSTRAP_CODES,
};
use encore_store::{AchievementStore, GuildLangStore};
use encore_tracks::TracksClient;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "encore",
    version,
    about = "Encore — Fortnite Festival companion bot for Discord"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot.
    Start,
    /// Check configuration, locale, and store health.
    Status,
    /// Register the slash commands with Discord.
    Deploy,
    /// Remove every registered slash command.
    ClearCommands,
    /// Merge new canonical keys into the target locale files.
    Sync {
        /// Only sync this language code.
        #[arg(long)]
        language: Option<String>,
        /// Drop keys that no longer exist in the canonical file.
        #[arg(long)]
        prune: bool,
        /// Overwrite translated values with canonical text.
        #[arg(long)]
        force: bool,
        /// Report changes without writing anything.
        #[arg(long)]
        dry_run: bool,
    },
    /// Create locale files for new languages from the canonical file.
    Bootstrap {
        /// Language codes to create. Empty uses the built-in list.
        codes: Vec<String>,
        /// Replace files that already exist.
        #[arg(long)]
        overwrite: bool,
    },
    /// Interactive setup wizard.
    Init,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(&cli.config)?;

    // Log to a rolling daily file when a log dir is configured,
    // stdout otherwise.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.encore.log_level));
    let _log_guard = if cfg.encore.log_dir.is_empty() {
        tracing_subscriber::fmt().with_env_filter(filter).init();
        None
    } else {
        let appender =
            tracing_appender::rolling::daily(shellexpand(&cfg.encore.log_dir), "encore.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(false)
            .init();
        Some(guard)
    };

    match cli.command {
        Commands::Start => {
            let action = start(cfg).await?;
            if action == commands::ExitAction::Restart {
                // Nonzero exit tells the supervisor to start us again.
                // The log guard must flush before the process dies.
                info!("exiting for restart");
                drop(_log_guard);
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Status => status(&cli.config, &cfg),
        Commands::Deploy => {
            require_discord(&cfg)?;
            let channel = DiscordChannel::new(
                cfg.discord.clone(),
                cfg.interactions.clone(),
                commands::ephemeral_names(),
            );
            let count = channel.register_commands(&commands::definitions()).await?;
            println!("Registered {count} commands.");
            Ok(())
        }
        Commands::ClearCommands => {
            require_discord(&cfg)?;
            let channel = DiscordChannel::new(
                cfg.discord.clone(),
                cfg.interactions.clone(),
                commands::ephemeral_names(),
            );
            channel.clear_commands().await?;
            println!("Cleared all commands.");
            Ok(())
        }
        Commands::Sync {
            language,
            prune,
            force,
            dry_run,
        } => {
            let dir = locales_dir(&cfg);
            config::install_bundled_locales(&cfg.locales.dir);
            let options = SyncOptions {
                policy: MergePolicy { prune, force },
                dry_run,
                only: language,
            };
            let report = sync_all(&dir, &options)?;
            println!(
                "Locale sync{} complete",
                if report.dry_run { " (dry run)" } else { "" }
            );
            println!("  scanned:   {}", report.scanned);
            println!("  updated:   {}", report.updated);
            println!("  unchanged: {}", report.unchanged);
            println!("  errors:    {}", report.errors);
            Ok(())
        }
        Commands::Bootstrap { codes, overwrite } => {
            let dir = locales_dir(&cfg);
            config::install_bundled_locales(&cfg.locales.dir);
            let codes: Vec<&str> = if codes.is_empty() {
                DEFAULT_BOOTSTRAP_CODES.to_vec()
            } else {
                codes.iter().map(String::as_str).collect()
            };
            let report = bootstrap(&dir, &codes, overwrite)?;
            println!("Bootstrap complete");
            println!("  created:     {}", report.created);
            println!("  skipped:     {}", report.skipped);
            println!("  overwritten: {}", report.overwritten);
            Ok(())
        }
        Commands::Init => init::run(&cli.config),
    }
}

/// Expanded locale directory path.
fn locales_dir(cfg: &Config) -> PathBuf {
    PathBuf::from(shellexpand(&cfg.locales.dir))
}

/// Bail early when the Discord credentials a command needs are absent.
fn require_discord(cfg: &Config) -> anyhow::Result<()> {
    if cfg.discord.bot_token.is_empty() || cfg.discord.application_id.is_empty() {
        anyhow::bail!(
            "Discord is not configured. Set bot_token and application_id \
             in config.toml (run 'encore init' to generate one)."
        );
    }
    Ok(())
}

async fn start(cfg: Config) -> anyhow::Result<commands::ExitAction> {
    require_discord(&cfg)?;
    if cfg.discord.public_key.is_empty() {
        anyhow::bail!(
            "discord.public_key is empty. Interactions cannot be verified without it."
        );
    }

    config::install_bundled_locales(&cfg.locales.dir);
    let dir = locales_dir(&cfg);
    let catalog = Arc::new(LocaleCatalog::load(&dir)?);

    let data_dir = PathBuf::from(shellexpand(&cfg.encore.data_dir));
    std::fs::create_dir_all(&data_dir)?;
    let guild_langs = GuildLangStore::new(
        data_dir.join("languages.json"),
        cfg.locales.default_language.clone(),
    );
    let achievements = AchievementStore::new(
        data_dir.join("achievements.json"),
        data_dir.join("progress.json"),
    );

    let tracks = TracksClient::new(&cfg.tracks)?;
    let channel = Arc::new(DiscordChannel::new(
        cfg.discord.clone(),
        cfg.interactions.clone(),
        commands::ephemeral_names(),
    ));
    let webhook = LogWebhook::new(cfg.log_webhooks.clone());

    println!("Encore — starting up...");
    let gw = gateway::Gateway::new(
        catalog,
        guild_langs,
        achievements,
        tracks,
        channel,
        webhook,
        cfg,
        dir,
    );

    gw.run().await
}

fn status(config_path: &str, cfg: &Config) -> anyhow::Result<()> {
    println!("Encore — Status Check\n");
    println!("Config: {config_path}");
    println!("Data dir: {}", shellexpand(&cfg.encore.data_dir));
    println!();

    println!(
        "  discord: {}",
        if !cfg.discord.bot_token.is_empty()
            && !cfg.discord.application_id.is_empty()
            && !cfg.discord.public_key.is_empty()
        {
            "configured"
        } else if cfg.discord.bot_token.is_empty() {
            "missing bot_token"
        } else {
            "missing application_id or public_key"
        }
    );
    println!(
        "  interactions: {}:{}",
        cfg.interactions.host, cfg.interactions.port
    );

    let dir = locales_dir(cfg);
    match LocaleCatalog::load(&dir) {
        Ok(catalog) => {
            let codes: Vec<&str> = catalog.codes();
            println!(
                "  locales: {} languages in {} ({})",
                catalog.len(),
                dir.display(),
                codes.join(", ")
            );
        }
        Err(e) => println!("  locales: {e}"),
    }

    let data_dir = PathBuf::from(shellexpand(&cfg.encore.data_dir));
    let achievements = AchievementStore::new(
        data_dir.join("achievements.json"),
        data_dir.join("progress.json"),
    );
    match achievements.achievements() {
        Ok(defs) => println!("  achievements: {} defined", defs.len()),
        Err(e) => println!("  achievements: {e}"),
    }

    println!(
        "  tracks: {} (cache {}m, timeout {}s)",
        cfg.tracks.data_url, cfg.tracks.cache_ttl_mins, cfg.tracks.fetch_timeout_secs
    );
    Ok(())
}
