use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

use crate::error::EncoreError;

/// Top-level Encore configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub encore: EncoreConfig,
    #[serde(default)]
    pub discord: DiscordConfig,
    #[serde(default)]
    pub interactions: InteractionsConfig,
    #[serde(default)]
    pub locales: LocalesConfig,
    #[serde(default)]
    pub tracks: TracksConfig,
    #[serde(default)]
    pub log_webhooks: LogWebhooksConfig,
    #[serde(default)]
    pub links: LinksConfig,
}

/// General bot settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncoreConfig {
    #[serde(default = "default_name")]
    pub name: String,
    /// Directory for persistent stores (guild languages, achievements).
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Directory for rolling log files. Empty = stdout only.
    #[serde(default)]
    pub log_dir: String,
}

impl Default for EncoreConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            log_dir: String::new(),
        }
    }
}

/// Discord application credentials and identity.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DiscordConfig {
    #[serde(default)]
    pub bot_token: String,
    #[serde(default)]
    pub application_id: String,
    /// Hex-encoded ed25519 public key for interaction signature checks.
    #[serde(default)]
    pub public_key: String,
    /// Guild for command registration. Empty = register globally.
    #[serde(default)]
    pub guild_id: String,
    /// Users allowed to run owner-gated commands.
    #[serde(default)]
    pub owner_ids: Vec<String>,
    /// Channel receiving locale-sync audit messages. Empty = disabled.
    #[serde(default)]
    pub sync_log_channel_id: String,
}

impl DiscordConfig {
    /// Whether a user may run owner-gated commands.
    pub fn is_owner(&self, user_id: &str) -> bool {
        self.owner_ids.iter().any(|id| id == user_id)
    }
}

/// HTTP server settings for the interactions endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionsConfig {
    #[serde(default = "default_interactions_host")]
    pub host: String,
    #[serde(default = "default_interactions_port")]
    pub port: u16,
}

impl Default for InteractionsConfig {
    fn default() -> Self {
        Self {
            host: default_interactions_host(),
            port: default_interactions_port(),
        }
    }
}

/// Locale catalog settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalesConfig {
    /// Directory of per-language translation files.
    #[serde(default = "default_locales_dir")]
    pub dir: String,
    /// Language served to guilds without an explicit preference.
    #[serde(default = "default_language")]
    pub default_language: String,
}

impl Default for LocalesConfig {
    fn default() -> Self {
        Self {
            dir: default_locales_dir(),
            default_language: default_language(),
        }
    }
}

/// Jam-track dataset settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TracksConfig {
    #[serde(default = "default_tracks_url")]
    pub data_url: String,
    #[serde(default = "default_cache_ttl_mins")]
    pub cache_ttl_mins: u64,
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

impl Default for TracksConfig {
    fn default() -> Self {
        Self {
            data_url: default_tracks_url(),
            cache_ttl_mins: default_cache_ttl_mins(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

/// Discord webhook URLs for the log sink, one per level plus a fallback.
/// Empty URLs disable that level's webhook delivery.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LogWebhooksConfig {
    #[serde(default)]
    pub default_url: String,
    #[serde(default)]
    pub info_url: String,
    #[serde(default)]
    pub success_url: String,
    #[serde(default)]
    pub warn_url: String,
    #[serde(default)]
    pub error_url: String,
    #[serde(default)]
    pub debug_url: String,
}

/// Public links shown by /about and /language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinksConfig {
    #[serde(default)]
    pub support_server: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default = "default_github_url")]
    pub github: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            support_server: String::new(),
            contact: String::new(),
            github: default_github_url(),
        }
    }
}

// --- Default value functions ---

fn default_name() -> String {
    "Encore".to_string()
}
fn default_data_dir() -> String {
    "data".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_interactions_host() -> String {
    "0.0.0.0".to_string()
}
fn default_interactions_port() -> u16 {
    8787
}
fn default_locales_dir() -> String {
    "locales".to_string()
}
fn default_language() -> String {
    "de".to_string()
}
fn default_tracks_url() -> String {
    "https://raw.githubusercontent.com/FNFestival/fnfestival.github.io/main/data/tracks.json"
        .to_string()
}
fn default_cache_ttl_mins() -> u64 {
    15
}
fn default_fetch_timeout_secs() -> u64 {
    12
}
fn default_github_url() -> String {
    "https://github.com/encore-bot/encore".to_string()
}

/// Expand `~` to home directory.
pub fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return format!("{}/{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}

/// Bundled canonical locale, embedded at compile time.
const BUNDLED_EN_LOCALE: &str = include_str!("../../../locales/en.json");

/// Bundled German locale, embedded at compile time.
const BUNDLED_DE_LOCALE: &str = include_str!("../../../locales/de.json");

/// Deploy the bundled locale files to `locales_dir`, creating it if needed.
///
/// Never overwrites existing files so translator edits are preserved.
pub fn install_bundled_locales(locales_dir: &str) {
    let expanded = shellexpand(locales_dir);
    let dir = Path::new(&expanded);
    if let Err(e) = std::fs::create_dir_all(dir) {
        warn!("locales: failed to create {}: {e}", dir.display());
        return;
    }

    for (filename, content) in [("en.json", BUNDLED_EN_LOCALE), ("de.json", BUNDLED_DE_LOCALE)] {
        let dest = dir.join(filename);
        if !dest.exists() {
            if let Err(e) = std::fs::write(&dest, content) {
                warn!("locales: failed to write {}: {e}", dest.display());
            } else {
                info!("locales: deployed bundled {filename}");
            }
        }
    }
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist.
pub fn load(path: &str) -> Result<Config, EncoreError> {
    let path = Path::new(path);
    if !path.exists() {
        tracing::info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| EncoreError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| EncoreError::Config(format!("failed to parse config: {}", e)))?;

    Ok(config)
}
