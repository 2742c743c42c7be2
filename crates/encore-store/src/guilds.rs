//! Per-guild language preference store.

use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::warn;

use encore_core::error::EncoreError;

use crate::jsonfile;

/// Maps guild ids to language codes, persisted as one flat JSON
/// object. Reads degrade to the default language so a lookup can
/// never fail a command.
pub struct GuildLangStore {
    path: PathBuf,
    default_code: String,
}

impl GuildLangStore {
    pub fn new(path: PathBuf, default_code: String) -> Self {
        Self { path, default_code }
    }

    /// The system-wide default language code.
    pub fn default_code(&self) -> &str {
        &self.default_code
    }

    /// Language for a guild. Direct messages (no guild), unknown
    /// guilds and unreadable state all resolve to the default.
    pub fn get(&self, guild_id: Option<&str>) -> String {
        let Some(guild_id) = guild_id else {
            return self.default_code.clone();
        };
        match jsonfile::load_or(&self.path, BTreeMap::<String, String>::new()) {
            Ok(map) => map
                .get(guild_id)
                .cloned()
                .unwrap_or_else(|| self.default_code.clone()),
            Err(e) => {
                warn!("guild languages: {e}, serving default");
                self.default_code.clone()
            }
        }
    }

    /// Persist a guild's language choice. Unlike reads, a corrupt
    /// state file is an error here: rewriting it would drop every
    /// other guild's preference.
    pub fn set(&self, guild_id: &str, code: &str) -> Result<(), EncoreError> {
        let mut map: BTreeMap<String, String> = jsonfile::load_or(&self.path, BTreeMap::new())?;
        map.insert(guild_id.to_string(), code.to_string());
        jsonfile::save(&self.path, &map)
    }
}
