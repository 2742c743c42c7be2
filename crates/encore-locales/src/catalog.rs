//! Load-once locale catalog and the runtime string resolver.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, warn};

use encore_core::error::EncoreError;

use crate::tree::TreeNode;

/// Language code of the canonical source-of-truth tree.
pub const CANONICAL_CODE: &str = "en";

/// Second human-maintained language. Never auto-synced, and the last
/// translation tried before a lookup gives up.
pub const PROTECTED_CODE: &str = "de";

/// In-memory map of language code to translation tree.
///
/// Built once at startup from the locales directory and never
/// refreshed; a sync only changes on-disk state, which becomes visible
/// after a restart. Share it behind an `Arc`.
#[derive(Debug)]
pub struct LocaleCatalog {
    trees: HashMap<String, TreeNode>,
}

impl LocaleCatalog {
    /// Scan `dir` for `*.json` translation files, one per language,
    /// filename stem taken as the language code.
    ///
    /// A missing directory or an unparsable file is fatal here: a bot
    /// that starts without its translations answers every guild in
    /// raw keys, which is worse than not starting.
    pub fn load(dir: &Path) -> Result<Self, EncoreError> {
        if !dir.is_dir() {
            return Err(EncoreError::Config(format!(
                "locales directory not found: {}",
                dir.display()
            )));
        }

        let mut trees = HashMap::new();
        let mut entries: Vec<_> = std::fs::read_dir(dir)?
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        entries.sort();

        for path in entries {
            let Some(code) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let content = std::fs::read_to_string(&path)?;
            let tree: TreeNode = serde_json::from_str(&content).map_err(|e| {
                EncoreError::Config(format!("invalid locale file {}: {}", path.display(), e))
            })?;
            debug!("locales: loaded {code} ({} keys)", tree.leaf_count());
            trees.insert(code.to_string(), tree);
        }

        if !trees.contains_key(PROTECTED_CODE) {
            warn!("locales: fallback language '{PROTECTED_CODE}' is missing, lookups degrade to raw keys");
        }

        Ok(Self { trees })
    }

    /// Catalog from already-parsed trees, for tests.
    pub fn from_trees(trees: HashMap<String, TreeNode>) -> Self {
        Self { trees }
    }

    /// Resolve a dotted key for a language.
    ///
    /// Tries the requested language, then the protected fallback, then
    /// returns the key itself. Total: never fails, never returns an
    /// empty string for a non-empty key.
    pub fn resolve(&self, lang: &str, key: &str) -> String {
        if let Some(value) = self.trees.get(lang).and_then(|t| t.lookup(key)) {
            return value.to_string();
        }
        if let Some(value) = self.trees.get(PROTECTED_CODE).and_then(|t| t.lookup(key)) {
            return value.to_string();
        }
        key.to_string()
    }

    /// Resolve a key and substitute `{name}` placeholders.
    pub fn resolve_with(&self, lang: &str, key: &str, vars: &[(&str, String)]) -> String {
        let mut out = self.resolve(lang, key);
        for (name, value) in vars {
            out = out.replace(&format!("{{{name}}}"), value);
        }
        out
    }

    /// Whether a language has a loaded tree.
    pub fn has_language(&self, code: &str) -> bool {
        self.trees.contains_key(code)
    }

    /// All loaded language codes, sorted.
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.trees.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }
}
