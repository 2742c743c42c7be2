//! Offline reconciliation of target locale files against the
//! canonical tree.

use std::path::Path;

use tracing::{debug, info, warn};

use encore_core::error::EncoreError;

use crate::catalog::{CANONICAL_CODE, PROTECTED_CODE};
use crate::tree::{self, MergePolicy, TreeNode};

/// What a sync run should do.
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    pub policy: MergePolicy,
    /// Compute and report changes without writing anything.
    pub dry_run: bool,
    /// Restrict the run to a single language. Accepts `fr` as well as
    /// `fr.json`.
    pub only: Option<String>,
}

/// Aggregate result of a sync run, with the flags it ran under.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub scanned: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub errors: usize,
    pub policy: MergePolicy,
    pub dry_run: bool,
}

/// Merge the canonical tree into every target locale file in `dir`.
///
/// The canonical and protected files are never touched; a single bad
/// target file is counted and skipped so it cannot block the rest. A
/// missing directory or missing/unparsable canonical file aborts the
/// whole run.
pub fn sync_all(dir: &Path, options: &SyncOptions) -> Result<SyncReport, EncoreError> {
    if !dir.is_dir() {
        return Err(EncoreError::Config(format!(
            "locales directory not found: {}",
            dir.display()
        )));
    }

    let canonical_path = dir.join(format!("{CANONICAL_CODE}.json"));
    let canonical_raw = std::fs::read_to_string(&canonical_path).map_err(|_| {
        EncoreError::Config(format!(
            "canonical tree missing: {}",
            canonical_path.display()
        ))
    })?;
    let canonical: TreeNode = serde_json::from_str(&canonical_raw).map_err(|e| {
        EncoreError::Config(format!(
            "canonical tree unreadable at {}: {}",
            canonical_path.display(),
            e
        ))
    })?;

    let codes = match &options.only {
        Some(name) => {
            let code = name.strip_suffix(".json").unwrap_or(name);
            if code == CANONICAL_CODE || code == PROTECTED_CODE {
                return Err(EncoreError::ProtectedLanguage(code.to_string()));
            }
            if !dir.join(format!("{code}.json")).is_file() {
                return Err(EncoreError::Config(format!(
                    "no locale file for '{code}' in {}",
                    dir.display()
                )));
            }
            vec![code.to_string()]
        }
        None => {
            let mut codes: Vec<String> = std::fs::read_dir(dir)?
                .collect::<Result<Vec<_>, _>>()?
                .into_iter()
                .map(|e| e.path())
                .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
                .filter_map(|p| p.file_stem().and_then(|s| s.to_str()).map(str::to_string))
                .filter(|code| code != CANONICAL_CODE && code != PROTECTED_CODE)
                .collect();
            codes.sort();
            codes
        }
    };

    let mut report = SyncReport {
        policy: options.policy,
        dry_run: options.dry_run,
        ..Default::default()
    };

    for code in codes {
        report.scanned += 1;
        let path = dir.join(format!("{code}.json"));

        let original = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!("sync: cannot read {}: {e}", path.display());
                report.errors += 1;
                continue;
            }
        };
        let mut target: TreeNode = match serde_json::from_str(&original) {
            Ok(tree) => tree,
            Err(e) => {
                warn!("sync: cannot parse {}: {e}", path.display());
                report.errors += 1;
                continue;
            }
        };

        tree::merge(&mut target, &canonical, options.policy);

        let merged = match tree::serialize(&target) {
            Ok(out) => out,
            Err(e) => {
                warn!("sync: cannot serialize {code}: {e}");
                report.errors += 1;
                continue;
            }
        };

        if merged == original {
            debug!("sync: {code}.json unchanged");
            report.unchanged += 1;
            continue;
        }

        if options.dry_run {
            info!("sync: {code}.json would change (dry run)");
            report.updated += 1;
            continue;
        }

        match std::fs::write(&path, &merged) {
            Ok(()) => {
                info!("sync: updated {code}.json");
                report.updated += 1;
            }
            Err(e) => {
                warn!("sync: cannot write {}: {e}", path.display());
                report.errors += 1;
            }
        }
    }

    Ok(report)
}
