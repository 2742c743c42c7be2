//! Creation of new target locale files from the canonical tree.

use std::path::Path;

use tracing::{info, warn};

use encore_core::error::EncoreError;

use crate::catalog::{CANONICAL_CODE, PROTECTED_CODE};

/// Languages seeded by a plain `bootstrap` run. The canonical and
/// protected codes are deliberately absent.
pub const DEFAULT_BOOTSTRAP_CODES: &[&str] = &[
    "af", "am", "ar", "bg", "bn", "ca", "cs", "da", "el", "et", "fa", "fi", "fil", "fr", "gl",
    "he", "hi", "hr", "hu", "hy", "id", "is", "it", "ja", "ka", "kk", "km", "ko", "lt", "lv",
    "mk", "ms", "my", "ne", "nl", "no", "pl", "pt", "ro", "ru", "si", "sk", "sl", "sq", "sr",
    "sv", "sw", "ta", "te", "th", "tr", "uk", "ur", "vi", "zh-CN", "zh-TW",
];

/// Outcome counts of a bootstrap run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    pub created: usize,
    pub skipped: usize,
    pub overwritten: usize,
}

/// Create one locale file per code as a verbatim copy of the canonical
/// file. Existing files are kept unless `overwrite` is set; the
/// canonical and protected codes are never written, whatever the
/// caller asks for.
pub fn bootstrap(dir: &Path, codes: &[&str], overwrite: bool) -> Result<BootstrapReport, EncoreError> {
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

    let mut report = BootstrapReport::default();

    for &code in codes {
        if code.is_empty() || code == CANONICAL_CODE || code == PROTECTED_CODE {
            warn!("bootstrap: refusing to write '{code}'");
            report.skipped += 1;
            continue;
        }

        let path = dir.join(format!("{code}.json"));
        let existed = path.exists();
        if existed && !overwrite {
            report.skipped += 1;
            continue;
        }

        std::fs::write(&path, &canonical_raw)?;
        if existed {
            info!("bootstrap: overwrote {code}.json");
            report.overwritten += 1;
        } else {
            info!("bootstrap: created {code}.json");
            report.created += 1;
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    const CANONICAL: &str = "{\n  \"a\": \"Hello\"\n}\n";

    fn temp_locales_dir() -> std::path::PathBuf {
        let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!(
            "__encore_bootstrap_test_{}_{}__",
            std::process::id(),
            id
        ));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("en.json"), CANONICAL).unwrap();
        dir
    }

    #[test]
    fn test_bootstrap_creates_verbatim_copies() {
        let dir = temp_locales_dir();

        let report = bootstrap(&dir, &["fr", "es"], false).unwrap();

        assert_eq!(report, BootstrapReport { created: 2, skipped: 0, overwritten: 0 });
        assert_eq!(std::fs::read_to_string(dir.join("fr.json")).unwrap(), CANONICAL);
        assert_eq!(std::fs::read_to_string(dir.join("es.json")).unwrap(), CANONICAL);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_bootstrap_skips_existing_files() {
        let dir = temp_locales_dir();
        std::fs::write(dir.join("fr.json"), "{\n  \"a\": \"Bonjour\"\n}\n").unwrap();

        let report = bootstrap(&dir, &["fr", "es"], false).unwrap();

        assert_eq!(report.created, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(
            std::fs::read_to_string(dir.join("fr.json")).unwrap(),
            "{\n  \"a\": \"Bonjour\"\n}\n",
            "existing translations must survive"
        );

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_bootstrap_overwrite_resets_existing_files() {
        let dir = temp_locales_dir();
        std::fs::write(dir.join("fr.json"), "{\n  \"a\": \"Bonjour\"\n}\n").unwrap();

        let report = bootstrap(&dir, &["fr"], true).unwrap();

        assert_eq!(report.overwritten, 1);
        assert_eq!(std::fs::read_to_string(dir.join("fr.json")).unwrap(), CANONICAL);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_bootstrap_never_writes_protected_codes() {
        let dir = temp_locales_dir();
        std::fs::write(dir.join("de.json"), "{\n  \"a\": \"Hallo\"\n}\n").unwrap();

        let report = bootstrap(&dir, &["en", "de", "fr"], true).unwrap();

        assert_eq!(report.skipped, 2);
        assert_eq!(report.created, 1);
        assert_eq!(std::fs::read_to_string(dir.join("en.json")).unwrap(), CANONICAL);
        assert_eq!(
            std::fs::read_to_string(dir.join("de.json")).unwrap(),
            "{\n  \"a\": \"Hallo\"\n}\n"
        );

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_bootstrap_without_canonical_is_fatal() {
        let dir = temp_locales_dir();
        std::fs::remove_file(dir.join("en.json")).unwrap();

        assert!(matches!(
            bootstrap(&dir, &["fr"], false),
            Err(EncoreError::Config(_))
        ));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_default_code_list_excludes_protected_codes() {
        assert_eq!(DEFAULT_BOOTSTRAP_CODES.len(), 56);
        assert!(!DEFAULT_BOOTSTRAP_CODES.contains(&"en"));
        assert!(!DEFAULT_BOOTSTRAP_CODES.contains(&"de"));
        assert!(DEFAULT_BOOTSTRAP_CODES.contains(&"zh-CN"));
    }
}
