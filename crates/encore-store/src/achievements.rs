//! Achievement definitions and per-user completion progress.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use encore_core::error::EncoreError;

use crate::jsonfile;

/// One achievement definition. Display name and description live in
/// the locale files under `achievements.entries.<id>`, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
}

/// One user's completion state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProgress {
    #[serde(default)]
    pub done: Vec<String>,
}

/// Result of marking an achievement as done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkOutcome {
    Marked,
    AlreadyDone,
    UnknownId,
}

/// Completion summary for one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressStats {
    pub done: usize,
    pub total: usize,
    pub percent: u32,
}

/// Achievement catalog plus per-user progress, each persisted as one
/// JSON file. Missing files act as empty stores so a fresh install
/// works without setup.
pub struct AchievementStore {
    achievements_path: PathBuf,
    progress_path: PathBuf,
}

impl AchievementStore {
    pub fn new(achievements_path: PathBuf, progress_path: PathBuf) -> Self {
        Self {
            achievements_path,
            progress_path,
        }
    }

    /// All defined achievements, in file order.
    pub fn achievements(&self) -> Result<Vec<Achievement>, EncoreError> {
        jsonfile::load_or(&self.achievements_path, Vec::new())
    }

    /// Ids the user has completed, in completion order.
    pub fn user_done(&self, user_id: &str) -> Result<Vec<String>, EncoreError> {
        let progress = self.load_progress()?;
        Ok(progress
            .get(user_id)
            .map(|p| p.done.clone())
            .unwrap_or_default())
    }

    /// Mark an achievement as done for a user.
    pub fn mark_done(&self, user_id: &str, id: &str) -> Result<MarkOutcome, EncoreError> {
        let achievements = self.achievements()?;
        if !achievements.iter().any(|a| a.id == id) {
            return Ok(MarkOutcome::UnknownId);
        }

        let mut progress = self.load_progress()?;
        let entry = progress.entry(user_id.to_string()).or_default();
        if entry.done.iter().any(|done| done == id) {
            return Ok(MarkOutcome::AlreadyDone);
        }
        entry.done.push(id.to_string());
        jsonfile::save(&self.progress_path, &progress)?;
        Ok(MarkOutcome::Marked)
    }

    /// Reopen an achievement. Returns whether anything changed.
    pub fn undo(&self, user_id: &str, id: &str) -> Result<bool, EncoreError> {
        let mut progress = self.load_progress()?;
        let Some(entry) = progress.get_mut(user_id) else {
            return Ok(false);
        };
        let before = entry.done.len();
        entry.done.retain(|done| done != id);
        if entry.done.len() == before {
            return Ok(false);
        }
        jsonfile::save(&self.progress_path, &progress)?;
        Ok(true)
    }

    /// Drop all progress for a user.
    pub fn reset(&self, user_id: &str) -> Result<(), EncoreError> {
        let mut progress = self.load_progress()?;
        if progress.remove(user_id).is_some() {
            jsonfile::save(&self.progress_path, &progress)?;
        }
        Ok(())
    }

    /// Completion summary, percent rounded to the nearest integer.
    pub fn stats(&self, user_id: &str) -> Result<ProgressStats, EncoreError> {
        let total = self.achievements()?.len();
        let done = self.user_done(user_id)?.len();
        Ok(ProgressStats {
            done,
            total,
            percent: percent(done, total),
        })
    }

    fn load_progress(&self) -> Result<BTreeMap<String, UserProgress>, EncoreError> {
        jsonfile::load_or(&self.progress_path, BTreeMap::new())
    }
}

fn percent(done: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((done as f64 / total as f64) * 100.0).round() as u32
}
