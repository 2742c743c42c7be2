//! File-backed stores: guild language preferences and achievement
//! progress.

pub mod achievements;
pub mod guilds;
mod jsonfile;

pub use achievements::{Achievement, AchievementStore, MarkOutcome, ProgressStats, UserProgress};
pub use guilds::GuildLangStore;
