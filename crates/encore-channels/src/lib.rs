//! # encore-channels
//!
//! Chat platform integrations for Encore.

pub mod discord;
pub mod endpoint;
pub mod webhook;

pub use discord::DiscordChannel;
pub use webhook::{LogLevel, LogWebhook};
