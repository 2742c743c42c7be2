//! Discord webhook log sink.
//!
//! Mirrors operational events into Discord channels, one webhook per
//! level with a shared fallback. Delivery is fire-and-forget; a dead
//! webhook must never slow down or fail the bot itself.

use tracing::debug;

use encore_core::config::LogWebhooksConfig;

use crate::discord::clip;

/// Discord limit for an embed description.
const DESCRIPTION_LIMIT: usize = 4000;

/// Severity of a mirrored log event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warn,
    Error,
    Debug,
}

impl LogLevel {
    fn title(self) -> &'static str {
        match self {
            LogLevel::Info => "ℹ️ INFO",
            LogLevel::Success => "✅ SUCCESS",
            LogLevel::Warn => "⚠️ WARN",
            LogLevel::Error => "❌ ERROR",
            LogLevel::Debug => "🛠️ DEBUG",
        }
    }

    fn color(self) -> u32 {
        match self {
            LogLevel::Info => 0x3498db,
            LogLevel::Success => 0x2ecc71,
            LogLevel::Warn => 0xf1c40f,
            LogLevel::Error => 0xe74c3c,
            LogLevel::Debug => 0x9b59b6,
        }
    }
}

/// Sends log embeds to the configured webhooks.
pub struct LogWebhook {
    client: reqwest::Client,
    config: LogWebhooksConfig,
}

impl LogWebhook {
    pub fn new(config: LogWebhooksConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Webhook URL for a level: its own URL if set, otherwise the
    /// shared default. `None` means the level is not mirrored.
    fn url_for(&self, level: LogLevel) -> Option<&str> {
        let specific = match level {
            LogLevel::Info => &self.config.info_url,
            LogLevel::Success => &self.config.success_url,
            LogLevel::Warn => &self.config.warn_url,
            LogLevel::Error => &self.config.error_url,
            LogLevel::Debug => &self.config.debug_url,
        };
        for url in [specific, &self.config.default_url] {
            if !url.is_empty() {
                return Some(url);
            }
        }
        None
    }

    /// Post one event. Spawns the delivery and returns immediately;
    /// failures are logged at debug and otherwise ignored.
    pub fn post(&self, level: LogLevel, message: &str) {
        let Some(url) = self.url_for(level) else {
            return;
        };
        let url = url.to_string();
        let client = self.client.clone();
        let payload = embed_payload(level, message);

        tokio::spawn(async move {
            match client.post(&url).json(&payload).send().await {
                Ok(resp) if !resp.status().is_success() => {
                    debug!("log webhook got {}", resp.status());
                }
                Ok(_) => {}
                Err(e) => debug!("log webhook delivery failed: {e}"),
            }
        });
    }
}

fn embed_payload(level: LogLevel, message: &str) -> serde_json::Value {
    serde_json::json!({
        "embeds": [{
            "title": level.title(),
            "description": clip(message, DESCRIPTION_LIMIT),
            "color": level.color(),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(default_url: &str, error_url: &str) -> LogWebhooksConfig {
        LogWebhooksConfig {
            default_url: default_url.to_string(),
            error_url: error_url.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_level_url_beats_default() {
        let sink = LogWebhook::new(config_with("https://d.example", "https://e.example"));
        assert_eq!(sink.url_for(LogLevel::Error), Some("https://e.example"));
        assert_eq!(sink.url_for(LogLevel::Info), Some("https://d.example"));
    }

    #[test]
    fn test_no_urls_disables_delivery() {
        let sink = LogWebhook::new(LogWebhooksConfig::default());
        assert_eq!(sink.url_for(LogLevel::Error), None);
        assert_eq!(sink.url_for(LogLevel::Debug), None);
    }

    #[test]
    fn test_titles_and_colors() {
        assert_eq!(LogLevel::Info.title(), "ℹ️ INFO");
        assert_eq!(LogLevel::Success.title(), "✅ SUCCESS");
        assert_eq!(LogLevel::Warn.title(), "⚠️ WARN");
        assert_eq!(LogLevel::Error.title(), "❌ ERROR");
        assert_eq!(LogLevel::Debug.title(), "🛠️ DEBUG");

        assert_eq!(LogLevel::Info.color(), 0x3498db);
        assert_eq!(LogLevel::Success.color(), 0x2ecc71);
        assert_eq!(LogLevel::Warn.color(), 0xf1c40f);
        assert_eq!(LogLevel::Error.color(), 0xe74c3c);
        assert_eq!(LogLevel::Debug.color(), 0x9b59b6);
    }

    #[test]
    fn test_embed_payload_clips_long_messages() {
        let payload = embed_payload(LogLevel::Warn, &"x".repeat(5000));
        let description = payload["embeds"][0]["description"].as_str().unwrap();
        assert_eq!(description.chars().count(), 4000);
        assert!(description.ends_with("..."));
        assert_eq!(payload["embeds"][0]["color"], 0xf1c40f);
    }
}
