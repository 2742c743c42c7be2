//! Discord channel speaking the interactions webhook flow.
//!
//! Slash commands arrive over the inbound HTTPS endpoint (see
//! `endpoint`); every command is acknowledged as deferred and the real
//! reply edits the original interaction response afterwards.
//! Docs: <https://discord.com/developers/docs/interactions/receiving-and-responding>

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{info, warn};

use encore_core::{
    config::{DiscordConfig, InteractionsConfig},
    error::EncoreError,
    message::{IncomingCommand, OutgoingReply},
    traits::Channel,
};

use crate::endpoint::{self, EndpointState};

const API_BASE: &str = "https://discord.com/api/v10";

/// Discord limit for plain message content.
const MESSAGE_LIMIT: usize = 2000;

/// Discord channel: inbound interactions endpoint plus outbound REST.
pub struct DiscordChannel {
    config: DiscordConfig,
    interactions: InteractionsConfig,
    client: reqwest::Client,
    /// Commands answered privately via the ephemeral flag.
    ephemeral_commands: Vec<String>,
}

impl DiscordChannel {
    pub fn new(
        config: DiscordConfig,
        interactions: InteractionsConfig,
        ephemeral_commands: Vec<String>,
    ) -> Self {
        Self {
            config,
            interactions,
            client: reqwest::Client::new(),
            ephemeral_commands,
        }
    }

    /// Edit the deferred interaction response identified by its token.
    async fn edit_original(&self, token: &str, reply: &OutgoingReply) -> Result<(), EncoreError> {
        let url = format!(
            "{API_BASE}/webhooks/{}/{token}/messages/@original",
            self.config.application_id
        );
        let body = serde_json::json!({
            "content": clip(&reply.content, MESSAGE_LIMIT),
            "embeds": reply.embeds,
        });

        let resp = self
            .client
            .patch(&url)
            .header("Authorization", format!("Bot {}", self.config.bot_token))
            .json(&body)
            .send()
            .await
            .map_err(|e| EncoreError::Channel(format!("discord reply failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            warn!("discord reply got {status}: {error_text}");
        }
        Ok(())
    }

    /// Post a plain message to a channel, outside any interaction.
    pub async fn post_message(&self, channel_id: &str, content: &str) -> Result<(), EncoreError> {
        let url = format!("{API_BASE}/channels/{channel_id}/messages");
        let body = serde_json::json!({ "content": clip(content, MESSAGE_LIMIT) });

        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("Bot {}", self.config.bot_token))
            .json(&body)
            .send()
            .await
            .map_err(|e| EncoreError::Channel(format!("discord post failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            warn!("discord post to {channel_id} got {status}: {error_text}");
        }
        Ok(())
    }

    /// Overwrite the registered application commands with `commands`,
    /// guild-scoped when a guild id is configured. Returns how many
    /// were registered.
    pub async fn register_commands(
        &self,
        commands: &serde_json::Value,
    ) -> Result<usize, EncoreError> {
        let count = commands.as_array().map(Vec::len).unwrap_or(0);
        self.put_commands(commands).await?;
        info!("registered {count} Discord commands");
        Ok(count)
    }

    /// Remove every registered application command.
    pub async fn clear_commands(&self) -> Result<(), EncoreError> {
        self.put_commands(&serde_json::json!([])).await?;
        info!("cleared Discord commands");
        Ok(())
    }

    async fn put_commands(&self, body: &serde_json::Value) -> Result<(), EncoreError> {
        let url = if self.config.guild_id.is_empty() {
            format!("{API_BASE}/applications/{}/commands", self.config.application_id)
        } else {
            format!(
                "{API_BASE}/applications/{}/guilds/{}/commands",
                self.config.application_id, self.config.guild_id
            )
        };

        let resp = self
            .client
            .put(&url)
            .header("Authorization", format!("Bot {}", self.config.bot_token))
            .json(body)
            .send()
            .await
            .map_err(|e| EncoreError::Channel(format!("discord command sync failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            return Err(EncoreError::Channel(format!(
                "discord command sync got {status}: {error_text}"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl Channel for DiscordChannel {
    fn name(&self) -> &str {
        "discord"
    }

    async fn start(&self) -> Result<mpsc::Receiver<IncomingCommand>, EncoreError> {
        let key = endpoint::parse_public_key(&self.config.public_key)?;
        let (tx, rx) = mpsc::channel(64);

        let state = EndpointState::new(key, tx, self.ephemeral_commands.clone());
        let addr = format!("{}:{}", self.interactions.host, self.interactions.port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| EncoreError::Channel(format!("cannot bind {addr}: {e}")))?;

        info!("Discord interactions endpoint listening on {addr}");

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, endpoint::router(state)).await {
                warn!("interactions endpoint stopped: {e}");
            }
        });

        Ok(rx)
    }

    async fn send(&self, reply: OutgoingReply) -> Result<(), EncoreError> {
        self.edit_original(&reply.reply_token, &reply).await
    }

    async fn stop(&self) -> Result<(), EncoreError> {
        info!("Discord channel stopped");
        Ok(())
    }
}

/// Shorten text to `max_chars` characters, ellipsis included.
pub(crate) fn clip(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_short_text_passes_through() {
        assert_eq!(clip("hello", 2000), "hello");
        assert_eq!(clip("", 2000), "");
    }

    #[test]
    fn test_clip_shortens_to_limit_with_ellipsis() {
        let long = "x".repeat(2500);
        let clipped = clip(&long, 2000);
        assert_eq!(clipped.chars().count(), 2000);
        assert!(clipped.ends_with("..."));
    }

    #[test]
    fn test_clip_counts_characters_not_bytes() {
        let long = "ä".repeat(10);
        let clipped = clip(&long, 8);
        assert_eq!(clipped.chars().count(), 8);
        assert_eq!(clipped, format!("{}...", "ä".repeat(5)));
    }

    #[test]
    fn test_exact_limit_is_not_clipped() {
        let text = "y".repeat(2000);
        assert_eq!(clip(&text, 2000), text);
    }
}
