use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// A slash-command invocation received from a channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingCommand {
    pub id: Uuid,
    /// Channel name (e.g. "discord").
    pub channel: String,
    /// Top-level command name (e.g. "language").
    pub name: String,
    /// Subcommand name, for commands that define subcommands.
    pub subcommand: Option<String>,
    /// Flattened option values keyed by option name.
    pub options: HashMap<String, OptionValue>,
    /// Guild the command was invoked in. `None` for DMs.
    pub guild_id: Option<String>,
    /// Platform-specific user ID.
    pub user_id: String,
    /// Human-readable user tag.
    pub user_tag: String,
    /// Platform token for routing the reply (e.g. Discord interaction token).
    pub reply_token: String,
    pub timestamp: DateTime<Utc>,
}

impl IncomingCommand {
    /// String option by name, if present and string-typed.
    pub fn option_str(&self, name: &str) -> Option<&str> {
        match self.options.get(name) {
            Some(OptionValue::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Integer option by name, if present and integer-typed.
    pub fn option_i64(&self, name: &str) -> Option<i64> {
        match self.options.get(name) {
            Some(OptionValue::Integer(n)) => Some(*n),
            _ => None,
        }
    }

    /// Boolean option by name, if present and boolean-typed.
    pub fn option_bool(&self, name: &str) -> Option<bool> {
        match self.options.get(name) {
            Some(OptionValue::Boolean(b)) => Some(*b),
            _ => None,
        }
    }
}

/// A single slash-command option value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    String(String),
    Integer(i64),
    Boolean(bool),
}

/// A reply routed back through a channel to a pending invocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutgoingReply {
    /// Platform token identifying the invocation to answer.
    pub reply_token: String,
    pub content: String,
    #[serde(default)]
    pub embeds: Vec<Embed>,
}

impl OutgoingReply {
    /// Plain text reply.
    pub fn text(reply_token: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            reply_token: reply_token.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    /// Embed-only reply.
    pub fn embed(reply_token: impl Into<String>, embed: Embed) -> Self {
        Self {
            reply_token: reply_token.into(),
            embeds: vec![embed],
            ..Default::default()
        }
    }
}

/// Minimal embed model matching Discord's wire shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Embed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<EmbedThumbnail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Embed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    pub fn footer(mut self, text: impl Into<String>) -> Self {
        self.footer = Some(EmbedFooter { text: text.into() });
        self
    }

    pub fn thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail = Some(EmbedThumbnail { url: url.into() });
        self
    }

    pub fn timestamp_now(mut self) -> Self {
        self.timestamp = Some(Utc::now());
        self
    }
}

/// A named embed field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub inline: bool,
}

/// Embed footer line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedFooter {
    pub text: String,
}

/// Embed thumbnail image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedThumbnail {
    pub url: String,
}
