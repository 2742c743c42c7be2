//! Inbound HTTP endpoint receiving Discord interactions.
//!
//! Discord signs every delivery with the application's ed25519 key
//! over `timestamp || body`; anything that does not verify is
//! rejected with 401 so Discord keeps the endpoint registered.

use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use ed25519_dalek::{Signature, VerifyingKey};
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::{debug, warn};
use uuid::Uuid;

use encore_core::error::EncoreError;
use encore_core::message::{IncomingCommand, OptionValue};

const SIGNATURE_HEADER: &str = "X-Signature-Ed25519";
const TIMESTAMP_HEADER: &str = "X-Signature-Timestamp";

/// Ephemeral flag on a deferred interaction response.
const EPHEMERAL_FLAG: u64 = 64;

// --- Discord interaction types ---

#[derive(Debug, Deserialize)]
struct Interaction {
    #[serde(rename = "type")]
    kind: u8,
    token: Option<String>,
    guild_id: Option<String>,
    data: Option<InteractionData>,
    member: Option<Member>,
    user: Option<User>,
}

#[derive(Debug, Deserialize)]
struct InteractionData {
    name: String,
    #[serde(default)]
    options: Vec<DataOption>,
}

#[derive(Debug, Clone, Deserialize)]
struct DataOption {
    name: String,
    #[serde(rename = "type")]
    kind: u8,
    value: Option<serde_json::Value>,
    #[serde(default)]
    options: Vec<DataOption>,
}

#[derive(Debug, Deserialize)]
struct Member {
    user: Option<User>,
}

#[derive(Debug, Deserialize)]
struct User {
    id: String,
    username: String,
    global_name: Option<String>,
}

/// Interaction types we act on.
const INTERACTION_PING: u8 = 1;
const INTERACTION_COMMAND: u8 = 2;

/// Option type marking a subcommand rather than a value.
const OPTION_SUBCOMMAND: u8 = 1;

/// Shared state for the interaction handler.
pub(crate) struct EndpointState {
    key: VerifyingKey,
    tx: mpsc::Sender<IncomingCommand>,
    ephemeral: HashSet<String>,
}

impl EndpointState {
    pub(crate) fn new(
        key: VerifyingKey,
        tx: mpsc::Sender<IncomingCommand>,
        ephemeral_commands: Vec<String>,
    ) -> Arc<Self> {
        Arc::new(Self {
            key,
            tx,
            ephemeral: ephemeral_commands.into_iter().collect(),
        })
    }
}

pub(crate) fn router(state: Arc<EndpointState>) -> Router {
    Router::new()
        .route("/interactions", post(handle_interaction))
        .with_state(state)
}

async fn handle_interaction(
    State(state): State<Arc<EndpointState>>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<serde_json::Value>) {
    let signature = header_str(&headers, SIGNATURE_HEADER);
    let timestamp = header_str(&headers, TIMESTAMP_HEADER);
    let verified = match (signature, timestamp) {
        (Some(signature), Some(timestamp)) => {
            verify_signature(&state.key, timestamp, &body, signature)
        }
        _ => false,
    };
    if !verified {
        debug!("rejected interaction with bad signature");
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "error": "invalid request signature" })),
        );
    }

    let interaction: Interaction = match serde_json::from_slice(&body) {
        Ok(i) => i,
        Err(e) => {
            warn!("unreadable interaction payload: {e}");
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": "malformed interaction" })),
            );
        }
    };

    match interaction.kind {
        INTERACTION_PING => (StatusCode::OK, Json(serde_json::json!({ "type": 1 }))),
        INTERACTION_COMMAND => {
            let Some(command) = to_command(interaction) else {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(serde_json::json!({ "error": "incomplete command" })),
                );
            };

            let ephemeral = state.ephemeral.contains(&command.name);
            if let Err(e) = state.tx.try_send(command) {
                warn!("dropping interaction, gateway not consuming: {e}");
                return (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(serde_json::json!({ "error": "busy" })),
                );
            }

            // Acknowledge as deferred; the gateway edits the response
            // once the handler finishes.
            let response = if ephemeral {
                serde_json::json!({ "type": 5, "data": { "flags": EPHEMERAL_FLAG } })
            } else {
                serde_json::json!({ "type": 5 })
            };
            (StatusCode::OK, Json(response))
        }
        other => {
            // Components and other surfaces are acknowledged but never
            // forwarded; the bot only acts on slash commands.
            debug!("acknowledging unhandled interaction type {other}");
            (StatusCode::OK, Json(serde_json::json!({ "type": 6 })))
        }
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Parse the application public key from its hex form.
pub(crate) fn parse_public_key(hex_key: &str) -> Result<VerifyingKey, EncoreError> {
    let bytes = hex::decode(hex_key)
        .map_err(|_| EncoreError::Config("discord public_key is not valid hex".to_string()))?;
    let bytes: [u8; 32] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| EncoreError::Config("discord public_key must be 32 bytes".to_string()))?;
    VerifyingKey::from_bytes(&bytes)
        .map_err(|_| EncoreError::Config("discord public_key is not a valid ed25519 key".to_string()))
}

/// Check the delivery signature over `timestamp || body`.
fn verify_signature(key: &VerifyingKey, timestamp: &str, body: &[u8], signature_hex: &str) -> bool {
    let Ok(signature_bytes) = hex::decode(signature_hex) else {
        return false;
    };
    let Ok(signature) = Signature::try_from(signature_bytes.as_slice()) else {
        return false;
    };
    let mut message = Vec::with_capacity(timestamp.len() + body.len());
    message.extend_from_slice(timestamp.as_bytes());
    message.extend_from_slice(body);
    key.verify_strict(&message, &signature).is_ok()
}

/// Map a command interaction onto the channel-neutral command shape.
/// A single subcommand level is flattened into `subcommand`.
fn to_command(interaction: Interaction) -> Option<IncomingCommand> {
    let data = interaction.data?;
    let token = interaction.token?;
    let user = interaction
        .member
        .and_then(|m| m.user)
        .or(interaction.user)?;

    let (subcommand, raw_options) = match data.options.first() {
        Some(first) if first.kind == OPTION_SUBCOMMAND => {
            (Some(first.name.clone()), first.options.clone())
        }
        _ => (None, data.options),
    };

    let mut options = HashMap::new();
    for option in raw_options {
        let Some(value) = option.value else { continue };
        let value = match value {
            serde_json::Value::String(s) => OptionValue::String(s),
            serde_json::Value::Bool(b) => OptionValue::Boolean(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => OptionValue::Integer(i),
                None => OptionValue::String(n.to_string()),
            },
            other => OptionValue::String(other.to_string()),
        };
        options.insert(option.name, value);
    }

    let user_tag = user.global_name.unwrap_or_else(|| user.username.clone());

    Some(IncomingCommand {
        id: Uuid::new_v4(),
        channel: "discord".to_string(),
        name: data.name,
        subcommand,
        options,
        guild_id: interaction.guild_id,
        user_id: user.id,
        user_tag,
        reply_token: token,
        timestamp: chrono::Utc::now(),
    })
}
