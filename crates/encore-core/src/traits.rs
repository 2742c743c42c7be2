use crate::{
    error::EncoreError,
    message::{IncomingCommand, OutgoingReply},
};
use async_trait::async_trait;

/// Messaging Channel trait — the transport seam.
///
/// Every platform the bot speaks over implements this trait to receive
/// command invocations and deliver replies.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Human-readable channel name.
    fn name(&self) -> &str;

    /// Start listening for incoming command invocations.
    /// Returns a receiver that yields them as they arrive.
    async fn start(&self) -> Result<tokio::sync::mpsc::Receiver<IncomingCommand>, EncoreError>;

    /// Deliver a reply for a previously received invocation.
    async fn send(&self, reply: OutgoingReply) -> Result<(), EncoreError>;

    /// Graceful shutdown.
    async fn stop(&self) -> Result<(), EncoreError>;
}
