use thiserror::Error;

/// Top-level error type for Encore.
#[derive(Debug, Error)]
pub enum EncoreError {
    /// Configuration error: missing files, directories, or canonical data.
    /// Fatal for the operation that raised it.
    #[error("config error: {0}")]
    Config(String),

    /// Error from a messaging channel.
    #[error("channel error: {0}")]
    Channel(String),

    /// Outbound HTTP request error.
    #[error("http error: {0}")]
    Http(String),

    /// Store/persistence error.
    #[error("store error: {0}")]
    Store(String),

    /// Refused to auto-modify a protected language file.
    #[error("protected language: {0}")]
    ProtectedLanguage(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
