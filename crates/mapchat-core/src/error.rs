use thiserror::Error;

/// A convenience `Result` alias using [`MapchatError`].
pub type MapchatResult<T> = Result<T, MapchatError>;

/// Top-level error type for mapchat.
///
/// Each variant corresponds to a subsystem that can fail. Only
/// [`MapchatError::Config`] is fatal; everything else is surfaced to the
/// user as a notice and the session carries on.
#[derive(Error, Debug)]
pub enum MapchatError {
    /// The map document could not be fetched (transport error, non-200
    /// status, malformed JSON or a missing `text` field).
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// The chat-completion call failed or returned no usable reply.
    #[error("Completion error: {0}")]
    Completion(String),

    /// Missing secret or invalid configuration.
    #[error("Config error: {0}")]
    Config(String),

    /// A session-level precondition failed (no map loaded, empty question,
    /// session busy).
    #[error("Session error: {0}")]
    Session(String),

    /// A JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MapchatError {
    /// Whether the interactive loop may continue after this error.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, MapchatError::Config(_))
    }
}
