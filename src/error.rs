use crate::sink::SinkError;

/// Error returned by emission calls.
///
/// Missing field values, unknown kinds and missing templates are not
/// errors; only serialization and the sink's own write failures surface.
#[derive(thiserror::Error, Debug)]
pub enum LogError {
    #[error("failed to serialize log record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("log sink write failed: {0}")]
    Sink(#[source] SinkError),
}

/// Error returned when installing the `tracing` bridge as global subscriber.
#[cfg(feature = "tracing-layer")]
#[derive(thiserror::Error, Debug)]
pub enum InitError {
    #[error("a global tracing subscriber is already installed")]
    AlreadyInstalled(#[from] tracing::subscriber::SetGlobalDefaultError),
}
