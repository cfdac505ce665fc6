use std::sync::Arc;

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Enumeration of errors returned by the tracker.
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// The collector host does not form a valid endpoint URL.
    #[error("invalid collector endpoint")]
    InvalidCollectorEndpoint(#[source] url::ParseError),
    /// A required field for the given event type was missing or empty. No
    /// dispatch is attempted when this error is returned.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    /// Failed to serialize a context or unstructured-event envelope.
    // serde_json::Error is not clonable, so we're wrapping it in an Arc.
    #[error("failed to serialize event data")]
    Serialization(#[source] Arc<serde_json::Error>),
    /// The request to the collector failed at the transport level.
    // reqwest::Error is not clonable, so we're wrapping it in an Arc.
    #[error("request to collector failed")]
    Transport(#[source] Arc<reqwest::Error>),
    /// Spawning the dispatch thread failed.
    // std::io::Error is not clonable, so we're wrapping it in an Arc.
    #[error(transparent)]
    Io(Arc<std::io::Error>),
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(Arc::new(value))
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(Arc::new(value))
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Io(Arc::new(value))
    }
}
