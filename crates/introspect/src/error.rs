use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IntrospectionError>;

#[derive(Debug, Error)]
pub enum IntrospectionError {
    /// The request never produced an HTTP response (DNS, connect, timeout).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The endpoint answered with a non-success status.
    #[error("HTTP error {0}: {1}")]
    Http(u16, String),

    /// The payload is not well-formed introspection data.
    #[error("Invalid introspection response: {0}")]
    Protocol(String),

    #[error("Schema file {} is missing or unreadable: {source}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IntrospectionError {
    /// Returns `true` for failures that happened on the wire, including
    /// non-success HTTP statuses.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Http(..))
    }
}
