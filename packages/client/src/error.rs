//! Error types for the Hiroba chat client.

use hiroba_core::{ChannelError, domain::ValueObjectError};
use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server URL cannot be used for a WebSocket connection
    #[error("Invalid server URL '{0}'")]
    InvalidUrl(String),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The engine could not hand an action to the writer task
    #[error(transparent)]
    Channel(#[from] ChannelError),
}

/// Errors raised while translating between wire frames and engine types
#[derive(Debug, Error)]
pub enum WireError {
    /// The frame is not valid JSON or does not match any known event
    #[error("Malformed frame: {0}")]
    Json(#[from] serde_json::Error),

    /// A channel id in the frame is unusable
    #[error("Invalid channel id: {0}")]
    ChannelId(#[from] ValueObjectError),

    /// A local timestamp cannot be represented on the wire
    #[error("Timestamp out of range: {0}")]
    TimestampOutOfRange(i64),
}
