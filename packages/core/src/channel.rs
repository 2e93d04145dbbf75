//! Outbound side of the channel collaborator.
//!
//! The engine only needs somewhere to put actions; delivery is the transport's
//! concern. `emit` must not block.

use thiserror::Error;
use tokio::sync::mpsc;

use crate::event::OutboundAction;

/// Errors returned while handing an action to the transport
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    /// The transport side of the channel has gone away
    #[error("Outbound channel is closed")]
    Closed,
}

/// Sink for actions produced by the engine.
#[cfg_attr(test, mockall::automock)]
pub trait OutboundSink: Send + Sync {
    fn emit(&self, action: OutboundAction) -> Result<(), ChannelError>;
}

/// Sender half feeding a transport writer task.
pub type OutboundChannel = mpsc::UnboundedSender<OutboundAction>;

impl OutboundSink for OutboundChannel {
    fn emit(&self, action: OutboundAction) -> Result<(), ChannelError> {
        self.send(action).map_err(|_| ChannelError::Closed)
    }
}
