//! State of one connection, owned by the engine and exposed read-only.

use std::fmt;

use crate::{identity::Identity, message_log::MessageLog, presence::PresenceRegistry};

/// Connection lifecycle. Moves forward only; a new connection starts over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum ConnectionPhase {
    #[default]
    Connecting,
    AwaitingUsername,
    LoggedIn,
}

impl fmt::Display for ConnectionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Connecting => "connecting",
            Self::AwaitingUsername => "awaiting username",
            Self::LoggedIn => "logged in",
        };
        f.write_str(label)
    }
}

/// Everything the renderer may read between two handler invocations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalSessionState {
    pub(crate) identity: Identity,
    pub(crate) registry: PresenceRegistry,
    pub(crate) log: MessageLog,
    pub(crate) phase: ConnectionPhase,
}

impl LocalSessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn registry(&self) -> &PresenceRegistry {
        &self.registry
    }

    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    pub fn phase(&self) -> ConnectionPhase {
        self.phase
    }

    /// Move the phase forward; never regresses.
    pub(crate) fn advance_to(&mut self, next: ConnectionPhase) {
        if next > self.phase {
            tracing::info!("Connection phase: {} -> {}", self.phase, next);
            self.phase = next;
        }
    }
}
