//! Inbound events from the channel and outbound actions emitted to it.

use std::fmt;

use crate::domain::{ChannelId, ChatEntry, DisplayName, Participant};

/// Event pushed by the coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// The channel is up. Carries the local channel id when the coordinator reports it.
    ConnectionEstablished { channel_id: Option<ChannelId> },
    /// Login accepted, with the full presence list.
    IdentityConfirmed { presence: Vec<Participant> },
    /// Someone joined or left; full presence list.
    PresenceUpdated { presence: Vec<Participant> },
    MessageReceived { entry: ChatEntry },
    TypingChanged { channel_id: ChannelId, is_typing: bool },
}

impl InboundEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::ConnectionEstablished { .. } => EventKind::ConnectionEstablished,
            Self::IdentityConfirmed { .. } => EventKind::IdentityConfirmed,
            Self::PresenceUpdated { .. } => EventKind::PresenceUpdated,
            Self::MessageReceived { .. } => EventKind::MessageReceived,
            Self::TypingChanged { .. } => EventKind::TypingChanged,
        }
    }
}

/// Category of an inbound event; the key of the dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    ConnectionEstablished,
    IdentityConfirmed,
    PresenceUpdated,
    MessageReceived,
    TypingChanged,
}

impl EventKind {
    pub const ALL: [EventKind; 5] = [
        EventKind::ConnectionEstablished,
        EventKind::IdentityConfirmed,
        EventKind::PresenceUpdated,
        EventKind::MessageReceived,
        EventKind::TypingChanged,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConnectionEstablished => "connection-established",
            Self::IdentityConfirmed => "identity-confirmed",
            Self::PresenceUpdated => "presence-updated",
            Self::MessageReceived => "message-received",
            Self::TypingChanged => "typing-changed",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action this client sends upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundAction {
    RegisterIdentity { name: DisplayName },
    SendMessage { entry: ChatEntry },
    /// `channel_id` is `None` when the coordinator never reported the local id.
    TypingChanged {
        channel_id: Option<ChannelId>,
        is_typing: bool,
    },
}
