//! Entities of the chat session: remote participants and chat entries.

use super::value_object::{ChannelId, DisplayName, Timestamp};

/// A remote user's presence record as locally known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub display_name: DisplayName,
    pub channel_id: ChannelId,
    pub is_typing: bool,
}

impl Participant {
    /// Create a participant that is not typing.
    pub fn new(display_name: DisplayName, channel_id: ChannelId) -> Self {
        Self {
            display_name,
            channel_id,
            is_typing: false,
        }
    }
}

/// One line of chat history, either sent locally or received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEntry {
    pub sender: DisplayName,
    pub text: String,
    pub created_at: Timestamp,
    /// Carried on the wire for symmetry with `Participant`; always `false` once sent.
    pub is_typing: bool,
}

impl ChatEntry {
    pub fn new(sender: DisplayName, text: impl Into<String>, created_at: Timestamp) -> Self {
        Self {
            sender,
            text: text.into(),
            created_at,
            is_typing: false,
        }
    }

    /// Whether this entry was authored under the given display name.
    pub fn is_from(&self, name: &DisplayName) -> bool {
        &self.sender == name
    }
}
