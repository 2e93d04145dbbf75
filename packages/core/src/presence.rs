//! Local registry of remote participants.
//!
//! Membership only ever changes through [`PresenceRegistry::apply_snapshot`];
//! between snapshots the typing flag is the sole field patched in place.

use crate::domain::{ChannelId, Participant};

/// Participants currently online, in the order of the last snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresenceRegistry {
    participants: Vec<Participant>,
}

impl PresenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole registry with an authoritative snapshot.
    pub fn apply_snapshot(&mut self, snapshot: Vec<Participant>) {
        tracing::trace!(
            before = self.participants.len(),
            after = snapshot.len(),
            "Applying presence snapshot"
        );
        self.participants = snapshot;
    }

    /// Patch the typing flag of the participant holding `channel_id`.
    ///
    /// Returns `false` and leaves the registry untouched when no such
    /// participant is known; a delta never creates an entry.
    pub fn apply_typing_delta(&mut self, channel_id: &ChannelId, is_typing: bool) -> bool {
        let mut matched = false;
        for participant in self
            .participants
            .iter_mut()
            .filter(|p| &p.channel_id == channel_id)
        {
            participant.is_typing = is_typing;
            matched = true;
        }
        matched
    }

    pub fn get(&self, channel_id: &ChannelId) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.channel_id == channel_id)
    }

    pub fn contains(&self, channel_id: &ChannelId) -> bool {
        self.get(channel_id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }

    /// Participants whose typing flag is set.
    pub fn typing(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter().filter(|p| p.is_typing)
    }

    pub fn as_slice(&self) -> &[Participant] {
        &self.participants
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}
