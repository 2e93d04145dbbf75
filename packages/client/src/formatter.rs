//! Message formatting utilities for client display.

use hiroba_core::{
    ConnectionPhase, EventKind, LocalSessionState,
    domain::{ChatEntry, Participant},
    identity::Identity,
};
use hiroba_shared::time::format_local_time;

const RULE: &str = "============================================================";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Render what changed after an inbound event was applied.
    ///
    /// Returns `None` when there is nothing worth printing.
    pub fn format_update(kind: EventKind, state: &LocalSessionState) -> Option<String> {
        match kind {
            EventKind::ConnectionEstablished => Some(Self::format_phase(state.phase())),
            EventKind::IdentityConfirmed => Some(format!(
                "{}{}",
                Self::format_phase(state.phase()),
                Self::format_online_users(state.registry().as_slice(), state.identity())
            )),
            EventKind::PresenceUpdated => Some(Self::format_online_users(
                state.registry().as_slice(),
                state.identity(),
            )),
            EventKind::MessageReceived => state
                .log()
                .last()
                .map(|entry| Self::format_chat_entry(entry, state.identity())),
            EventKind::TypingChanged => {
                let typing: Vec<&Participant> = state
                    .registry()
                    .typing()
                    .filter(|p| !is_me(p, state.identity()))
                    .collect();
                Some(Self::format_typing_status(&typing))
            }
        }
    }

    /// Format a phase change notice
    pub fn format_phase(phase: ConnectionPhase) -> String {
        match phase {
            ConnectionPhase::Connecting => "\nConnecting...\n".to_string(),
            ConnectionPhase::AwaitingUsername => {
                "\nConnected. Enter a username to join the chat.\n".to_string()
            }
            ConnectionPhase::LoggedIn => {
                "\nLogged in. Type messages and press Enter to send. Press Ctrl+C to exit.\n"
                    .to_string()
            }
        }
    }

    /// Format the online users list, marking the local user and anyone typing
    ///
    /// # Arguments
    ///
    /// * `participants` - Participants in snapshot order
    /// * `identity` - The local identity (to mark as "me")
    pub fn format_online_users(participants: &[Participant], identity: &Identity) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n{}\n", RULE));
        output.push_str(&format!("Online Users ({}):\n", participants.len()));

        if participants.is_empty() {
            output.push_str("(No participants)\n");
        } else {
            for participant in participants {
                let me_suffix = if is_me(participant, identity) { " (me)" } else { "" };
                let typing_suffix = if participant.is_typing { " (typing)" } else { "" };
                output.push_str(&format!(
                    "{}{}{}\n",
                    participant.display_name, me_suffix, typing_suffix
                ));
            }
        }

        output.push_str(RULE);
        output.push('\n');
        output
    }

    /// Format a chat entry; entries authored locally are prefixed with `*`
    pub fn format_chat_entry(entry: &ChatEntry, identity: &Identity) -> String {
        let marker = if identity.authored(entry) { "*" } else { " " };
        format!(
            "\n{} [{}] @{}: {}\n",
            marker,
            format_local_time(entry.created_at.value()),
            entry.sender,
            entry.text
        )
    }

    /// Format who is typing right now
    pub fn format_typing_status(typing: &[&Participant]) -> String {
        match typing {
            [] => "\n(nobody is typing)\n".to_string(),
            [one] => format!("\n{} is typing...\n", one.display_name),
            many => {
                let names: Vec<String> = many.iter().map(|p| p.display_name.to_string()).collect();
                format!("\n{} are typing...\n", names.join(", "))
            }
        }
    }

    /// Format a confirmation after a message was handed to the channel
    pub fn format_sent_confirmation(entry: &ChatEntry) -> String {
        format!("sent at {}\n", format_local_time(entry.created_at.value()))
    }

    /// Format the notice shown when input is entered while it cannot be used
    pub fn format_input_unavailable(phase: ConnectionPhase) -> String {
        format!("\n(input ignored while {})\n", phase)
    }
}

/// Whether `participant` is the local user.
///
/// Prefers the channel id; falls back to the display name when the coordinator
/// never reported ours.
fn is_me(participant: &Participant, identity: &Identity) -> bool {
    match identity.channel_id() {
        Some(channel_id) => &participant.channel_id == channel_id,
        None => identity.display_name() == Some(&participant.display_name),
    }
}
