//! Edge-triggered typing indicator for the local message input.

/// Whether the local user is currently considered to be typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypingState {
    #[default]
    NotTyping,
    Typing,
}

/// Turns message-input edits into typing notifications.
///
/// Only the two edge transitions produce a notification, so a burst of
/// keystrokes costs at most one `true` and one `false`.
#[derive(Debug, Clone, Default)]
pub struct TypingTracker {
    state: TypingState,
}

impl TypingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> TypingState {
        self.state
    }

    /// Feed the full current value of the message input.
    ///
    /// Returns the typing flag to transmit, or `None` if nothing changed.
    pub fn on_input_changed(&mut self, value: &str) -> Option<bool> {
        match (self.state, value.is_empty()) {
            (TypingState::NotTyping, false) => {
                self.state = TypingState::Typing;
                Some(true)
            }
            (TypingState::Typing, true) => {
                self.state = TypingState::NotTyping;
                Some(false)
            }
            _ => None,
        }
    }

    /// Force the tracker back to `NotTyping` after the input was sent and cleared.
    ///
    /// Returns `Some(false)` only if the tracker was typing.
    pub fn reset_after_send(&mut self) -> Option<bool> {
        match std::mem::take(&mut self.state) {
            TypingState::Typing => Some(false),
            TypingState::NotTyping => None,
        }
    }
}
