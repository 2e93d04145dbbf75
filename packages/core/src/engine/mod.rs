//! The synchronization engine.
//!
//! One `SyncEngine` lives for exactly one connection: it is constructed when
//! the transport connects and dropped when it goes away. It is the sole writer
//! of [`LocalSessionState`]; all calls happen on a single task, one at a time.
//!
//! ```text
//! UI intents ──► submit_username / send_message / on_message_input_changed ──► OutboundSink
//! channel    ──► handle(InboundEvent) ──► DispatchTable ──► registry / log / phase
//! ```

mod dispatch;

use std::sync::Arc;

use hiroba_shared::time::{Clock, SystemClock};

use crate::{
    channel::{ChannelError, OutboundSink},
    domain::{ChatEntry, DisplayName, Timestamp},
    event::{InboundEvent, OutboundAction},
    session::{ConnectionPhase, LocalSessionState},
    typing::TypingTracker,
};

pub use dispatch::{DispatchOutcome, DispatchTable, Handler, IgnoreReason, install_handlers};

/// Client-side state machine for one connection.
pub struct SyncEngine {
    state: LocalSessionState,
    typing: TypingTracker,
    dispatch: DispatchTable,
    sink: Arc<dyn OutboundSink>,
    clock: Arc<dyn Clock>,
}

impl SyncEngine {
    /// Create an engine that stamps outgoing messages with the system clock.
    pub fn new(sink: Arc<dyn OutboundSink>) -> Self {
        Self::with_clock(sink, Arc::new(SystemClock))
    }

    pub fn with_clock(sink: Arc<dyn OutboundSink>, clock: Arc<dyn Clock>) -> Self {
        let mut engine = Self {
            state: LocalSessionState::new(),
            typing: TypingTracker::new(),
            dispatch: DispatchTable::new(),
            sink,
            clock,
        };
        engine.subscribe();
        engine
    }

    /// Install the inbound handlers. Safe to call again: a category never
    /// ends up with two handlers.
    ///
    /// Returns how many categories were newly covered.
    pub fn subscribe(&mut self) -> usize {
        let installed = install_handlers(&mut self.dispatch);
        tracing::debug!(
            installed,
            total = self.dispatch.len(),
            "Inbound handlers subscribed"
        );
        installed
    }

    pub fn state(&self) -> &LocalSessionState {
        &self.state
    }

    pub fn phase(&self) -> ConnectionPhase {
        self.state.phase
    }

    /// Apply one inbound event to completion.
    pub fn handle(&mut self, event: InboundEvent) -> DispatchOutcome {
        let kind = event.kind();
        let outcome = self.dispatch.dispatch(&mut self.state, event);
        match outcome {
            DispatchOutcome::Applied => tracing::debug!("Applied {}", kind),
            DispatchOutcome::Ignored(reason) => {
                tracing::debug!("Ignored {}: {:?}", kind, reason)
            }
        }
        outcome
    }

    /// Ask the coordinator to register `name`.
    ///
    /// Callers only offer this while awaiting a username. The phase moves on
    /// when identity-confirmed arrives, not here.
    pub fn submit_username(&mut self, name: impl Into<DisplayName>) -> Result<(), ChannelError> {
        let name = name.into();
        tracing::info!("Submitting username '{}'", name);
        self.state.identity.request(name.clone());
        self.sink.emit(OutboundAction::RegisterIdentity { name })
    }

    /// Append `text` to the log immediately and send it upstream.
    ///
    /// The entry stays in the log even if the channel is closed. The typing
    /// indicator is reset afterwards since the input is cleared on send.
    pub fn send_message(&mut self, text: impl Into<String>) -> Result<(), ChannelError> {
        let sender = self
            .state
            .identity
            .display_name()
            .cloned()
            .unwrap_or_default();
        let entry = ChatEntry::new(sender, text, Timestamp::new(self.clock.now_millis()));
        self.state.log.append(entry.clone());

        let sent = self.sink.emit(OutboundAction::SendMessage { entry });
        let reset = match self.typing.reset_after_send() {
            Some(is_typing) => self.emit_typing(is_typing),
            None => Ok(()),
        };
        sent.and(reset)
    }

    /// Feed the current value of the message input.
    pub fn on_message_input_changed(&mut self, value: &str) -> Result<(), ChannelError> {
        match self.typing.on_input_changed(value) {
            Some(is_typing) => self.emit_typing(is_typing),
            None => Ok(()),
        }
    }

    fn emit_typing(&self, is_typing: bool) -> Result<(), ChannelError> {
        tracing::trace!(is_typing, "Emitting typing change");
        self.sink.emit(OutboundAction::TypingChanged {
            channel_id: self.state.identity.channel_id().cloned(),
            is_typing,
        })
    }
}
