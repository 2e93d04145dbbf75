//! Dispatch table mapping inbound event categories to their handlers.
//!
//! Each handler checks its phase precondition, mutates the session state and
//! reports what happened. Handlers never emit outbound actions.

use std::{collections::HashMap, fmt};

use crate::{
    event::{EventKind, InboundEvent},
    session::{ConnectionPhase, LocalSessionState},
};

/// Signature shared by all inbound handlers.
pub type Handler = fn(&mut LocalSessionState, InboundEvent) -> DispatchOutcome;

/// Result of dispatching one inbound event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The event mutated the session state.
    Applied,
    /// The event was dropped without touching state.
    Ignored(IgnoreReason),
}

impl DispatchOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Why an inbound event was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The event is not accepted in the current phase.
    OutOfPhase {
        kind: EventKind,
        phase: ConnectionPhase,
    },
    /// A message authored under the local name, already appended optimistically.
    SelfEcho,
    /// Typing delta for a channel id not present in the registry.
    UnknownParticipant,
    /// No handler installed for this category.
    NoHandler(EventKind),
}

/// Category → handler map. One handler per category at most.
#[derive(Default)]
pub struct DispatchTable {
    handlers: HashMap<EventKind, Handler>,
}

impl fmt::Debug for DispatchTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.handlers.keys()).finish()
    }
}

impl DispatchTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `handler` for `kind`, replacing any previous one.
    ///
    /// Returns `true` if the category had no handler before.
    pub fn install(&mut self, kind: EventKind, handler: Handler) -> bool {
        self.handlers.insert(kind, handler).is_none()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn dispatch(&self, state: &mut LocalSessionState, event: InboundEvent) -> DispatchOutcome {
        let kind = event.kind();
        match self.handlers.get(&kind) {
            Some(handler) => handler(state, event),
            None => DispatchOutcome::Ignored(IgnoreReason::NoHandler(kind)),
        }
    }
}

/// Install the standard handler for every event category.
///
/// Returns how many categories were newly covered; zero on a repeat call.
pub fn install_handlers(table: &mut DispatchTable) -> usize {
    EventKind::ALL
        .into_iter()
        .filter(|kind| table.install(*kind, handler_for(*kind)))
        .count()
}

fn handler_for(kind: EventKind) -> Handler {
    match kind {
        EventKind::ConnectionEstablished => on_connection_established,
        EventKind::IdentityConfirmed => on_identity_confirmed,
        EventKind::PresenceUpdated => on_presence_updated,
        EventKind::MessageReceived => on_message_received,
        EventKind::TypingChanged => on_typing_changed,
    }
}

fn out_of_phase(kind: EventKind, state: &LocalSessionState) -> DispatchOutcome {
    DispatchOutcome::Ignored(IgnoreReason::OutOfPhase {
        kind,
        phase: state.phase,
    })
}

fn on_connection_established(state: &mut LocalSessionState, event: InboundEvent) -> DispatchOutcome {
    let InboundEvent::ConnectionEstablished { channel_id } = event else {
        return DispatchOutcome::Ignored(IgnoreReason::NoHandler(EventKind::ConnectionEstablished));
    };
    if state.phase != ConnectionPhase::Connecting {
        return out_of_phase(EventKind::ConnectionEstablished, state);
    }
    if let Some(channel_id) = channel_id {
        state.identity.assign_channel(channel_id);
    }
    state.advance_to(ConnectionPhase::AwaitingUsername);
    DispatchOutcome::Applied
}

fn on_identity_confirmed(state: &mut LocalSessionState, event: InboundEvent) -> DispatchOutcome {
    let InboundEvent::IdentityConfirmed { presence } = event else {
        return DispatchOutcome::Ignored(IgnoreReason::NoHandler(EventKind::IdentityConfirmed));
    };
    if state.phase != ConnectionPhase::AwaitingUsername {
        return out_of_phase(EventKind::IdentityConfirmed, state);
    }
    state.identity.confirm();
    state.registry.apply_snapshot(presence);
    state.advance_to(ConnectionPhase::LoggedIn);
    DispatchOutcome::Applied
}

fn on_presence_updated(state: &mut LocalSessionState, event: InboundEvent) -> DispatchOutcome {
    let InboundEvent::PresenceUpdated { presence } = event else {
        return DispatchOutcome::Ignored(IgnoreReason::NoHandler(EventKind::PresenceUpdated));
    };
    if state.phase == ConnectionPhase::Connecting {
        return out_of_phase(EventKind::PresenceUpdated, state);
    }
    state.registry.apply_snapshot(presence);
    DispatchOutcome::Applied
}

fn on_message_received(state: &mut LocalSessionState, event: InboundEvent) -> DispatchOutcome {
    let InboundEvent::MessageReceived { entry } = event else {
        return DispatchOutcome::Ignored(IgnoreReason::NoHandler(EventKind::MessageReceived));
    };
    if state.phase != ConnectionPhase::LoggedIn {
        return out_of_phase(EventKind::MessageReceived, state);
    }
    if state.identity.authored(&entry) {
        return DispatchOutcome::Ignored(IgnoreReason::SelfEcho);
    }
    state.log.append(entry);
    DispatchOutcome::Applied
}

fn on_typing_changed(state: &mut LocalSessionState, event: InboundEvent) -> DispatchOutcome {
    let InboundEvent::TypingChanged {
        channel_id,
        is_typing,
    } = event
    else {
        return DispatchOutcome::Ignored(IgnoreReason::NoHandler(EventKind::TypingChanged));
    };
    if state.phase != ConnectionPhase::LoggedIn {
        return out_of_phase(EventKind::TypingChanged, state);
    }
    if state.registry.apply_typing_delta(&channel_id, is_typing) {
        DispatchOutcome::Applied
    } else {
        DispatchOutcome::Ignored(IgnoreReason::UnknownParticipant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChannelId, ChatEntry, DisplayName, Participant, Timestamp};

    fn table() -> DispatchTable {
        let mut table = DispatchTable::new();
        install_handlers(&mut table);
        table
    }

    fn message(sender: &str, text: &str) -> InboundEvent {
        InboundEvent::MessageReceived {
            entry: ChatEntry::new(DisplayName::from(sender), text, Timestamp::new(1000)),
        }
    }

    #[test]
    fn test_install_handlers_is_idempotent() {
        // テスト項目: ハンドラの二重登録でカテゴリごとのハンドラ数は増えない
        // given (前提条件):
        let mut table = DispatchTable::new();

        // when (操作):
        let first = install_handlers(&mut table);
        let second = install_handlers(&mut table);

        // then (期待する結果):
        assert_eq!(first, EventKind::ALL.len());
        assert_eq!(second, 0);
        assert_eq!(table.len(), EventKind::ALL.len());
    }

    #[test]
    fn test_empty_table_reports_no_handler() {
        // テスト項目: ハンドラ未登録のカテゴリは NoHandler として無視される
        // given (前提条件):
        let table = DispatchTable::new();
        let mut state = LocalSessionState::new();

        // when (操作):
        let outcome = table.dispatch(
            &mut state,
            InboundEvent::ConnectionEstablished { channel_id: None },
        );

        // then (期待する結果):
        assert_eq!(
            outcome,
            DispatchOutcome::Ignored(IgnoreReason::NoHandler(EventKind::ConnectionEstablished))
        );
        assert_eq!(state.phase(), ConnectionPhase::Connecting);
    }

    #[test]
    fn test_connection_established_only_once() {
        // テスト項目: connection-established の再受信は状態を変えない
        // given (前提条件):
        let table = table();
        let mut state = LocalSessionState::new();
        table.dispatch(
            &mut state,
            InboundEvent::ConnectionEstablished {
                channel_id: Some(ChannelId::new("s1").unwrap()),
            },
        );

        // when (操作):
        let outcome = table.dispatch(
            &mut state,
            InboundEvent::ConnectionEstablished {
                channel_id: Some(ChannelId::new("s9").unwrap()),
            },
        );

        // then (期待する結果):
        assert!(!outcome.is_applied());
        assert_eq!(state.phase(), ConnectionPhase::AwaitingUsername);
        assert_eq!(state.identity().channel_id().map(|id| id.as_str()), Some("s1"));
    }

    #[test]
    fn test_presence_updated_ignored_while_connecting() {
        // テスト項目: Connecting 中の presence-updated は無視される
        // given (前提条件):
        let table = table();
        let mut state = LocalSessionState::new();
        let presence = vec![Participant::new(
            DisplayName::from("bob"),
            ChannelId::new("s1").unwrap(),
        )];

        // when (操作):
        let outcome = table.dispatch(&mut state, InboundEvent::PresenceUpdated { presence });

        // then (期待する結果):
        assert_eq!(
            outcome,
            DispatchOutcome::Ignored(IgnoreReason::OutOfPhase {
                kind: EventKind::PresenceUpdated,
                phase: ConnectionPhase::Connecting,
            })
        );
        assert!(state.registry().is_empty());
    }

    #[test]
    fn test_presence_updated_applies_while_awaiting_username() {
        // テスト項目: AwaitingUsername 中でも presence-updated は適用されフェーズは変わらない
        // given (前提条件):
        let table = table();
        let mut state = LocalSessionState::new();
        table.dispatch(&mut state, InboundEvent::ConnectionEstablished { channel_id: None });
        let presence = vec![Participant::new(
            DisplayName::from("carol"),
            ChannelId::new("s2").unwrap(),
        )];

        // when (操作):
        let outcome = table.dispatch(&mut state, InboundEvent::PresenceUpdated { presence });

        // then (期待する結果):
        assert!(outcome.is_applied());
        assert_eq!(state.registry().len(), 1);
        assert_eq!(state.phase(), ConnectionPhase::AwaitingUsername);
    }

    #[test]
    fn test_message_received_before_login_is_ignored() {
        // テスト項目: ログイン前に受信したメッセージは追加されない
        // given (前提条件):
        let table = table();
        let mut state = LocalSessionState::new();
        table.dispatch(&mut state, InboundEvent::ConnectionEstablished { channel_id: None });

        // when (操作):
        let outcome = table.dispatch(&mut state, message("carol", "early"));

        // then (期待する結果):
        assert!(!outcome.is_applied());
        assert!(state.log().is_empty());
    }

    #[test]
    fn test_identity_confirmed_outside_awaiting_username_is_ignored() {
        // テスト項目: Connecting 中の identity-confirmed ではログインしない
        // given (前提条件):
        let table = table();
        let mut state = LocalSessionState::new();

        // when (操作):
        let outcome = table.dispatch(
            &mut state,
            InboundEvent::IdentityConfirmed {
                presence: Vec::new(),
            },
        );

        // then (期待する結果):
        assert!(!outcome.is_applied());
        assert_eq!(state.phase(), ConnectionPhase::Connecting);
    }
}
