//! Conversion logic between DTOs and engine types.

use hiroba_core::{
    InboundEvent, OutboundAction,
    domain::{ChannelId, ChatEntry, DisplayName, Participant, Timestamp},
};
use hiroba_shared::time::{millis_to_rfc3339, now_millis, rfc3339_to_millis};

use crate::error::WireError;

use super::websocket::{ClientEvent, MessageDto, ServerEvent, UserDto};

/// Parse one text frame into its wire event.
pub fn decode_frame(text: &str) -> Result<ServerEvent, WireError> {
    Ok(serde_json::from_str(text)?)
}

/// Encode an engine action as one text frame.
pub fn encode_outbound(action: OutboundAction) -> Result<String, WireError> {
    let event = ClientEvent::try_from(action)?;
    Ok(serde_json::to_string(&event)?)
}

// ========================================
// DTO → Engine
// ========================================

impl TryFrom<UserDto> for Participant {
    type Error = WireError;

    fn try_from(dto: UserDto) -> Result<Self, Self::Error> {
        Ok(Self {
            display_name: DisplayName::new(dto.username),
            channel_id: ChannelId::new(dto.socket_id)?,
            is_typing: dto.is_typing,
        })
    }
}

impl TryFrom<MessageDto> for ChatEntry {
    type Error = WireError;

    fn try_from(dto: MessageDto) -> Result<Self, Self::Error> {
        // createdAt is display-only and not always RFC 3339.
        let created_at = rfc3339_to_millis(&dto.created_at).unwrap_or_else(|e| {
            tracing::debug!(
                "Using receive time for createdAt '{}': {}",
                dto.created_at,
                e
            );
            now_millis()
        });
        Ok(Self {
            sender: DisplayName::new(dto.sender),
            text: dto.text,
            created_at: Timestamp::new(created_at),
            is_typing: dto.is_typing,
        })
    }
}

fn presence_from(users: Vec<UserDto>) -> Result<Vec<Participant>, WireError> {
    users.into_iter().map(Participant::try_from).collect()
}

impl TryFrom<ServerEvent> for InboundEvent {
    type Error = WireError;

    fn try_from(event: ServerEvent) -> Result<Self, Self::Error> {
        let inbound = match event {
            ServerEvent::Welcome { id, .. } => Self::ConnectionEstablished {
                // An empty id means the coordinator did not tell us ours.
                channel_id: id.filter(|id| !id.is_empty()).map(ChannelId::new).transpose()?,
            },
            ServerEvent::LoggedIn { online_users } => Self::IdentityConfirmed {
                presence: presence_from(online_users)?,
            },
            ServerEvent::UpdateOnlineUsersList { online_users } => Self::PresenceUpdated {
                presence: presence_from(online_users)?,
            },
            ServerEvent::NewMessage { message } => Self::MessageReceived {
                entry: message.try_into()?,
            },
            ServerEvent::Typing { id, is_typing } => Self::TypingChanged {
                channel_id: ChannelId::new(id)?,
                is_typing,
            },
        };
        Ok(inbound)
    }
}

// ========================================
// Engine → DTO
// ========================================

impl TryFrom<ChatEntry> for MessageDto {
    type Error = WireError;

    fn try_from(entry: ChatEntry) -> Result<Self, Self::Error> {
        let millis = entry.created_at.value();
        Ok(Self {
            sender: entry.sender.into_string(),
            text: entry.text,
            created_at: millis_to_rfc3339(millis).ok_or(WireError::TimestampOutOfRange(millis))?,
            is_typing: entry.is_typing,
        })
    }
}

impl TryFrom<OutboundAction> for ClientEvent {
    type Error = WireError;

    fn try_from(action: OutboundAction) -> Result<Self, Self::Error> {
        let event = match action {
            OutboundAction::RegisterIdentity { name } => Self::SetUsername {
                username: name.into_string(),
            },
            OutboundAction::SendMessage { entry } => Self::SendMessage {
                message: entry.try_into()?,
            },
            OutboundAction::TypingChanged {
                channel_id,
                is_typing,
            } => Self::Typing {
                id: channel_id.map(ChannelId::into_string),
                is_typing,
            },
        };
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(text: &str) -> Result<InboundEvent, WireError> {
        InboundEvent::try_from(decode_frame(text)?)
    }

    #[test]
    fn test_decode_logged_in_to_identity_confirmed() {
        // テスト項目: loggedIn フレームが identity-confirmed に変換される
        // given (前提条件):
        let frame = r#"{"type":"loggedIn","onlineUsers":[{"username":"bob","socketId":"s1","isTyping":false}]}"#;

        // when (操作):
        let event = decode(frame).unwrap();

        // then (期待する結果):
        assert_eq!(
            event,
            InboundEvent::IdentityConfirmed {
                presence: vec![Participant::new(
                    DisplayName::from("bob"),
                    ChannelId::new("s1").unwrap()
                )],
            }
        );
    }

    #[test]
    fn test_decode_welcome_with_empty_id() {
        // テスト項目: 空の id を持つ welcome はチャンネル ID 無しとして扱われる
        // given (前提条件):
        let frame = r#"{"type":"welcome","message":"Welcome!","id":""}"#;

        // when (操作):
        let event = decode(frame).unwrap();

        // then (期待する結果):
        assert_eq!(event, InboundEvent::ConnectionEstablished { channel_id: None });
    }

    #[test]
    fn test_decode_typing_with_empty_id_is_rejected() {
        // テスト項目: 空の id を持つ typing フレームはエラーになる
        // given (前提条件):
        let frame = r#"{"type":"typing","id":"","isTyping":true}"#;

        // when (操作):
        let result = decode(frame);

        // then (期待する結果):
        assert!(matches!(result, Err(WireError::ChannelId(_))));
    }

    #[test]
    fn test_decode_snapshot_with_one_bad_user_is_rejected() {
        // テスト項目: 不正なユーザーを含むスナップショットは全体が拒否される
        // given (前提条件):
        let frame = r#"{"type":"updateOnlineUsersList","onlineUsers":[{"username":"bob","socketId":"s1"},{"username":"eve","socketId":""}]}"#;

        // when (操作):
        let result = decode(frame);

        // then (期待する結果):
        assert!(matches!(result, Err(WireError::ChannelId(_))));
    }

    #[test]
    fn test_decode_new_message_with_locale_timestamp_is_kept() {
        // テスト項目: RFC 3339 でない createdAt のメッセージも受信時刻で保持される
        // given (前提条件):
        let frame = r#"{"type":"newMessage","message":{"sender":"carol","text":"hello","createdAt":"10/17/2026, 9:15:02 AM","isTyping":false}}"#;
        let before = now_millis();

        // when (操作):
        let event = decode(frame).unwrap();

        // then (期待する結果):
        let after = now_millis();
        let InboundEvent::MessageReceived { entry } = event else {
            panic!("expected message-received, got {:?}", event);
        };
        assert_eq!(entry.sender, DisplayName::from("carol"));
        assert_eq!(entry.text, "hello");
        assert!((before..=after).contains(&entry.created_at.value()));
    }

    #[test]
    fn test_decode_new_message_with_rfc3339_timestamp() {
        // テスト項目: RFC 3339 の createdAt はそのまま使われる
        // given (前提条件):
        let frame = r#"{"type":"newMessage","message":{"sender":"carol","text":"hi","createdAt":"2023-01-01T00:00:00.000Z","isTyping":false}}"#;

        // when (操作):
        let event = decode(frame).unwrap();

        // then (期待する結果):
        assert_eq!(
            event,
            InboundEvent::MessageReceived {
                entry: ChatEntry::new(DisplayName::from("carol"), "hi", Timestamp::new(1672531200000)),
            }
        );
    }

    #[test]
    fn test_decode_garbage_is_json_error() {
        // テスト項目: JSON でないフレームは Json エラーになる
        // given (前提条件):
        let frame = "hello there";

        // when (操作):
        let result = decode(frame);

        // then (期待する結果):
        assert!(matches!(result, Err(WireError::Json(_))));
    }

    #[test]
    fn test_encode_send_message() {
        // テスト項目: send-message が sendMessage フレームにエンコードされる
        // given (前提条件):
        let action = OutboundAction::SendMessage {
            entry: ChatEntry::new(DisplayName::from("alice"), "hi", Timestamp::new(1672531200000)),
        };

        // when (操作):
        let json = encode_outbound(action).unwrap();

        // then (期待する結果):
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "sendMessage");
        assert_eq!(value["message"]["sender"], "alice");
        assert_eq!(value["message"]["text"], "hi");
        assert_eq!(value["message"]["createdAt"], "2023-01-01T00:00:00.000Z");
        assert_eq!(value["message"]["isTyping"], false);
    }

    #[test]
    fn test_encode_register_identity_and_typing() {
        // テスト項目: register-identity と typing-changed が対応するフレームになる
        // given (前提条件):
        let register = OutboundAction::RegisterIdentity {
            name: DisplayName::from("bob"),
        };
        let typing = OutboundAction::TypingChanged {
            channel_id: Some(ChannelId::new("s1").unwrap()),
            is_typing: false,
        };

        // when (操作):
        let register_json = encode_outbound(register).unwrap();
        let typing_json = encode_outbound(typing).unwrap();

        // then (期待する結果):
        assert_eq!(register_json, r#"{"type":"setUsername","username":"bob"}"#);
        assert_eq!(typing_json, r#"{"type":"typing","id":"s1","isTyping":false}"#);
    }

    #[test]
    fn test_encode_out_of_range_timestamp_fails() {
        // テスト項目: 表現できないタイムスタンプはエラーになる
        // given (前提条件):
        let action = OutboundAction::SendMessage {
            entry: ChatEntry::new(DisplayName::from("alice"), "hi", Timestamp::new(i64::MAX)),
        };

        // when (操作):
        let result = encode_outbound(action);

        // then (期待する結果):
        assert!(matches!(result, Err(WireError::TimestampOutOfRange(_))));
    }
}
