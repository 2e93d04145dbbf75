//! WebSocket message DTOs.
//!
//! Every frame is a JSON object tagged by `"type"`, with camelCase fields.

use serde::{Deserialize, Serialize};

/// Presence record as sent by the coordinator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub username: String,
    pub socket_id: String,
    #[serde(default)]
    pub is_typing: bool,
}

/// Chat message body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    pub sender: String,
    pub text: String,
    /// RFC 3339
    pub created_at: String,
    #[serde(default)]
    pub is_typing: bool,
}

/// Frames pushed by the coordinator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ServerEvent {
    Welcome {
        #[serde(default)]
        message: Option<String>,
        #[serde(default)]
        id: Option<String>,
    },
    LoggedIn {
        online_users: Vec<UserDto>,
    },
    UpdateOnlineUsersList {
        online_users: Vec<UserDto>,
    },
    NewMessage {
        message: MessageDto,
    },
    Typing {
        id: String,
        is_typing: bool,
    },
}

/// Frames sent by this client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ClientEvent {
    SetUsername {
        username: String,
    },
    SendMessage {
        message: MessageDto,
    },
    Typing {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        is_typing: bool,
    },
}
