//! Data Transfer Objects (DTOs) for the coordinator protocol.
//!
//! - `websocket`: JSON frames exchanged over the WebSocket
//! - `conversion`: mapping between frames and engine events/actions

pub mod conversion;
pub mod websocket;

pub use conversion::{decode_frame, encode_outbound};
