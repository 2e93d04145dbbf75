//! Domain model of the client-side chat session.
//!
//! - `value_object`: identifiers and timestamps (`ChannelId`, `DisplayName`, `Timestamp`)
//! - `entity`: records with identity or lifecycle (`Participant`, `ChatEntry`)
//! - `error`: validation errors raised while constructing value objects

pub mod entity;
pub mod error;
pub mod value_object;

pub use entity::{ChatEntry, Participant};
pub use error::ValueObjectError;
pub use value_object::{ChannelId, DisplayName, Timestamp};
