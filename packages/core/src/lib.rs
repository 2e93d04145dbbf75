//! Client-side synchronization engine for Hiroba.
//!
//! Reconciles presence snapshots, typing deltas and chat messages pushed by a
//! remote coordinator into one consistent local state, and turns local intents
//! into outbound actions. Transport and rendering are left to the caller.

pub mod channel;
pub mod domain;
pub mod engine;
pub mod event;
pub mod identity;
pub mod message_log;
pub mod presence;
pub mod session;
pub mod typing;

pub use channel::{ChannelError, OutboundChannel, OutboundSink};
pub use engine::{DispatchOutcome, IgnoreReason, SyncEngine};
pub use event::{EventKind, InboundEvent, OutboundAction};
pub use session::{ConnectionPhase, LocalSessionState};
