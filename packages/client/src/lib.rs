//! Terminal chat client for Hiroba.
//!
//! Wraps the `hiroba-core` engine with a WebSocket transport, a JSON wire
//! codec and a line-oriented renderer.

pub mod config;
pub mod domain;
pub mod error;
pub mod formatter;
pub mod infrastructure;
pub mod runner;
pub mod session;
pub mod ui;

pub use config::ClientConfig;
pub use error::{ClientError, WireError};
pub use runner::run_client;
pub use session::run_client_session;
