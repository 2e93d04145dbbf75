//! Terminal chat client with presence, typing indicators and reconnection support.
//!
//! Connects to a chat coordinator over WebSocket. Enter a username when asked,
//! then type messages and press Enter to send. Automatically reconnects on
//! disconnection (default: max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-client -- --username alice
//! cargo run --bin hiroba-client -- -u ws://127.0.0.1:3001/ws
//! ```

use std::time::Duration;

use clap::Parser;

use hiroba_client::{
    ClientConfig,
    config::{DEFAULT_MAX_RECONNECT_ATTEMPTS, DEFAULT_RECONNECT_INTERVAL_SECS, DEFAULT_URL},
};
use hiroba_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hiroba-client")]
#[command(about = "Terminal chat client with presence and typing indicators", long_about = None)]
struct Args {
    /// WebSocket URL of the chat coordinator
    #[arg(short = 'u', long, default_value = DEFAULT_URL)]
    url: String,

    /// Username to submit as soon as the coordinator greets us
    #[arg(short = 'n', long)]
    username: Option<String>,

    /// Reconnection attempts before giving up
    #[arg(long, default_value_t = DEFAULT_MAX_RECONNECT_ATTEMPTS)]
    max_reconnect_attempts: u32,

    /// Seconds to wait between reconnection attempts
    #[arg(long, default_value_t = DEFAULT_RECONNECT_INTERVAL_SECS)]
    reconnect_interval_secs: u64,

    /// Default log level (overridden by RUST_LOG)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl From<Args> for ClientConfig {
    fn from(args: Args) -> Self {
        Self {
            url: args.url,
            username: args.username,
            max_reconnect_attempts: args.max_reconnect_attempts,
            reconnect_interval: Duration::from_secs(args.reconnect_interval_secs),
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    // Run the client
    if let Err(e) = hiroba_client::run_client(args.into()).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
