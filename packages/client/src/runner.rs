//! Client execution logic with reconnection support.

use hiroba_core::ConnectionPhase;
use tokio::sync::{mpsc, watch};

use crate::{
    config::ClientConfig,
    domain::{should_attempt_reconnect, should_exit_immediately},
    error::ClientError,
    session::run_client_session,
    ui::{UiIntent, prompt_for, spawn_input_thread},
};

/// Run the terminal client, reconnecting with a fresh session after connection loss
pub async fn run_client(config: ClientConfig) -> Result<(), ClientError> {
    let (intent_tx, mut intents) = mpsc::unbounded_channel();
    let (prompt_tx, prompt_rx) = watch::channel(prompt_for(ConnectionPhase::Connecting, None));
    let _input_handle = spawn_input_thread(intent_tx, prompt_rx);

    let mut username = config.username.clone();
    let mut reconnect_count = 0;

    loop {
        tracing::info!(
            "Attempting to connect to {} (attempt {}/{})",
            config.url,
            reconnect_count + 1,
            config.max_reconnect_attempts
        );

        match run_client_session(&config, &mut intents, &prompt_tx, &mut username).await {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                break;
            }
            Err(e) => {
                if should_exit_immediately(&e) {
                    tracing::error!("{}", e);
                    return Err(e);
                }
                if !should_attempt_reconnect(&e, reconnect_count, config.max_reconnect_attempts) {
                    tracing::error!(
                        "Failed to reconnect after {} attempts. Exiting.",
                        reconnect_count
                    );
                    return Err(e);
                }

                tracing::warn!("Connection lost: {}", e);
                reconnect_count += 1;
                prompt_tx.send_replace(prompt_for(ConnectionPhase::Connecting, None));

                tracing::info!(
                    "Reconnecting in {} seconds... (attempt {}/{})",
                    config.reconnect_interval.as_secs(),
                    reconnect_count + 1,
                    config.max_reconnect_attempts
                );

                tokio::time::sleep(config.reconnect_interval).await;
                if !discard_pending(&mut intents) {
                    tracing::info!("Input closed while disconnected");
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Drop intents raised while no session was running; nothing is queued across connections.
///
/// Returns `false` if the input side has gone away.
pub fn discard_pending(intents: &mut mpsc::UnboundedReceiver<UiIntent>) -> bool {
    loop {
        match intents.try_recv() {
            Ok(intent) => tracing::debug!("Discarding {:?} entered while disconnected", intent),
            Err(mpsc::error::TryRecvError::Empty) => return true,
            Err(mpsc::error::TryRecvError::Disconnected) => return false,
        }
    }
}
