//! WebSocket client session management.
//!
//! One session is one connection: it builds a fresh [`SyncEngine`], feeds it
//! inbound frames and terminal intents from a single task, and forwards its
//! outbound actions to a writer task.

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use hiroba_core::{ConnectionPhase, InboundEvent, OutboundAction, SyncEngine, domain::DisplayName};
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::{
    connect_async,
    tungstenite::{self, protocol::Message},
};

use crate::{
    config::ClientConfig,
    error::ClientError,
    formatter::MessageFormatter,
    infrastructure::dto::{decode_frame, encode_outbound, websocket::ServerEvent},
    ui::{UiIntent, prompt_for, redisplay_prompt},
};

/// Run one WebSocket client session until the connection drops or the user quits.
///
/// # Arguments
///
/// * `config` - Client configuration
/// * `intents` - Terminal intents; the session ends normally once this closes
/// * `prompt` - Prompt published to the line editor
/// * `username` - Name to submit automatically; updated when the user enters one
///
/// # Returns
///
/// `Ok(())` when the user quit, `Err` when the connection was lost or never made.
pub async fn run_client_session(
    config: &ClientConfig,
    intents: &mut mpsc::UnboundedReceiver<UiIntent>,
    prompt: &watch::Sender<String>,
    username: &mut Option<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(config.url.as_str())
        .await
        .map_err(|e| match e {
            tungstenite::Error::Url(url_error) => {
                ClientError::InvalidUrl(format!("{}: {}", config.url, url_error))
            }
            other => ClientError::ConnectionError(other.to_string()),
        })?;
    tracing::info!("Connected to {}", config.url);

    let (mut write, mut read) = ws_stream.split();
    let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<OutboundAction>();
    let mut session = Session {
        engine: SyncEngine::new(Arc::new(outbound_tx)),
        prompt,
    };
    session.publish_prompt();

    // Spawn a task to write outbound actions to the socket
    let mut write_task = tokio::spawn(async move {
        while let Some(action) = outbound_rx.recv().await {
            let json = match encode_outbound(action) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to encode outbound action: {}", e);
                    continue;
                }
            };
            if let Err(e) = write.send(Message::Text(json.into())).await {
                tracing::warn!("Failed to send frame: {}", e);
                return;
            }
        }
        write.close().await.ok();
    });

    let result = loop {
        tokio::select! {
            frame = read.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    if let Err(e) = session.on_frame(text.as_str(), username.as_deref()) {
                        break Err(e);
                    }
                }
                Some(Ok(Message::Binary(data))) => {
                    tracing::debug!("Ignoring {} bytes of binary data", data.len());
                }
                Some(Ok(Message::Close(_))) | None => {
                    tracing::info!("Server closed the connection");
                    break Err(ClientError::ConnectionError("Connection lost".to_string()));
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    break Err(ClientError::ConnectionError(e.to_string()));
                }
            },
            intent = intents.recv() => match intent {
                Some(intent) => {
                    if let Err(e) = session.on_intent(intent, username) {
                        break Err(e);
                    }
                }
                None => {
                    tracing::info!("Input closed, ending session");
                    break Ok(());
                }
            },
            _ = &mut write_task => {
                break Err(ClientError::ConnectionError("Connection lost".to_string()));
            }
        }
    };

    // Dropping the engine closes the outbound channel and lets the writer finish.
    drop(session);
    if result.is_err() {
        write_task.abort();
    } else if let Err(e) = write_task.await {
        tracing::debug!("Writer task ended abnormally: {}", e);
    }
    result
}

/// Engine plus the terminal side effects of one session
struct Session<'a> {
    engine: SyncEngine,
    prompt: &'a watch::Sender<String>,
}

impl Session<'_> {
    fn on_frame(&mut self, text: &str, username: Option<&str>) -> Result<(), ClientError> {
        let frame = match decode_frame(text) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::warn!("Skipping frame ({}): {}", e, text);
                return Ok(());
            }
        };
        if let ServerEvent::Welcome {
            message: Some(message),
            ..
        } = &frame
        {
            tracing::info!("Coordinator says: {}", message);
        }
        let event = match InboundEvent::try_from(frame) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!("Skipping frame ({}): {}", e, text);
                return Ok(());
            }
        };
        let greeted = matches!(event, InboundEvent::ConnectionEstablished { .. });
        let kind = event.kind();

        if self.engine.handle(event).is_applied() {
            if let Some(output) = MessageFormatter::format_update(kind, self.engine.state()) {
                print!("{}", output);
            }
            if greeted && let Some(name) = username {
                tracing::info!("Submitting remembered username '{}'", name);
                self.engine.submit_username(name)?;
            }
            self.publish_prompt();
            redisplay_prompt(&self.prompt.borrow());
        }
        Ok(())
    }

    fn on_intent(
        &mut self,
        intent: UiIntent,
        username: &mut Option<String>,
    ) -> Result<(), ClientError> {
        match (intent, self.engine.phase()) {
            (UiIntent::InputChanged(value), ConnectionPhase::LoggedIn) => {
                self.engine.on_message_input_changed(&value)?;
            }
            (UiIntent::InputChanged(_), _) => {}
            (UiIntent::Submit(line), ConnectionPhase::LoggedIn) => {
                self.engine.send_message(line)?;
                if let Some(entry) = self.engine.state().log().last() {
                    print!("{}", MessageFormatter::format_sent_confirmation(entry));
                }
                redisplay_prompt(&self.prompt.borrow());
            }
            (UiIntent::Submit(line), ConnectionPhase::AwaitingUsername) => {
                *username = Some(line.clone());
                self.engine.submit_username(DisplayName::new(line))?;
                self.publish_prompt();
            }
            (UiIntent::Submit(_), phase) => {
                print!("{}", MessageFormatter::format_input_unavailable(phase));
                redisplay_prompt(&self.prompt.borrow());
            }
        }
        Ok(())
    }

    fn publish_prompt(&self) {
        let state = self.engine.state();
        self.prompt
            .send_replace(prompt_for(state.phase(), state.identity().display_name()));
    }
}
