//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::{
    domain::{RoomId, SubscriberId, ValueObjectError},
    infrastructure::dto::websocket::ClientMessage,
    ui::state::AppState,
    usecase::EngineCommand,
};

/// A text frame that could not be turned into a command
#[derive(Debug, Error)]
enum FrameError {
    #[error("malformed message: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error(transparent)]
    InvalidRoomId(#[from] ValueObjectError),
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives events from the rx channel and pushes them to the WebSocket sender.
///
/// # Arguments
///
/// * `rx` - Channel receiver fed by the MessagePusher
/// * `sender` - WebSocket sink to send messages to this client
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let subscriber_id = state.connect_subscriber_usecase.execute(tx).await;
    tracing::info!("Subscriber '{}' connected", subscriber_id);

    let (sender, mut receiver) = socket.split();
    let state_clone = state.clone();

    // Spawn a task to receive commands from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error from '{}': {}", subscriber_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received from '{}': {}", subscriber_id, text.as_str());
                    handle_text(&state_clone, subscriber_id, text.as_str());
                }
                Message::Close(_) => {
                    tracing::info!("Subscriber '{}' requested close", subscriber_id);
                    break;
                }
                // Ping/pong is handled by axum
                _ => {}
            }
        }
    });

    // Spawn a task to push room events to this client
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state
        .disconnect_subscriber_usecase
        .execute(&subscriber_id)
        .await;
    tracing::info!("Subscriber '{}' disconnected", subscriber_id);
}

fn handle_text(state: &AppState, subscriber_id: SubscriberId, text: &str) {
    let command = match parse_command(subscriber_id, text) {
        Ok(command) => command,
        Err(e) => {
            tracing::warn!("Ignoring frame from '{}': {}", subscriber_id, e);
            return;
        }
    };

    if let Err(e) = state.dispatch_command_usecase.execute(command) {
        tracing::error!("Failed to dispatch command from '{}': {}", subscriber_id, e);
    }
}

fn parse_command(subscriber_id: SubscriberId, text: &str) -> Result<EngineCommand, FrameError> {
    let command = match serde_json::from_str::<ClientMessage>(text)? {
        ClientMessage::Join { room_id, settings } => EngineCommand::Join {
            subscriber_id,
            room_id: RoomId::new(room_id)?,
            settings: settings.into(),
        },
        ClientMessage::Start { room_id } => EngineCommand::Start(RoomId::new(room_id)?),
        ClientMessage::Pause { room_id } => EngineCommand::Pause(RoomId::new(room_id)?),
        ClientMessage::Reset { room_id } => EngineCommand::Reset(RoomId::new(room_id)?),
        ClientMessage::TogglePhase { room_id } => {
            EngineCommand::TogglePhase(RoomId::new(room_id)?)
        }
    };
    Ok(command)
}
