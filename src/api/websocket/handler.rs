//! WebSocket connection handler

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::Response,
};
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::broadcast;
use tracing::debug;

use super::events::{ClientMessage, PongMessage, WelcomeMessage};
use super::state::AppState;
use crate::types::GameId;

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct FeedParams {
    /// Only forward events of this game
    pub jogo_id: Option<GameId>,
}

type Sender = SplitSink<WebSocket, Message>;

/// WebSocket upgrade handler
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<FeedParams>,
    State(state): State<Arc<AppState>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state, params.jogo_id))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, mut filter: Option<GameId>) {
    let (mut sender, mut receiver) = socket.split();
    let mut rx = state.subscribe();

    let welcome = WelcomeMessage::new(state.current_sequence_id(), filter);
    if send_json(&mut sender, &welcome).await.is_err() {
        return; // Client disconnected immediately
    }
    debug!(jogo_id = ?filter, "feed subscriber connected");

    loop {
        tokio::select! {
            result = rx.recv() => {
                match result {
                    Ok(msg) => {
                        if filter.is_some_and(|game_id| game_id != msg.event.game_id()) {
                            continue;
                        }
                        if send_json(&mut sender, &msg).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        let error_msg = serde_json::json!({
                            "type": "error",
                            "code": "lagged",
                            "message": format!("Missed {} events, please refetch the dashboard", n)
                        });
                        let _ = sender.send(Message::Text(error_msg.to_string())).await;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }

            incoming = receiver.next() => {
                match incoming {
                    Some(Ok(msg)) => {
                        if !handle_client_message(msg, &mut sender, &mut filter).await {
                            break;
                        }
                    }
                    Some(Err(_)) | None => break,
                }
            }
        }
    }

    debug!(jogo_id = ?filter, "feed subscriber disconnected");
}

/// Handle a message from the client
/// Returns false if the connection should be closed
async fn handle_client_message(msg: Message, sender: &mut Sender, filter: &mut Option<GameId>) -> bool {
    match msg {
        Message::Text(text) => {
            match serde_json::from_str::<ClientMessage>(&text) {
                Ok(ClientMessage::Ping) => {
                    let _ = send_json(sender, &PongMessage::default()).await;
                }
                Ok(ClientMessage::Subscribe { jogo_id }) => {
                    *filter = jogo_id;
                }
                Err(_) => {} // Unknown client messages are ignored
            }
            true
        }
        Message::Binary(_) => true,
        Message::Ping(data) => sender.send(Message::Pong(data)).await.is_ok(),
        Message::Pong(_) => true,
        Message::Close(_) => false,
    }
}

async fn send_json<T: serde::Serialize>(sender: &mut Sender, value: &T) -> Result<(), ()> {
    let json = serde_json::to_string(value).map_err(|_| ())?;
    sender.send(Message::Text(json)).await.map_err(|_| ())
}
