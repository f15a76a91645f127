use std::sync::Arc;
use tokio::sync::mpsc;
use warp::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};

use crate::collab::{CollabServer, CollabSession};

pub async fn handle_collab_websocket(
    websocket: WebSocket,
    collab_server: Arc<CollabServer>,
) {
    let (mut ws_sender, mut ws_receiver) = websocket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();

    let mut session = CollabSession::open(collab_server, tx).await;
    let socket_id = session.socket_id().to_string();
    tracing::info!(socket_id = %socket_id, "Editor WebSocket connection established");

    let sender_task = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            if let Err(e) = ws_sender.send(message).await {
                tracing::error!(error = %e, "Failed to send WebSocket message");
                break;
            }
        }
    });

    while let Some(result) = ws_receiver.next().await {
        match result {
            Ok(message) => {
                if message.is_close() {
                    break;
                }
                if let Ok(text) = message.to_str() {
                    tracing::debug!(socket_id = %socket_id, "Received socket message: {}", text);
                    session.handle_text(text).await;
                }
            }
            Err(e) => {
                tracing::error!(socket_id = %socket_id, error = %e, "WebSocket error");
                break;
            }
        }
    }

    session.cleanup().await;
    sender_task.abort();
    tracing::info!(socket_id = %socket_id, "Editor WebSocket connection closed");
}
