use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;
use warp::ws::Message;

use super::server::CollabServer;
use super::signaling::{ClientMessage, ServerEvent};
use crate::error::{AppError, Result};

/// State for one editor socket
pub struct CollabSession {
    socket_id: String,
    server: Arc<CollabServer>,
    sender: mpsc::UnboundedSender<Message>,
}

impl CollabSession {
    pub async fn open(server: Arc<CollabServer>, sender: mpsc::UnboundedSender<Message>) -> Self {
        let socket_id = Uuid::new_v4().to_string();
        server.register(&socket_id, sender.clone()).await;
        Self {
            socket_id,
            server,
            sender,
        }
    }

    pub fn socket_id(&self) -> &str {
        &self.socket_id
    }

    /// Parses and dispatches one text frame. Failures are reported back to
    /// this socket as an `error` event and never close the connection.
    pub async fn handle_text(&mut self, text: &str) {
        let result = match serde_json::from_str::<ClientMessage>(text) {
            Ok(message) => self.handle_message(message).await,
            Err(e) => {
                tracing::warn!(
                    socket_id = %self.socket_id,
                    error = %e,
                    raw_message = %text,
                    "Failed to parse socket message"
                );
                Err(AppError::InvalidSocketMessage(e.to_string()))
            }
        };

        if let Err(e) = result {
            self.send_error(&e);
        }
    }

    pub async fn handle_message(&mut self, message: ClientMessage) -> Result<()> {
        match message {
            ClientMessage::Join { room_id, username } => {
                self.server.join(&self.socket_id, &room_id, &username).await?;
            }
            ClientMessage::CodeChange { room_id, code } => {
                self.server.relay_code(&self.socket_id, &room_id, code).await?;
            }
            ClientMessage::SyncCode { socket_id, code } => {
                self.server.sync_code(&socket_id, code).await?;
            }
            ClientMessage::ChatMessage {
                room_id,
                username,
                message,
            } => {
                self.server
                    .chat(&self.socket_id, &room_id, username, message)
                    .await?;
            }
            ClientMessage::Leave { room_id } => {
                self.server.leave_room(&self.socket_id, &room_id).await?;
            }
        }
        Ok(())
    }

    fn send_error(&self, error: &AppError) {
        let event = ServerEvent::Error {
            message: error.to_string(),
        };
        match serde_json::to_string(&event) {
            Ok(text) => {
                let _ = self.sender.send(Message::text(text));
            }
            Err(e) => tracing::error!(error = %e, "Failed to encode error event"),
        }
    }

    pub async fn cleanup(&mut self) {
        self.server.disconnect(&self.socket_id).await;
    }
}
