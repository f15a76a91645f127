use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use warp::ws::Message;

use super::room::{ClientInfo, Departure, RoomManager};
use super::signaling::ServerEvent;
use crate::error::{AppError, Result};

/// Relays editor traffic between sockets that share a room
pub struct CollabServer {
    connections: Arc<RwLock<HashMap<String, mpsc::UnboundedSender<Message>>>>,
    room_manager: Arc<RoomManager>,
}

impl CollabServer {
    pub fn new() -> Self {
        Self {
            connections: Arc::new(RwLock::new(HashMap::new())),
            room_manager: RoomManager::new(),
        }
    }

    pub fn room_manager(&self) -> &Arc<RoomManager> {
        &self.room_manager
    }

    pub async fn register(&self, socket_id: &str, sender: mpsc::UnboundedSender<Message>) {
        self.connections
            .write()
            .await
            .insert(socket_id.to_string(), sender);
        tracing::debug!(socket_id = %socket_id, "Socket registered");
    }

    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Adds the socket to the room and tells every member, the joiner
    /// included, who is present.
    pub async fn join(&self, socket_id: &str, room_id: &str, username: &str) -> Result<Vec<ClientInfo>> {
        let clients = self.room_manager.join_room(room_id, socket_id, username).await;
        let members: Vec<String> = clients.iter().map(|c| c.socket_id.clone()).collect();

        let event = ServerEvent::Joined {
            clients: clients.clone(),
            username: username.to_string(),
            socket_id: socket_id.to_string(),
        };
        self.broadcast(&members, &event).await?;

        Ok(clients)
    }

    /// Sends the new buffer to every other member of the room
    pub async fn relay_code(&self, socket_id: &str, room_id: &str, code: String) -> Result<()> {
        self.ensure_member(room_id, socket_id).await?;

        let others: Vec<String> = self
            .room_manager
            .room_members(room_id)
            .await
            .into_iter()
            .filter(|m| m != socket_id)
            .collect();

        tracing::debug!(
            socket_id = %socket_id,
            room_id = %room_id,
            recipients = others.len(),
            bytes = code.len(),
            "Relaying code change"
        );

        self.broadcast(&others, &ServerEvent::CodeChange { code }).await
    }

    pub async fn sync_code(&self, target_socket_id: &str, code: String) -> Result<()> {
        self.send_to(target_socket_id, &ServerEvent::CodeChange { code }).await
    }

    /// Chat goes to the whole room, the sender included
    pub async fn chat(&self, socket_id: &str, room_id: &str, username: String, message: String) -> Result<()> {
        self.ensure_member(room_id, socket_id).await?;

        let members = self.room_manager.room_members(room_id).await;
        self.broadcast(&members, &ServerEvent::ChatMessage { username, message })
            .await
    }

    pub async fn leave_room(&self, socket_id: &str, room_id: &str) -> Result<()> {
        let departure = self
            .room_manager
            .leave_room(room_id, socket_id)
            .await
            .ok_or_else(|| AppError::NotRoomMember {
                peer_id: socket_id.to_string(),
                room_id: room_id.to_string(),
            })?;

        self.announce_departure(socket_id, &departure).await;
        Ok(())
    }

    /// Drops the socket and tells each of its rooms
    pub async fn disconnect(&self, socket_id: &str) {
        self.connections.write().await.remove(socket_id);

        let departures = self.room_manager.remove_peer(socket_id).await;
        for departure in &departures {
            self.announce_departure(socket_id, departure).await;
        }

        tracing::info!(
            socket_id = %socket_id,
            rooms = departures.len(),
            "Socket disconnected"
        );
    }

    async fn announce_departure(&self, socket_id: &str, departure: &Departure) {
        let event = ServerEvent::Disconnected {
            socket_id: socket_id.to_string(),
            username: departure.username.clone(),
        };
        if let Err(e) = self.broadcast(&departure.remaining, &event).await {
            tracing::warn!(
                room_id = %departure.room_id,
                error = %e,
                "Failed to announce departure"
            );
        }
    }

    async fn ensure_member(&self, room_id: &str, socket_id: &str) -> Result<()> {
        if self.room_manager.is_member(room_id, socket_id).await {
            Ok(())
        } else {
            Err(AppError::NotRoomMember {
                peer_id: socket_id.to_string(),
                room_id: room_id.to_string(),
            })
        }
    }

    pub async fn send_to(&self, socket_id: &str, event: &ServerEvent) -> Result<()> {
        let text = serde_json::to_string(event)?;
        let connections = self.connections.read().await;
        let sender = connections
            .get(socket_id)
            .ok_or_else(|| AppError::PeerNotFound(socket_id.to_string()))?;

        if sender.send(Message::text(text)).is_err() {
            tracing::debug!(socket_id = %socket_id, "Outbound queue closed");
        }
        Ok(())
    }

    /// Best effort: sockets that are gone are skipped
    pub async fn broadcast(&self, socket_ids: &[String], event: &ServerEvent) -> Result<()> {
        let text = serde_json::to_string(event)?;
        let connections = self.connections.read().await;

        for socket_id in socket_ids {
            match connections.get(socket_id) {
                Some(sender) => {
                    if sender.send(Message::text(text.clone())).is_err() {
                        tracing::debug!(socket_id = %socket_id, "Outbound queue closed");
                    }
                }
                None => tracing::debug!(socket_id = %socket_id, "Skipping unregistered socket"),
            }
        }
        Ok(())
    }
}

impl Default for CollabServer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn connect(server: &CollabServer, socket_id: &str) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        server.register(socket_id, tx).await;
        rx
    }

    fn next_event(rx: &mut mpsc::UnboundedReceiver<Message>) -> Option<ServerEvent> {
        let message = rx.try_recv().ok()?;
        serde_json::from_str(message.to_str().ok()?).ok()
    }

    #[tokio::test]
    async fn test_join_notifies_everyone() {
        let server = CollabServer::new();
        let mut a = connect(&server, "a").await;
        let mut b = connect(&server, "b").await;

        server.join("a", "room", "ann").await.unwrap();
        assert!(matches!(next_event(&mut a), Some(ServerEvent::Joined { ref clients, .. }) if clients.len() == 1));

        let clients = server.join("b", "room", "ben").await.unwrap();
        assert_eq!(clients.len(), 2);

        for rx in [&mut a, &mut b] {
            match next_event(rx) {
                Some(ServerEvent::Joined { clients, username, socket_id }) => {
                    assert_eq!(clients.len(), 2);
                    assert_eq!(username, "ben");
                    assert_eq!(socket_id, "b");
                }
                other => panic!("unexpected event: {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_code_change_skips_sender() {
        let server = CollabServer::new();
        let mut a = connect(&server, "a").await;
        let mut b = connect(&server, "b").await;
        server.join("a", "room", "ann").await.unwrap();
        server.join("b", "room", "ben").await.unwrap();
        while next_event(&mut a).is_some() {}
        while next_event(&mut b).is_some() {}

        server.relay_code("a", "room", "fn main() {}".to_string()).await.unwrap();

        assert_eq!(
            next_event(&mut b),
            Some(ServerEvent::CodeChange { code: "fn main() {}".to_string() })
        );
        assert!(next_event(&mut a).is_none());
    }

    #[tokio::test]
    async fn test_relay_requires_membership() {
        let server = CollabServer::new();
        let _a = connect(&server, "a").await;
        server.join("a", "room", "ann").await.unwrap();
        let _outsider = connect(&server, "x").await;

        let err = server.relay_code("x", "room", "evil".to_string()).await.unwrap_err();
        assert!(matches!(err, AppError::NotRoomMember { .. }));

        let err = server
            .chat("x", "room", "x".to_string(), "hi".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotRoomMember { .. }));
    }

    #[tokio::test]
    async fn test_chat_includes_sender() {
        let server = CollabServer::new();
        let mut a = connect(&server, "a").await;
        server.join("a", "room", "ann").await.unwrap();
        next_event(&mut a);

        server
            .chat("a", "room", "ann".to_string(), "hello".to_string())
            .await
            .unwrap();

        assert_eq!(
            next_event(&mut a),
            Some(ServerEvent::ChatMessage {
                username: "ann".to_string(),
                message: "hello".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_sync_code_targets_one_socket() {
        let server = CollabServer::new();
        let mut a = connect(&server, "a").await;
        let mut b = connect(&server, "b").await;

        server.sync_code("b", "let x = 1;".to_string()).await.unwrap();
        assert!(next_event(&mut a).is_none());
        assert_eq!(
            next_event(&mut b),
            Some(ServerEvent::CodeChange { code: "let x = 1;".to_string() })
        );

        let err = server.sync_code("ghost", String::new()).await.unwrap_err();
        assert!(matches!(err, AppError::PeerNotFound(_)));
    }

    #[tokio::test]
    async fn test_disconnect_announces_and_cleans_up() {
        let server = CollabServer::new();
        let _a = connect(&server, "a").await;
        let mut b = connect(&server, "b").await;
        server.join("a", "room", "ann").await.unwrap();
        server.join("b", "room", "ben").await.unwrap();
        while next_event(&mut b).is_some() {}

        server.disconnect("a").await;

        assert_eq!(
            next_event(&mut b),
            Some(ServerEvent::Disconnected {
                socket_id: "a".to_string(),
                username: "ann".to_string()
            })
        );
        assert_eq!(server.connection_count().await, 1);
        assert!(server.room_manager().get_peer("a").await.is_none());

        server.disconnect("b").await;
        assert!(!server.room_manager().room_exists("room").await);
    }

    #[tokio::test]
    async fn test_leave_room_keeps_connection() {
        let server = CollabServer::new();
        let _a = connect(&server, "a").await;
        let mut b = connect(&server, "b").await;
        server.join("a", "room", "ann").await.unwrap();
        server.join("b", "room", "ben").await.unwrap();
        while next_event(&mut b).is_some() {}

        server.leave_room("a", "room").await.unwrap();
        assert!(matches!(next_event(&mut b), Some(ServerEvent::Disconnected { .. })));
        assert_eq!(server.connection_count().await, 2);

        assert!(server.leave_room("a", "room").await.is_err());
    }
}
