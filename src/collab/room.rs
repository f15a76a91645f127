use std::collections::HashMap;
use std::sync::Arc;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// A connected socket and the rooms it has joined
#[derive(Debug, Clone)]
pub struct Peer {
    pub username: String,
    pub rooms: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Room {
    /// Socket ids in join order
    pub members: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    pub socket_id: String,
    pub username: String,
}

/// A departure that the remaining members of `room_id` should hear about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    pub room_id: String,
    pub username: String,
    pub remaining: Vec<String>,
}

pub struct RoomManager {
    rooms: Arc<RwLock<HashMap<String, Room>>>,
    peers: Arc<RwLock<HashMap<String, Peer>>>,
}

impl RoomManager {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            rooms: Arc::new(RwLock::new(HashMap::new())),
            peers: Arc::new(RwLock::new(HashMap::new())),
        })
    }

    /// Add a socket to a room, creating the room on first join. The username
    /// is per socket, so joining again renames the socket everywhere.
    /// Returns every client in the room after the join.
    pub async fn join_room(&self, room_id: &str, socket_id: &str, username: &str) -> Vec<ClientInfo> {
        let mut rooms = self.rooms.write().await;
        let mut peers = self.peers.write().await;

        let peer = peers.entry(socket_id.to_string()).or_insert_with(|| Peer {
            username: username.to_string(),
            rooms: Vec::new(),
        });
        peer.username = username.to_string();
        if !peer.rooms.iter().any(|r| r == room_id) {
            peer.rooms.push(room_id.to_string());
        }

        let room = rooms.entry(room_id.to_string()).or_insert_with(|| {
            tracing::info!(room_id = %room_id, "Room created");
            Room::default()
        });
        if !room.members.iter().any(|m| m == socket_id) {
            room.members.push(socket_id.to_string());
        }

        tracing::info!(
            socket_id = %socket_id,
            username = %username,
            room_id = %room_id,
            members = room.members.len(),
            "Peer joined room"
        );

        Self::clients_of(room, &peers)
    }

    /// Remove a socket from one room. `None` if it was not a member.
    pub async fn leave_room(&self, room_id: &str, socket_id: &str) -> Option<Departure> {
        let mut rooms = self.rooms.write().await;
        let mut peers = self.peers.write().await;

        let peer = peers.get_mut(socket_id)?;
        let position = peer.rooms.iter().position(|r| r == room_id)?;
        peer.rooms.remove(position);
        let username = peer.username.clone();

        let remaining = Self::drop_member(&mut rooms, room_id, socket_id);
        tracing::info!(socket_id = %socket_id, room_id = %room_id, "Peer left room");

        Some(Departure {
            room_id: room_id.to_string(),
            username,
            remaining,
        })
    }

    /// Forget a socket entirely. Returns one departure per room it was in.
    pub async fn remove_peer(&self, socket_id: &str) -> Vec<Departure> {
        let mut rooms = self.rooms.write().await;
        let mut peers = self.peers.write().await;

        let peer = match peers.remove(socket_id) {
            Some(peer) => peer,
            None => return Vec::new(),
        };

        peer.rooms
            .iter()
            .map(|room_id| Departure {
                room_id: room_id.clone(),
                username: peer.username.clone(),
                remaining: Self::drop_member(&mut rooms, room_id, socket_id),
            })
            .collect()
    }

    pub async fn get_peer(&self, socket_id: &str) -> Option<Peer> {
        let peers = self.peers.read().await;
        peers.get(socket_id).cloned()
    }

    pub async fn room_exists(&self, room_id: &str) -> bool {
        let rooms = self.rooms.read().await;
        rooms.contains_key(room_id)
    }

    pub async fn is_member(&self, room_id: &str, socket_id: &str) -> bool {
        let rooms = self.rooms.read().await;
        rooms
            .get(room_id)
            .map(|r| r.members.iter().any(|m| m == socket_id))
            .unwrap_or(false)
    }

    /// Socket ids in a room, in join order
    pub async fn room_members(&self, room_id: &str) -> Vec<String> {
        let rooms = self.rooms.read().await;
        rooms.get(room_id).map(|r| r.members.clone()).unwrap_or_default()
    }

    fn clients_of(room: &Room, peers: &HashMap<String, Peer>) -> Vec<ClientInfo> {
        room.members
            .iter()
            .map(|socket_id| ClientInfo {
                socket_id: socket_id.clone(),
                username: peers
                    .get(socket_id)
                    .map(|p| p.username.clone())
                    .unwrap_or_default(),
            })
            .collect()
    }

    /// Drops the member and deletes the room once empty. Returns who is left.
    fn drop_member(rooms: &mut HashMap<String, Room>, room_id: &str, socket_id: &str) -> Vec<String> {
        let remaining = match rooms.get_mut(room_id) {
            Some(room) => {
                room.members.retain(|m| m != socket_id);
                room.members.clone()
            }
            None => return Vec::new(),
        };

        if remaining.is_empty() {
            rooms.remove(room_id);
            tracing::info!(room_id = %room_id, "Last peer left, closing room");
        }
        remaining
    }
}
