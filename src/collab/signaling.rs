use serde::{Deserialize, Serialize};

use super::room::ClientInfo;

/// Frames sent by editor clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    Join {
        room_id: String,
        username: String,
    },

    CodeChange {
        room_id: String,
        code: String,
    },

    /// Push the sender's buffer to one newly joined peer
    SyncCode {
        socket_id: String,
        code: String,
    },

    ChatMessage {
        room_id: String,
        username: String,
        message: String,
    },

    Leave {
        room_id: String,
    },
}

/// Frames the server pushes to editor clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ServerEvent {
    Joined {
        clients: Vec<ClientInfo>,
        username: String,
        socket_id: String,
    },

    CodeChange {
        code: String,
    },

    ChatMessage {
        username: String,
        message: String,
    },

    Disconnected {
        socket_id: String,
        username: String,
    },

    Error {
        message: String,
    },
}
