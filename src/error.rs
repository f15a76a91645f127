use thiserror::Error;
use warp::http::StatusCode;

/// Error types shared by the HTTP API and the collaboration relay
#[derive(Debug, Error)]
pub enum AppError {
    /// Request validation errors
    #[error("{0}")]
    Validation(String),

    #[error("Invalid JSON body: {0}")]
    InvalidBody(String),

    #[error("{0}")]
    Conflict(String),

    /// Authentication errors
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Auth not available in demo mode")]
    AuthUnavailable,

    #[error("Failed to sign token: {0}")]
    TokenSigning(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    /// Contest errors
    #[error("Contest not found")]
    ContestNotFound(String),

    #[error("Problem not found")]
    ProblemNotFound(String),

    #[error("Contest finished")]
    ContestFinished(String),

    #[error("Contest is full")]
    ContestFull(String),

    /// Room and peer errors
    #[error("Peer {0} not found")]
    PeerNotFound(String),

    #[error("Peer {peer_id} is not a member of room {room_id}")]
    NotRoomMember { peer_id: String, room_id: String },

    #[error("Invalid socket message: {0}")]
    InvalidSocketMessage(String),

    #[error("Failed to serialize message: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Convenience type alias for Results using AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        AppError::Unauthorized(msg.into())
    }

    /// HTTP status the API answers with for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::InvalidBody(_)
            | AppError::ContestFinished(_)
            | AppError::ContestFull(_)
            | AppError::InvalidSocketMessage(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthUnavailable => StatusCode::NOT_IMPLEMENTED,
            AppError::ContestNotFound(_)
            | AppError::ProblemNotFound(_)
            | AppError::PeerNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden(_) | AppError::NotRoomMember { .. } => StatusCode::FORBIDDEN,
            AppError::TokenSigning(_)
            | AppError::PasswordHash(_)
            | AppError::SerializationFailed(_)
            | AppError::InvalidConfiguration(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl warp::reject::Reject for AppError {}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(err.to_string())
    }
}
