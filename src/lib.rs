pub mod api;
pub mod auth;
pub mod collab;
pub mod config;
pub mod contest;
pub mod error;
pub mod state;

pub use config::Config;
pub use error::{AppError, Result};
pub use state::AppState;
