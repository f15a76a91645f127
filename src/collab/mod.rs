mod room;
mod server;
mod session;
mod signaling;

pub use room::{ClientInfo, RoomManager};
pub use server::CollabServer;
pub use session::CollabSession;
pub use signaling::{ClientMessage, ServerEvent};
