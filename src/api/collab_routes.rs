use std::sync::Arc;
use warp::{Filter, Rejection, Reply};

use super::collab_websocket;
use crate::collab::CollabServer;

/// Creates the editor WebSocket route
pub fn collab_websocket_route(
    collab_server: Arc<CollabServer>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path("ws")
        .and(warp::path::end())
        .and(warp::ws())
        .and(with_collab_server(collab_server))
        .map(|ws: warp::ws::Ws, collab_server: Arc<CollabServer>| {
            ws.on_upgrade(move |websocket| {
                collab_websocket::handle_collab_websocket(websocket, collab_server)
            })
        })
}

fn with_collab_server(
    collab_server: Arc<CollabServer>,
) -> impl Filter<Extract = (Arc<CollabServer>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || collab_server.clone())
}
