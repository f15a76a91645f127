use std::convert::Infallible;
use serde::de::DeserializeOwned;
use warp::{Filter, Rejection};

use crate::auth::Claims;
use crate::state::AppState;

pub const MAX_BODY_BYTES: u64 = 1024 * 1024;

pub fn with_state(
    state: AppState,
) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

/// Verified claims from the `Authorization: Bearer` header
pub fn with_auth(
    state: AppState,
) -> impl Filter<Extract = (Claims,), Error = Rejection> + Clone {
    warp::header::optional::<String>("authorization")
        .and(with_state(state))
        .and_then(|header: Option<String>, state: AppState| async move {
            state
                .auth
                .authenticate(header.as_deref())
                .map_err(warp::reject::custom)
        })
}

pub fn json_body<T: DeserializeOwned + Send>() -> impl Filter<Extract = (T,), Error = Rejection> + Clone {
    warp::body::content_length_limit(MAX_BODY_BYTES).and(warp::body::json())
}
