use warp::{Filter, Rejection, Reply};

use super::filters::{json_body, with_state};
use super::reply;
use crate::auth::{LoginRequest, SignupRequest};
use crate::state::AppState;

pub fn signup_route(
    state: AppState,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("api" / "auth" / "signup")
        .and(warp::post())
        .and(json_body::<SignupRequest>())
        .and(with_state(state))
        .and_then(signup)
}

pub fn login_route(
    state: AppState,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("api" / "auth" / "login")
        .and(warp::post())
        .and(json_body::<LoginRequest>())
        .and(with_state(state))
        .and_then(login)
}

async fn signup(request: SignupRequest, state: AppState) -> Result<impl Reply, Rejection> {
    let session = state.auth.signup(request).await.map_err(warp::reject::custom)?;
    Ok(reply::created(&session))
}

async fn login(request: LoginRequest, state: AppState) -> Result<impl Reply, Rejection> {
    let session = state.auth.login(request).await.map_err(|e| {
        tracing::info!(error = %e, "Login rejected");
        warp::reject::custom(e)
    })?;
    tracing::info!(user_id = %session.user.id, "User logged in");
    Ok(reply::ok(&session))
}
