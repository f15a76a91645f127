use chrono::Utc;
use warp::{Filter, Rejection, Reply};

use super::filters::{json_body, with_auth, with_state};
use super::reply;
use crate::auth::Claims;
use crate::contest::{Author, NewSubmission};
use crate::state::AppState;

pub fn submit_route(
    state: AppState,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("api" / "submissions")
        .and(warp::post())
        .and(with_auth(state.clone()))
        .and(json_body::<NewSubmission>())
        .and(with_state(state))
        .and_then(submit)
}

pub fn contest_submissions_route(
    state: AppState,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("api" / "contests" / String / "submissions")
        .and(warp::get())
        .and(with_state(state))
        .and_then(|contest_id: String, state: AppState| async move {
            let submissions = state.contests.submissions_for_contest(&contest_id).await;
            Ok::<_, Rejection>(reply::ok(&submissions))
        })
}

pub fn user_submissions_route(
    state: AppState,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("api" / "contests" / String / "users" / String / "submissions")
        .and(warp::get())
        .and(with_state(state))
        .and_then(|contest_id: String, user_id: String, state: AppState| async move {
            let submissions = state
                .contests
                .submissions_for_user(&contest_id, &user_id)
                .await;
            Ok::<_, Rejection>(reply::ok(&submissions))
        })
}

async fn submit(
    claims: Claims,
    request: NewSubmission,
    state: AppState,
) -> Result<impl Reply, Rejection> {
    let author = Author {
        user_id: claims.user_id,
        username: claims.username,
    };

    let submission = state
        .contests
        .submit(request, author, Utc::now())
        .await
        .map_err(warp::reject::custom)?;
    Ok(reply::created(&submission))
}
