use chrono::Utc;
use serde_json::json;
use warp::{Filter, Rejection, Reply};

use super::filters::{json_body, with_auth, with_state};
use super::reply;
use crate::auth::Claims;
use crate::contest::{NewContest, NewProblem};
use crate::state::AppState;

pub fn list_contests_route(
    state: AppState,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("api" / "contests")
        .and(warp::get())
        .and(with_state(state))
        .and_then(|state: AppState| async move {
            let contests = state.contests.list_contests(Utc::now()).await;
            Ok::<_, Rejection>(reply::ok(&contests))
        })
}

pub fn get_contest_route(
    state: AppState,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("api" / "contests" / String)
        .and(warp::get())
        .and(with_state(state))
        .and_then(|contest_id: String, state: AppState| async move {
            let contest = state
                .contests
                .get_contest(&contest_id, Utc::now())
                .await
                .map_err(warp::reject::custom)?;
            Ok::<_, Rejection>(reply::ok(&contest))
        })
}

pub fn create_contest_route(
    state: AppState,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("api" / "contests")
        .and(warp::post())
        .and(with_auth(state.clone()))
        .and(json_body::<NewContest>())
        .and(with_state(state))
        .and_then(create_contest)
}

pub fn join_contest_route(
    state: AppState,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("api" / "contests" / String / "join")
        .and(warp::post())
        .and(with_auth(state.clone()))
        .and(with_state(state))
        .and_then(join_contest)
}

pub fn list_problems_route(
    state: AppState,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("api" / "contests" / String / "problems")
        .and(warp::get())
        .and(with_state(state))
        .and_then(|contest_id: String, state: AppState| async move {
            let problems = state.contests.problems_for_contest(&contest_id).await;
            Ok::<_, Rejection>(reply::ok(&problems))
        })
}

pub fn create_problem_route(
    state: AppState,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("api" / "contests" / String / "problems")
        .and(warp::post())
        .and(with_auth(state.clone()))
        .and(json_body::<NewProblem>())
        .and(with_state(state))
        .and_then(create_problem)
}

pub fn get_problem_route(
    state: AppState,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("api" / "problems" / String)
        .and(warp::get())
        .and(with_state(state))
        .and_then(|problem_id: String, state: AppState| async move {
            let problem = state
                .contests
                .get_problem(&problem_id)
                .await
                .map_err(warp::reject::custom)?;
            Ok::<_, Rejection>(reply::ok(&problem))
        })
}

pub fn leaderboard_route(
    state: AppState,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("api" / "contests" / String / "leaderboard")
        .and(warp::get())
        .and(with_state(state))
        .and_then(|contest_id: String, state: AppState| async move {
            let entries = state.contests.leaderboard(&contest_id).await;
            Ok::<_, Rejection>(reply::ok(&entries))
        })
}

async fn create_contest(
    claims: Claims,
    request: NewContest,
    state: AppState,
) -> Result<impl Reply, Rejection> {
    let contest = state
        .contests
        .create_contest(request, Some(claims.username), Utc::now())
        .await
        .map_err(warp::reject::custom)?;
    Ok(reply::created(&contest))
}

async fn join_contest(
    contest_id: String,
    claims: Claims,
    state: AppState,
) -> Result<impl Reply, Rejection> {
    state
        .contests
        .join_contest(&contest_id, Utc::now())
        .await
        .map_err(warp::reject::custom)?;

    tracing::info!(contest_id = %contest_id, user_id = %claims.user_id, "User joined contest");
    Ok(reply::ok_with_message(
        &json!({ "userId": claims.user_id }),
        "Successfully joined contest",
    ))
}

async fn create_problem(
    contest_id: String,
    claims: Claims,
    request: NewProblem,
    state: AppState,
) -> Result<impl Reply, Rejection> {
    let problem = state
        .contests
        .create_problem(&contest_id, request, &claims.username)
        .await
        .map_err(warp::reject::custom)?;
    Ok(reply::created(&problem))
}
