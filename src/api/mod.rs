pub mod auth_routes;
pub mod collab_routes;
pub mod collab_websocket;
pub mod contest_routes;
pub mod filters;
pub mod reply;
pub mod submission_routes;
pub mod system_routes;

use std::path::PathBuf;
use warp::{Filter, Rejection, Reply};

use crate::state::AppState;

/// The complete filter tree. Errors are rendered before CORS is applied so
/// failure responses carry CORS headers too.
pub fn routes(
    state: AppState,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let auth = auth_routes::signup_route(state.clone())
        .or(auth_routes::login_route(state.clone()));

    let contests = contest_routes::list_contests_route(state.clone())
        .or(contest_routes::create_contest_route(state.clone()))
        .or(contest_routes::get_contest_route(state.clone()))
        .or(contest_routes::join_contest_route(state.clone()))
        .or(contest_routes::list_problems_route(state.clone()))
        .or(contest_routes::create_problem_route(state.clone()))
        .or(contest_routes::leaderboard_route(state.clone()))
        .or(contest_routes::get_problem_route(state.clone()));

    let submissions = submission_routes::submit_route(state.clone())
        .or(submission_routes::contest_submissions_route(state.clone()))
        .or(submission_routes::user_submissions_route(state.clone()));

    let system = system_routes::health_check().or(system_routes::judge_echo_route());

    let socket = collab_routes::collab_websocket_route(state.collab.clone());
    let front_end = system_routes::static_files(PathBuf::from(&state.config.server.static_dir));

    auth.or(contests)
        .or(submissions)
        .or(system)
        .or(socket)
        .or(front_end)
        .recover(reply::handle_rejection)
        .with(cors(&state.config.server.cors_origin))
        .with(warp::trace::request())
}

fn cors(origin: &str) -> warp::cors::Cors {
    let builder = warp::cors()
        .allow_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allow_headers(vec!["content-type", "authorization"]);

    if origin == "*" {
        builder.allow_any_origin().build()
    } else {
        builder.allow_origin(origin).build()
    }
}
