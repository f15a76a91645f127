use std::path::PathBuf;
use serde::Deserialize;
use warp::filters::path::Peek;
use warp::http::Method;
use warp::{Filter, Rejection, Reply};

#[derive(Debug, Default, Deserialize)]
pub struct JudgeRequest {
    #[serde(default)]
    pub stdin: Option<String>,
}

pub fn health_check() -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("api" / "health")
        .and(warp::get())
        .map(|| {
            warp::reply::json(&serde_json::json!({
                "status": "healthy",
                "service": "CodeCollab Server",
                "version": env!("CARGO_PKG_VERSION")
            }))
        })
}

/// Stand-in for the remote execution service: echoes stdin back as stdout
pub fn judge_echo_route() -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("api" / "judge0" / "submit")
        .and(warp::post())
        .and(super::filters::json_body::<JudgeRequest>())
        .map(|request: JudgeRequest| {
            warp::reply::json(&serde_json::json!({
                "stdout": request.stdin.unwrap_or_default()
            }))
        })
}

/// Serves the built front end for non-API GETs, falling back to
/// `index.html` so client-side routes resolve. Anything else rejects as not
/// found, never as a method mismatch.
pub fn static_files(dir: PathBuf) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    if dir.is_dir() {
        tracing::info!(dir = %dir.display(), "Serving static front end");
    } else {
        tracing::debug!(dir = %dir.display(), "Static directory missing, front end not served");
    }

    let index = dir.join("index.html");

    warp::method()
        .and(warp::path::peek())
        .and_then(|method: Method, peek: Peek| async move {
            let first = peek.segments().next().unwrap_or_default();
            let readable = method == Method::GET || method == Method::HEAD;
            if !readable || first == "api" || first == "ws" {
                Err(warp::reject::not_found())
            } else {
                Ok(())
            }
        })
        .untuple_one()
        .and(warp::fs::dir(dir).or(warp::fs::file(index)))
}
