use std::convert::Infallible;
use serde::Serialize;
use warp::filters::body::BodyDeserializeError;
use warp::http::StatusCode;
use warp::reject::{MethodNotAllowed, PayloadTooLarge};
use warp::reply::{Json, WithStatus};
use warp::{Rejection, Reply};

use crate::error::AppError;

/// `{success, data?, message?}` wrapper used by every `/api` response except
/// the judge echo and health check
#[derive(Debug, Serialize)]
pub struct Envelope<'a, T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<&'a T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'a str>,
}

fn envelope<T: Serialize>(status: StatusCode, data: Option<&T>, message: Option<&str>) -> WithStatus<Json> {
    let body = Envelope {
        success: status.is_success(),
        data,
        message,
    };
    warp::reply::with_status(warp::reply::json(&body), status)
}

pub fn ok<T: Serialize>(data: &T) -> WithStatus<Json> {
    envelope(StatusCode::OK, Some(data), None)
}

pub fn ok_with_message<T: Serialize>(data: &T, message: &str) -> WithStatus<Json> {
    envelope(StatusCode::OK, Some(data), Some(message))
}

pub fn created<T: Serialize>(data: &T) -> WithStatus<Json> {
    envelope(StatusCode::CREATED, Some(data), None)
}

pub fn failure(status: StatusCode, message: &str) -> WithStatus<Json> {
    envelope::<()>(status, None, Some(message))
}

/// Renders every rejection as a failure envelope
pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status, message) = if let Some(e) = err.find::<AppError>() {
        if e.status().is_server_error() && !matches!(e, AppError::AuthUnavailable) {
            tracing::error!(error = %e, "Request failed");
        }
        (e.status(), e.to_string())
    } else if let Some(e) = err.find::<BodyDeserializeError>() {
        let e = AppError::InvalidBody(e.to_string());
        (e.status(), e.to_string())
    } else if err.find::<PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "Payload too large".to_string())
    } else if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found".to_string())
    } else if err.find::<MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".to_string())
    } else {
        tracing::error!(rejection = ?err, "Unhandled rejection");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
    };

    Ok(failure(status, &message))
}
