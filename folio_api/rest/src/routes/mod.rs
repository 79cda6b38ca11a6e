use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::{ApiFailure, ApiFieldError, ApiSuccess};

pub mod contact;
pub mod health;

pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    internal_error(err, "Internal server error")
}

/// Log `err` and respond with a generic 500 that does not leak any detail.
fn internal_error(err: impl Into<anyhow::Error>, message: &'static str) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err:#}");
    error(StatusCode::INTERNAL_SERVER_ERROR, message)
}

fn error(code: StatusCode, message: &'static str) -> Response {
    (
        code,
        Json(ApiFailure {
            success: false,
            message,
            errors: None,
        }),
    )
        .into_response()
}

fn validation_error(errors: impl IntoIterator<Item = ApiFieldError>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiFailure {
            success: false,
            message: "Validation error",
            errors: Some(errors.into_iter().collect()),
        }),
    )
        .into_response()
}

fn success<T: serde::Serialize>(code: StatusCode, message: &'static str, data: T) -> Response {
    (
        code,
        Json(ApiSuccess {
            success: true,
            message,
            data,
        }),
    )
        .into_response()
}
