//! Gateway-level error responses.
//!
//! [`shared::error::AppError`] and axum's `IntoResponse` are both foreign to
//! this crate, so we cannot implement one for the other directly; `HttpError`
//! is the local wrapper that makes the impl legal and gives every handler a
//! single `?`-friendly error type.

use axum::response::{IntoResponse, Response};
use axum::Json;
use shared::error::{AppError, ApiResponse};

pub struct HttpError(pub AppError);

impl From<AppError> for HttpError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.0.http_status(), Json(ApiResponse::<()>::error(&self.0))).into_response()
    }
}

pub type ApiResult<T> = Result<T, HttpError>;
