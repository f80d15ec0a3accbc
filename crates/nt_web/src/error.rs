use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// Wraps [`nt_core::Error`] so handlers can use `?`.
#[derive(Debug)]
pub struct AppError(pub nt_core::Error);

impl From<nt_core::Error> for AppError {
    fn from(err: nt_core::Error) -> Self {
        Self(err)
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        use nt_core::Error::*;
        match &self.0 {
            Validation(_) => StatusCode::BAD_REQUEST,
            SessionNotFound(_) => StatusCode::NOT_FOUND,
            InvalidState(_) => StatusCode::CONFLICT,
            Scraping(_) | Http(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("❌ {}", self.0);
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

pub type ApiResult<T> = std::result::Result<T, AppError>;
