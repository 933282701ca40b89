use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use core_types::CoreError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to read results file: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid value in results file: {0}")]
    InvalidData(#[from] CoreError),
    #[error("File read task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Converts our custom `AppError` into an HTTP response.
///
/// Every failure is a 500 with the message in an `error` field, which is the
/// shape the api-client expects.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed.");
        let body = Json(json!({ "error": self.to_string() }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
