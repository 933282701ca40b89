use serde::Deserialize;

/// The body the results API sends alongside a non-success status.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: String,
}
