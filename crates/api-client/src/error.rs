use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to reach the API: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("The API returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to deserialize the API response: {0}")]
    Deserialization(String),

    #[error("Invalid data format from API: {0}")]
    InvalidData(#[from] CoreError),
}
