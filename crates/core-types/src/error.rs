use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid date for field '{field}': '{value}' is not an ISO-8601 calendar date")]
    InvalidDate { field: &'static str, value: String },
}
