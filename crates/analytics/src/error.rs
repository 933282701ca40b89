use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("Unrecognized price date '{0}' (expected DD-Mon-YY or YYYY-MM-DD)")]
    InvalidPriceDate(String),
}
