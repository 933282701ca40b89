use crate::error::ApiError;
use async_trait::async_trait;
use configuration::ApiConfig;
use core_types::{
    ChangePoint, ChangePointRecord, CoreError, LogReturnPoint, LogReturnRecord, MatchedEvent,
    MatchedEventRecord, StatusMessage,
};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

pub mod error;
pub mod responses;
// --- Public API ---
pub use responses::ApiErrorResponse;

pub const STATUS_PATH: &str = "/";
pub const LOG_RETURNS_PATH: &str = "/log-returns";
pub const CHANGE_POINTS_PATH: &str = "/change-points";
pub const MATCHED_EVENTS_PATH: &str = "/matched-events";

/// The read-only interface to the results API.
/// The dashboard depends only on this trait, so the HTTP implementation can be
/// swapped for an in-memory one in tests.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Liveness probe. Returns the service's status message.
    async fn fetch_status(&self) -> Result<String, ApiError>;

    /// Fetches the full log-return series, in the order served.
    async fn fetch_log_returns(&self) -> Result<Vec<LogReturnPoint>, ApiError>;

    /// Fetches every detected change point.
    async fn fetch_change_points(&self) -> Result<Vec<ChangePoint>, ApiError>;

    /// Fetches the events matched to change points.
    async fn fetch_matched_events(&self) -> Result<Vec<MatchedEvent>, ApiError>;
}

/// The `ApiClient` backed by plain HTTP GETs against the results API.
#[derive(Clone, Debug)]
pub struct HttpApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApiClient {
    pub fn new(api_config: &ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("brentwatch/", env!("CARGO_PKG_VERSION")))
            .timeout(api_config.timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: api_config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let text = response.text().await?;

        decode_response(status, &text)
    }
}

/// Turns a status and body into either the expected payload or a typed error.
fn decode_response<T: DeserializeOwned>(status: StatusCode, text: &str) -> Result<T, ApiError> {
    if status.is_success() {
        serde_json::from_str::<T>(text).map_err(|e| ApiError::Deserialization(e.to_string()))
    } else {
        // The service reports failures as `{"error": "..."}`; fall back to the raw body.
        let message = serde_json::from_str::<ApiErrorResponse>(text)
            .map(|body| body.error)
            .unwrap_or_else(|_| text.trim().to_string());
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

/// Converts every wire record, failing on the first invalid one.
fn convert_all<R, T>(records: Vec<R>) -> Result<Vec<T>, ApiError>
where
    T: TryFrom<R, Error = CoreError>,
{
    records
        .into_iter()
        .map(|r| T::try_from(r).map_err(ApiError::from))
        .collect()
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn fetch_status(&self) -> Result<String, ApiError> {
        let body: StatusMessage = self.get_json(STATUS_PATH).await?;
        Ok(body.message)
    }

    async fn fetch_log_returns(&self) -> Result<Vec<LogReturnPoint>, ApiError> {
        let records: Vec<LogReturnRecord> = self.get_json(LOG_RETURNS_PATH).await?;
        convert_all(records)
    }

    async fn fetch_change_points(&self) -> Result<Vec<ChangePoint>, ApiError> {
        let records: Vec<ChangePointRecord> = self.get_json(CHANGE_POINTS_PATH).await?;
        convert_all(records)
    }

    async fn fetch_matched_events(&self) -> Result<Vec<MatchedEvent>, ApiError> {
        let records: Vec<MatchedEventRecord> = self.get_json(MATCHED_EVENTS_PATH).await?;
        convert_all(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        let config = ApiConfig {
            base_url: "http://localhost:5000/".to_string(),
            timeout_secs: 1,
        };
        let client = HttpApiClient::new(&config).unwrap();
        assert_eq!(client.url(LOG_RETURNS_PATH), "http://localhost:5000/log-returns");
        assert_eq!(client.url(STATUS_PATH), "http://localhost:5000/");
    }

    #[test]
    fn error_body_message_is_surfaced() {
        let err = decode_response::<Vec<LogReturnRecord>>(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error": "No such file: results/change_points.csv"}"#,
        )
        .unwrap_err();
        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "No such file: results/change_points.csv");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_json_error_body_is_kept_verbatim() {
        let err =
            decode_response::<StatusMessage>(StatusCode::BAD_GATEWAY, "upstream down\n").unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 502, ref message } if message == "upstream down"));
    }

    #[test]
    fn malformed_success_body_is_a_deserialization_error() {
        let err = decode_response::<Vec<LogReturnRecord>>(StatusCode::OK, r#"{"Date": 1}"#).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn invalid_dates_fail_conversion() {
        let records = vec![LogReturnRecord {
            date: "not-a-date".to_string(),
            log_return: 0.01,
        }];
        let err = convert_all::<_, LogReturnPoint>(records).unwrap_err();
        assert!(matches!(err, ApiError::InvalidData(CoreError::InvalidDate { .. })));
    }
}
