use api_client::{error::ApiError, ApiClient};
use chrono::{DateTime, Utc};
use core_types::{ChangePoint, LogReturnPoint, MatchedEvent};
use serde::Serialize;
use std::fmt;

/// The three independently fetched collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    LogReturns,
    ChangePoints,
    MatchedEvents,
}

impl Collection {
    pub const fn as_str(self) -> &'static str {
        match self {
            Collection::LogReturns => "log returns",
            Collection::ChangePoints => "change points",
            Collection::MatchedEvents => "matched events",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of fetching one collection.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionState<T> {
    Loaded(Vec<T>),
    /// The fetch failed; the collection reads as empty.
    Failed { reason: String },
}

impl<T> CollectionState<T> {
    fn from_result(collection: Collection, result: Result<Vec<T>, ApiError>) -> Self {
        match result {
            Ok(items) => {
                tracing::info!(%collection, count = items.len(), "Collection loaded.");
                CollectionState::Loaded(items)
            }
            Err(e) => {
                tracing::warn!(%collection, error = %e, "Collection unavailable; showing it as empty.");
                CollectionState::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// The fetched items, or an empty slice if the fetch failed.
    pub fn items(&self) -> &[T] {
        match self {
            CollectionState::Loaded(items) => items,
            CollectionState::Failed { .. } => &[],
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            CollectionState::Loaded(_) => None,
            CollectionState::Failed { reason } => Some(reason),
        }
    }
}

/// Result of the liveness probe.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum ApiStatus {
    /// The service answered; carries its status message.
    Online(String),
    /// The probe failed; carries the reason.
    Offline(String),
}

impl ApiStatus {
    pub fn is_online(&self) -> bool {
        matches!(self, ApiStatus::Online(_))
    }
}

impl fmt::Display for ApiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiStatus::Online(message) => write!(f, "{message}"),
            ApiStatus::Offline(reason) => write!(f, "API error: {reason}"),
        }
    }
}

/// Everything fetched in one refresh. Immutable once built.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub status: ApiStatus,
    pub log_returns: CollectionState<LogReturnPoint>,
    pub change_points: CollectionState<ChangePoint>,
    pub matched_events: CollectionState<MatchedEvent>,
    pub fetched_at: DateTime<Utc>,
}

/// Probes the service and fetches all three collections concurrently.
///
/// No ordering is imposed between the four requests and none of them can
/// abort the others: every failure is folded into the snapshot.
pub async fn fetch_snapshot(client: &dyn ApiClient) -> Snapshot {
    tracing::info!("Fetching snapshot.");
    let (status, log_returns, change_points, matched_events) = futures::join!(
        client.fetch_status(),
        client.fetch_log_returns(),
        client.fetch_change_points(),
        client.fetch_matched_events(),
    );

    let status = match status {
        Ok(message) => ApiStatus::Online(message),
        Err(e) => {
            tracing::warn!(error = %e, "Status probe failed.");
            ApiStatus::Offline(e.to_string())
        }
    };

    Snapshot {
        status,
        log_returns: CollectionState::from_result(Collection::LogReturns, log_returns),
        change_points: CollectionState::from_result(Collection::ChangePoints, change_points),
        matched_events: CollectionState::from_result(Collection::MatchedEvents, matched_events),
        fetched_at: Utc::now(),
    }
}
