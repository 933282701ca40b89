use crate::{error::AppError, loader, AppState};
use axum::{extract::State, Json};
use core_types::{ChangePointRecord, LogReturnRecord, MatchedEventRecord, StatusMessage};
use std::path::PathBuf;
use std::sync::Arc;

/// Runs a blocking file read on the blocking pool.
async fn read_blocking<T, F>(path: PathBuf, read: F) -> Result<Vec<T>, AppError>
where
    T: Send + 'static,
    F: FnOnce(&std::path::Path) -> Result<Vec<T>, AppError> + Send + 'static,
{
    tokio::task::spawn_blocking(move || read(&path)).await?
}

/// # GET /
pub async fn home() -> Json<StatusMessage> {
    Json(StatusMessage {
        message: "API is running".to_string(),
    })
}

/// # GET /log-returns
pub async fn get_log_returns(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LogReturnRecord>>, AppError> {
    let path = state.processed_dir.join(loader::LOG_RETURNS_FILE);
    let points = read_blocking(path, loader::read_log_returns).await?;
    Ok(Json(points.iter().map(LogReturnRecord::from).collect()))
}

/// # GET /change-points
pub async fn get_change_points(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ChangePointRecord>>, AppError> {
    let path = state.results_dir.join(loader::CHANGE_POINTS_FILE);
    let points = read_blocking(path, loader::read_change_points).await?;
    Ok(Json(points.iter().map(ChangePointRecord::from).collect()))
}

/// # GET /matched-events
pub async fn get_matched_events(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<MatchedEventRecord>>, AppError> {
    let path = state.results_dir.join(loader::MATCHED_EVENTS_FILE);
    let events = read_blocking(path, loader::read_matched_events).await?;
    Ok(Json(events.iter().map(MatchedEventRecord::from).collect()))
}
