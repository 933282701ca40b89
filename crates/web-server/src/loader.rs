use crate::error::AppError;
use core_types::{parse_iso_date, ChangePoint, LogReturnPoint, MatchedEvent, TauMode};
use serde::Deserialize;
use std::path::Path;

pub const LOG_RETURNS_FILE: &str = "brent_oil_log_returns.csv";
pub const CHANGE_POINTS_FILE: &str = "change_points.csv";
pub const MATCHED_EVENTS_FILE: &str = "matched_events.csv";

// Raw CSV rows. Dates stay strings until they are validated by `parse_iso_date`.

#[derive(Debug, Deserialize)]
struct LogReturnRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "LogReturn")]
    log_return: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ChangePointRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Tau_Mode")]
    tau_mode: String,
}

#[derive(Debug, Deserialize)]
struct MatchedEventRow {
    #[serde(rename = "Change_Point_Date")]
    change_point_date: String,
    #[serde(rename = "Event_Date")]
    event_date: String,
    #[serde(rename = "Event_Description")]
    event_description: String,
    #[serde(rename = "Event_Type", default)]
    event_type: Option<String>,
    #[serde(rename = "Date_Diff_Days", default)]
    date_diff_days: Option<f64>,
    #[serde(rename = "Mean_Before", default)]
    mean_before: Option<f64>,
    #[serde(rename = "Mean_After", default)]
    mean_after: Option<f64>,
    #[serde(rename = "Impact_Percent", default)]
    impact_percent: Option<f64>,
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn read_rows<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Vec<T>, AppError> {
    tracing::debug!(path = %path.display(), "Reading results file.");
    let mut reader = csv::Reader::from_path(path)?;
    let rows = reader.deserialize().collect::<Result<Vec<T>, csv::Error>>()?;
    Ok(rows)
}

/// Reads the processed series, skipping rows without a log return.
pub fn read_log_returns(path: &Path) -> Result<Vec<LogReturnPoint>, AppError> {
    read_rows::<LogReturnRow>(path)?
        .into_iter()
        .filter_map(|row| {
            finite(row.log_return).map(|log_return| (row.date, log_return))
        })
        .map(|(date, log_return)| {
            Ok(LogReturnPoint {
                date: parse_iso_date("Date", &date)?,
                log_return,
            })
        })
        .collect()
}

fn parse_tau(raw: &str) -> TauMode {
    let trimmed = raw.trim();
    if let Ok(index) = trimmed.parse::<i64>() {
        TauMode::Index(index)
    } else if let Ok(value) = trimmed.parse::<f64>() {
        TauMode::Fractional(value)
    } else {
        TauMode::Label(trimmed.to_string())
    }
}

pub fn read_change_points(path: &Path) -> Result<Vec<ChangePoint>, AppError> {
    read_rows::<ChangePointRow>(path)?
        .into_iter()
        .map(|row| {
            Ok(ChangePoint {
                date: parse_iso_date("Date", &row.date)?,
                tau: parse_tau(&row.tau_mode),
            })
        })
        .collect()
}

/// Reads matched events. Empty and `nan` numeric cells become absent values.
pub fn read_matched_events(path: &Path) -> Result<Vec<MatchedEvent>, AppError> {
    read_rows::<MatchedEventRow>(path)?
        .into_iter()
        .map(|row| {
            Ok(MatchedEvent {
                change_point_date: parse_iso_date("Change_Point_Date", &row.change_point_date)?,
                description: row.event_description,
                event_date: parse_iso_date("Event_Date", &row.event_date)?,
                impact_percent: finite(row.impact_percent),
                event_type: row.event_type.filter(|s| !s.trim().is_empty()),
                date_diff_days: finite(row.date_diff_days).map(|v| v as i64),
                mean_before: finite(row.mean_before),
                mean_after: finite(row.mean_after),
            })
        })
        .collect()
}
