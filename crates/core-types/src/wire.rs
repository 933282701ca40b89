//! JSON records exchanged with the results API.
//!
//! Field names are the fixed wire contract and are case-sensitive. Dates travel
//! as `YYYY-MM-DD` strings and are validated when a record is converted into
//! its domain type.

use crate::enums::TauMode;
use crate::error::CoreError;
use crate::structs::{parse_iso_date, ChangePoint, LogReturnPoint, MatchedEvent};
use serde::{Deserialize, Serialize};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Body of `GET /`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub message: String,
}

/// One element of `GET /log-returns`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogReturnRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "LogReturn")]
    pub log_return: f64,
}

/// One element of `GET /change-points`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangePointRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Tau_Mode")]
    pub tau_mode: TauMode,
}

/// One element of `GET /matched-events`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedEventRecord {
    #[serde(rename = "Change_Point_Date")]
    pub change_point_date: String,
    #[serde(rename = "Event_Description")]
    pub event_description: String,
    #[serde(rename = "Event_Date")]
    pub event_date: String,
    #[serde(rename = "Impact_Percent", default)]
    pub impact_percent: Option<f64>,

    #[serde(rename = "Event_Type", default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(rename = "Date_Diff_Days", default, skip_serializing_if = "Option::is_none")]
    pub date_diff_days: Option<i64>,
    #[serde(rename = "Mean_Before", default, skip_serializing_if = "Option::is_none")]
    pub mean_before: Option<f64>,
    #[serde(rename = "Mean_After", default, skip_serializing_if = "Option::is_none")]
    pub mean_after: Option<f64>,
}

impl TryFrom<LogReturnRecord> for LogReturnPoint {
    type Error = CoreError;

    fn try_from(record: LogReturnRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            date: parse_iso_date("Date", &record.date)?,
            log_return: record.log_return,
        })
    }
}

impl TryFrom<ChangePointRecord> for ChangePoint {
    type Error = CoreError;

    fn try_from(record: ChangePointRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            date: parse_iso_date("Date", &record.date)?,
            tau: record.tau_mode,
        })
    }
}

impl TryFrom<MatchedEventRecord> for MatchedEvent {
    type Error = CoreError;

    fn try_from(record: MatchedEventRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            change_point_date: parse_iso_date("Change_Point_Date", &record.change_point_date)?,
            description: record.event_description,
            event_date: parse_iso_date("Event_Date", &record.event_date)?,
            impact_percent: record.impact_percent.filter(|v| v.is_finite()),
            event_type: record.event_type,
            date_diff_days: record.date_diff_days,
            mean_before: record.mean_before.filter(|v| v.is_finite()),
            mean_after: record.mean_after.filter(|v| v.is_finite()),
        })
    }
}

impl From<&LogReturnPoint> for LogReturnRecord {
    fn from(point: &LogReturnPoint) -> Self {
        Self {
            date: point.date.format(DATE_FORMAT).to_string(),
            log_return: point.log_return,
        }
    }
}

impl From<&ChangePoint> for ChangePointRecord {
    fn from(point: &ChangePoint) -> Self {
        Self {
            date: point.date.format(DATE_FORMAT).to_string(),
            tau_mode: point.tau.clone(),
        }
    }
}

impl From<&MatchedEvent> for MatchedEventRecord {
    fn from(event: &MatchedEvent) -> Self {
        Self {
            change_point_date: event.change_point_date.format(DATE_FORMAT).to_string(),
            event_description: event.description.clone(),
            event_date: event.event_date.format(DATE_FORMAT).to_string(),
            impact_percent: event.impact_percent,
            event_type: event.event_type.clone(),
            date_diff_days: event.date_diff_days,
            mean_before: event.mean_before,
            mean_after: event.mean_after,
        }
    }
}
