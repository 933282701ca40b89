use crate::snapshot::{ApiStatus, Collection, Snapshot};
use analytics::{filter_by_date_range, filter_by_keyword, summarize_returns, SummaryResult};
use chrono::{DateTime, Utc};
use configuration::FilterSettings;
use core_types::{ChangePoint, DateRange, LogReturnPoint, MatchedEvent};
use serde::Serialize;

/// The dashboard's filter state in one place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterParams {
    pub range: DateRange,
    pub keyword: String,
    pub show_events: bool,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            range: DateRange::unbounded(),
            keyword: String::new(),
            show_events: true,
        }
    }
}

impl From<&FilterSettings> for FilterParams {
    fn from(settings: &FilterSettings) -> Self {
        Self {
            range: settings.date_range(),
            keyword: settings.keyword.clone(),
            show_events: settings.show_events,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionFailure {
    pub collection: Collection,
    pub reason: String,
}

/// What the presentation layer renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub api_status: ApiStatus,
    pub filters: FilterParams,
    /// Log returns inside the date range.
    pub log_returns: Vec<LogReturnPoint>,
    /// Statistics over `log_returns`.
    pub summary: SummaryResult,
    /// All change points; they are not date-filtered.
    pub change_points: Vec<ChangePoint>,
    /// Keyword-filtered events, or `None` when the events panel is hidden.
    pub matched_events: Option<Vec<MatchedEvent>>,
    pub failures: Vec<CollectionFailure>,
    pub fetched_at: DateTime<Utc>,
}

/// Derives the rendered view from a snapshot. Pure; the snapshot is not modified.
pub fn build_view(snapshot: &Snapshot, params: &FilterParams) -> DashboardView {
    let log_returns = filter_by_date_range(snapshot.log_returns.items(), &params.range);
    let summary = summarize_returns(&log_returns);

    let matched_events = params
        .show_events
        .then(|| filter_by_keyword(snapshot.matched_events.items(), &params.keyword));

    let failures = [
        (Collection::LogReturns, snapshot.log_returns.failure()),
        (Collection::ChangePoints, snapshot.change_points.failure()),
        (Collection::MatchedEvents, snapshot.matched_events.failure()),
    ]
    .into_iter()
    .filter_map(|(collection, reason)| {
        reason.map(|r| CollectionFailure {
            collection,
            reason: r.to_string(),
        })
    })
    .collect();

    DashboardView {
        api_status: snapshot.status.clone(),
        filters: params.clone(),
        log_returns,
        summary,
        change_points: snapshot.change_points.items().to_vec(),
        matched_events,
        failures,
        fetched_at: snapshot.fetched_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::CollectionState;
    use chrono::NaiveDate;
    use core_types::TauMode;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, m, day).unwrap()
    }

    fn event(description: &str, impact: Option<f64>) -> MatchedEvent {
        MatchedEvent {
            change_point_date: d(3, 9),
            description: description.to_string(),
            event_date: d(3, 6),
            impact_percent: impact,
            event_type: None,
            date_diff_days: Some(3),
            mean_before: None,
            mean_after: None,
        }
    }

    fn snapshot() -> Snapshot {
        Snapshot {
            status: ApiStatus::Online("API is running".into()),
            log_returns: CollectionState::Loaded(vec![
                LogReturnPoint { date: d(3, 5), log_return: -0.01 },
                LogReturnPoint { date: d(3, 6), log_return: 0.02 },
                LogReturnPoint { date: d(3, 9), log_return: -0.01 },
                LogReturnPoint { date: d(3, 10), log_return: 0.02 },
                LogReturnPoint { date: d(3, 11), log_return: 0.5 },
            ]),
            change_points: CollectionState::Loaded(vec![ChangePoint {
                date: d(3, 9),
                tau: TauMode::Index(8201),
            }]),
            matched_events: CollectionState::Loaded(vec![
                event("OPEC+ talks collapse", Some(-212.4)),
                event("WHO declares pandemic", None),
            ]),
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn summary_covers_only_the_filtered_range() {
        let params = FilterParams {
            range: DateRange::new(Some(d(3, 4)), Some(d(3, 11))),
            ..FilterParams::default()
        };
        let view = build_view(&snapshot(), &params);
        assert_eq!(view.log_returns.len(), 4);
        assert!((view.summary.mean - 0.005).abs() < 1e-12);
        assert!((view.summary.standard_deviation - 0.015).abs() < 1e-12);
        assert!(view.failures.is_empty());
    }

    #[test]
    fn keyword_filters_events_but_not_change_points() {
        let params = FilterParams {
            keyword: "opec".into(),
            ..FilterParams::default()
        };
        let view = build_view(&snapshot(), &params);
        let events = view.matched_events.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].impact_percent, Some(-212.4));
        assert_eq!(view.change_points.len(), 1);
    }

    #[test]
    fn hidden_events_are_absent_not_empty() {
        let params = FilterParams {
            show_events: false,
            ..FilterParams::default()
        };
        assert!(build_view(&snapshot(), &params).matched_events.is_none());
    }

    #[test]
    fn failed_collections_degrade_to_empty() {
        let mut snap = snapshot();
        snap.log_returns = CollectionState::Failed {
            reason: "connection refused".into(),
        };
        snap.status = ApiStatus::Offline("connection refused".into());

        let view = build_view(&snap, &FilterParams::default());
        assert!(view.log_returns.is_empty());
        assert_eq!(view.summary, SummaryResult::empty());
        assert_eq!(view.change_points.len(), 1);
        assert_eq!(
            view.failures,
            vec![CollectionFailure {
                collection: Collection::LogReturns,
                reason: "connection refused".into()
            }]
        );
        assert_eq!(view.api_status.to_string(), "API error: connection refused");
    }

    #[test]
    fn params_follow_filter_settings() {
        let settings = FilterSettings {
            start_date: Some(d(1, 1)),
            end_date: None,
            keyword: "war".into(),
            show_events: false,
            inclusive_bounds: true,
        };
        let params = FilterParams::from(&settings);
        assert_eq!(params.range.start, Some(d(1, 1)));
        assert_eq!(params.range.policy, core_types::BoundaryPolicy::Inclusive);
        assert_eq!(params.keyword, "war");
        assert!(!params.show_events);
    }
}
