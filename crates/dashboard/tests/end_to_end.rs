use api_client::{error::ApiError, ApiClient, HttpApiClient};
use async_trait::async_trait;
use chrono::NaiveDate;
use configuration::ApiConfig;
use core_types::{ChangePoint, DateRange, LogReturnPoint, MatchedEvent, TauMode};
use dashboard::{ApiStatus, Collection, Dashboard, DashboardError, FilterParams};
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use web_server::AppState;

const LOG_RETURNS: &str = "\
Date,Price,LogReturn
2020-03-05,51.29,
2020-03-06,45.27,-0.1249
2020-03-09,34.36,-0.2757
2020-03-10,37.22,0.0800
2020-03-11,35.79,-0.0392
";

const CHANGE_POINTS: &str = "\
Date,Tau_Mode
2008-07-03,5440
2020-03-09,8201
";

const MATCHED_EVENTS: &str = "\
Change_Point_Date,Event_Date,Event_Description,Event_Type,Date_Diff_Days,Mean_Before,Mean_After,Impact_Percent
2008-07-03,2008-07-11,Brent hits record high,Market,8,0.0008,-0.0012,-250.0
2020-03-09,2020-03-06,OPEC+ talks collapse,Supply,3,0.0001,-0.0040,nan
";

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn write_fixtures(root: &Path, with_events: bool) -> AppState {
    let results = root.join("results");
    let processed = root.join("processed");
    std::fs::create_dir_all(&results).unwrap();
    std::fs::create_dir_all(&processed).unwrap();
    std::fs::write(processed.join("brent_oil_log_returns.csv"), LOG_RETURNS).unwrap();
    std::fs::write(results.join("change_points.csv"), CHANGE_POINTS).unwrap();
    if with_events {
        std::fs::write(results.join("matched_events.csv"), MATCHED_EVENTS).unwrap();
    }
    AppState {
        results_dir: results,
        processed_dir: processed,
    }
}

/// Starts the results server on an ephemeral port and returns a client for it.
async fn spawn_server(state: AppState) -> HttpApiClient {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(web_server::serve(listener, state));
    HttpApiClient::new(&ApiConfig {
        base_url: format!("http://{addr}"),
        timeout_secs: 5,
    })
    .unwrap()
}

#[tokio::test]
async fn full_pipeline_over_http() {
    let dir = tempfile::tempdir().unwrap();
    let client = spawn_server(write_fixtures(dir.path(), true)).await;

    let params = FilterParams {
        range: DateRange::new(Some(d(2020, 3, 5)), Some(d(2020, 3, 11))),
        keyword: "opec".into(),
        show_events: true,
    };
    let mut dashboard = Dashboard::new(Arc::new(client), params);
    assert!(matches!(dashboard.view(), Err(DashboardError::NotLoaded)));

    dashboard.refresh().await;
    let view = dashboard.view().unwrap();

    assert_eq!(view.api_status, ApiStatus::Online("API is running".into()));
    assert!(view.failures.is_empty());

    // Both bounds are exclusive and the row without a return is never served.
    let dates: Vec<_> = view.log_returns.iter().map(|p| p.date).collect();
    assert_eq!(dates, vec![d(2020, 3, 6), d(2020, 3, 9), d(2020, 3, 10)]);
    assert_eq!(view.summary.count, 3);

    assert_eq!(view.change_points.len(), 2);
    assert_eq!(view.change_points[1].tau, TauMode::Index(8201));

    let events = view.matched_events.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].description, "OPEC+ talks collapse");
    assert_eq!(events[0].impact_percent, None);
}

#[tokio::test]
async fn changing_filters_does_not_refetch() {
    let dir = tempfile::tempdir().unwrap();
    let client = spawn_server(write_fixtures(dir.path(), true)).await;

    let mut dashboard = Dashboard::new(Arc::new(client), FilterParams::default());
    dashboard.refresh().await;
    let fetched_at = dashboard.snapshot().unwrap().fetched_at;
    assert_eq!(dashboard.view().unwrap().log_returns.len(), 4);

    dashboard.set_params(FilterParams {
        show_events: false,
        ..FilterParams::default()
    });
    let view = dashboard.view().unwrap();
    assert!(view.matched_events.is_none());
    assert_eq!(view.fetched_at, fetched_at);
}

#[tokio::test]
async fn second_refresh_replaces_the_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let state = write_fixtures(dir.path(), false);
    let results_dir = state.results_dir.clone();
    let client = spawn_server(state).await;

    let mut dashboard = Dashboard::new(Arc::new(client), FilterParams::default());
    let first_fetch = dashboard.refresh().await.fetched_at;
    assert_eq!(dashboard.view().unwrap().failures.len(), 1);

    std::fs::write(results_dir.join("matched_events.csv"), MATCHED_EVENTS).unwrap();
    std::fs::write(results_dir.join("change_points.csv"), "Date,Tau_Mode\n2014-11-27,6870\n").unwrap();

    let second_fetch = dashboard.refresh().await.fetched_at;
    assert!(second_fetch > first_fetch);

    let view = dashboard.view().unwrap();
    assert_eq!(view.fetched_at, second_fetch);
    assert!(view.failures.is_empty());
    assert_eq!(view.matched_events.unwrap().len(), 2);
    assert_eq!(
        view.change_points,
        vec![ChangePoint { date: d(2014, 11, 27), tau: TauMode::Index(6870) }]
    );
}

#[tokio::test]
async fn missing_results_file_degrades_one_collection() {
    let dir = tempfile::tempdir().unwrap();
    let client = spawn_server(write_fixtures(dir.path(), false)).await;

    let mut dashboard = Dashboard::new(Arc::new(client), FilterParams::default());
    dashboard.refresh().await;
    let view = dashboard.view().unwrap();

    assert!(view.api_status.is_online());
    assert_eq!(view.log_returns.len(), 4);
    assert_eq!(view.change_points.len(), 2);
    assert_eq!(view.matched_events, Some(vec![]));
    assert_eq!(view.failures.len(), 1);
    assert_eq!(view.failures[0].collection, Collection::MatchedEvents);
    assert!(view.failures[0].reason.contains("500"));
}

#[tokio::test]
async fn unreachable_service_reports_offline() {
    // Bind then drop to get a port nothing is listening on.
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let client = HttpApiClient::new(&ApiConfig {
        base_url: format!("http://{addr}"),
        timeout_secs: 2,
    })
    .unwrap();

    let mut dashboard = Dashboard::new(Arc::new(client), FilterParams::default());
    dashboard.refresh().await;
    let view = dashboard.view().unwrap();

    assert!(!view.api_status.is_online());
    assert!(view.api_status.to_string().starts_with("API error: "));
    assert!(view.log_returns.is_empty());
    assert_eq!(view.summary.count, 0);
    assert_eq!(view.failures.len(), 3);
}

/// An in-memory client where only the change points fail.
struct FlakyClient;

#[async_trait]
impl ApiClient for FlakyClient {
    async fn fetch_status(&self) -> Result<String, ApiError> {
        Ok("API is running".into())
    }

    async fn fetch_log_returns(&self) -> Result<Vec<LogReturnPoint>, ApiError> {
        Ok(vec![
            LogReturnPoint { date: d(2014, 11, 27), log_return: -0.07 },
            LogReturnPoint { date: d(2014, 11, 28), log_return: 0.01 },
        ])
    }

    async fn fetch_change_points(&self) -> Result<Vec<ChangePoint>, ApiError> {
        Err(ApiError::Status {
            status: 500,
            message: "change_points.csv is corrupt".into(),
        })
    }

    async fn fetch_matched_events(&self) -> Result<Vec<MatchedEvent>, ApiError> {
        Ok(vec![MatchedEvent {
            change_point_date: d(2014, 11, 27),
            description: "OPEC declines to cut output".into(),
            event_date: d(2014, 11, 27),
            impact_percent: Some(0.0),
            event_type: None,
            date_diff_days: Some(0),
            mean_before: None,
            mean_after: None,
        }])
    }
}

#[tokio::test]
async fn one_failed_collection_leaves_the_others_intact() {
    let mut dashboard = Dashboard::new(Arc::new(FlakyClient), FilterParams::default());
    dashboard.refresh().await;
    let view = dashboard.view().unwrap();

    assert!(view.api_status.is_online());
    assert_eq!(view.log_returns.len(), 2);
    assert!(view.change_points.is_empty());
    assert_eq!(view.matched_events.unwrap()[0].impact_percent, Some(0.0));
    assert_eq!(view.failures.len(), 1);
    assert!(view.failures[0].reason.contains("corrupt"));

    let json = serde_json::to_value(dashboard.view().unwrap()).unwrap();
    assert_eq!(json["api_status"]["state"], "online");
}
