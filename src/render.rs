use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};
use configuration::DisplaySettings;
use core_types::{MatchedEvent, TauMode};
use dashboard::DashboardView;
use std::fmt;

/// Formats an event's impact, showing `N/A` only when it is absent.
pub fn format_impact(impact: Option<f64>, decimals: usize) -> String {
    match impact {
        Some(value) => format!("{value:.decimals$}"),
        None => "N/A".to_string(),
    }
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn number(value: String) -> Cell {
    Cell::new(value).set_alignment(CellAlignment::Right)
}

/// Shows a tau as its integer index when it has one, otherwise as given.
pub fn format_tau(tau: &TauMode) -> String {
    tau.as_index()
        .map_or_else(|| tau.to_string(), |index| index.to_string())
}

/// The whole view as text panels.
pub struct DashboardReport<'a> {
    view: &'a DashboardView,
    display: &'a DisplaySettings,
}

impl<'a> DashboardReport<'a> {
    pub fn new(view: &'a DashboardView, display: &'a DisplaySettings) -> Self {
        Self { view, display }
    }

    fn summary_table(&self) -> Table {
        let summary = &self.view.summary;
        let decimals = self.display.decimals;
        let mut table = new_table(vec!["Metric", "Value"]);
        table.add_row(vec![Cell::new("Mean Log Return"), number(format!("{:.decimals$}", summary.mean))]);
        table.add_row(vec![
            Cell::new("Std Deviation"),
            number(format!("{:.decimals$}", summary.standard_deviation)),
        ]);
        table.add_row(vec![
            Cell::new("Volatility (annualized)"),
            number(format!("{:.decimals$}", summary.volatility)),
        ]);
        table.add_row(vec![Cell::new("Observations"), number(summary.count.to_string())]);
        table
    }

    fn events_table(&self, events: &[MatchedEvent]) -> Table {
        let mut table = new_table(vec!["Change Point", "Event Date", "Event", "Impact (%)"]);
        for event in events {
            table.add_row(vec![
                Cell::new(event.change_point_date),
                Cell::new(event.event_date),
                Cell::new(&event.description),
                number(format_impact(event.impact_percent, self.display.impact_decimals)),
            ]);
        }
        table
    }

    fn change_points_table(&self) -> Table {
        let mut table = new_table(vec!["Date", "Tau"]);
        for point in &self.view.change_points {
            table.add_row(vec![Cell::new(point.date), number(format_tau(&point.tau))]);
        }
        table
    }
}

impl fmt::Display for DashboardReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.view;
        writeln!(f, "API Status: {}", view.api_status)?;
        for failure in &view.failures {
            writeln!(f, "! {} unavailable: {}", failure.collection, failure.reason)?;
        }

        match (view.log_returns.first(), view.log_returns.last()) {
            (Some(first), Some(last)) => writeln!(f, "\nLog returns: {} to {}", first.date, last.date)?,
            _ => writeln!(f, "\nLog returns: no data in range")?,
        }
        writeln!(f, "{}", self.summary_table())?;

        if let Some(events) = &view.matched_events {
            writeln!(f, "\nMatched Events ({})", events.len())?;
            writeln!(f, "{}", self.events_table(events))?;
        }

        writeln!(f, "\nChange Points ({})", view.change_points.len())?;
        write!(f, "{}", self.change_points_table())
    }
}
