use core_types::{DateRange, LogReturnPoint, MatchedEvent};

/// Keeps the points whose date falls inside `range`, in their original order.
///
/// Bound handling follows `range.policy`; the default policy is exclusive, so a
/// range with `start == end` keeps nothing.
pub fn filter_by_date_range(points: &[LogReturnPoint], range: &DateRange) -> Vec<LogReturnPoint> {
    if range.is_unbounded() {
        return points.to_vec();
    }

    let filtered: Vec<LogReturnPoint> = points
        .iter()
        .filter(|p| range.contains(p.date))
        .cloned()
        .collect();

    tracing::debug!(
        kept = filtered.len(),
        total = points.len(),
        "Applied date-range filter."
    );
    filtered
}

/// Keeps the events whose description contains `keyword`, ignoring case.
///
/// An empty keyword matches every event.
pub fn filter_by_keyword(events: &[MatchedEvent], keyword: &str) -> Vec<MatchedEvent> {
    if keyword.is_empty() {
        return events.to_vec();
    }

    let needle = keyword.to_lowercase();
    events
        .iter()
        .filter(|e| e.description.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
