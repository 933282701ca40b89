use crate::report::SummaryResult;
use core_types::LogReturnPoint;

/// Trading periods per year used to annualize daily volatility.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Computes mean, population standard deviation and annualized volatility.
///
/// An empty input yields the all-zero result rather than NaN.
pub fn summarize(values: &[f64]) -> SummaryResult {
    if values.is_empty() {
        return SummaryResult::empty();
    }

    let count = values.len() as f64;
    let mean = values.iter().sum::<f64>() / count;
    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / count;
    let standard_deviation = variance.sqrt();

    SummaryResult {
        mean,
        standard_deviation,
        volatility: standard_deviation * TRADING_DAYS_PER_YEAR.sqrt(),
        count: values.len(),
    }
}

/// Summarizes the `log_return` column of a point sequence.
pub fn summarize_returns(points: &[LogReturnPoint]) -> SummaryResult {
    let values: Vec<f64> = points.iter().map(|p| p.log_return).collect();
    summarize(&values)
}
