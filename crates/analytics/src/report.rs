use serde::{Deserialize, Serialize};

/// Summary statistics of a filtered log-return sequence.
///
/// Values are kept at full precision; rounding is the renderer's concern.
/// This struct is recomputed on every filter change and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub mean: f64,
    /// Population (not sample) standard deviation.
    pub standard_deviation: f64,
    /// `standard_deviation * sqrt(252)`.
    pub volatility: f64,
    /// Number of values the statistics were computed over.
    pub count: usize,
}

impl SummaryResult {
    /// The all-zero result reported for an empty sequence.
    pub const fn empty() -> Self {
        Self {
            mean: 0.0,
            standard_deviation: 0.0,
            volatility: 0.0,
            count: 0,
        }
    }
}

impl Default for SummaryResult {
    fn default() -> Self {
        Self::empty()
    }
}
