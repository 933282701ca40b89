use serde::{Deserialize, Serialize};
use std::fmt;

/// The position label of a detected change point, as produced upstream.
///
/// The detection model reports the posterior mode of its tau parameter, which
/// normally arrives as an integer index into the series. Some result files
/// carry it as a float or a free-form label, so all three shapes are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TauMode {
    Index(i64),
    Fractional(f64),
    Label(String),
}

impl TauMode {
    /// Returns the integer index when the value is one (or is a whole float).
    pub fn as_index(&self) -> Option<i64> {
        match self {
            TauMode::Index(i) => Some(*i),
            TauMode::Fractional(f) if f.fract() == 0.0 && f.is_finite() => Some(*f as i64),
            TauMode::Fractional(_) => None,
            TauMode::Label(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for TauMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TauMode::Index(i) => write!(f, "{i}"),
            TauMode::Fractional(v) => write!(f, "{v}"),
            TauMode::Label(s) => f.write_str(s),
        }
    }
}

/// Whether a date that falls exactly on a range bound is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Points on either bound are excluded.
    #[default]
    Exclusive,
    Inclusive,
}
