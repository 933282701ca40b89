//! # Brentwatch Analytics
//!
//! The client-side pipeline that turns raw fetched collections into the
//! displayed view: date-range and keyword filters, and the summary statistics
//! computed over the filtered log returns. It also holds the log-return
//! preparation step that builds the served series from raw prices.
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** No I/O and no knowledge of where the data came from. It
//!   depends only on `core-types`.
//! - **Stateless calculation:** Every function is a pure function of its inputs
//!   and preserves input order, so a view can be recomputed on each filter change.
//!
//! ## Public API
//!
//! - `filter_by_date_range`, `filter_by_keyword`: the two order-preserving filters.
//! - `summarize`: mean, population standard deviation and annualized volatility.
//! - `SummaryResult`: the derived statistics, never rounded internally.
//! - `prepare_log_returns`: raw price rows to daily log returns.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod filters;
pub mod report;
pub mod returns;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{summarize, summarize_returns, TRADING_DAYS_PER_YEAR};
pub use error::AnalyticsError;
pub use filters::{filter_by_date_range, filter_by_keyword};
pub use report::SummaryResult;
pub use returns::{
    parse_price_date, parse_price_rows, prepare_log_returns, PriceRow, PricedReturn, RawPriceRow,
};
