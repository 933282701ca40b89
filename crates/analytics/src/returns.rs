use crate::error::AnalyticsError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date formats seen in raw Brent price files, tried in order.
const PRICE_DATE_FORMATS: [&str; 3] = ["%d-%b-%y", "%b %d, %Y", "%Y-%m-%d"];

/// A row of the raw price file, before date parsing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawPriceRow {
    #[serde(rename = "Date")]
    pub date: String,
    /// Blank cells read as `None`.
    #[serde(rename = "Price")]
    pub price: Option<f64>,
}

/// A dated closing price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRow {
    pub date: NaiveDate,
    pub price: f64,
}

/// A row of the processed series: the price and its log return against the previous row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricedReturn {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "LogReturn")]
    pub log_return: f64,
}

/// Parses a raw price date such as `20-May-87` or `Apr 22, 2020`.
///
/// Two-digit years follow chrono's pivot: 69-99 map to the 1900s, 00-68 to the 2000s.
pub fn parse_price_date(value: &str) -> Result<NaiveDate, AnalyticsError> {
    let trimmed = value.trim();
    PRICE_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| AnalyticsError::InvalidPriceDate(value.to_string()))
}

/// Parses every raw row, dropping the ones with an unreadable date or a missing price.
pub fn parse_price_rows(raw: Vec<RawPriceRow>) -> Vec<PriceRow> {
    let total = raw.len();
    let rows: Vec<PriceRow> = raw
        .into_iter()
        .filter_map(|r| {
            let Some(price) = r.price.filter(|p| p.is_finite()) else {
                tracing::debug!(date = %r.date, "Skipping price row without a price.");
                return None;
            };
            match parse_price_date(&r.date) {
                Ok(date) => Some(PriceRow { date, price }),
                Err(e) => {
                    tracing::debug!(error = %e, "Skipping price row.");
                    None
                }
            }
        })
        .collect();

    let dropped = total - rows.len();
    if dropped > 0 {
        tracing::warn!(dropped, total, "Dropped unusable price rows.");
    }
    rows
}

/// Sorts rows by date and computes `ln(p_t / p_{t-1})` for each consecutive pair.
///
/// The first row has no predecessor and is dropped, as is any row whose return
/// is not finite (non-positive prices).
pub fn prepare_log_returns(rows: &[PriceRow]) -> Vec<PricedReturn> {
    let mut sorted = rows.to_vec();
    sorted.sort_by_key(|r| r.date);

    sorted
        .windows(2)
        .filter_map(|w| {
            let log_return = (w[1].price / w[0].price).ln();
            log_return.is_finite().then_some(PricedReturn {
                date: w[1].date,
                price: w[1].price,
                log_return,
            })
        })
        .collect()
}
