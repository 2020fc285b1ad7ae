//! Price history handling for forecasting

use crate::error::{ForecastError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// A single `(timestamp, price)` observation.
///
/// Serialized as a two element array `[timestampMs, price]`, the shape
/// market-data APIs return.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(i64, f64)")]
pub struct TimeSeriesPoint {
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    /// Price at that instant
    pub price: f64,
}

impl TimeSeriesPoint {
    pub fn new(timestamp: i64, price: f64) -> Self {
        Self { timestamp, price }
    }

    /// The UTC calendar date of this point.
    pub fn date(&self) -> Result<NaiveDate> {
        DateTime::<Utc>::from_timestamp_millis(self.timestamp)
            .map(|dt| dt.date_naive())
            .ok_or_else(|| {
                ForecastError::ComputationFailure(format!(
                    "Timestamp {} is out of range",
                    self.timestamp
                ))
            })
    }
}

impl From<(f64, f64)> for TimeSeriesPoint {
    fn from((timestamp, price): (f64, f64)) -> Self {
        Self {
            timestamp: timestamp as i64,
            price,
        }
    }
}

impl From<TimeSeriesPoint> for (i64, f64) {
    fn from(point: TimeSeriesPoint) -> Self {
        (point.timestamp, point.price)
    }
}

/// Ordered price history, oldest point first.
///
/// Ordering and positivity are not checked; the caller supplies a
/// well-formed series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceHistory {
    points: Vec<TimeSeriesPoint>,
}

impl PriceHistory {
    pub fn new(points: Vec<TimeSeriesPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[TimeSeriesPoint] {
        &self.points
    }

    /// Get the prices as a vector, in order
    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last_price(&self) -> Option<f64> {
        self.points.last().map(|p| p.price)
    }

    /// Calendar date of the most recent point
    pub fn last_date(&self) -> Result<NaiveDate> {
        self.points
            .last()
            .ok_or_else(|| ForecastError::DataError("Empty price history".to_string()))?
            .date()
    }

    pub fn into_points(self) -> Vec<TimeSeriesPoint> {
        self.points
    }
}

impl From<Vec<TimeSeriesPoint>> for PriceHistory {
    fn from(points: Vec<TimeSeriesPoint>) -> Self {
        Self::new(points)
    }
}

impl From<&[TimeSeriesPoint]> for PriceHistory {
    fn from(points: &[TimeSeriesPoint]) -> Self {
        Self::new(points.to_vec())
    }
}

/// Market chart payload; only the price series is used.
#[derive(Debug, Deserialize)]
struct MarketChart {
    prices: Vec<TimeSeriesPoint>,
}

/// Data loader for price histories
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Build a history from `[timestampMs, price]` pairs
    pub fn from_pairs(pairs: &[[f64; 2]]) -> PriceHistory {
        pairs
            .iter()
            .map(|&[timestamp, price]| TimeSeriesPoint::from((timestamp, price)))
            .collect::<Vec<_>>()
            .into()
    }

    /// Parse a market chart JSON payload of the form `{"prices": [[ts, price], ...]}`
    pub fn from_market_chart_json(json: &str) -> Result<PriceHistory> {
        let chart: MarketChart = serde_json::from_str(json)?;
        if chart.prices.is_empty() {
            return Err(ForecastError::DataError(
                "Market chart contains no prices".to_string(),
            ));
        }
        Ok(PriceHistory::new(chart.prices))
    }

    /// Load a price history from a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<PriceHistory> {
        let file = File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// Load a price history from CSV with a header row.
    ///
    /// The time column is detected by name (`timestamp`, `date` or `time`),
    /// the price column by `price` or `close`. Times may be integer
    /// milliseconds or `YYYY-MM-DD` dates.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<PriceHistory> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let time_idx = Self::detect_column(&headers, &["timestamp", "date", "time"])
            .ok_or_else(|| {
                ForecastError::DataError("No time column found in data".to_string())
            })?;
        let price_idx = Self::detect_column(&headers, &["price", "close"])
            .ok_or_else(|| {
                ForecastError::DataError("No price column found in data".to_string())
            })?;

        let mut points = Vec::new();
        for (line, record) in rdr.records().enumerate() {
            let record = record?;
            let raw_time = record.get(time_idx).unwrap_or_default();
            let raw_price = record.get(price_idx).unwrap_or_default();

            let timestamp = parse_timestamp(raw_time).ok_or_else(|| {
                ForecastError::DataError(format!(
                    "Invalid timestamp '{}' on row {}",
                    raw_time,
                    line + 1
                ))
            })?;
            let price = raw_price.parse::<f64>().map_err(|_| {
                ForecastError::DataError(format!(
                    "Invalid price '{}' on row {}",
                    raw_price,
                    line + 1
                ))
            })?;

            points.push(TimeSeriesPoint::new(timestamp, price));
        }

        if points.is_empty() {
            return Err(ForecastError::DataError(
                "CSV contains no price rows".to_string(),
            ));
        }

        Ok(PriceHistory::new(points))
    }

    fn detect_column(headers: &csv::StringRecord, candidates: &[&str]) -> Option<usize> {
        for candidate in candidates {
            if let Some(idx) = headers
                .iter()
                .position(|h| h.to_lowercase().contains(candidate))
            {
                return Some(idx);
            }
        }
        None
    }
}

/// Integer milliseconds, fractional milliseconds, or a `YYYY-MM-DD` date at UTC midnight.
fn parse_timestamp(raw: &str) -> Option<i64> {
    if let Ok(ms) = raw.parse::<i64>() {
        return Some(ms);
    }
    if let Ok(ms) = raw.parse::<f64>() {
        return ms.is_finite().then_some(ms as i64);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_date_is_utc() {
        // 2024-03-10T23:30:00Z
        let point = TimeSeriesPoint::new(1_710_113_400_000, 1.0);
        assert_eq!(
            point.date().unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
        );
    }

    #[test]
    fn test_point_date_out_of_range() {
        let point = TimeSeriesPoint::new(i64::MAX, 1.0);
        assert!(matches!(
            point.date(),
            Err(ForecastError::ComputationFailure(_))
        ));
    }

    #[test]
    fn test_parse_timestamp_variants() {
        assert_eq!(parse_timestamp("1700000000000"), Some(1_700_000_000_000));
        assert_eq!(parse_timestamp("1700000000000.0"), Some(1_700_000_000_000));
        assert_eq!(parse_timestamp("1970-01-02"), Some(86_400_000));
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_empty_history_has_no_last_date() {
        let history = PriceHistory::default();
        assert!(history.last_price().is_none());
        assert!(matches!(
            history.last_date(),
            Err(ForecastError::DataError(_))
        ));
    }
}
