//! # Coin Forecast
//!
//! Workspace facade re-exporting the forecasting engine and its math
//! helpers.
//!
//! ## Example
//!
//! ```
//! use coin_forecast_workspace::price_forecast::{predict, ModelKind, TimeSeriesPoint};
//!
//! let history: Vec<TimeSeriesPoint> = (0..31)
//!     .map(|day| TimeSeriesPoint::new(day * 86_400_000, 50.0))
//!     .collect();
//!
//! let result = predict(&history, ModelKind::from_tag("prophet"), 14).unwrap();
//! assert_eq!(result.len(), 14);
//! ```

pub use price_forecast;
pub use trade_math;

pub use price_forecast::{predict, ForecastResult, ModelKind, TimeSeriesPoint};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facade_exports_engine() {
        let history: Vec<TimeSeriesPoint> = (0..40)
            .map(|day| TimeSeriesPoint::new(day * 86_400_000, 10.0 + day as f64))
            .collect();

        let result: ForecastResult = predict(&history, ModelKind::MomentumVolatility, 7).unwrap();
        assert_eq!(result.len(), 7);
        assert_eq!(result.dates[0].to_string(), "1970-02-10");
    }

    #[test]
    fn test_facade_exports_math() {
        let avg = trade_math::moving_averages::fixed_window_average(&[7.0; 7], 7).unwrap();
        assert_eq!(avg, 7.0);
    }
}
