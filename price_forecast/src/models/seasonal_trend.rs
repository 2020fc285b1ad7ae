//! Trend plus day-of-week seasonality model

use crate::data::PriceHistory;
use crate::error::Result;
use crate::models::{ForecastModel, ForecastResult, ModelKind, SeriesSummary};
use crate::utils::forecast_dates;
use chrono::Datelike;
use rand::RngCore;
use trade_math::moving_averages::trailing_slope;
use trade_math::volatility::trailing_return_rms;

/// Day-of-week offsets as a fraction of the last price, Sunday first
pub const WEEKDAY_SEASONALITY: [f64; 7] = [0.005, -0.003, 0.001, 0.002, -0.001, -0.002, -0.002];

/// Trend windows in days and their weights, most recent first
const TREND_WINDOWS: [(usize, f64); 3] = [(7, 3.0), (14, 2.0), (30, 1.0)];

const VOLATILITY_WINDOW: usize = 30;

/// Weighted short/medium/long trend with a fixed weekly cycle on top.
///
/// Every trend window needs an anchor, so the history must be longer than
/// 30 points.
///
/// Bounds widen with the square root of the horizon, scaled by the
/// root-mean-square daily return of the last 30 prices.
#[derive(Debug, Clone)]
pub struct TrendSeasonality {
    name: String,
}

impl TrendSeasonality {
    pub fn new() -> Self {
        Self {
            name: "Trend + Seasonality".to_string(),
        }
    }

    fn weighted_trend(prices: &[f64]) -> Result<f64> {
        let mut total = 0.0;
        let mut weights = 0.0;
        for (window, weight) in TREND_WINDOWS {
            total += trailing_slope(prices, window)? * weight;
            weights += weight;
        }
        Ok(total / weights)
    }
}

impl Default for TrendSeasonality {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastModel for TrendSeasonality {
    fn kind(&self) -> ModelKind {
        ModelKind::TrendSeasonality
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn forecast(
        &self,
        history: &PriceHistory,
        horizon: usize,
        _rng: &mut dyn RngCore,
    ) -> Result<ForecastResult> {
        let summary = SeriesSummary::from_history(history)?;
        let dates = forecast_dates(summary.last_date, horizon)?;
        let last_price = summary.last_price;

        let trend = Self::weighted_trend(&summary.prices)?;
        let volatility = trailing_return_rms(&summary.prices, VOLATILITY_WINDOW)? * last_price;
        let weekday = summary.last_date.weekday().num_days_from_sunday() as usize;

        let mut forecast = Vec::with_capacity(horizon);
        let mut upper_bound = Vec::with_capacity(horizon);
        let mut lower_bound = Vec::with_capacity(horizon);

        for day in 1..=horizon {
            let seasonal = WEEKDAY_SEASONALITY[(weekday + day) % 7] * last_price;
            let value = last_price + trend * day as f64 + seasonal;
            let spread = volatility * (day as f64).sqrt();

            forecast.push(value);
            upper_bound.push(value + spread);
            lower_bound.push(value - spread);
        }

        ForecastResult::new(forecast, upper_bound, lower_bound, dates)
    }
}
