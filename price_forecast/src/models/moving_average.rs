//! Moving-average trend model

use crate::data::PriceHistory;
use crate::error::Result;
use crate::models::{ForecastModel, ForecastResult, ModelKind, SeriesSummary};
use crate::utils::forecast_dates;
use rand::{Rng, RngCore};
use trade_math::moving_averages::{fixed_window_average, trailing_slope};
use trade_math::trailing;
use trade_math::volatility::dispersion_around;

/// Days in the moving average and in the trend lookback
pub const AVERAGE_WINDOW: usize = 7;
/// Days the band's standard deviation is measured over
pub const DEVIATION_WINDOW: usize = 30;
/// z-score of the ~95% band
pub const CONFIDENCE_MULTIPLIER: f64 = 1.96;
/// Jitter amplitude as a fraction of the daily trend
pub const JITTER_SCALE: f64 = 0.5;

/// Extends the last week's slope from the last price.
///
/// Each forecast day gets uniform jitter of up to a quarter of the daily
/// trend in either direction, so forecasts vary between calls unless the
/// random source is seeded. The band has constant width: `1.96` times the
/// deviation of the last 30 prices from the 7-day moving average.
#[derive(Debug, Clone)]
pub struct MovingAverageTrend {
    /// Name of the model
    name: String,
    /// Window size
    window: usize,
}

impl MovingAverageTrend {
    pub fn new() -> Self {
        Self {
            name: format!("Moving Average Trend (window={})", AVERAGE_WINDOW),
            window: AVERAGE_WINDOW,
        }
    }
}

impl Default for MovingAverageTrend {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastModel for MovingAverageTrend {
    fn kind(&self) -> ModelKind {
        ModelKind::MovingAverageTrend
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn forecast(
        &self,
        history: &PriceHistory,
        horizon: usize,
        rng: &mut dyn RngCore,
    ) -> Result<ForecastResult> {
        let summary = SeriesSummary::from_history(history)?;
        let dates = forecast_dates(summary.last_date, horizon)?;
        let prices = &summary.prices;
        let last_price = summary.last_price;

        // Divides by the full window even when fewer prices exist
        let moving_average = fixed_window_average(prices, self.window)?;
        let std_dev = dispersion_around(
            trailing(prices, DEVIATION_WINDOW),
            moving_average,
            DEVIATION_WINDOW,
        )?;
        let recent_trend = trailing_slope(prices, self.window)?;

        let margin = CONFIDENCE_MULTIPLIER * std_dev;
        let mut forecast = Vec::with_capacity(horizon);
        let mut upper_bound = Vec::with_capacity(horizon);
        let mut lower_bound = Vec::with_capacity(horizon);

        for day in 1..=horizon {
            let u: f64 = rng.gen();
            let noise = (u - 0.5) * recent_trend * JITTER_SCALE;
            let value = last_price + recent_trend * day as f64 + noise;

            forecast.push(value);
            upper_bound.push(value + margin);
            lower_bound.push(value - margin);
        }

        ForecastResult::new(forecast, upper_bound, lower_bound, dates)
    }
}
