//! Momentum/volatility model

use crate::data::PriceHistory;
use crate::error::Result;
use crate::models::{ForecastModel, ForecastResult, ModelKind, SeriesSummary};
use crate::utils::forecast_dates;
use rand::RngCore;
use trade_math::moving_averages::trailing_slope_or_zero;
use trade_math::volatility::{log_returns, population_std_dev};

/// Trend windows in days and their weights
const TREND_WINDOWS: [(usize, f64); 4] = [(7, 4.0), (14, 2.0), (30, 1.5), (60, 1.0)];

/// Per-day decay of the momentum exponent
const DAMPING_RATE: f64 = 0.05;

/// Scale applied to `volatility * sqrt(day)` in the bound exponent
const BOUND_SCALE: f64 = 0.05;

/// Compounds the weighted trend as a growth rate that fades with the horizon.
///
/// Windows longer than the history contribute no trend. The bounds are
/// multiplicative, so they stay positive whenever the forecast is.
#[derive(Debug, Clone)]
pub struct MomentumVolatility {
    name: String,
}

impl MomentumVolatility {
    pub fn new() -> Self {
        Self {
            name: "Momentum/Volatility".to_string(),
        }
    }

    fn weighted_trend(prices: &[f64]) -> Result<f64> {
        let mut total = 0.0;
        let mut weights = 0.0;
        for (window, weight) in TREND_WINDOWS {
            total += trailing_slope_or_zero(prices, window)? * weight;
            weights += weight;
        }
        Ok(total / weights)
    }
}

impl Default for MomentumVolatility {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastModel for MomentumVolatility {
    fn kind(&self) -> ModelKind {
        ModelKind::MomentumVolatility
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

        let growth_rate = Self::weighted_trend(&summary.prices)? / last_price;
        let volatility = population_std_dev(&log_returns(&summary.prices))? * last_price;

        let mut forecast = Vec::with_capacity(horizon);
        let mut upper_bound = Vec::with_capacity(horizon);
        let mut lower_bound = Vec::with_capacity(horizon);

        for day in 1..=horizon {
            // damping starts at 1 on the first forecast day
            let damping = (-DAMPING_RATE * (day - 1) as f64).exp();
            let value = last_price * (growth_rate * day as f64 * damping).exp();
            let spread = volatility * (day as f64).sqrt() * BOUND_SCALE;

            forecast.push(value);
            upper_bound.push(value * spread.exp());
            lower_bound.push(value * (-spread).exp());
        }

        ForecastResult::new(forecast, upper_bound, lower_bound, dates)
    }
}
