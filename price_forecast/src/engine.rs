//! Forecast dispatch
//!
//! [`predict`] is the engine boundary: every failure collapses to `None`
//! and is logged. [`Forecaster::try_predict`] exposes the typed error for
//! callers that want to tell insufficient data apart from other failures.

use crate::config::{ForecastConfig, MIN_HISTORY_POINTS};
use crate::data::{PriceHistory, TimeSeriesPoint};
use crate::error::{ForecastError, Result};
use crate::models::{ForecastResult, ModelKind};
use crate::session::{ForecastOutcome, ForecastRequest, RequestTicket, RequestTracker};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug, error, warn};

/// Forecast `days_to_predict` days past the end of `history`.
///
/// Returns `None` when the history has fewer than 30 points or the model
/// fails. A zero or negative horizon yields an empty result. The
/// moving-average trend model draws its jitter from the thread-local RNG;
/// use [`predict_with_rng`] to pin it.
pub fn predict(
    history: &[TimeSeriesPoint],
    model: ModelKind,
    days_to_predict: i64,
) -> Option<ForecastResult> {
    predict_with_rng(history, model, days_to_predict, &mut rand::thread_rng())
}

/// [`predict`] with an injected random source
pub fn predict_with_rng(
    history: &[TimeSeriesPoint],
    model: ModelKind,
    days_to_predict: i64,
    rng: &mut dyn RngCore,
) -> Option<ForecastResult> {
    let horizon = usize::try_from(days_to_predict).unwrap_or(0);
    collapse(run(history, model, horizon, MIN_HISTORY_POINTS, rng))
}

fn run(
    history: &[TimeSeriesPoint],
    model: ModelKind,
    horizon: usize,
    min_history_points: usize,
    rng: &mut dyn RngCore,
) -> Result<ForecastResult> {
    if history.len() < min_history_points {
        return Err(ForecastError::InsufficientData {
            required: min_history_points,
            actual: history.len(),
        });
    }

    let forecaster = model.build();
    debug!(
        model = %model,
        name = forecaster.name(),
        points = history.len(),
        horizon,
        "running forecast"
    );

    forecaster.forecast(&PriceHistory::from(history), horizon, rng)
}

fn collapse(result: Result<ForecastResult>) -> Option<ForecastResult> {
    match result {
        Ok(forecast) => Some(forecast),
        Err(err @ ForecastError::InsufficientData { .. }) => {
            warn!(error = %err, "not enough historical data for prediction");
            None
        }
        Err(err) => {
            error!(error = %err, "error in prediction");
            None
        }
    }
}

/// Configured forecast engine owning its random source
#[derive(Debug, Clone)]
pub struct Forecaster {
    config: ForecastConfig,
    rng: StdRng,
}

impl Forecaster {
    /// Create a forecaster, seeding the jitter source from `config.seed` when set
    pub fn new(config: ForecastConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self { config, rng })
    }

    /// Create a forecaster with an explicit random source
    pub fn with_rng(config: ForecastConfig, rng: StdRng) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// A request for `coin_id` using the configured defaults
    pub fn default_request(&self, coin_id: impl Into<String>) -> ForecastRequest {
        ForecastRequest::new(
            coin_id,
            self.config.default_model,
            self.config.default_horizon,
        )
        .with_historical_days(self.config.historical_days)
    }

    /// Forecast, reporting why no result was produced
    pub fn try_predict(
        &mut self,
        history: &[TimeSeriesPoint],
        model: ModelKind,
        horizon: usize,
    ) -> Result<ForecastResult> {
        run(
            history,
            model,
            horizon,
            self.config.min_history_points,
            &mut self.rng,
        )
    }

    /// Forecast, collapsing every failure to `None`
    pub fn predict(
        &mut self,
        history: &[TimeSeriesPoint],
        model: ModelKind,
        horizon: usize,
    ) -> Option<ForecastResult> {
        collapse(self.try_predict(history, model, horizon))
    }

    /// Forecast with the configured default model and horizon
    pub fn predict_default(&mut self, history: &[TimeSeriesPoint]) -> Option<ForecastResult> {
        let model = self.config.default_model;
        let horizon = self.config.default_horizon;
        self.predict(history, model, horizon)
    }

    /// Complete a tracked request with its fetched history.
    ///
    /// Returns `None` when a newer request has been issued since `ticket`,
    /// so a slow response never replaces a newer one.
    pub fn resolve(
        &mut self,
        tracker: &RequestTracker,
        ticket: &RequestTicket,
        history: &[TimeSeriesPoint],
    ) -> Option<ForecastOutcome> {
        if !tracker.is_current(ticket) {
            debug!(
                request_id = ticket.id(),
                coin_id = %ticket.request().coin_id,
                "discarding stale forecast request"
            );
            return None;
        }

        let request = ticket.request();
        let outcome = match self.try_predict(history, request.model, request.horizon) {
            Ok(result) => ForecastOutcome::Ready(result),
            Err(err) => {
                warn!(
                    request_id = ticket.id(),
                    coin_id = %request.coin_id,
                    error = %err,
                    "forecast unavailable"
                );
                ForecastOutcome::Unavailable {
                    message: err.user_message(),
                }
            }
        };
        Some(outcome)
    }
}

impl Default for Forecaster {
    fn default() -> Self {
        Self {
            config: ForecastConfig::default(),
            rng: StdRng::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(points: usize) -> Vec<TimeSeriesPoint> {
        (0..points)
            .map(|i| TimeSeriesPoint::new(i as i64 * 86_400_000, 50.0))
            .collect()
    }

    #[test]
    fn test_run_reports_insufficient_data() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = run(&flat(29), ModelKind::TrendSeasonality, 7, 30, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            ForecastError::InsufficientData {
                required: 30,
                actual: 29
            }
        ));
    }

    #[test]
    fn test_negative_horizon_is_empty() {
        let result = predict(&flat(30), ModelKind::MomentumVolatility, -3).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_out_of_range_timestamp_collapses_to_none() {
        let mut history = flat(30);
        history.last_mut().unwrap().timestamp = i64::MAX;
        assert!(predict(&history, ModelKind::MomentumVolatility, 7).is_none());
    }

    #[test]
    fn test_forecaster_rejects_invalid_config() {
        let config = ForecastConfig {
            default_horizon: 0,
            ..ForecastConfig::default()
        };
        assert!(Forecaster::new(config).is_err());
    }
}
