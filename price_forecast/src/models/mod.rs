//! Forecasting models for price histories

use crate::data::PriceHistory;
use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::str::FromStr;

/// Which forecasting model to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModelKind {
    /// Recent linear trend with jitter and a constant-width band
    #[default]
    #[serde(alias = "arima", alias = "moving_average_trend")]
    MovingAverageTrend,
    /// Weighted multi-window trend plus day-of-week seasonality
    #[serde(alias = "prophet", alias = "trend_seasonality")]
    TrendSeasonality,
    /// Damped exponential momentum with log-normal bounds
    #[serde(alias = "lstm", alias = "momentum_volatility")]
    MomentumVolatility,
}

impl ModelKind {
    /// Every selectable model, in display order
    pub const ALL: [ModelKind; 3] = [
        ModelKind::MovingAverageTrend,
        ModelKind::TrendSeasonality,
        ModelKind::MomentumVolatility,
    ];

    /// Parse a model tag, falling back to [`ModelKind::MovingAverageTrend`] when unrecognized.
    pub fn from_tag(tag: &str) -> Self {
        tag.parse().unwrap_or_else(|_| {
            tracing::warn!(tag, "unknown model tag, falling back to moving-average trend");
            ModelKind::MovingAverageTrend
        })
    }

    /// Canonical tag
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::MovingAverageTrend => "movingAverageTrend",
            ModelKind::TrendSeasonality => "trendSeasonality",
            ModelKind::MomentumVolatility => "momentumVolatility",
        }
    }

    /// Short label shown in model selectors
    pub fn label(&self) -> &'static str {
        match self {
            ModelKind::MovingAverageTrend => "ARIMA",
            ModelKind::TrendSeasonality => "Prophet",
            ModelKind::MomentumVolatility => "LSTM",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ModelKind::MovingAverageTrend => {
                "Statistical baseline: recent trend around a 7-day moving average"
            }
            ModelKind::TrendSeasonality => "Trend + seasonality based model",
            ModelKind::MomentumVolatility => {
                "Momentum model with volatility-scaled asymmetric bounds"
            }
        }
    }

    /// Instantiate the model this tag selects
    pub fn build(&self) -> Box<dyn ForecastModel> {
        match self {
            ModelKind::MovingAverageTrend => Box::new(moving_average::MovingAverageTrend::new()),
            ModelKind::TrendSeasonality => Box::new(seasonal_trend::TrendSeasonality::new()),
            ModelKind::MomentumVolatility => Box::new(momentum::MomentumVolatility::new()),
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelKind {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "movingAverageTrend" | "moving_average_trend" | "arima" => {
                Ok(ModelKind::MovingAverageTrend)
            }
            "trendSeasonality" | "trend_seasonality" | "prophet" => Ok(ModelKind::TrendSeasonality),
            "momentumVolatility" | "momentum_volatility" | "lstm" => {
                Ok(ModelKind::MomentumVolatility)
            }
            other => Err(ForecastError::InvalidParameter(format!(
                "Unknown model: {}",
                other
            ))),
        }
    }
}

/// Forecast result: four aligned series, one entry per forecast day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResult {
    /// Predicted price per day
    pub forecast: Vec<f64>,
    /// Upper confidence bound per day
    pub upper_bound: Vec<f64>,
    /// Lower confidence bound per day
    pub lower_bound: Vec<f64>,
    /// Calendar dates following the last historical date
    pub dates: Vec<NaiveDate>,
}

/// One chart row of a forecast
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub forecast: f64,
    pub upper_bound: f64,
    pub lower_bound: f64,
}

impl ForecastResult {
    /// Create a new forecast result, checking that all series are aligned
    pub fn new(
        forecast: Vec<f64>,
        upper_bound: Vec<f64>,
        lower_bound: Vec<f64>,
        dates: Vec<NaiveDate>,
    ) -> Result<Self> {
        let len = forecast.len();
        if upper_bound.len() != len || lower_bound.len() != len || dates.len() != len {
            return Err(ForecastError::ComputationFailure(format!(
                "Misaligned forecast series: forecast={}, upper={}, lower={}, dates={}",
                len,
                upper_bound.len(),
                lower_bound.len(),
                dates.len()
            )));
        }

        Ok(Self {
            forecast,
            upper_bound,
            lower_bound,
            dates,
        })
    }

    /// Number of forecast days
    pub fn len(&self) -> usize {
        self.forecast.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forecast.is_empty()
    }

    /// Dates formatted as `YYYY-MM-DD`
    pub fn date_strings(&self) -> Vec<String> {
        self.dates
            .iter()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .collect()
    }

    /// Width of the confidence band per day
    pub fn band_widths(&self) -> Vec<f64> {
        self.upper_bound
            .iter()
            .zip(&self.lower_bound)
            .map(|(upper, lower)| upper - lower)
            .collect()
    }

    /// Zip the series into per-day chart rows
    pub fn points(&self) -> Vec<ForecastPoint> {
        self.dates
            .iter()
            .zip(&self.forecast)
            .zip(self.upper_bound.iter().zip(&self.lower_bound))
            .map(|((&date, &forecast), (&upper_bound, &lower_bound))| ForecastPoint {
                date,
                forecast,
                upper_bound,
                lower_bound,
            })
            .collect()
    }

    /// Serialize to the JSON shape chart layers consume
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Common interface for the forecasting models
pub trait ForecastModel: Debug {
    /// Which tag selects this model
    fn kind(&self) -> ModelKind;

    /// Get the name of the model
    fn name(&self) -> &str;

    /// Forecast `horizon` days past the end of `history`.
    ///
    /// `rng` is the random source for models that jitter their output;
    /// deterministic models ignore it.
    fn forecast(
        &self,
        history: &PriceHistory,
        horizon: usize,
        rng: &mut dyn RngCore,
    ) -> Result<ForecastResult>;
}

/// Prices, last price and last calendar date shared by every model
#[derive(Debug, Clone)]
pub(crate) struct SeriesSummary {
    pub prices: Vec<f64>,
    pub last_price: f64,
    pub last_date: NaiveDate,
}

impl SeriesSummary {
    pub fn from_history(history: &PriceHistory) -> Result<Self> {
        let last_price = history
            .last_price()
            .ok_or_else(|| ForecastError::DataError("Empty price history".to_string()))?;

        Ok(Self {
            prices: history.prices(),
            last_price,
            last_date: history.last_date()?,
        })
    }
}

pub mod momentum;
pub mod moving_average;
pub mod seasonal_trend;
