//! # Price Forecast
//!
//! Short-term price forecasts with confidence bounds for cryptocurrency
//! dashboards.
//!
//! ## Features
//!
//! - Three forecasting models behind one interface:
//!   - Moving-average trend (labelled "ARIMA" in selectors)
//!   - Trend + day-of-week seasonality ("Prophet")
//!   - Momentum/volatility with log-normal bounds ("LSTM")
//! - Forecast dates as calendar days following the history
//! - Price history loading from `[timestamp, price]` pairs, market chart
//!   JSON and CSV
//! - Request tracking so stale forecasts are discarded
//!
//! The models are heuristics, not fitted statistical models. The
//! moving-average trend model adds random jitter to its forecast; its
//! bounds, and both other models, are deterministic.
//!
//! ## Quick Start
//!
//! ```rust
//! use price_forecast::{predict, ModelKind, TimeSeriesPoint};
//!
//! let history: Vec<TimeSeriesPoint> = (0..90)
//!     .map(|day| TimeSeriesPoint::new(1_700_000_000_000 + day * 86_400_000, 100.0 + day as f64))
//!     .collect();
//!
//! let result = predict(&history, ModelKind::TrendSeasonality, 7).unwrap();
//! assert_eq!(result.len(), 7);
//!
//! // Too little history yields no forecast
//! assert!(predict(&history[..20], ModelKind::TrendSeasonality, 7).is_none());
//! ```

pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod models;
pub mod session;
pub mod utils;

// Re-export commonly used types
pub use crate::config::ForecastConfig;
pub use crate::data::{DataLoader, PriceHistory, TimeSeriesPoint};
pub use crate::engine::{predict, predict_with_rng, Forecaster};
pub use crate::error::ForecastError;
pub use crate::models::{ForecastModel, ForecastPoint, ForecastResult, ModelKind};
pub use crate::session::{ForecastOutcome, ForecastRequest, RequestTicket, RequestTracker};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
