//! Error types for the price_forecast crate

use thiserror::Error;

/// Message shown to users when the history is too short to forecast.
pub const INSUFFICIENT_DATA_MESSAGE: &str = "Not enough historical data available for prediction";

/// Message shown to users when a forecast could not be produced.
pub const FORECAST_FAILED_MESSAGE: &str = "Failed to generate forecast. Please try again later.";

/// Custom error types for the price_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Fewer historical points than the engine requires
    #[error("Insufficient data: need at least {required} points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Model arithmetic could not be completed
    #[error("Computation failure: {0}")]
    ComputationFailure(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error related to data parsing or loading
    #[error("Data error: {0}")]
    DataError(String),

    /// Error in a configuration value
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from CSV parsing
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error from JSON (de)serialization
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error from the window and volatility helpers
    #[error("Math error: {0}")]
    MathError(#[from] trade_math::MathError),
}

impl ForecastError {
    /// The message a dashboard shows for this error.
    pub fn user_message(&self) -> &'static str {
        match self {
            ForecastError::InsufficientData { .. } => INSUFFICIENT_DATA_MESSAGE,
            _ => FORECAST_FAILED_MESSAGE,
        }
    }

    /// Whether a fresh request might succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            ForecastError::ConfigError(_) | ForecastError::InvalidParameter(_)
        )
    }
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;
