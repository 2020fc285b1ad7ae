//! # Trade Math
//!
//! Numeric building blocks for the price forecasting models.
//! This crate provides trailing-window averages, slopes and the
//! dispersion measures the forecast bounds are derived from.

use thiserror::Error;

pub mod moving_averages;
pub mod volatility;

/// Errors that can occur in trading-related calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for trading math operations
pub type Result<T> = std::result::Result<T, MathError>;

/// Returns the last `window` values of a slice, or the whole slice when it is shorter.
pub fn trailing(values: &[f64], window: usize) -> &[f64] {
    &values[values.len().saturating_sub(window)..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_takes_tail() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(trailing(&values, 2), &[3.0, 4.0]);
        assert_eq!(trailing(&values, 10), &values);
        assert!(trailing(&values, 0).is_empty());
    }

    #[test]
    fn test_error_messages() {
        let err = MathError::InsufficientData("need 8 values".to_string());
        assert_eq!(
            err.to_string(),
            "Insufficient data for calculation: need 8 values"
        );
    }
}
