//! Dispersion measures for forecast confidence bounds
//!
//! Contains:
//! - Dispersion around a fixed centre
//! - Root mean square of relative returns
//! - Log returns and population standard deviation

use crate::{trailing, MathError, Result};

/// Square root of the summed squared distance from `center`, divided by `divisor`.
///
/// The divisor is taken as given rather than derived from `values.len()`.
pub fn dispersion_around(values: &[f64], center: f64, divisor: usize) -> Result<f64> {
    if divisor == 0 {
        return Err(MathError::InvalidInput(
            "Divisor must be greater than zero".to_string(),
        ));
    }

    let sum_sq: f64 = values
        .iter()
        .map(|&value| {
            let diff = value - center;
            diff * diff
        })
        .sum();

    Ok((sum_sq / divisor as f64).sqrt())
}

/// Simple returns `values[i] / values[i-1] - 1` for consecutive pairs.
pub fn simple_returns(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| (w[1] / w[0]) - 1.0).collect()
}

/// Natural-log returns `ln(values[i] / values[i-1])` for consecutive pairs.
pub fn log_returns(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| (w[1] / w[0]).ln()).collect()
}

/// Root mean square of simple returns over the last `window` values.
///
/// The first value of the window has no predecessor and contributes zero;
/// the sum is divided by `window - 1` whatever the slice length.
pub fn trailing_return_rms(values: &[f64], window: usize) -> Result<f64> {
    if window < 2 {
        return Err(MathError::InvalidInput(
            "Window must be at least 2 to compute returns".to_string(),
        ));
    }

    let sum_sq: f64 = simple_returns(trailing(values, window))
        .iter()
        .map(|r| r * r)
        .sum();

    Ok((sum_sq / (window - 1) as f64).sqrt())
}

/// Population standard deviation (divides by `n`).
pub fn population_std_dev(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot compute standard deviation of an empty series".to_string(),
        ));
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|&v| (v - mean).powi(2)).sum::<f64>() / n;

    Ok(variance.sqrt())
}
