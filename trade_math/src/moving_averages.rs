//! Trailing-window averages and slopes
//!
//! Contains the window calculations shared by the forecasting models:
//! - Fixed-divisor trailing average
//! - Trailing linear slope (price change per period)

use crate::{trailing, MathError, Result};

/// Average of the last `window` values, always divided by `window`.
///
/// When fewer than `window` values are available the missing slots count
/// as zero, so the result is biased towards zero. Forecast values depend on
/// this exact behaviour.
pub fn fixed_window_average(values: &[f64], window: usize) -> Result<f64> {
    if window == 0 {
        return Err(MathError::InvalidInput(
            "Window must be greater than zero".to_string(),
        ));
    }

    let sum: f64 = trailing(values, window).iter().sum();
    Ok(sum / window as f64)
}

/// Per-period slope between the last value and the value `window` periods before it.
///
/// Computes `(values[n-1] - values[n-1-window]) / window`.
pub fn trailing_slope(values: &[f64], window: usize) -> Result<f64> {
    if window == 0 {
        return Err(MathError::InvalidInput(
            "Window must be greater than zero".to_string(),
        ));
    }

    if values.len() <= window {
        return Err(MathError::InsufficientData(format!(
            "Need more than {} values for a {}-period slope, have {}.",
            window,
            window,
            values.len()
        )));
    }

    let last = values[values.len() - 1];
    let anchor = values[values.len() - 1 - window];
    Ok((last - anchor) / window as f64)
}

/// Like [`trailing_slope`], but a window longer than the history contributes a zero slope.
pub fn trailing_slope_or_zero(values: &[f64], window: usize) -> Result<f64> {
    if window > 0 && values.len() <= window {
        return Ok(0.0);
    }
    trailing_slope(values, window)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_window_average_full_window() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        // last seven: 2..=8
        let avg = fixed_window_average(&values, 7).unwrap();
        assert!((avg - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_fixed_window_average_short_history_divides_by_window() {
        let values = [7.0, 7.0];
        let avg = fixed_window_average(&values, 7).unwrap();
        assert!((avg - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_fixed_window_average_zero_window() {
        assert!(matches!(
            fixed_window_average(&[1.0], 0),
            Err(MathError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_trailing_slope() {
        let values: Vec<f64> = (0..10).map(|i| 100.0 + 2.0 * i as f64).collect();
        let slope = trailing_slope(&values, 7).unwrap();
        assert!((slope - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_trailing_slope_requires_anchor() {
        let values = [1.0; 7];
        assert!(matches!(
            trailing_slope(&values, 7),
            Err(MathError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_trailing_slope_or_zero() {
        let values: Vec<f64> = (0..60).map(|i| i as f64).collect();
        assert_eq!(trailing_slope_or_zero(&values, 60).unwrap(), 0.0);
        assert!((trailing_slope_or_zero(&values, 30).unwrap() - 1.0).abs() < 1e-12);
    }
}
