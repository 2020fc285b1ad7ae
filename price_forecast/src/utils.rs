//! Utility functions for the price_forecast crate

use crate::error::{ForecastError, Result};
use chrono::{Days, NaiveDate};

/// Create the calendar dates that follow `last_date`, one per forecast day
///
/// Fails up front when the final date falls past [`NaiveDate::MAX`], so an
/// oversized horizon is rejected before anything is allocated for it.
pub fn forecast_dates(last_date: NaiveDate, horizon: usize) -> Result<Vec<NaiveDate>> {
    if last_date.checked_add_days(Days::new(horizon as u64)).is_none() {
        return Err(ForecastError::ComputationFailure(format!(
            "Horizon of {} days from {} is out of range",
            horizon, last_date
        )));
    }

    (1..=horizon as u64)
        .map(|offset| {
            last_date.checked_add_days(Days::new(offset)).ok_or_else(|| {
                ForecastError::ComputationFailure(format!(
                    "Date {} + {} days is out of range",
                    last_date, offset
                ))
            })
        })
        .collect()
}

/// Format a price for an axis label.
///
/// Values of a thousand or more get a one-decimal `K`, `M`, `B` or `T`
/// suffix. Smaller values keep up to three decimals with thousands
/// separators.
pub fn format_compact(value: f64) -> String {
    const SUFFIXES: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];

    for (threshold, suffix) in SUFFIXES {
        if value >= threshold {
            return format!("{:.1}{}", value / threshold, suffix);
        }
    }

    group_thousands(value)
}

fn group_thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = format!("{:.3}", value.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && (int_part != "0" || !frac_part.is_empty()) {
        "-"
    } else {
        ""
    };

    if frac_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac_part)
    }
}
