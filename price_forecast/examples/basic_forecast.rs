use chrono::{TimeZone, Utc};
use price_forecast::config::{horizon_label, HORIZON_PRESETS};
use price_forecast::utils::format_compact;
use price_forecast::{
    ForecastConfig, ForecastOutcome, ForecastRequest, Forecaster, ModelKind, RequestTracker,
    TimeSeriesPoint,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("Price Forecast: Basic Forecasting Example");
    println!("=========================================\n");

    let history = create_sample_history();
    println!("Sample data created: {} daily points\n", history.len());

    let config = ForecastConfig::default().with_seed(2024);
    let mut forecaster = Forecaster::new(config)?;
    let tracker = RequestTracker::new();

    for model in ModelKind::ALL {
        println!("{} - {}", model.label(), model.description());

        for days in HORIZON_PRESETS {
            let ticket = tracker.issue(ForecastRequest::new("solana", model, days))?;

            match forecaster.resolve(&tracker, &ticket, &history) {
                Some(ForecastOutcome::Ready(result)) => {
                    let last = result.points().pop();
                    if let Some(point) = last {
                        println!(
                            "  {:>8}: {} forecast {} ({} .. {})",
                            horizon_label(days),
                            point.date,
                            format_compact(point.forecast),
                            format_compact(point.lower_bound),
                            format_compact(point.upper_bound),
                        );
                    }
                }
                Some(ForecastOutcome::Unavailable { message }) => {
                    println!("  {:>8}: {}", horizon_label(days), message)
                }
                None => println!("  {:>8}: superseded", horizon_label(days)),
            }
        }
        println!();
    }

    // Twenty days of history is not enough for any model
    let ticket = tracker.issue(ForecastRequest::new("solana", ModelKind::default(), 7))?;
    if let Some(ForecastOutcome::Unavailable { message }) =
        forecaster.resolve(&tracker, &ticket, &history[..20])
    {
        println!("Short history: {}", message);
    }

    Ok(())
}

/// Ninety days of a gently rising, oscillating price
fn create_sample_history() -> Vec<TimeSeriesPoint> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

    (0..90)
        .map(|day| {
            let timestamp = start.timestamp_millis() + day * 86_400_000;
            let price = 140.0 + 0.4 * day as f64 + 6.0 * (day as f64 / 5.0).sin();
            TimeSeriesPoint::new(timestamp, price)
        })
        .collect()
}
