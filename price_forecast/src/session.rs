//! Request tracking for fetch-then-forecast cycles
//!
//! Fetching history is asynchronous and a new request may start before an
//! older one finishes. Each request gets a ticket; only the most recently
//! issued ticket may publish a result.

use crate::error::{ForecastError, Result};
use crate::models::{ForecastResult, ModelKind};
use std::sync::atomic::{AtomicU64, Ordering};

/// Parameters of one dashboard forecast request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastRequest {
    pub coin_id: String,
    pub model: ModelKind,
    pub horizon: usize,
    pub historical_days: u32,
}

impl ForecastRequest {
    pub fn new(coin_id: impl Into<String>, model: ModelKind, horizon: usize) -> Self {
        Self {
            coin_id: coin_id.into(),
            model,
            horizon,
            historical_days: 90,
        }
    }

    pub fn with_historical_days(mut self, days: u32) -> Self {
        self.historical_days = days;
        self
    }
}

/// Handle for an issued request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    id: u64,
    request: ForecastRequest,
}

impl RequestTicket {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn request(&self) -> &ForecastRequest {
        &self.request
    }
}

/// What a caller shows once a current request completes
#[derive(Debug, Clone, PartialEq)]
pub enum ForecastOutcome {
    Ready(ForecastResult),
    Unavailable { message: &'static str },
}

/// Issues request tickets and tracks which one is current
#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: AtomicU64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for `request`, superseding every earlier ticket
    pub fn issue(&self, request: ForecastRequest) -> Result<RequestTicket> {
        if request.coin_id.trim().is_empty() {
            return Err(ForecastError::InvalidParameter(
                "No coin ID provided for prediction data".to_string(),
            ));
        }

        let id = self.latest.fetch_add(1, Ordering::AcqRel) + 1;
        Ok(RequestTicket { id, request })
    }

    /// Whether no newer ticket has been issued since `ticket`
    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.id
    }

    /// Id of the most recently issued ticket, 0 before the first
    pub fn latest_id(&self) -> u64 {
        self.latest.load(Ordering::Acquire)
    }
}
