//! Cash-flow forecast
//!
//! Produces a 21-point series: the last 14 days of actual daily net totals,
//! followed by a flat 7-day projection equal to the mean of the last 7 actual
//! days. No seasonality or trend, just a trailing average.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use crate::config::DayBoundary;
use crate::models::Transaction;

use super::daily;
use super::types::{ForecastPoint, Segment};

/// Raw lookback; covers the 14-day history with a 7-day margin
pub const LOOKBACK_DAYS: i64 = 21;
/// Historical days in the series, ending today
pub const HISTORY_DAYS: i64 = 14;
/// Trailing days averaged for the projection
pub const AVERAGE_DAYS: usize = 7;
/// Projected days after today
pub const PROJECTION_DAYS: i64 = 7;

/// Builds the historical-plus-projected series
#[derive(Debug, Clone, Copy, Default)]
pub struct ForecastProjector {
    boundary: DayBoundary,
}

impl ForecastProjector {
    pub fn new(boundary: DayBoundary) -> Self {
        Self { boundary }
    }

    /// Earliest instant considered for a forecast at `now`
    pub fn window_start(now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::days(LOOKBACK_DAYS)
    }

    /// Project from `transactions` (any order) as of `now`
    pub fn project(&self, transactions: &[Transaction], now: DateTime<Utc>) -> Vec<ForecastPoint> {
        let since = Self::window_start(now);
        let recent: Vec<Transaction> = transactions
            .iter()
            .filter(|tx| tx.date >= since)
            .cloned()
            .collect();
        let totals = daily::aggregate(&recent, self.boundary);

        let today = self.boundary.day_of(now);
        let mut series: Vec<ForecastPoint> = (0..HISTORY_DAYS)
            .rev()
            .map(|back| {
                let day = today - Duration::days(back);
                ForecastPoint::new(day, totals.get(day), Segment::Historical)
            })
            .collect();

        let avg = trailing_average(&series);

        series.extend((1..=PROJECTION_DAYS).map(|ahead| {
            ForecastPoint::new(today + Duration::days(ahead), avg, Segment::Projected)
        }));

        series
    }
}

/// Mean of the last `AVERAGE_DAYS` values, 0 when there are none
fn trailing_average(history: &[ForecastPoint]) -> Decimal {
    let tail = &history[history.len().saturating_sub(AVERAGE_DAYS)..];
    if tail.is_empty() {
        return Decimal::ZERO;
    }
    let sum: Decimal = tail.iter().map(|p| p.value).sum();
    sum / Decimal::from(tail.len())
}
