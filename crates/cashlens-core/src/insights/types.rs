//! Core types for the Insight Engine

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// Net total for one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyBucket {
    pub day: NaiveDate,
    pub net_total: Decimal,
}

impl DailyBucket {
    /// Day key as `YYYY-MM-DD`
    pub fn day_key(&self) -> String {
        self.day.format("%Y-%m-%d").to_string()
    }
}

/// Which part of the forecast series a point belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// Actual net total for a past day
    Historical,
    /// Flat trailing-average projection for a future day
    Projected,
}

/// One point of the forecast series, serialized as `{ x, y }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    /// Short day label (`MM-DD`)
    #[serde(rename = "x")]
    pub label: String,
    #[serde(rename = "y", with = "rust_decimal::serde::float")]
    pub value: Decimal,
    #[serde(skip)]
    pub day: NaiveDate,
    #[serde(skip)]
    pub segment: Segment,
}

impl ForecastPoint {
    pub fn new(day: NaiveDate, value: Decimal, segment: Segment) -> Self {
        Self {
            label: day.format("%m-%d").to_string(),
            value,
            day,
            segment,
        }
    }
}

/// Reason a transaction was flagged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnomalyKind {
    /// Magnitude above the dispersion threshold
    LargeExpense,
    /// Same merchant, magnitude and day as a transaction seen earlier in the pass
    DuplicateLooking,
}

impl AnomalyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnomalyKind::LargeExpense => "large-expense",
            AnomalyKind::DuplicateLooking => "duplicate-looking",
        }
    }
}

impl fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A flagged transaction. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnomalyFinding {
    #[serde(rename = "type")]
    pub kind: AnomalyKind,
    /// Absolute magnitude
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub merchant: Option<String>,
    pub date: DateTime<Utc>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_forecast_point_serializes_as_xy() {
        let day = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        let point = ForecastPoint::new(day, dec!(-12.5), Segment::Historical);

        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json, serde_json::json!({ "x": "03-09", "y": -12.5 }));
    }

    #[test]
    fn test_anomaly_finding_serializes_type_tag() {
        let finding = AnomalyFinding {
            kind: AnomalyKind::DuplicateLooking,
            amount: dec!(20),
            merchant: None,
            date: DateTime::parse_from_rfc3339("2026-10-14T09:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            message: "Possible duplicate: 20.00 USD".to_string(),
        };

        let json = serde_json::to_value(&finding).unwrap();
        assert_eq!(json["type"], "duplicate-looking");
        assert_eq!(json["amount"], 20.0);
        assert!(json["merchant"].is_null());
    }

    #[test]
    fn test_day_key_format() {
        let bucket = DailyBucket {
            day: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            net_total: Decimal::ZERO,
        };
        assert_eq!(bucket.day_key(), "2026-01-05");
    }
}
