//! Anomaly detection over a 60-day window
//!
//! Two heuristics, applied in a single pass over newest-first transactions:
//!
//! - **Large expense**: magnitude above `mean + 2 * std` of all non-zero
//!   magnitudes in the window. Amounts are compared unsigned, so ledgers that
//!   record expenses as positive values are covered too.
//! - **Duplicate-looking**: same merchant, magnitude and calendar day as a
//!   transaction already visited in this pass.
//!
//! The pass order is part of the contract: callers must supply transactions
//! newest first. The first occurrence of a signature (the most recent one)
//! is never flagged; every later (older) occurrence is.

use std::collections::HashSet;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};

use crate::config::DayBoundary;
use crate::models::Transaction;

use super::types::{AnomalyFinding, AnomalyKind};

/// Lookback for anomaly detection
pub const WINDOW_DAYS: i64 = 60;
/// Maximum findings returned
pub const MAX_FINDINGS: usize = 10;
/// Merchant stand-in used in signature keys
const NO_MERCHANT: &str = "-";

/// Mean, standard deviation and derived cutoff of a set of magnitudes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dispersion {
    pub mean: Decimal,
    pub std: Decimal,
    pub threshold: Decimal,
}

/// Population statistics over `values`; all zero when empty
///
/// Computed exactly in `Decimal`. If an intermediate sum or square does not
/// fit, the statistics are recomputed in `f64` instead.
pub fn dispersion(values: &[Decimal]) -> Dispersion {
    if values.is_empty() {
        return Dispersion::default();
    }

    exact_dispersion(values).unwrap_or_else(|| {
        tracing::debug!(count = values.len(), "Decimal overflow in dispersion, using f64");
        approximate_dispersion(values)
    })
}

fn exact_dispersion(values: &[Decimal]) -> Option<Dispersion> {
    let n = Decimal::from(values.len());
    let mean = values
        .iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v))?
        .checked_div(n)?;
    let variance = values
        .iter()
        .try_fold(Decimal::ZERO, |acc, v| {
            let d = v.checked_sub(mean)?;
            acc.checked_add(d.checked_mul(d)?)
        })?
        .checked_div(n)?;
    let std = variance.sqrt().unwrap_or(Decimal::ZERO);

    Some(Dispersion {
        mean,
        std,
        threshold: mean.checked_add(std.checked_mul(Decimal::TWO)?)?,
    })
}

fn approximate_dispersion(values: &[Decimal]) -> Dispersion {
    let floats: Vec<f64> = values
        .iter()
        .map(|v| v.to_f64().unwrap_or(f64::MAX))
        .collect();
    let n = floats.len() as f64;
    let mean = floats.iter().sum::<f64>() / n;
    let variance = floats.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let std = variance.sqrt();

    Dispersion {
        mean: to_decimal(mean),
        std: to_decimal(std),
        threshold: to_decimal(mean + 2.0 * std),
    }
}

/// Saturates at `Decimal::MAX` for values outside the representable range
fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or(Decimal::MAX)
}

/// Identity used to spot repeat-looking transactions
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SignatureKey {
    pub merchant: String,
    pub magnitude: Decimal,
    pub day: NaiveDate,
}

/// Signatures visited so far in a detection pass
#[derive(Debug, Default)]
pub struct SignatureSet {
    seen: HashSet<SignatureKey>,
}

impl SignatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `key`; returns true if it had already been recorded
    pub fn observe(&mut self, key: SignatureKey) -> bool {
        !self.seen.insert(key)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Flags large and duplicate-looking transactions
#[derive(Debug, Clone, Copy, Default)]
pub struct AnomalyDetector {
    boundary: DayBoundary,
}

impl AnomalyDetector {
    pub fn new(boundary: DayBoundary) -> Self {
        Self { boundary }
    }

    /// Earliest instant considered for detection at `now`
    pub fn window_start(now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::days(WINDOW_DAYS)
    }

    /// Magnitudes of every non-zero transaction, sign ignored
    pub fn magnitudes<'a, I>(transactions: I) -> Vec<Decimal>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        transactions
            .into_iter()
            .map(Transaction::abs_amount)
            .filter(|v| !v.is_zero())
            .collect()
    }

    /// Run detection as of `now`.
    ///
    /// `newest_first` must be ordered by date descending.
    pub fn detect(&self, newest_first: &[Transaction], now: DateTime<Utc>) -> Vec<AnomalyFinding> {
        let since = Self::window_start(now);
        let window: Vec<&Transaction> = newest_first.iter().filter(|tx| tx.date >= since).collect();

        let stats = dispersion(&Self::magnitudes(window.iter().copied()));

        let mut seen = SignatureSet::new();
        let mut findings = self.scan(&window, stats.threshold, &mut seen);

        tracing::debug!(
            window = window.len(),
            mean = %stats.mean,
            std = %stats.std,
            threshold = %stats.threshold,
            flagged = findings.len(),
            "Anomaly scan complete"
        );

        findings.truncate(MAX_FINDINGS);
        findings
    }

    fn scan(
        &self,
        window: &[&Transaction],
        threshold: Decimal,
        seen: &mut SignatureSet,
    ) -> Vec<AnomalyFinding> {
        let mut findings = Vec::new();

        for tx in window {
            let magnitude = tx.abs_amount();
            let merchant = merchant_of(tx);

            if magnitude > Decimal::ZERO && magnitude > threshold && threshold > Decimal::ZERO {
                findings.push(finding(
                    AnomalyKind::LargeExpense,
                    tx,
                    magnitude,
                    describe("Unusual spend of", magnitude, &tx.currency, merchant),
                ));
            }

            let key = SignatureKey {
                merchant: merchant.unwrap_or(NO_MERCHANT).to_string(),
                magnitude: magnitude.normalize(),
                day: self.boundary.day_of(tx.date),
            };
            if seen.observe(key) {
                findings.push(finding(
                    AnomalyKind::DuplicateLooking,
                    tx,
                    magnitude,
                    describe("Possible duplicate:", magnitude, &tx.currency, merchant),
                ));
            }
        }

        findings
    }
}

/// Merchant name, treating an empty string as absent
fn merchant_of(tx: &Transaction) -> Option<&str> {
    tx.merchant.as_deref().filter(|m| !m.is_empty())
}

fn finding(
    kind: AnomalyKind,
    tx: &Transaction,
    magnitude: Decimal,
    message: String,
) -> AnomalyFinding {
    AnomalyFinding {
        kind,
        amount: magnitude,
        merchant: merchant_of(tx).map(str::to_string),
        date: tx.date,
        message,
    }
}

/// `"<prefix> 12.34 USD at Merchant"`, or without the merchant segment
fn describe(prefix: &str, magnitude: Decimal, currency: &str, merchant: Option<&str>) -> String {
    let amount = magnitude.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = match merchant {
        Some(m) => format!("{} {:.2} {} at {}", prefix, amount, currency, m),
        None => format!("{} {:.2} {}", prefix, amount, currency),
    };
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::tx_at;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 14, 18, 0, 0).unwrap()
    }

    #[test]
    fn test_dispersion_empty() {
        assert_eq!(dispersion(&[]), Dispersion::default());
    }

    #[test]
    fn test_dispersion_two_expenses() {
        let stats = dispersion(&[dec!(35.50), dec!(12.99)]);

        assert_eq!(stats.mean, dec!(24.245));
        assert!((stats.std - dec!(11.255)).abs() < dec!(0.0001));
        assert!((stats.threshold - dec!(46.755)).abs() < dec!(0.0001));
    }

    #[test]
    fn test_dispersion_falls_back_on_overflow() {
        // Squared deviations of ~5e14 exceed Decimal::MAX
        let stats = dispersion(&[dec!(1000000000000000), dec!(1)]);

        assert!((stats.mean - dec!(500000000000000.5)).abs() < dec!(1));
        assert!((stats.std - dec!(499999999999999.5)).abs() < dec!(1));
        assert!(stats.threshold > dec!(1000000000000000));
    }

    #[test]
    fn test_dispersion_saturates_near_decimal_max() {
        let stats = dispersion(&[Decimal::MAX, Decimal::MAX]);

        assert!(stats.mean > dec!(10000000000000000000000000000));
        assert!(stats.threshold >= stats.mean);
    }

    #[test]
    fn test_huge_amount_does_not_abort_detection() {
        let now = now();
        let txs = vec![
            tx_at(2, dec!(-1000000000000000), Some("Wire"), now - Duration::hours(1)),
            tx_at(1, dec!(-1), Some("Cafe"), now - Duration::hours(2)),
        ];

        let findings = AnomalyDetector::default().detect(&txs, now);
        assert!(findings.is_empty());

        let mut txs = txs;
        txs.extend((0..20).map(|i| tx_at(10 + i, dec!(-1), None, now - Duration::days(i + 1))));
        let findings = AnomalyDetector::default().detect(&txs, now);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, AnomalyKind::LargeExpense);
        assert_eq!(findings[0].merchant.as_deref(), Some("Wire"));
    }

    #[test]
    fn test_everyday_spending_is_not_flagged() {
        let now = now();
        let txs = vec![
            tx_at(3, dec!(2000), Some("Salary"), now - Duration::hours(1)),
            tx_at(2, dec!(-12.99), Some("Cafe"), now - Duration::hours(2)),
            tx_at(1, dec!(-35.50), Some("Store A"), now - Duration::hours(3)),
        ];

        let findings = AnomalyDetector::default().detect(&txs, now);
        assert!(findings.is_empty());
    }

    #[test]
    fn test_empty_window() {
        assert!(AnomalyDetector::default().detect(&[], now()).is_empty());
    }

    #[test]
    fn test_large_expense_flagged() {
        let now = now();
        let mut txs: Vec<_> = (0..10)
            .map(|i| tx_at(i, dec!(-10), Some("Lunch"), now - Duration::days(i + 1)))
            .collect();
        txs.insert(0, tx_at(99, dec!(-900), Some("Airline"), now - Duration::hours(1)));

        let findings = AnomalyDetector::default().detect(&txs, now);
        let large: Vec<_> = findings
            .iter()
            .filter(|f| f.kind == AnomalyKind::LargeExpense)
            .collect();

        assert_eq!(large.len(), 1);
        assert_eq!(large[0].amount, dec!(900));
        assert_eq!(large[0].merchant.as_deref(), Some("Airline"));
        assert_eq!(large[0].message, "Unusual spend of 900.00 USD at Airline");
    }

    #[test]
    fn test_positive_expense_entries_are_compared_by_magnitude() {
        let now = now();
        let mut txs: Vec<_> = (0..10)
            .map(|i| tx_at(i, dec!(10), None, now - Duration::days(i + 1)))
            .collect();
        txs.insert(0, tx_at(99, dec!(450), None, now - Duration::hours(1)));

        let findings = AnomalyDetector::default().detect(&txs, now);
        assert_eq!(findings[0].kind, AnomalyKind::LargeExpense);
        assert_eq!(findings[0].message, "Unusual spend of 450.00 USD");
    }

    #[test]
    fn test_zero_threshold_suppresses_large_expense() {
        let now = now();
        // Only zero-amount transactions: no magnitudes, threshold stays 0
        let txs = vec![
            tx_at(2, Decimal::ZERO, Some("A"), now - Duration::hours(1)),
            tx_at(1, Decimal::ZERO, Some("B"), now - Duration::hours(2)),
        ];

        let findings = AnomalyDetector::default().detect(&txs, now);
        assert!(findings.iter().all(|f| f.kind != AnomalyKind::LargeExpense));
    }

    #[test]
    fn test_duplicate_flags_older_of_pair() {
        let now = now();
        let newer = now - Duration::hours(1);
        let older = now - Duration::hours(5);
        let txs = vec![
            tx_at(2, dec!(-20), Some("X"), newer),
            tx_at(1, dec!(-20), Some("X"), older),
        ];

        let findings = AnomalyDetector::default().detect(&txs, now);

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, AnomalyKind::DuplicateLooking);
        assert_eq!(findings[0].date, older);
        assert_eq!(findings[0].message, "Possible duplicate: 20.00 USD at X");
    }

    #[test]
    fn test_duplicate_matches_sign_agnostic_magnitude_and_scale() {
        let now = now();
        let txs = vec![
            tx_at(2, dec!(20.00), None, now - Duration::hours(1)),
            tx_at(1, dec!(-20), None, now - Duration::hours(2)),
        ];

        let findings = AnomalyDetector::default().detect(&txs, now);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, AnomalyKind::DuplicateLooking);
        assert!(findings[0].merchant.is_none());
        assert_eq!(findings[0].message, "Possible duplicate: 20.00 USD");
    }

    #[test]
    fn test_different_days_are_not_duplicates() {
        let now = now();
        let txs = vec![
            tx_at(2, dec!(-20), Some("X"), now - Duration::hours(1)),
            tx_at(1, dec!(-20), Some("X"), now - Duration::days(1)),
        ];

        assert!(AnomalyDetector::default().detect(&txs, now).is_empty());
    }

    #[test]
    fn test_single_transaction_can_emit_both_findings() {
        let now = now();
        let mut txs: Vec<_> = (0..12)
            .map(|i| tx_at(i, dec!(-5), Some("Bus"), now - Duration::days(i + 1)))
            .collect();
        // Two identical big charges on the same day
        txs.insert(0, tx_at(100, dec!(-1000), Some("Hotel"), now - Duration::hours(2)));
        txs.insert(0, tx_at(101, dec!(-1000), Some("Hotel"), now - Duration::hours(1)));

        let findings = AnomalyDetector::default().detect(&txs, now);
        let kinds: Vec<_> = findings.iter().map(|f| f.kind).collect();

        assert_eq!(
            kinds,
            vec![
                AnomalyKind::LargeExpense,
                AnomalyKind::LargeExpense,
                AnomalyKind::DuplicateLooking,
            ]
        );
        assert_eq!(findings[2].date, now - Duration::hours(2));
    }

    #[test]
    fn test_truncates_to_most_recent_ten() {
        let now = now();
        // 15 same-day pairs: every second transaction is a duplicate
        let mut txs = Vec::new();
        for i in 0..15 {
            let at = now - Duration::days(i);
            txs.push(tx_at(i * 2 + 1, dec!(-7), Some("Vending"), at));
            txs.push(tx_at(i * 2, dec!(-7), Some("Vending"), at - Duration::minutes(1)));
        }

        let findings = AnomalyDetector::default().detect(&txs, now);

        assert_eq!(findings.len(), MAX_FINDINGS);
        assert_eq!(findings[0].date, now - Duration::minutes(1));
        assert_eq!(findings[9].date, now - Duration::days(9) - Duration::minutes(1));
    }

    #[test]
    fn test_ignores_transactions_outside_window() {
        let now = now();
        let txs = vec![
            tx_at(2, dec!(-20), Some("X"), now - Duration::days(61)),
            tx_at(1, dec!(-20), Some("X"), now - Duration::days(61) - Duration::hours(1)),
        ];

        assert!(AnomalyDetector::default().detect(&txs, now).is_empty());
    }

    #[test]
    fn test_signature_set_observe() {
        let key = SignatureKey {
            merchant: "X".to_string(),
            magnitude: dec!(20),
            day: NaiveDate::from_ymd_opt(2026, 10, 14).unwrap(),
        };
        let mut seen = SignatureSet::new();

        assert!(!seen.observe(key.clone()));
        assert!(seen.observe(key));
        assert_eq!(seen.len(), 1);
    }

    #[test]
    fn test_describe_rounds_half_away_from_zero() {
        assert_eq!(
            describe("Unusual spend of", dec!(10.005), "EUR", Some("Shop")),
            "Unusual spend of 10.01 EUR at Shop"
        );
    }
}
