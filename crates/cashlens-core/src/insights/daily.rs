//! Daily aggregation: calendar-day net sums

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::DayBoundary;
use crate::models::Transaction;

use super::types::DailyBucket;

/// Signed net totals keyed by calendar day
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyTotals {
    totals: BTreeMap<NaiveDate, Decimal>,
}

impl DailyTotals {
    /// Net total for `day`, 0 when nothing was recorded
    pub fn get(&self, day: NaiveDate) -> Decimal {
        self.totals.get(&day).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Buckets with at least one transaction, oldest first
    pub fn buckets(&self) -> Vec<DailyBucket> {
        self.totals
            .iter()
            .map(|(day, net_total)| DailyBucket {
                day: *day,
                net_total: *net_total,
            })
            .collect()
    }
}

/// Sum transaction amounts per calendar day. Input order does not matter.
pub fn aggregate(transactions: &[Transaction], boundary: DayBoundary) -> DailyTotals {
    let mut totals = BTreeMap::new();
    for tx in transactions {
        *totals
            .entry(boundary.day_of(tx.date))
            .or_insert(Decimal::ZERO) += tx.amount;
    }
    DailyTotals { totals }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::tx_at;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_input() {
        let totals = aggregate(&[], DayBoundary::Utc);
        assert!(totals.is_empty());
        assert_eq!(
            totals.get(NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_sums_same_day_signed() {
        let day = Utc.with_ymd_and_hms(2026, 10, 14, 8, 0, 0).unwrap();
        let txs = vec![
            tx_at(1, dec!(-35.50), Some("Store A"), day),
            tx_at(2, dec!(2000), Some("Salary"), day + chrono::Duration::hours(3)),
            tx_at(3, dec!(-12.99), Some("Cafe"), day + chrono::Duration::days(1)),
        ];

        let totals = aggregate(&txs, DayBoundary::Utc);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals.get(day.date_naive()), dec!(1964.50));
        assert_eq!(
            totals.get(day.date_naive().succ_opt().unwrap()),
            dec!(-12.99)
        );
    }

    #[test]
    fn test_order_independent() {
        let base = Utc.with_ymd_and_hms(2026, 10, 1, 12, 0, 0).unwrap();
        let mut txs: Vec<_> = (0..5)
            .map(|i| tx_at(i, dec!(10) * Decimal::from(i), None, base + chrono::Duration::days(i % 2)))
            .collect();

        let forward = aggregate(&txs, DayBoundary::Utc);
        txs.reverse();
        let backward = aggregate(&txs, DayBoundary::Utc);

        assert_eq!(forward, backward);
    }

    #[test]
    fn test_offset_moves_late_transaction_to_next_day() {
        let late = Utc.with_ymd_and_hms(2026, 10, 14, 23, 30, 0).unwrap();
        let txs = vec![tx_at(1, dec!(-5), None, late)];

        let utc = aggregate(&txs, DayBoundary::Utc);
        let east = aggregate(&txs, DayBoundary::from_offset_minutes(120).unwrap());

        assert_eq!(utc.buckets()[0].day_key(), "2026-10-14");
        assert_eq!(east.buckets()[0].day_key(), "2026-10-15");
    }
}
