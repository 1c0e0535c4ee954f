//! Integration tests for cashlens-core
//!
//! These tests exercise the full store → engine → history workflow.

use cashlens_core::{
    config::{DayBoundary, InsightsConfig},
    db::Database,
    insights::{AnomalyKind, InsightEngine},
    models::{NewTransaction, Tip},
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const USER: &str = "alice@example.com";

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 14, 18, 30, 0).unwrap()
}

/// Fresh store with a single checking account for `USER`
fn setup() -> (Database, i64) {
    let db = Database::in_memory().unwrap();
    let account = db.upsert_account(USER, "Checking", "USD").unwrap();
    (db, account)
}

fn add(db: &Database, account: i64, amount: Decimal, merchant: &str, date: DateTime<Utc>) {
    let tx = NewTransaction {
        account_id: account,
        amount,
        currency: "USD".to_string(),
        date,
        merchant: Some(merchant.to_string()),
        category_id: None,
        notes: None,
        tags: vec![],
    };
    db.insert_transaction(USER, &tx).unwrap();
}

#[test]
fn test_today_purchases_and_salary() {
    let (db, account) = setup();
    let today = now() - Duration::hours(1);
    add(&db, account, dec!(-35.50), "Store A", today);
    add(&db, account, dec!(-12.99), "Cafe", today);
    add(&db, account, dec!(2000.00), "Salary", today);

    let engine = InsightEngine::for_database(&db, InsightsConfig::default());

    // Salary magnitude inflates the threshold, so nothing is flagged
    assert!(engine.anomalies(USER, now()).unwrap().is_empty());

    let series = engine.forecast(USER, now()).unwrap();
    assert_eq!(series.len(), 21);
    assert_eq!(series[13].value, dec!(1951.51));
    assert_eq!(series[12].value, Decimal::ZERO);
    // Only today is non-zero in the averaged week
    let expected = dec!(1951.51) / Decimal::from(7);
    assert!(series[14..].iter().all(|p| p.value == expected));

    let rec = engine.generate_recommendation(USER).unwrap();
    let Tip::PercentOfIncome(payload) = &rec.tip;
    assert_eq!(payload.save_rate, 0.2);
    assert_eq!(payload.income, "2000");
    assert_eq!(payload.expense, "-48.49");
}

#[test]
fn test_duplicate_pair_flags_older_charge() {
    let (db, account) = setup();
    add(&db, account, dec!(-20), "X", now() - Duration::hours(5));
    add(&db, account, dec!(-20), "X", now() - Duration::hours(3));

    let engine = InsightEngine::for_database(&db, InsightsConfig::default());
    let findings = engine.anomalies(USER, now()).unwrap();

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].kind, AnomalyKind::DuplicateLooking);
    assert_eq!(findings[0].date, now() - Duration::hours(5));
    assert_eq!(findings[0].message, "Possible duplicate: 20.00 USD at X");
}

#[test]
fn test_large_expense_among_routine_spend() {
    let (db, account) = setup();
    for day in 1..=20 {
        add(&db, account, dec!(-10), "Deli", now() - Duration::days(day));
    }
    add(&db, account, dec!(-500), "Airline", now() - Duration::days(3));
    // Outside the 60-day window
    add(&db, account, dec!(-9000), "Old", now() - Duration::days(90));

    let engine = InsightEngine::for_database(&db, InsightsConfig::default());
    let findings = engine.anomalies(USER, now()).unwrap();

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].kind, AnomalyKind::LargeExpense);
    assert_eq!(findings[0].amount, dec!(500));
    assert_eq!(findings[0].message, "Unusual spend of 500.00 USD at Airline");
}

#[test]
fn test_findings_capped_at_ten() {
    let (db, account) = setup();
    // Twelve duplicate pairs on distinct days
    for day in 0..12 {
        let when = now() - Duration::days(day) - Duration::minutes(10);
        add(&db, account, dec!(-4.50), "Coffee", when);
        add(&db, account, dec!(-4.50), "Coffee", when - Duration::minutes(1));
    }

    let engine = InsightEngine::for_database(&db, InsightsConfig::default());
    let findings = engine.anomalies(USER, now()).unwrap();

    assert_eq!(findings.len(), 10);
    assert!(findings
        .iter()
        .all(|f| f.kind == AnomalyKind::DuplicateLooking));
    // Most recent pairs survive truncation
    assert_eq!(
        findings[0].date,
        now() - Duration::minutes(11)
    );
}

#[test]
fn test_empty_user_end_to_end() {
    let (db, _) = setup();
    let engine = InsightEngine::for_database(&db, InsightsConfig::default());

    let series = engine.forecast(USER, now()).unwrap();
    assert_eq!(series.len(), 21);
    assert!(series.iter().all(|p| p.value == Decimal::ZERO));
    assert!(engine.anomalies(USER, now()).unwrap().is_empty());

    let rec = engine.generate_recommendation(USER).unwrap();
    let json = serde_json::to_value(&rec).unwrap();
    assert_eq!(json["type"], "percent-of-income");
    assert_eq!(json["payload"]["income"], "0");
    assert_eq!(json["payload"]["expense"], "0");
    assert_eq!(json["payload"]["saveRate"], 0.2);
    assert!(json.get("userId").is_none());

    assert_eq!(engine.list_recommendations(USER).unwrap().len(), 1);
}

#[test]
fn test_day_boundary_shifts_buckets() {
    let (db, account) = setup();
    // 23:30 UTC on the 13th is already the 14th at UTC+2
    let late = Utc.with_ymd_and_hms(2026, 10, 13, 23, 30, 0).unwrap();
    add(&db, account, dec!(-42), "Late dinner", late);

    let utc = InsightEngine::for_database(&db, InsightsConfig::default());
    let series = utc.forecast(USER, now()).unwrap();
    assert_eq!(series[12].label, "10-13");
    assert_eq!(series[12].value, dec!(-42));

    let shifted = InsightsConfig {
        day_boundary: DayBoundary::from_offset_minutes(120).unwrap(),
    };
    let local = InsightEngine::for_database(&db, shifted);
    let series = local.forecast(USER, now()).unwrap();
    assert_eq!(series[13].label, "10-14");
    assert_eq!(series[13].value, dec!(-42));
    assert_eq!(series[12].value, Decimal::ZERO);
}
