//! Test utilities for cashlens-core
//!
//! Builders for transactions and a seeded store, shared by unit tests here and
//! by the server and CLI test suites (via the `test-utils` feature).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::db::Database;
use crate::models::{NewTransaction, Transaction, DEFAULT_CURRENCY};

/// User id used by seeded fixtures
pub const TEST_USER: &str = "tester@example.com";

/// Build an in-memory transaction for `TEST_USER`
pub fn tx_at(
    id: i64,
    amount: Decimal,
    merchant: Option<&str>,
    date: DateTime<Utc>,
) -> Transaction {
    Transaction {
        id,
        user_id: TEST_USER.to_string(),
        account_id: 1,
        amount,
        currency: DEFAULT_CURRENCY.to_string(),
        date,
        merchant: merchant.map(str::to_string),
        category_id: None,
        notes: None,
        tags: vec![],
    }
}

/// Build an insert for `account_id`
pub fn new_tx(
    account_id: i64,
    amount: Decimal,
    merchant: Option<&str>,
    date: DateTime<Utc>,
) -> NewTransaction {
    NewTransaction {
        account_id,
        amount,
        currency: DEFAULT_CURRENCY.to_string(),
        date,
        merchant: merchant.map(str::to_string),
        category_id: None,
        notes: None,
        tags: vec![],
    }
}

/// Fresh database with one account for `user_id`; returns (db, account_id)
pub fn seeded_db(user_id: &str) -> (Database, i64) {
    let db = Database::in_memory().expect("create test database");
    let account_id = db
        .upsert_account(user_id, "Checking", DEFAULT_CURRENCY)
        .expect("create test account");
    (db, account_id)
}

/// Insert `(amount, merchant, date)` rows for `user_id` into `account_id`
pub fn insert_all(
    db: &Database,
    user_id: &str,
    account_id: i64,
    rows: &[(Decimal, Option<&str>, DateTime<Utc>)],
) {
    for (amount, merchant, date) in rows {
        db.insert_transaction(user_id, &new_tx(account_id, *amount, *merchant, *date))
            .expect("insert test transaction");
    }
}
