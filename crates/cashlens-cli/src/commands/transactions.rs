//! Account and transaction command implementations

use std::str::FromStr;

use anyhow::{Context, Result};
use cashlens_core::db::Database;
use cashlens_core::models::{NewTransaction, SortOrder, Transaction};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use super::truncate;

const AMOUNT_WIDTH: usize = 10;

/// Parse a `YYYY-MM-DD` date (midnight UTC) or an RFC 3339 timestamp
pub fn parse_date(input: &str) -> Result<DateTime<Utc>> {
    if let Ok(day) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        let midnight = day
            .and_hms_opt(0, 0, 0)
            .context("Invalid date")?;
        return Ok(midnight.and_utc());
    }

    DateTime::parse_from_rfc3339(input)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("Invalid date '{}' (use YYYY-MM-DD or RFC 3339)", input))
}

pub fn cmd_accounts(db: &Database, user_id: &str) -> Result<()> {
    let accounts = db.list_accounts(user_id)?;

    if accounts.is_empty() {
        println!("No accounts yet. One is created when you add a transaction:");
        println!("  cashlens add -12.50 --account Checking");
        return Ok(());
    }

    println!();
    println!("🏦 Accounts");
    println!("   ─────────────────────────────");

    for account in accounts {
        println!("   [{}] {} ({})", account.id, account.name, account.currency);
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn cmd_add(
    db: &Database,
    user_id: &str,
    amount: &str,
    account: &str,
    merchant: Option<&str>,
    date: Option<&str>,
    currency: &str,
    notes: Option<&str>,
    tags: &[String],
) -> Result<i64> {
    let amount = Decimal::from_str(amount.trim())
        .with_context(|| format!("Invalid amount '{}'", amount))?;
    let date = match date {
        Some(d) => parse_date(d)?,
        None => Utc::now(),
    };

    let account_id = db
        .upsert_account(user_id, account, currency)
        .context("Failed to create account")?;

    let tx = NewTransaction {
        account_id,
        amount,
        currency: currency.to_string(),
        date,
        merchant: merchant.map(str::to_string),
        category_id: None,
        notes: notes.map(str::to_string),
        tags: tags.to_vec(),
    };
    let id = db
        .insert_transaction(user_id, &tx)
        .context("Failed to record transaction")?;

    println!(
        "✅ Recorded transaction {}: {} {} on {}",
        id,
        amount,
        currency,
        date.format("%Y-%m-%d")
    );

    Ok(id)
}

/// Signed amount right-aligned to `AMOUNT_WIDTH`, red for expenses, green for income
///
/// Padding is applied before the colour escapes so they do not count toward the width.
pub fn colored_amount(tx: &Transaction) -> String {
    let (sign, color) = if tx.is_expense() { ('-', 31) } else { ('+', 32) };
    let text = format!("{}{:.2}", sign, tx.abs_amount());
    format!("\x1b[{}m{:>width$}\x1b[0m", color, text, width = AMOUNT_WIDTH)
}

pub fn cmd_transactions_list(db: &Database, user_id: &str, limit: usize) -> Result<()> {
    let transactions = db.list_transactions(user_id, None, SortOrder::Descending)?;

    if transactions.is_empty() {
        println!("No transactions found. Record one with:");
        println!("  cashlens add -12.50 --merchant Cafe");
        return Ok(());
    }

    println!();
    println!("📝 Recent Transactions");
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in transactions.iter().take(limit) {
        println!(
            "   {} │ {} {} │ {}",
            tx.date.format("%Y-%m-%d"),
            colored_amount(tx),
            tx.currency,
            truncate(tx.merchant.as_deref().unwrap_or("-"), 40)
        );
    }

    if transactions.len() > limit {
        println!();
        println!("   … {} more (use --limit)", transactions.len() - limit);
    }

    Ok(())
}
