//! Transaction operations

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rusqlite::{params, Row};

use super::{conversion_error, format_datetime, try_parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{NewTransaction, SortOrder, Transaction};

const TRANSACTION_COLUMNS: &str =
    "id, user_id, account_id, amount, currency, date, merchant, category_id, notes, tags";

fn row_to_transaction(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    let amount_str: String = row.get(3)?;
    let date_str: String = row.get(5)?;
    let tags_json: String = row.get(9)?;

    Ok(Transaction {
        id: row.get(0)?,
        user_id: row.get(1)?,
        account_id: row.get(2)?,
        amount: Decimal::from_str(&amount_str).map_err(|e| conversion_error(3, e))?,
        currency: row.get(4)?,
        date: try_parse_datetime(&date_str).map_err(|e| conversion_error(5, e))?,
        merchant: row.get(6)?,
        category_id: row.get(7)?,
        notes: row.get(8)?,
        tags: serde_json::from_str(&tags_json).map_err(|e| conversion_error(9, e))?,
    })
}

impl Database {
    /// Insert a transaction for a user
    ///
    /// The account must exist and belong to the same user.
    pub fn insert_transaction(&self, user_id: &str, tx: &NewTransaction) -> Result<i64> {
        match self.get_account(tx.account_id)? {
            Some(account) if account.user_id == user_id => {}
            _ => {
                return Err(Error::NotFound(format!(
                    "Account {} for user {}",
                    tx.account_id, user_id
                )))
            }
        }

        let conn = self.conn()?;
        let tags_json = serde_json::to_string(&tx.tags)?;

        conn.execute(
            r#"
            INSERT INTO transactions (user_id, account_id, amount, currency, date, merchant, category_id, notes, tags)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                user_id,
                tx.account_id,
                tx.amount.to_string(),
                tx.currency,
                format_datetime(&tx.date),
                tx.merchant,
                tx.category_id,
                tx.notes,
                tags_json,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// List a user's transactions dated at or after `since` (all-time when `None`)
    pub fn list_transactions(
        &self,
        user_id: &str,
        since: Option<DateTime<Utc>>,
        order: SortOrder,
    ) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let direction = order.as_sql();

        let transactions = match since {
            Some(since) => {
                let sql = format!(
                    "SELECT {} FROM transactions WHERE user_id = ? AND date >= ? ORDER BY date {}, id {}",
                    TRANSACTION_COLUMNS, direction, direction
                );
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt.query_map(
                    params![user_id, format_datetime(&since)],
                    row_to_transaction,
                )?;
                rows.collect::<std::result::Result<Vec<_>, _>>()?
            }
            None => {
                let sql = format!(
                    "SELECT {} FROM transactions WHERE user_id = ? ORDER BY date {}, id {}",
                    TRANSACTION_COLUMNS, direction, direction
                );
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt.query_map(params![user_id], row_to_transaction)?;
                rows.collect::<std::result::Result<Vec<_>, _>>()?
            }
        };

        Ok(transactions)
    }

    /// Count a user's transactions
    pub fn count_transactions(&self, user_id: &str) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row(
            "SELECT COUNT(*) FROM transactions WHERE user_id = ?",
            params![user_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
