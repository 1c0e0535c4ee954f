//! Account operations

use rusqlite::{params, Row};

use super::{conversion_error, try_parse_datetime, Database};
use crate::error::Result;
use crate::models::Account;

fn row_to_account(row: &Row<'_>) -> rusqlite::Result<Account> {
    let created_at_str: String = row.get(4)?;
    Ok(Account {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        currency: row.get(3)?,
        created_at: try_parse_datetime(&created_at_str).map_err(|e| conversion_error(4, e))?,
    })
}

impl Database {
    /// Create or get an account by (user, name)
    pub fn upsert_account(&self, user_id: &str, name: &str, currency: &str) -> Result<i64> {
        let conn = self.conn()?;

        let existing: Option<i64> = conn
            .query_row(
                "SELECT id FROM accounts WHERE user_id = ? AND name = ?",
                params![user_id, name],
                |row| row.get(0),
            )
            .ok();

        if let Some(id) = existing {
            return Ok(id);
        }

        conn.execute(
            "INSERT INTO accounts (user_id, name, currency) VALUES (?, ?, ?)",
            params![user_id, name, currency],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// List a user's accounts
    pub fn list_accounts(&self, user_id: &str) -> Result<Vec<Account>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, name, currency, created_at FROM accounts WHERE user_id = ? ORDER BY name",
        )?;

        let accounts = stmt
            .query_map(params![user_id], row_to_account)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(accounts)
    }

    /// Get an account by ID
    pub fn get_account(&self, id: i64) -> Result<Option<Account>> {
        let conn = self.conn()?;
        let result = conn.query_row(
            "SELECT id, user_id, name, currency, created_at FROM accounts WHERE id = ?",
            params![id],
            row_to_account,
        );

        match result {
            Ok(account) => Ok(Some(account)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
