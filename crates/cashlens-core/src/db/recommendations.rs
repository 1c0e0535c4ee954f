//! Recommendation history operations (append-only)

use rusqlite::{params, Row};

use super::{try_parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{Recommendation, Tip};

struct RecommendationRow {
    id: i64,
    user_id: String,
    kind: String,
    payload: String,
    created_at: String,
}

impl RecommendationRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            kind: row.get(2)?,
            payload: row.get(3)?,
            created_at: row.get(4)?,
        })
    }

    fn into_recommendation(self) -> Result<Recommendation> {
        Ok(Recommendation {
            id: self.id,
            user_id: self.user_id,
            tip: Tip::from_parts(&self.kind, &self.payload)?,
            created_at: try_parse_datetime(&self.created_at).map_err(|e| {
                Error::InvalidData(format!(
                    "Recommendation {} has invalid created_at {:?}: {}",
                    self.id, self.created_at, e
                ))
            })?,
        })
    }
}

impl Database {
    /// Append a recommendation and return the stored record
    pub fn insert_recommendation(&self, user_id: &str, tip: &Tip) -> Result<Recommendation> {
        let conn = self.conn()?;
        let payload = tip.payload_json()?;

        conn.execute(
            "INSERT INTO recommendations (user_id, type, payload) VALUES (?, ?, ?)",
            params![user_id, tip.kind(), payload],
        )?;
        let id = conn.last_insert_rowid();

        self.get_recommendation(id)?
            .ok_or_else(|| Error::NotFound(format!("Recommendation {}", id)))
    }

    /// Get a recommendation by ID
    pub fn get_recommendation(&self, id: i64) -> Result<Option<Recommendation>> {
        let conn = self.conn()?;

        let result = conn.query_row(
            "SELECT id, user_id, type, payload, created_at FROM recommendations WHERE id = ?",
            params![id],
            RecommendationRow::from_row,
        );

        match result {
            Ok(row) => Ok(Some(row.into_recommendation()?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List a user's recommendations, newest first
    pub fn list_recommendations(&self, user_id: &str) -> Result<Vec<Recommendation>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, user_id, type, payload, created_at
            FROM recommendations
            WHERE user_id = ?
            ORDER BY created_at DESC, id DESC
            "#,
        )?;

        let rows = stmt
            .query_map(params![user_id], RecommendationRow::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(RecommendationRow::into_recommendation)
            .collect()
    }
}
