//! Domain models for Cashlens

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default currency for new accounts and transactions
pub const DEFAULT_CURRENCY: &str = "USD";

/// A money account owned by a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

/// A ledger entry as supplied to the insights engine
///
/// `amount` is signed: positive is an inflow, negative an outflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub user_id: String,
    pub account_id: i64,
    pub amount: Decimal,
    pub currency: String,
    pub date: DateTime<Utc>,
    pub merchant: Option<String>,
    pub category_id: Option<i64>,
    pub notes: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    pub fn is_expense(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    /// Magnitude, ignoring the sign convention
    pub fn abs_amount(&self) -> Decimal {
        self.amount.abs()
    }
}

/// New transaction for insertion
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub account_id: i64,
    pub amount: Decimal,
    pub currency: String,
    pub date: DateTime<Utc>,
    pub merchant: Option<String>,
    pub category_id: Option<i64>,
    pub notes: Option<String>,
    pub tags: Vec<String>,
}

/// Ordering requested from the transaction store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Oldest first
    #[default]
    Ascending,
    /// Newest first
    Descending,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

/// Fixed share of income the percent-of-income tip suggests saving
pub const DEFAULT_SAVE_RATE: f64 = 0.2;

/// Payload of the `percent-of-income` tip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PercentOfIncome {
    pub save_rate: f64,
    /// All-time sum of positive amounts, as a decimal string
    pub income: String,
    /// All-time sum of negative amounts, as a decimal string
    pub expense: String,
}

/// A savings tip, keyed by its `type` tag
///
/// New tip kinds are added as variants with their own payload schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "kebab-case")]
pub enum Tip {
    PercentOfIncome(PercentOfIncome),
}

impl Tip {
    /// The `type` tag as stored and serialized
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PercentOfIncome(_) => "percent-of-income",
        }
    }

    /// Serialize just the payload (without the tag)
    pub fn payload_json(&self) -> Result<String> {
        let json = match self {
            Self::PercentOfIncome(p) => serde_json::to_string(p)?,
        };
        Ok(json)
    }

    /// Rebuild a tip from its stored tag and payload
    pub fn from_parts(kind: &str, payload: &str) -> Result<Self> {
        match kind {
            "percent-of-income" => Ok(Self::PercentOfIncome(serde_json::from_str(payload)?)),
            _ => Err(Error::InvalidData(format!(
                "Unknown recommendation type: {}",
                kind
            ))),
        }
    }
}

/// A persisted recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: i64,
    #[serde(skip)]
    pub user_id: String,
    #[serde(flatten)]
    pub tip: Tip,
    pub created_at: DateTime<Utc>,
}
