//! Cashlens Core Library
//!
//! Shared functionality for the Cashlens insights engine:
//! - Encrypted SQLite store for accounts, transactions and recommendations
//! - Daily aggregation, cash-flow forecast and anomaly detection
//! - Savings recommendations with an append-only history
//! - Calendar configuration for day bucketing

pub mod config;
pub mod db;
pub mod error;
pub mod insights;
pub mod models;

/// Test fixtures shared across crates
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{DayBoundary, InsightsConfig};
pub use db::{AuditEntry, Database};
pub use error::{Error, Result};
pub use insights::InsightEngine;
