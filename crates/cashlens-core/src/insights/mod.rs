//! Insight Engine - Financial Insights
//!
//! Turns a user's raw transactions into three on-demand views. Nothing is
//! cached between calls; each request reads a fresh snapshot from the store.
//!
//! ## Components
//!
//! - **Daily Aggregator** - Groups signed amounts into per-day net totals
//! - **Forecast Projector** - 14 days of history plus a 7-day flat projection
//! - **Anomaly Detector** - Flags large expenses and duplicate-looking charges
//! - **Recommendation Generator** - Percent-of-income savings tip
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cashlens_core::insights::InsightEngine;
//!
//! let engine = InsightEngine::for_database(&db, config);
//! let series = engine.forecast("alice", Utc::now())?;
//! let findings = engine.anomalies("alice", Utc::now())?;
//! ```

pub mod anomaly;
pub mod daily;
pub mod engine;
pub mod forecast;
pub mod recommendation;
pub mod types;

pub use anomaly::{AnomalyDetector, Dispersion, SignatureKey, SignatureSet};
pub use daily::{aggregate, DailyTotals};
pub use engine::{InsightEngine, RecommendationStore, TransactionWindowReader};
pub use forecast::ForecastProjector;
pub use recommendation::{LedgerTotals, RecommendationGenerator};
pub use types::{AnomalyFinding, AnomalyKind, DailyBucket, ForecastPoint, Segment};
