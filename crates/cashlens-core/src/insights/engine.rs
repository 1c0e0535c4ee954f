//! Insight Engine - pulls a snapshot per call and runs the pure analyzers

use chrono::{DateTime, Utc};

use crate::config::InsightsConfig;
use crate::db::Database;
use crate::models::{Recommendation, SortOrder, Tip, Transaction};
use crate::Result;

use super::types::{AnomalyFinding, ForecastPoint};
use super::{AnomalyDetector, ForecastProjector, RecommendationGenerator};

/// Source of a user's transactions
pub trait TransactionWindowReader: Send + Sync {
    /// Transactions dated at or after `since` (all-time when `None`), in `order`
    fn fetch_transactions(
        &self,
        user_id: &str,
        since: Option<DateTime<Utc>>,
        order: SortOrder,
    ) -> Result<Vec<Transaction>>;
}

/// Append-only recommendation history
pub trait RecommendationStore: Send + Sync {
    /// Persist a new recommendation and return it with its id and timestamp
    fn insert_recommendation(&self, user_id: &str, tip: &Tip) -> Result<Recommendation>;

    /// All of a user's recommendations, newest first
    fn list_recommendations(&self, user_id: &str) -> Result<Vec<Recommendation>>;
}

impl TransactionWindowReader for Database {
    fn fetch_transactions(
        &self,
        user_id: &str,
        since: Option<DateTime<Utc>>,
        order: SortOrder,
    ) -> Result<Vec<Transaction>> {
        self.list_transactions(user_id, since, order)
    }
}

impl RecommendationStore for Database {
    fn insert_recommendation(&self, user_id: &str, tip: &Tip) -> Result<Recommendation> {
        Database::insert_recommendation(self, user_id, tip)
    }

    fn list_recommendations(&self, user_id: &str) -> Result<Vec<Recommendation>> {
        Database::list_recommendations(self, user_id)
    }
}

/// Entry points for forecasts, anomalies and recommendations
///
/// Holds no mutable state; build one per request.
pub struct InsightEngine<'a> {
    reader: &'a dyn TransactionWindowReader,
    store: &'a dyn RecommendationStore,
    config: InsightsConfig,
}

impl<'a> InsightEngine<'a> {
    pub fn new(
        reader: &'a dyn TransactionWindowReader,
        store: &'a dyn RecommendationStore,
        config: InsightsConfig,
    ) -> Self {
        Self {
            reader,
            store,
            config,
        }
    }

    /// Engine backed by a single database for both reads and writes
    pub fn for_database(db: &'a Database, config: InsightsConfig) -> Self {
        Self::new(db, db, config)
    }

    /// 14 days of actual net totals followed by a 7-day flat projection
    pub fn forecast(&self, user_id: &str, now: DateTime<Utc>) -> Result<Vec<ForecastPoint>> {
        let since = ForecastProjector::window_start(now);
        let transactions =
            self.reader
                .fetch_transactions(user_id, Some(since), SortOrder::Ascending)?;

        let series = ForecastProjector::new(self.config.day_boundary).project(&transactions, now);

        tracing::debug!(
            user = user_id,
            transactions = transactions.len(),
            points = series.len(),
            "Forecast computed"
        );
        Ok(series)
    }

    /// Up to 10 flagged transactions from the last 60 days, most recent first
    pub fn anomalies(&self, user_id: &str, now: DateTime<Utc>) -> Result<Vec<AnomalyFinding>> {
        let since = AnomalyDetector::window_start(now);
        // Duplicate detection depends on newest-first order
        let transactions =
            self.reader
                .fetch_transactions(user_id, Some(since), SortOrder::Descending)?;

        let findings = AnomalyDetector::new(self.config.day_boundary).detect(&transactions, now);

        tracing::debug!(
            user = user_id,
            transactions = transactions.len(),
            findings = findings.len(),
            "Anomaly detection complete"
        );
        Ok(findings)
    }

    /// Build a percent-of-income tip from all-time totals and append it
    pub fn generate_recommendation(&self, user_id: &str) -> Result<Recommendation> {
        let transactions = self
            .reader
            .fetch_transactions(user_id, None, SortOrder::Ascending)?;

        let tip = RecommendationGenerator::new().percent_of_income(&transactions);
        let recommendation = self.store.insert_recommendation(user_id, &tip)?;

        tracing::info!(
            user = user_id,
            id = recommendation.id,
            kind = tip.kind(),
            "Recommendation generated"
        );
        Ok(recommendation)
    }

    /// Recommendation history, newest first
    pub fn list_recommendations(&self, user_id: &str) -> Result<Vec<Recommendation>> {
        self.store.list_recommendations(user_id)
    }
}
