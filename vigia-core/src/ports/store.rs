// vigia-core/src/ports/store.rs

// This file defines what your application needs, without knowing how it's done.
// The seed pipeline appends, the aggregations read; nobody ever updates or
// deletes a persisted case through this port.

use crate::domain::case::{CasePoint, CaseRecord, Municipality};
use crate::error::VigiaError;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Equality/range filter for count queries (all fields optional, AND-combined).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountFilter {
    pub notified_on_or_after: Option<NaiveDate>,
    /// Exclusive upper bound on the notification date.
    pub notified_before: Option<NaiveDate>,
    pub evolution: Option<String>,
    pub hospitalized: Option<bool>,
    pub icu: Option<bool>,
    pub vaccinated: Option<bool>,
}

/// Equality filter for the chart projection fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointFilter {
    pub state: Option<String>,
    pub municipality: Option<String>,
}

#[async_trait]
pub trait CaseStore: Send + Sync {
    /// Bulk-insert with skip-duplicates semantics on `notification_id`.
    /// Returns the number of records actually inserted (re-ingesting an
    /// already-seen source inserts 0).
    async fn insert_batch(&self, records: &[CaseRecord]) -> Result<u64, VigiaError>;

    /// Count the cases matching the filter.
    async fn count_cases(&self, filter: &CountFilter) -> Result<u64, VigiaError>;

    /// Fetch the (date, state, municipality name) projection of matching
    /// cases, ordered by notification date ascending.
    async fn fetch_points(&self, filter: &PointFilter) -> Result<Vec<CasePoint>, VigiaError>;

    /// Distinct notifying states, sorted ascending.
    async fn distinct_states(&self) -> Result<Vec<String>, VigiaError>;

    /// Distinct (code, name) municipality pairs, sorted by name.
    async fn distinct_municipalities(&self) -> Result<Vec<Municipality>, VigiaError>;
}
