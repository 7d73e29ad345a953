// vigia-core/src/domain/chart.rs
//
// Time-bucketed group-by over case points for the frontend line chart.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::case::CasePoint;
use crate::domain::error::DomainError;

/// Width of the chart time buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Daily,
    #[default]
    Monthly,
    Yearly,
}

impl FromStr for Period {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Period::Daily),
            "monthly" => Ok(Period::Monthly),
            "yearly" => Ok(Period::Yearly),
            other => Err(DomainError::UnknownPeriod(other.to_string())),
        }
    }
}

/// Chart grouping dimension (series key).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    #[default]
    State,
    Municipality,
}

impl FromStr for GroupBy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "state" => Ok(GroupBy::State),
            "municipality" => Ok(GroupBy::Municipality),
            other => Err(DomainError::UnknownGroupBy(other.to_string())),
        }
    }
}

/// One emitted chart point: cases counted in (date bucket, region).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: String,
    pub cases: u64,
    pub region: String,
}

/// Placeholder series key when grouping by municipality and the name is absent.
pub const UNKNOWN_REGION: &str = "Unknown";

/// Truncate a notification date to its period bucket.
///
/// Buckets are fixed-width, zero-padded, big-endian (YYYY-MM-DD / YYYY-MM /
/// YYYY), so lexicographic order IS chronological order.
pub fn bucket_date(date: NaiveDate, period: Period) -> String {
    match period {
        Period::Daily => format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day()),
        Period::Monthly => format!("{:04}-{:02}", date.year(), date.month()),
        Period::Yearly => format!("{:04}", date.year()),
    }
}

/// Count cases per (date bucket, region) composite key.
///
/// The accumulator is a locally-scoped BTreeMap, which also fixes the output
/// ordering: ascending by date bucket, then by region for equal buckets.
pub fn group_cases(points: &[CasePoint], period: Period, group_by: GroupBy) -> Vec<ChartPoint> {
    let mut aggregated: BTreeMap<(String, String), u64> = BTreeMap::new();

    for point in points {
        let date_key = bucket_date(point.notification_date, period);
        let region_key = match group_by {
            GroupBy::State => point.state.clone(),
            GroupBy::Municipality => point
                .municipality_name
                .clone()
                .unwrap_or_else(|| UNKNOWN_REGION.to_string()),
        };
        *aggregated.entry((date_key, region_key)).or_insert(0) += 1;
    }

    aggregated
        .into_iter()
        .map(|((date, region), cases)| ChartPoint {
            date,
            cases,
            region,
        })
        .collect()
}
