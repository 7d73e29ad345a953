// vigia-core/src/application/charts.rs
//
// Chart data: one read (projection) + one in-memory reduction, plus the two
// distinct-value queries feeding the frontend filter dropdowns.

use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::domain::case::Municipality;
use crate::domain::chart::{ChartPoint, GroupBy, Period, group_cases};
use crate::domain::error::DomainError;
use crate::error::VigiaError;
use crate::ports::store::{CaseStore, PointFilter};

/// Chart query parameters: optional equality filters + period/grouping with
/// monthly/state defaults.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ChartFilters {
    #[serde(default)]
    pub period: Period,
    #[serde(default)]
    pub group_by: GroupBy,
    /// Two-letter notifying state code (ex: SP, RJ).
    #[validate(length(min = 2, max = 2, message = "state must be a 2-letter code"))]
    pub state: Option<String>,
    /// Notifying municipality code.
    pub municipality: Option<String>,
}

pub async fn get_cases_chart_data(
    store: &dyn CaseStore,
    filters: &ChartFilters,
) -> Result<Vec<ChartPoint>, VigiaError> {
    filters
        .validate()
        .map_err(|e| VigiaError::Domain(DomainError::InvalidFilters(e.to_string())))?;

    info!(?filters, "Fetching chart data");

    let points = store
        .fetch_points(&PointFilter {
            state: filters.state.clone(),
            municipality: filters.municipality.clone(),
        })
        .await?;

    Ok(group_cases(&points, filters.period, filters.group_by))
}

pub async fn get_available_states(store: &dyn CaseStore) -> Result<Vec<String>, VigiaError> {
    info!("Fetching all available states");
    store.distinct_states().await
}

pub async fn get_available_municipalities(
    store: &dyn CaseStore,
) -> Result<Vec<Municipality>, VigiaError> {
    info!("Fetching all available municipalities");
    store.distinct_municipalities().await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::case::CaseRecord;
    use crate::infrastructure::adapters::duckdb::DuckDbStore;
    use anyhow::Result;
    use chrono::NaiveDate;

    fn record(id: &str, date: &str, state: &str, municipality: Option<(&str, &str)>) -> CaseRecord {
        CaseRecord {
            notification_id: id.to_string(),
            notification_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            week_number: None,
            state: state.to_string(),
            state_residence: None,
            municipality: municipality.map(|(code, _)| code.to_string()),
            municipality_name: municipality.map(|(_, name)| name.to_string()),
            municipality_res: None,
            sex: None,
            age_years: None,
            age_type: None,
            hospitalized: false,
            hospital_date: None,
            icu: false,
            icu_entry_date: None,
            vaccinated: false,
            dose1_date: None,
            dose2_date: None,
            evolution: None,
            evolution_date: None,
        }
    }

    async fn seeded_store() -> Result<DuckDbStore> {
        let store = DuckDbStore::open(":memory:")?;
        store
            .insert_batch(&[
                record("1", "2024-01-15", "SP", Some(("355030", "SAO PAULO"))),
                record("2", "2024-01-20", "SP", Some(("355030", "SAO PAULO"))),
                record("3", "2024-01-25", "RJ", Some(("330455", "RIO DE JANEIRO"))),
                record("4", "2024-02-10", "SP", None),
            ])
            .await?;
        Ok(store)
    }

    #[tokio::test]
    async fn test_monthly_chart_grouped_by_state() -> Result<()> {
        let store = seeded_store().await?;

        let points = get_cases_chart_data(&store, &ChartFilters::default()).await?;

        assert_eq!(points.len(), 3);
        assert_eq!(
            (points[0].date.as_str(), points[0].region.as_str(), points[0].cases),
            ("2024-01", "RJ", 1)
        );
        assert_eq!(
            (points[1].date.as_str(), points[1].region.as_str(), points[1].cases),
            ("2024-01", "SP", 2)
        );
        assert_eq!(
            (points[2].date.as_str(), points[2].region.as_str(), points[2].cases),
            ("2024-02", "SP", 1)
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_chart_filtered_by_state() -> Result<()> {
        let store = seeded_store().await?;

        let filters = ChartFilters {
            state: Some("RJ".to_string()),
            ..ChartFilters::default()
        };
        let points = get_cases_chart_data(&store, &filters).await?;

        assert_eq!(points.len(), 1);
        assert_eq!(points[0].region, "RJ");
        Ok(())
    }

    #[tokio::test]
    async fn test_chart_grouped_by_municipality_with_unknown() -> Result<()> {
        let store = seeded_store().await?;

        let filters = ChartFilters {
            group_by: GroupBy::Municipality,
            period: Period::Yearly,
            ..ChartFilters::default()
        };
        let points = get_cases_chart_data(&store, &filters).await?;

        let regions: Vec<&str> = points.iter().map(|p| p.region.as_str()).collect();
        assert_eq!(regions, vec!["RIO DE JANEIRO", "SAO PAULO", "Unknown"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_state_filter_is_rejected() -> Result<()> {
        let store = DuckDbStore::open(":memory:")?;

        let filters = ChartFilters {
            state: Some("S".to_string()),
            ..ChartFilters::default()
        };
        let result = get_cases_chart_data(&store, &filters).await;

        assert!(matches!(result, Err(VigiaError::Domain(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_store_yields_empty_chart() -> Result<()> {
        let store = DuckDbStore::open(":memory:")?;
        let points = get_cases_chart_data(&store, &ChartFilters::default()).await?;
        assert!(points.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_available_states_and_municipalities() -> Result<()> {
        let store = seeded_store().await?;

        let states = get_available_states(&store).await?;
        assert_eq!(states, vec!["RJ", "SP"]);

        let municipalities = get_available_municipalities(&store).await?;
        assert_eq!(municipalities.len(), 2);
        assert_eq!(municipalities[0].name, "RIO DE JANEIRO");
        Ok(())
    }
}
