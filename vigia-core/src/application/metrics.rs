// vigia-core/src/application/metrics.rs
//
// Dashboard KPIs: four independent read-only computations, fanned out
// concurrently (no shared mutable state, each issues its own counts).

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::case::EVOLUTION_DEATH;
use crate::domain::metrics::{Metric, format_rate, format_signed_rate, growth_rate, ratio_rate};
use crate::error::VigiaError;
use crate::ports::store::{CaseStore, CountFilter};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub case_growth_rate: Metric,
    pub mortality_rate: Metric,
    pub icu_occupancy_rate: Metric,
    pub vaccination_rate: Metric,
}

pub async fn get_dashboard_metrics(
    store: &dyn CaseStore,
) -> Result<DashboardMetrics, VigiaError> {
    info!("Calculating dashboard metrics...");

    let (case_growth_rate, mortality_rate, icu_occupancy_rate, vaccination_rate) = tokio::try_join!(
        calculate_case_growth_rate(store),
        calculate_mortality_rate(store),
        calculate_icu_occupancy_rate(store),
        calculate_vaccination_rate(store),
    )?;

    Ok(DashboardMetrics {
        case_growth_rate,
        mortality_rate,
        icu_occupancy_rate,
        vaccination_rate,
    })
}

/// First day of the month containing `today` and first day of the month
/// before it (the implicit "current vs previous calendar month" window).
fn month_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let current_start = NaiveDate::from_ymd_opt(today.year(), today.month(), 1)
        .unwrap_or(today);
    let previous_start = if today.month() == 1 {
        NaiveDate::from_ymd_opt(today.year() - 1, 12, 1)
    } else {
        NaiveDate::from_ymd_opt(today.year(), today.month() - 1, 1)
    }
    .unwrap_or(current_start);
    (previous_start, current_start)
}

async fn calculate_case_growth_rate(store: &dyn CaseStore) -> Result<Metric, VigiaError> {
    let (previous_start, current_start) = month_window(Local::now().date_naive());

    // Les filtres doivent survivre aux futures qui les empruntent
    let current_filter = CountFilter {
        notified_on_or_after: Some(current_start),
        ..CountFilter::default()
    };
    let previous_filter = CountFilter {
        notified_on_or_after: Some(previous_start),
        notified_before: Some(current_start),
        ..CountFilter::default()
    };

    let (current, previous) = tokio::try_join!(
        store.count_cases(&current_filter),
        store.count_cases(&previous_filter),
    )?;

    Ok(Metric::new(
        format_signed_rate(growth_rate(current, previous)),
        "vs mês anterior",
    ))
}

async fn calculate_mortality_rate(store: &dyn CaseStore) -> Result<Metric, VigiaError> {
    let total_filter = CountFilter::default();
    let deaths_filter = CountFilter {
        evolution: Some(EVOLUTION_DEATH.to_string()),
        ..CountFilter::default()
    };

    let (total, deaths) = tokio::try_join!(
        store.count_cases(&total_filter),
        store.count_cases(&deaths_filter),
    )?;

    Ok(Metric::new(
        format_rate(ratio_rate(deaths, total)),
        "casos com óbito",
    ))
}

async fn calculate_icu_occupancy_rate(store: &dyn CaseStore) -> Result<Metric, VigiaError> {
    // Dénominateur : hospitalisés, pas le total. UTI n'étant pas contraint
    // d'être un sous-ensemble, le taux peut dépasser 100%.
    let hospitalized_filter = CountFilter {
        hospitalized: Some(true),
        ..CountFilter::default()
    };
    let icu_filter = CountFilter {
        icu: Some(true),
        ..CountFilter::default()
    };

    let (hospitalized, icu) = tokio::try_join!(
        store.count_cases(&hospitalized_filter),
        store.count_cases(&icu_filter),
    )?;

    Ok(Metric::new(
        format_rate(ratio_rate(icu, hospitalized)),
        "pacientes hospitalizados em UTI",
    ))
}

async fn calculate_vaccination_rate(store: &dyn CaseStore) -> Result<Metric, VigiaError> {
    let total_filter = CountFilter::default();
    let vaccinated_filter = CountFilter {
        vaccinated: Some(true),
        ..CountFilter::default()
    };

    let (total, vaccinated) = tokio::try_join!(
        store.count_cases(&total_filter),
        store.count_cases(&vaccinated_filter),
    )?;

    Ok(Metric::new(
        format_rate(ratio_rate(vaccinated, total)),
        "dos casos com ao menos 1 dose",
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::case::CaseRecord;
    use crate::infrastructure::adapters::duckdb::DuckDbStore;
    use anyhow::Result;

    fn record(id: &str, date: NaiveDate) -> CaseRecord {
        CaseRecord {
            notification_id: id.to_string(),
            notification_date: date,
            week_number: None,
            state: "SP".to_string(),
            state_residence: None,
            municipality: None,
            municipality_name: None,
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

    #[test]
    fn test_month_window_mid_year() {
        let (previous, current) = month_window(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(previous, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(current, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn test_month_window_january_rollover() {
        let (previous, current) = month_window(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(previous, NaiveDate::from_ymd_opt(2023, 12, 1).unwrap());
        assert_eq!(current, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[tokio::test]
    async fn test_empty_store_renders_zero_rates() -> Result<()> {
        let store = DuckDbStore::open(":memory:")?;

        let metrics = get_dashboard_metrics(&store).await?;

        assert_eq!(metrics.case_growth_rate.value, "+0.0%");
        assert_eq!(metrics.mortality_rate.value, "0.0%");
        assert_eq!(metrics.icu_occupancy_rate.value, "0.0%");
        assert_eq!(metrics.vaccination_rate.value, "0.0%");
        assert_eq!(metrics.case_growth_rate.context, "vs mês anterior");
        Ok(())
    }

    #[tokio::test]
    async fn test_mortality_and_vaccination_rates() -> Result<()> {
        let store = DuckDbStore::open(":memory:")?;
        let date = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();

        let mut records = Vec::new();
        for i in 0..10 {
            let mut r = record(&format!("{i}"), date);
            if i == 0 {
                r.evolution = Some("2".to_string());
            }
            if i < 4 {
                r.vaccinated = true;
            }
            records.push(r);
        }
        store.insert_batch(&records).await?;

        let metrics = get_dashboard_metrics(&store).await?;
        assert_eq!(metrics.mortality_rate.value, "10.0%");
        assert_eq!(metrics.vaccination_rate.value, "40.0%");
        Ok(())
    }

    #[tokio::test]
    async fn test_icu_rate_can_exceed_hundred_percent() -> Result<()> {
        let store = DuckDbStore::open(":memory:")?;
        let date = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();

        // 2 hospitalisés, 3 en UTI (UTI sans hospitalisation existe en source)
        let mut records = Vec::new();
        for i in 0..3 {
            let mut r = record(&format!("{i}"), date);
            r.icu = true;
            r.hospitalized = i < 2;
            records.push(r);
        }
        store.insert_batch(&records).await?;

        let metrics = get_dashboard_metrics(&store).await?;
        assert_eq!(metrics.icu_occupancy_rate.value, "150.0%");
        Ok(())
    }

    #[tokio::test]
    async fn test_growth_rate_counts_current_month() -> Result<()> {
        let store = DuckDbStore::open(":memory:")?;
        let today = Local::now().date_naive();

        // Un cas ce mois-ci, aucun le mois précédent : précédent = 0 → +0.0%
        store.insert_batch(&[record("1", today)]).await?;

        let metrics = get_dashboard_metrics(&store).await?;
        assert_eq!(metrics.case_growth_rate.value, "+0.0%");
        Ok(())
    }
}
