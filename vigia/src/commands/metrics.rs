// vigia/src/commands/metrics.rs
//
// USE CASE: Compute the four dashboard KPIs.

use anyhow::Context;
use comfy_table::Table;
use vigia_core::application::get_dashboard_metrics;
use vigia_core::infrastructure::adapters::duckdb::DuckDbStore;

pub async fn execute(db_path: String) -> anyhow::Result<()> {
    let store = DuckDbStore::open(&db_path)
        .with_context(|| format!("Failed to open DuckDB at {}", db_path))?;

    let metrics = get_dashboard_metrics(&store)
        .await
        .context("Failed to compute dashboard metrics")?;

    let mut table = Table::new();
    table.set_header(vec!["KPI", "Value", "Context"]);
    table.add_row(vec![
        "Case growth rate",
        &metrics.case_growth_rate.value,
        &metrics.case_growth_rate.context,
    ]);
    table.add_row(vec![
        "Mortality rate",
        &metrics.mortality_rate.value,
        &metrics.mortality_rate.context,
    ]);
    table.add_row(vec![
        "ICU occupancy rate",
        &metrics.icu_occupancy_rate.value,
        &metrics.icu_occupancy_rate.context,
    ]);
    table.add_row(vec![
        "Vaccination rate",
        &metrics.vaccination_rate.value,
        &metrics.vaccination_rate.context,
    ]);

    println!("📊 Dashboard metrics");
    println!("{table}");

    Ok(())
}
