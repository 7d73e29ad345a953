// vigia/src/commands/chart.rs
//
// USE CASE: Aggregate cases into chart series.

use anyhow::Context;
use comfy_table::Table;
use vigia_core::application::{ChartFilters, get_cases_chart_data};
use vigia_core::infrastructure::adapters::duckdb::DuckDbStore;

pub async fn execute(
    db_path: String,
    period: String,
    group_by: String,
    state: Option<String>,
    municipality: Option<String>,
) -> anyhow::Result<()> {
    let filters = ChartFilters {
        period: period.parse()?,
        group_by: group_by.parse()?,
        state,
        municipality,
    };

    let store = DuckDbStore::open(&db_path)
        .with_context(|| format!("Failed to open DuckDB at {}", db_path))?;

    let points = get_cases_chart_data(&store, &filters)
        .await
        .context("Failed to aggregate chart data")?;

    if points.is_empty() {
        println!("📈 No cases match the given filters.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Date", "Region", "Cases"]);
    for point in &points {
        table.add_row(vec![
            point.date.clone(),
            point.region.clone(),
            point.cases.to_string(),
        ]);
    }

    println!("📈 {} chart points", points.len());
    println!("{table}");

    Ok(())
}
