// vigia/src/commands/regions.rs
//
// USE CASE: List distinct states / municipalities (frontend filter dropdowns).

use anyhow::Context;
use comfy_table::Table;
use vigia_core::application::{get_available_municipalities, get_available_states};
use vigia_core::infrastructure::adapters::duckdb::DuckDbStore;

pub async fn execute_states(db_path: String) -> anyhow::Result<()> {
    let store = DuckDbStore::open(&db_path)
        .with_context(|| format!("Failed to open DuckDB at {}", db_path))?;

    let states = get_available_states(&store)
        .await
        .context("Failed to fetch states")?;

    println!("🗺️  {} states", states.len());
    for state in states {
        println!("{state}");
    }

    Ok(())
}

pub async fn execute_municipalities(db_path: String) -> anyhow::Result<()> {
    let store = DuckDbStore::open(&db_path)
        .with_context(|| format!("Failed to open DuckDB at {}", db_path))?;

    let municipalities = get_available_municipalities(&store)
        .await
        .context("Failed to fetch municipalities")?;

    let mut table = Table::new();
    table.set_header(vec!["Code", "Name"]);
    for municipality in &municipalities {
        table.add_row(vec![municipality.code.clone(), municipality.name.clone()]);
    }

    println!("🏙️  {} municipalities", municipalities.len());
    println!("{table}");

    Ok(())
}
