// vigia-core/src/application/mod.rs

pub mod charts;
pub mod metrics;
pub mod seed;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Cela permet au CLI de faire :
// `use vigia_core::application::{seed_all, get_dashboard_metrics, ...};`
// sans avoir à connaître la structure interne des fichiers.

pub use charts::{ChartFilters, get_available_municipalities, get_available_states, get_cases_chart_data};
pub use metrics::{DashboardMetrics, get_dashboard_metrics};
pub use seed::{SeedReport, seed_all, seed_from_csv, seed_from_url};
