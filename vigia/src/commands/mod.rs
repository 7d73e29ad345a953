// vigia/src/commands/mod.rs

pub mod chart;
pub mod metrics;
pub mod regions;
pub mod seed;
