// vigia-core/src/infrastructure/mod.rs

pub mod adapters;
pub mod config;
pub mod error;
pub mod report;
pub mod source;

// Optional: Re-export specific adapters if you want cleaner imports elsewhere
