pub mod case;
pub mod chart;
pub mod error;
pub mod metrics;
pub mod normalize;
pub mod transform;

// Re-exports pratiques pour simplifier les imports ailleurs
pub use error::DomainError;
