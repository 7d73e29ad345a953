// vigia-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Unknown period granularity '{0}'")]
    #[diagnostic(
        code(vigia::domain::period),
        help("Expected one of: daily, monthly, yearly.")
    )]
    UnknownPeriod(String),

    #[error("Unknown grouping dimension '{0}'")]
    #[diagnostic(
        code(vigia::domain::group_by),
        help("Expected one of: state, municipality.")
    )]
    UnknownGroupBy(String),

    #[error("Invalid chart filters: {0}")]
    #[diagnostic(code(vigia::domain::filters))]
    InvalidFilters(String),
}
