// vigia-core/src/domain/metrics.rs
//
// Pure KPI math + presentation formatting. The context strings are fixed
// locale annotations shipped as-is to the frontend, not re-derived.

use serde::{Deserialize, Serialize};

/// One dashboard KPI: a formatted value plus its static context label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub value: String,
    pub context: String,
}

impl Metric {
    pub fn new(value: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            context: context.into(),
        }
    }
}

/// Month-over-month growth in percent.
///
/// Defined as 0 (not infinity) when the previous month had no cases.
pub fn growth_rate(current: u64, previous: u64) -> f64 {
    if previous == 0 {
        return 0.0;
    }
    (current as f64 - previous as f64) / previous as f64 * 100.0
}

/// Simple numerator/denominator percentage, 0 when the denominator is 0.
pub fn ratio_rate(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    numerator as f64 / denominator as f64 * 100.0
}

/// One decimal place, explicit '+' sign for non-negative rates ("+25.0%").
pub fn format_signed_rate(rate: f64) -> String {
    let sign = if rate >= 0.0 { "+" } else { "" };
    format!("{sign}{rate:.1}%")
}

/// One decimal place, no sign ("10.0%").
pub fn format_rate(rate: f64) -> String {
    format!("{rate:.1}%")
}
