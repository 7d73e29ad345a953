// vigia-core/src/domain/case.rs
//
// Canonical case schema + the raw OpenDataSUS row it is built from.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One raw row of a SRAG extract, keyed by the official column headers.
///
/// The real extracts carry 100+ columns; serde maps by header name so the
/// extra ones are ignored. Every field defaults to an empty string so a
/// truncated row deserializes instead of failing the whole file.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawCaseRow {
    #[serde(rename = "NU_NOTIFIC", default)]
    pub notification_id: String,
    #[serde(rename = "DT_NOTIFIC", default)]
    pub notification_date: String,
    #[serde(rename = "SEM_NOT", default)]
    pub week_number: String,
    #[serde(rename = "ID_MUNICIP", default)]
    pub municipality_name: String,
    #[serde(rename = "SG_UF_NOT", default)]
    pub state: String,
    #[serde(rename = "CO_MUN_NOT", default)]
    pub municipality: String,
    #[serde(rename = "SG_UF", default)]
    pub state_residence: String,
    #[serde(rename = "CO_MUN_RES", default)]
    pub municipality_res: String,
    #[serde(rename = "CS_SEXO", default)]
    pub sex: String,
    #[serde(rename = "NU_IDADE_N", default)]
    pub age_value: String,
    #[serde(rename = "TP_IDADE", default)]
    pub age_type: String,
    #[serde(rename = "HOSPITAL", default)]
    pub hospitalized: String,
    #[serde(rename = "DT_INTERNA", default)]
    pub hospital_date: String,
    #[serde(rename = "UTI", default)]
    pub icu: String,
    #[serde(rename = "DT_ENTUTI", default)]
    pub icu_entry_date: String,
    #[serde(rename = "VACINA_COV", default)]
    pub vaccination_code: String,
    #[serde(rename = "DOSE_1_COV", default)]
    pub dose1_date: String,
    #[serde(rename = "DOSE_2_COV", default)]
    pub dose2_date: String,
    #[serde(rename = "EVOLUCAO", default)]
    pub evolution: String,
    #[serde(rename = "DT_EVOLUCA", default)]
    pub evolution_date: String,
}

/// Canonical notified case, one per persisted record.
///
/// `notification_id` is the natural de-duplication key; the store must treat
/// re-inserts of the same id as silent skips, never as updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub notification_id: String,
    pub notification_date: NaiveDate,
    pub week_number: Option<i64>,
    pub state: String,
    pub state_residence: Option<String>,
    pub municipality: Option<String>,
    pub municipality_name: Option<String>,
    pub municipality_res: Option<String>,
    pub sex: Option<String>,
    /// Always expressed in years, whatever unit the source used.
    pub age_years: Option<i64>,
    /// Raw unit code preserved alongside (1=days, 2=months, 3=years).
    pub age_type: Option<i64>,
    pub hospitalized: bool,
    pub hospital_date: Option<NaiveDate>,
    pub icu: bool,
    pub icu_entry_date: Option<NaiveDate>,
    pub vaccinated: bool,
    pub dose1_date: Option<NaiveDate>,
    pub dose2_date: Option<NaiveDate>,
    pub evolution: Option<String>,
    pub evolution_date: Option<NaiveDate>,
}

/// Minimal projection used by the chart aggregation (date, state, municipality name).
#[derive(Debug, Clone, PartialEq)]
pub struct CasePoint {
    pub notification_date: NaiveDate,
    pub state: String,
    pub municipality_name: Option<String>,
}

/// Distinct municipality entry for the frontend filter dropdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Municipality {
    pub code: String,
    pub name: String,
}

/// Evolution code meaning "death" in the source nomenclature.
pub const EVOLUTION_DEATH: &str = "2";
