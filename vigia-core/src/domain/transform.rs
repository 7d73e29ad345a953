// vigia-core/src/domain/transform.rs
//
// Raw row -> canonical record. Returns None (rejection) instead of an error:
// a malformed row must never abort the batch.

use crate::domain::case::{CaseRecord, RawCaseRow};
use crate::domain::normalize::{age_in_years, clean_string, parse_date, parse_number};

/// Transform one raw CSV row into a canonical case record.
///
/// Rejection causes, checked in order: missing notification id, missing or
/// unparseable notification date, missing state code. Everything else is
/// optional and degrades to None via the total normalizers.
pub fn transform_row(row: &RawCaseRow) -> Option<CaseRecord> {
    if row.notification_id.is_empty() || row.notification_date.is_empty() || row.state.is_empty() {
        return None;
    }

    let notification_date = parse_date(&row.notification_date)?;
    let state = clean_string(&row.state)?;

    Some(CaseRecord {
        notification_id: row.notification_id.replace('"', ""),
        notification_date,
        week_number: parse_number(&row.week_number),
        state,
        state_residence: clean_string(&row.state_residence),
        municipality: clean_string(&row.municipality),
        municipality_name: clean_string(&row.municipality_name),
        municipality_res: clean_string(&row.municipality_res),
        sex: clean_string(&row.sex),
        age_years: age_in_years(&row.age_value, &row.age_type),
        age_type: parse_number(&row.age_type),
        hospitalized: row.hospitalized == "1",
        hospital_date: parse_date(&row.hospital_date),
        icu: row.icu == "1",
        icu_entry_date: parse_date(&row.icu_entry_date),
        // Codes 1 et 2 signalent tous deux une dose enregistrée
        vaccinated: row.vaccination_code == "1" || row.vaccination_code == "2",
        dose1_date: parse_date(&row.dose1_date),
        dose2_date: parse_date(&row.dose2_date),
        evolution: clean_string(&row.evolution),
        evolution_date: parse_date(&row.evolution_date),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn valid_row() -> RawCaseRow {
        RawCaseRow {
            notification_id: "\"316487\"".to_string(),
            notification_date: "15/03/2024".to_string(),
            week_number: "11".to_string(),
            municipality_name: "SAO PAULO".to_string(),
            state: "SP".to_string(),
            municipality: "355030".to_string(),
            state_residence: "SP".to_string(),
            municipality_res: "355030".to_string(),
            sex: "F".to_string(),
            age_value: "24".to_string(),
            age_type: "2".to_string(),
            hospitalized: "1".to_string(),
            hospital_date: "16/03/2024".to_string(),
            icu: "2".to_string(),
            icu_entry_date: String::new(),
            vaccination_code: "2".to_string(),
            dose1_date: "10/01/2021".to_string(),
            dose2_date: String::new(),
            evolution: "1".to_string(),
            evolution_date: String::new(),
        }
    }

    #[test]
    fn test_transform_valid_row() {
        let record = transform_row(&valid_row()).unwrap();

        assert_eq!(record.notification_id, "316487");
        assert_eq!(
            record.notification_date,
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
        );
        assert_eq!(record.state, "SP");
        assert_eq!(record.week_number, Some(11));
        assert_eq!(record.age_years, Some(2)); // 24 mois
        assert_eq!(record.age_type, Some(2));
        assert!(record.hospitalized);
        assert!(!record.icu); // "2" = non
        assert!(record.vaccinated);
        assert_eq!(record.evolution, Some("1".to_string()));
        assert_eq!(record.icu_entry_date, None);
    }

    #[test]
    fn test_reject_missing_notification_id() {
        let mut row = valid_row();
        row.notification_id = String::new();
        assert!(transform_row(&row).is_none());
    }

    #[test]
    fn test_reject_missing_notification_date() {
        let mut row = valid_row();
        row.notification_date = String::new();
        assert!(transform_row(&row).is_none());
    }

    #[test]
    fn test_reject_unparseable_notification_date() {
        let mut row = valid_row();
        row.notification_date = "31/02/2024".to_string();
        assert!(transform_row(&row).is_none());
    }

    #[test]
    fn test_reject_missing_state() {
        let mut row = valid_row();
        row.state = String::new();
        assert!(transform_row(&row).is_none());

        // Une chaîne qui se vide après nettoyage compte comme absente
        row.state = "\"\"".to_string();
        assert!(transform_row(&row).is_none());
    }

    #[test]
    fn test_vaccination_code_truth_table() {
        let mut row = valid_row();

        row.vaccination_code = "1".to_string();
        assert!(transform_row(&row).unwrap().vaccinated);

        row.vaccination_code = "2".to_string();
        assert!(transform_row(&row).unwrap().vaccinated);

        row.vaccination_code = "9".to_string();
        assert!(!transform_row(&row).unwrap().vaccinated);

        row.vaccination_code = String::new();
        assert!(!transform_row(&row).unwrap().vaccinated);
    }

    #[test]
    fn test_flags_default_to_false() {
        let mut row = valid_row();
        row.hospitalized = String::new();
        row.icu = String::new();

        let record = transform_row(&row).unwrap();
        assert!(!record.hospitalized);
        assert!(!record.icu);
    }
}
