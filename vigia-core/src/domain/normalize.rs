// vigia-core/src/domain/normalize.rs
//
// Total normalizers for the messy SRAG cell values. Each function maps a raw
// cell to Some(typed value) or None, and NEVER fails: a malformed cell is an
// absent value, not an error.

use chrono::NaiveDate;

/// Strip double quotes and surrounding whitespace.
///
/// Returns None for the empty cell, the literal `""` token, or a cell that is
/// empty once quotes and whitespace are gone.
pub fn clean_string(raw: &str) -> Option<String> {
    if raw.is_empty() || raw == "\"\"" {
        return None;
    }
    let cleaned = raw.replace('"', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// Base-10 integer parse of the cleaned cell.
pub fn parse_number(raw: &str) -> Option<i64> {
    clean_string(raw)?.parse::<i64>().ok()
}

/// Parse a source date cell.
///
/// Cells containing '/' are DD/MM/YYYY; anything else is tried as ISO
/// YYYY-MM-DD. Impossible calendar dates (31/02/…) come back as None.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let cleaned = clean_string(raw)?;

    if cleaned.contains('/') {
        let mut parts = cleaned.split('/');
        let day: u32 = parts.next()?.trim().parse().ok()?;
        let month: u32 = parts.next()?.trim().parse().ok()?;
        let year: i32 = parts.next()?.trim().parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    NaiveDate::parse_from_str(&cleaned, "%Y-%m-%d").ok()
}

/// Normalize the age cell to years using the TP_IDADE unit code.
///
/// 1 = dias, 2 = meses, 3 = anos. Any other code (or unparseable input) is None.
pub fn age_in_years(age_value: &str, age_type: &str) -> Option<i64> {
    let age = parse_number(age_value)?;
    let unit = parse_number(age_type)?;

    match unit {
        1 => Some(age / 365),
        2 => Some(age / 12),
        3 => Some(age),
        _ => None,
    }
}
