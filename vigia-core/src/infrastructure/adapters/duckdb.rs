// vigia-core/src/infrastructure/adapters/duckdb.rs

use async_trait::async_trait;
use chrono::NaiveDate;
use duckdb::{Config, Connection, params, params_from_iter};
use std::sync::{Arc, Mutex, MutexGuard};

// Imports Hexagonaux
use crate::domain::case::{CasePoint, CaseRecord, Municipality};
use crate::error::VigiaError;
use crate::infrastructure::error::{DatabaseError, InfrastructureError};
use crate::ports::store::{CaseStore, CountFilter, PointFilter};

// Dates are stored as ISO TEXT: 'YYYY-MM-DD' compares correctly both
// lexicographically and in SQL, without relying on engine date bindings.
const CREATE_TABLE_SQL: &str = "
CREATE TABLE IF NOT EXISTS srag_cases (
    notification_id   TEXT PRIMARY KEY,
    notification_date TEXT NOT NULL,
    week_number       BIGINT,
    state             TEXT NOT NULL,
    state_residence   TEXT,
    municipality      TEXT,
    municipality_name TEXT,
    municipality_res  TEXT,
    sex               TEXT,
    age_years         BIGINT,
    age_type          BIGINT,
    hospitalized      BOOLEAN NOT NULL,
    hospital_date     TEXT,
    icu               BOOLEAN NOT NULL,
    icu_entry_date    TEXT,
    vaccinated        BOOLEAN NOT NULL,
    dose1_date        TEXT,
    dose2_date        TEXT,
    evolution         TEXT,
    evolution_date    TEXT
)";

const INSERT_SQL: &str = "
INSERT OR IGNORE INTO srag_cases (
    notification_id, notification_date, week_number, state, state_residence,
    municipality, municipality_name, municipality_res, sex, age_years,
    age_type, hospitalized, hospital_date, icu, icu_entry_date,
    vaccinated, dose1_date, dose2_date, evolution, evolution_date
) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";

pub struct DuckDbStore {
    conn: Arc<Mutex<Connection>>,
}

fn db_err(err: duckdb::Error) -> VigiaError {
    VigiaError::Infrastructure(InfrastructureError::Database(DatabaseError::DuckDB(err)))
}

fn iso(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn parse_iso(raw: &str) -> Result<NaiveDate, VigiaError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| VigiaError::InternalError(format!("Corrupt date '{raw}' in store: {e}")))
}

impl DuckDbStore {
    pub fn open(db_path: &str) -> Result<Self, InfrastructureError> {
        let config = Config::default();

        let conn = if db_path == ":memory:" {
            Connection::open_in_memory_with_flags(config)?
        } else {
            Connection::open_with_flags(db_path, config)?
        };

        conn.execute_batch(CREATE_TABLE_SQL)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, VigiaError> {
        self.conn.lock().map_err(|_| {
            VigiaError::Infrastructure(InfrastructureError::Io(std::io::Error::other(
                "DuckDB Mutex Poisoned",
            )))
        })
    }
}

/// Build the WHERE clause + positional parameters for a count filter.
/// Boolean predicates are rendered as SQL text (no user input involved);
/// strings and dates are bound.
fn count_query(filter: &CountFilter) -> (String, Vec<String>) {
    let mut sql = String::from("SELECT COUNT(*) FROM srag_cases WHERE 1=1");
    let mut bindings = Vec::new();

    if let Some(date) = &filter.notified_on_or_after {
        sql.push_str(" AND notification_date >= ?");
        bindings.push(iso(date));
    }
    if let Some(date) = &filter.notified_before {
        sql.push_str(" AND notification_date < ?");
        bindings.push(iso(date));
    }
    if let Some(code) = &filter.evolution {
        sql.push_str(" AND evolution = ?");
        bindings.push(code.clone());
    }
    if let Some(flag) = filter.hospitalized {
        sql.push_str(if flag {
            " AND hospitalized"
        } else {
            " AND NOT hospitalized"
        });
    }
    if let Some(flag) = filter.icu {
        sql.push_str(if flag { " AND icu" } else { " AND NOT icu" });
    }
    if let Some(flag) = filter.vaccinated {
        sql.push_str(if flag {
            " AND vaccinated"
        } else {
            " AND NOT vaccinated"
        });
    }

    (sql, bindings)
}

#[async_trait]
impl CaseStore for DuckDbStore {
    async fn insert_batch(&self, records: &[CaseRecord]) -> Result<u64, VigiaError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction().map_err(db_err)?;

        let mut inserted = 0u64;
        {
            let mut stmt = tx.prepare(INSERT_SQL).map_err(db_err)?;
            for record in records {
                let changed = stmt
                    .execute(params![
                        record.notification_id,
                        iso(&record.notification_date),
                        record.week_number,
                        record.state,
                        record.state_residence,
                        record.municipality,
                        record.municipality_name,
                        record.municipality_res,
                        record.sex,
                        record.age_years,
                        record.age_type,
                        record.hospitalized,
                        record.hospital_date.as_ref().map(iso),
                        record.icu,
                        record.icu_entry_date.as_ref().map(iso),
                        record.vaccinated,
                        record.dose1_date.as_ref().map(iso),
                        record.dose2_date.as_ref().map(iso),
                        record.evolution,
                        record.evolution_date.as_ref().map(iso),
                    ])
                    .map_err(db_err)?;
                inserted += changed as u64;
            }
        }

        tx.commit().map_err(db_err)?;
        Ok(inserted)
    }

    async fn count_cases(&self, filter: &CountFilter) -> Result<u64, VigiaError> {
        let conn = self.lock()?;
        let (sql, bindings) = count_query(filter);

        let mut stmt = conn.prepare(&sql).map_err(db_err)?;
        let count: i64 = stmt
            .query_row(params_from_iter(bindings), |row| row.get(0))
            .map_err(db_err)?;

        Ok(count as u64)
    }

    async fn fetch_points(&self, filter: &PointFilter) -> Result<Vec<CasePoint>, VigiaError> {
        let conn = self.lock()?;

        let mut sql = String::from(
            "SELECT notification_date, state, municipality_name FROM srag_cases WHERE 1=1",
        );
        let mut bindings = Vec::new();
        if let Some(state) = &filter.state {
            sql.push_str(" AND state = ?");
            bindings.push(state.clone());
        }
        if let Some(municipality) = &filter.municipality {
            sql.push_str(" AND municipality = ?");
            bindings.push(municipality.clone());
        }
        sql.push_str(" ORDER BY notification_date ASC");

        let mut stmt = conn.prepare(&sql).map_err(db_err)?;
        let rows = stmt
            .query_map(params_from_iter(bindings), |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<String>>(2)?,
                ))
            })
            .map_err(db_err)?;

        let mut points = Vec::new();
        for row in rows {
            let (date, state, municipality_name) = row.map_err(db_err)?;
            points.push(CasePoint {
                notification_date: parse_iso(&date)?,
                state,
                municipality_name,
            });
        }

        Ok(points)
    }

    async fn distinct_states(&self) -> Result<Vec<String>, VigiaError> {
        let conn = self.lock()?;

        let mut stmt = conn
            .prepare("SELECT DISTINCT state FROM srag_cases ORDER BY state ASC")
            .map_err(db_err)?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(db_err)?;

        let mut states = Vec::new();
        for row in rows {
            states.push(row.map_err(db_err)?);
        }

        Ok(states)
    }

    async fn distinct_municipalities(&self) -> Result<Vec<Municipality>, VigiaError> {
        let conn = self.lock()?;

        let mut stmt = conn
            .prepare(
                "SELECT DISTINCT municipality, municipality_name FROM srag_cases \
                 WHERE municipality IS NOT NULL AND municipality_name IS NOT NULL \
                 ORDER BY municipality_name ASC",
            )
            .map_err(db_err)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Municipality {
                    code: row.get(0)?,
                    name: row.get(1)?,
                })
            })
            .map_err(db_err)?;

        let mut municipalities = Vec::new();
        for row in rows {
            municipalities.push(row.map_err(db_err)?);
        }

        Ok(municipalities)
    }
}
