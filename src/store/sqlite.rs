//! SQLite-backed [`RecordStore`].
//!
//! Thread-safe via an internal `Mutex<Connection>`. URL uniqueness is a
//! `UNIQUE` constraint on `faculty.profile_url`, and `insert_if_absent` is a
//! single `INSERT OR IGNORE`, so concurrent crawlers cannot create twins.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use faculty_search::{FacultyEntry, FacultyRecord, RecordId, RecordStore};
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;

use super::schema::{apply_schema, read_schema_version};
use crate::error::{FinderError, Result};

const RECORD_COLUMNS: &str = "id, name, title, profile_url, research_text";

/// Record counts reported by the `stats` command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// All stored records.
    pub records: usize,
    /// Records with non-blank research text (the ranking corpus).
    pub with_research: usize,
    /// Records whose profile page published nothing.
    pub empty_research: usize,
    /// Records not yet processed by the extract pass.
    pub pending: usize,
    /// Distinct normalised terms across all records.
    pub distinct_terms: usize,
}

/// SQLite-backed faculty record store.
pub struct SqliteRecordStore {
    path: Option<PathBuf>,
    conn: Mutex<Connection>,
}

impl SqliteRecordStore {
    /// Open (or create) the database at `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or database cannot be created or
    /// the schema cannot be applied.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        apply_schema(&conn)?;
        tracing::debug!(path = %path.display(), "opened record store");
        Ok(Self {
            path: Some(path.to_path_buf()),
            conn: Mutex::new(conn),
        })
    }

    /// Open a private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be applied.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        apply_schema(&conn)?;
        Ok(Self {
            path: None,
            conn: Mutex::new(conn),
        })
    }

    /// Database file, or `None` for an in-memory store.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Read the schema version from the database.
    pub fn schema_version(&self) -> Result<Option<u32>> {
        let conn = self.lock()?;
        Ok(read_schema_version(&conn)?)
    }

    /// Stored term counts for a record, most frequent first.
    pub fn terms_for(&self, id: RecordId) -> Result<Vec<(String, u32)>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT term, count FROM faculty_terms WHERE faculty_id = ?1 \
             ORDER BY count DESC, term ASC",
        )?;
        let rows = stmt.query_map(params![id.0], |row| Ok((row.get(0)?, row.get(1)?)))?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Summary counts over the stored records.
    pub fn stats(&self) -> Result<StoreStats> {
        let records = self.query_records("")?;
        let mut stats = StoreStats {
            records: records.len(),
            ..StoreStats::default()
        };
        for record in &records {
            match (&record.research_text, record.research()) {
                (None, _) => stats.pending += 1,
                (Some(_), Some(_)) => stats.with_research += 1,
                (Some(_), None) => stats.empty_research += 1,
            }
        }

        let conn = self.lock()?;
        let terms: i64 =
            conn.query_row("SELECT COUNT(DISTINCT term) FROM faculty_terms", [], |row| {
                row.get(0)
            })?;
        stats.distinct_terms = usize::try_from(terms).unwrap_or(0);
        Ok(stats)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| FinderError::Lock(e.to_string()))
    }

    fn query_records(&self, filter: &str) -> Result<Vec<FacultyRecord>> {
        let conn = self.lock()?;
        let sql = format!("SELECT {RECORD_COLUMNS} FROM faculty {filter} ORDER BY id ASC");
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], row_to_record)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}

impl RecordStore for SqliteRecordStore {
    fn find_by_url(&self, url: &str) -> faculty_search::Result<Option<FacultyRecord>> {
        let conn = self.lock()?;
        let record = conn
            .query_row(
                &format!("SELECT {RECORD_COLUMNS} FROM faculty WHERE profile_url = ?1"),
                params![url],
                row_to_record,
            )
            .optional()
            .map_err(FinderError::from)?;
        Ok(record)
    }

    fn insert_if_absent(&self, entry: &FacultyEntry) -> faculty_search::Result<bool> {
        let conn = self.lock()?;
        let now = chrono::Utc::now().timestamp();
        let changed = conn
            .execute(
                "INSERT OR IGNORE INTO faculty (name, title, profile_url, created_at, updated_at) \
                 VALUES (?1, ?2, ?3, ?4, ?4)",
                params![entry.name, entry.title, entry.profile_url, now],
            )
            .map_err(FinderError::from)?;
        Ok(changed == 1)
    }

    fn update_research_text(&self, id: RecordId, text: &str) -> faculty_search::Result<()> {
        let conn = self.lock()?;
        let changed = conn
            .execute(
                "UPDATE faculty SET research_text = ?1, updated_at = ?2 WHERE id = ?3",
                params![text, chrono::Utc::now().timestamp(), id.0],
            )
            .map_err(FinderError::from)?;
        if changed == 0 {
            return Err(faculty_search::SearchError::Store(format!(
                "no record with id {id}"
            )));
        }
        Ok(())
    }

    fn all_records(&self) -> faculty_search::Result<Vec<FacultyRecord>> {
        Ok(self.query_records("")?)
    }

    fn all_with_non_empty_research(&self) -> faculty_search::Result<Vec<FacultyRecord>> {
        let records =
            self.query_records("WHERE research_text IS NOT NULL AND research_text <> ''")?;
        Ok(records
            .into_iter()
            .filter(|r| r.research().is_some())
            .collect())
    }

    fn store_terms(&self, id: RecordId, terms: &[(String, u32)]) -> faculty_search::Result<()> {
        let mut conn = self.lock()?;
        let write = |conn: &mut Connection| -> rusqlite::Result<()> {
            let tx = conn.transaction()?;
            tx.execute("DELETE FROM faculty_terms WHERE faculty_id = ?1", params![id.0])?;
            {
                let mut insert = tx.prepare(
                    "INSERT INTO faculty_terms (faculty_id, term, count) VALUES (?1, ?2, ?3)",
                )?;
                for (term, count) in terms {
                    insert.execute(params![id.0, term, count])?;
                }
            }
            tx.commit()
        };
        write(&mut *conn).map_err(FinderError::from)?;
        Ok(())
    }
}

fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<FacultyRecord> {
    Ok(FacultyRecord {
        id: RecordId(row.get(0)?),
        name: row.get(1)?,
        title: row.get(2)?,
        profile_url: row.get(3)?,
        research_text: row.get(4)?,
    })
}
