//! SQLite DDL for the faculty record database.

use rusqlite::Connection;

/// Schema version written to `schema_meta` on a fresh database.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Complete DDL. Uses `IF NOT EXISTS` throughout so `apply_schema` is idempotent.
pub(crate) const SCHEMA_SQL: &str = r#"
-- Enable WAL mode for concurrent reads during writes.
PRAGMA journal_mode = WAL;

-- Enforce foreign key constraints.
PRAGMA foreign_keys = ON;

-- Schema version tracking.
CREATE TABLE IF NOT EXISTS schema_meta (
    key   TEXT PRIMARY KEY,
    value TEXT NOT NULL
);

-- One row per faculty member, keyed by canonical profile URL.
CREATE TABLE IF NOT EXISTS faculty (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    name          TEXT NOT NULL,
    title         TEXT NOT NULL DEFAULT '',
    profile_url   TEXT NOT NULL UNIQUE,
    research_text TEXT,               -- NULL until extracted, '' when none published
    created_at    INTEGER NOT NULL DEFAULT 0,
    updated_at    INTEGER NOT NULL DEFAULT 0
);

-- Normalised term counts per record, replaced on each extraction.
CREATE TABLE IF NOT EXISTS faculty_terms (
    faculty_id INTEGER NOT NULL REFERENCES faculty(id) ON DELETE CASCADE,
    term       TEXT NOT NULL,
    count      INTEGER NOT NULL,
    PRIMARY KEY (faculty_id, term)
);

CREATE INDEX IF NOT EXISTS idx_terms_term ON faculty_terms(term);
"#;

/// Apply the full schema and seed the schema version on a fresh database.
pub(crate) fn apply_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    conn.execute(
        "INSERT OR IGNORE INTO schema_meta (key, value) VALUES ('schema_version', ?1)",
        rusqlite::params![CURRENT_SCHEMA_VERSION.to_string()],
    )?;
    Ok(())
}

/// Read the schema version, or `None` if it was never written.
pub(crate) fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<u32>> {
    let mut stmt = conn.prepare("SELECT value FROM schema_meta WHERE key = 'schema_version'")?;
    let mut rows = stmt.query([])?;
    match rows.next()? {
        Some(row) => {
            let val: String = row.get(0)?;
            Ok(val.parse::<u32>().ok())
        }
        None => Ok(None),
    }
}
