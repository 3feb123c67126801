//! Record store interface and an in-memory implementation.
//!
//! The pipeline never owns persistence. It receives a store handle and
//! relies on [`RecordStore::insert_if_absent`] being atomic per URL, which is
//! the only guard against duplicate records when directory pages are
//! processed concurrently.

use std::sync::{Mutex, MutexGuard};

use crate::error::{Result, SearchError};
use crate::types::{FacultyEntry, FacultyRecord, RecordId};

/// Keyed faculty record storage.
pub trait RecordStore: Send + Sync {
    /// Look up a record by canonical profile URL.
    fn find_by_url(&self, url: &str) -> Result<Option<FacultyRecord>>;

    /// Insert a record unless one with the same URL exists.
    ///
    /// Returns `true` if a record was inserted. Must be atomic per URL.
    fn insert_if_absent(&self, entry: &FacultyEntry) -> Result<bool>;

    /// Overwrite a record's research text (empty string allowed).
    fn update_research_text(&self, id: RecordId, text: &str) -> Result<()>;

    /// Every record in insertion order.
    fn all_records(&self) -> Result<Vec<FacultyRecord>>;

    /// Records with non-blank research text, in insertion order.
    fn all_with_non_empty_research(&self) -> Result<Vec<FacultyRecord>> {
        Ok(self
            .all_records()?
            .into_iter()
            .filter(|r| r.research().is_some())
            .collect())
    }

    /// Replace the stored term counts for a record.
    ///
    /// Term storage is a denormalisation; ranking never reads it. Stores that
    /// do not keep terms can rely on the default no-op.
    fn store_terms(&self, id: RecordId, terms: &[(String, u32)]) -> Result<()> {
        let _ = (id, terms);
        Ok(())
    }
}

/// [`RecordStore`] held in process memory.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: Mutex<Vec<FacultyRecord>>,
}

impl MemoryRecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.lock().map(|r| r.len()).unwrap_or(0)
    }

    /// True when no records are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<FacultyRecord>>> {
        self.records
            .lock()
            .map_err(|e| SearchError::Store(format!("record store lock poisoned: {e}")))
    }
}

impl RecordStore for MemoryRecordStore {
    fn find_by_url(&self, url: &str) -> Result<Option<FacultyRecord>> {
        Ok(self.lock()?.iter().find(|r| r.profile_url == url).cloned())
    }

    fn insert_if_absent(&self, entry: &FacultyEntry) -> Result<bool> {
        let mut records = self.lock()?;
        if records.iter().any(|r| r.profile_url == entry.profile_url) {
            return Ok(false);
        }
        let id = RecordId(records.len() as i64 + 1);
        records.push(FacultyRecord {
            id,
            name: entry.name.clone(),
            title: entry.title.clone(),
            profile_url: entry.profile_url.clone(),
            research_text: None,
        });
        Ok(true)
    }

    fn update_research_text(&self, id: RecordId, text: &str) -> Result<()> {
        let mut records = self.lock()?;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| SearchError::Store(format!("no record with id {id}")))?;
        record.research_text = Some(text.to_owned());
        Ok(())
    }

    fn all_records(&self) -> Result<Vec<FacultyRecord>> {
        Ok(self.lock()?.clone())
    }
}
