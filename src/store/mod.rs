//! Persistent faculty record storage.

mod schema;
mod sqlite;

pub use schema::CURRENT_SCHEMA_VERSION;
pub use sqlite::{SqliteRecordStore, StoreStats};
