//! Faculty Finder: search a department's faculty by research interest.
//!
//! This crate wires the [`faculty_search`] pipeline to a SQLite record store
//! and a TOML configuration file:
//!
//! - **Crawl**: seed page → directory pages → faculty cards → store
//! - **Extract**: profile pages → research text and term counts → store
//! - **Search**: stored corpus → TF-IDF ranking → paginated results
//!
//! The `faculty-finder` binary exposes each stage as a subcommand.

pub mod app;
pub mod config;
pub mod error;
pub mod store;

pub use config::AppConfig;
pub use error::{FinderError, Result};
pub use store::{SqliteRecordStore, StoreStats};
