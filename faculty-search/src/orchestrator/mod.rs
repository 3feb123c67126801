//! Crawl orchestration: directory discovery, card ingestion, profile extraction.
//!
//! [`crawl::crawl_directory`] populates the store from the department
//! directory; [`profiles::extract_profiles`] then fills in research text.
//! Both fetch with bounded concurrency and treat per-page failures as
//! skippable.

pub mod crawl;
pub mod dedup;
pub mod profiles;
pub mod url_normalize;

pub use crawl::{crawl_directory, CrawlReport};
pub use profiles::{extract_profiles, ExtractReport};
