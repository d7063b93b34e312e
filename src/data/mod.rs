//! Source data: merged industry records, the job catalog and the
//! process-wide analysis cache

pub mod cache;
pub mod catalog;
pub mod loader;
pub mod records;

pub use cache::AnalysisCache;
pub use catalog::{JobCatalog, JobsByIndustry, JsonJobCatalog};
pub use loader::{CsvRecordSource, RecordSource};
pub use records::{IndustryYearRecord, JobSkillProfile, ScoredRecord};
