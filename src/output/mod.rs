//! Report rendering for the CLI

pub mod formatter;
pub mod report;

pub use formatter::{save_report_to_file, ReportFormatter, ReportGenerator};
pub use report::Report;
