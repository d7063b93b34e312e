//! Scoring engine: forecasting, normalization, risk, surge, companies and
//! the student-facing views built on top of them

pub mod company;
pub mod forecast;
pub mod industry;
pub mod normalizer;
pub mod pipeline;
pub mod risk;
pub mod rng;
pub mod simulation;
pub mod skills;
pub mod student;
pub mod surge;

pub use company::{CompanyComparison, CompanyEngine, CompanyMetrics, CompanySummary};
pub use industry::{industry_report, IndustryReport};
pub use pipeline::ScoredDataset;
pub use risk::RiskLevel;
pub use surge::SurgeWindow;

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
