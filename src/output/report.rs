//! Report payloads handed to the formatters

use crate::analysis::company::{CompanyComparison, CompanyMetrics};
use crate::analysis::industry::IndustryReport;
use crate::analysis::simulation::SimulationResult;
use crate::data::records::JobSkillProfile;
use crate::processing::resume_matcher::ResumeMatchResult;
use crate::service::Response;

/// Anything the CLI can print.
#[derive(Debug, Clone)]
pub enum Report {
    Industry(Box<IndustryReport>),
    Companies {
        industry: String,
        year: i32,
        comparisons: Vec<CompanyComparison>,
    },
    CompanyMetrics(CompanyMetrics),
    Resume(ResumeMatchResult),
    Simulation(SimulationResult),
    Listing {
        title: String,
        items: Vec<String>,
    },
    Jobs {
        industry: String,
        jobs: Vec<JobSkillProfile>,
    },
    Error(String),
}

impl Report {
    /// Wrap a service response, mapping the in-band error case to `Report::Error`.
    pub fn from_response<T>(response: Response<T>, wrap: impl FnOnce(T) -> Report) -> Self {
        match response {
            Response::Ok(value) => wrap(value),
            Response::Error { error } => Report::Error(error),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Report::Error(_))
    }
}

impl From<IndustryReport> for Report {
    fn from(report: IndustryReport) -> Self {
        Report::Industry(Box::new(report))
    }
}

impl From<CompanyMetrics> for Report {
    fn from(metrics: CompanyMetrics) -> Self {
        Report::CompanyMetrics(metrics)
    }
}

impl From<ResumeMatchResult> for Report {
    fn from(result: ResumeMatchResult) -> Self {
        Report::Resume(result)
    }
}

impl From<SimulationResult> for Report {
    fn from(result: SimulationResult) -> Self {
        Report::Simulation(result)
    }
}
