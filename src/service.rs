//! Workforce analytics facade
//!
//! Every operation rebuilds the scored dataset from the cached historical rows
//! and trend models, so results are a pure function of the source data and the
//! request parameters.

use crate::analysis::company::{CompanyComparison, CompanyEngine, CompanyMetrics, CompanySummary};
use crate::analysis::industry::{industry_report, IndustryReport, DATA_NOT_AVAILABLE};
use crate::analysis::pipeline::ScoredDataset;
use crate::analysis::simulation::{simulate, Scenario, SimulationResult};
use crate::analysis::student::student_insights;
use crate::config::Config;
use crate::data::cache::AnalysisCache;
use crate::data::catalog::{JobCatalog, JsonJobCatalog};
use crate::data::loader::{CsvRecordSource, RecordSource};
use crate::data::records::JobSkillProfile;
use crate::error::{Result, WorkforceError};
use crate::input::InputManager;
use crate::processing::resume_matcher::{ResumeMatchResult, ResumeMatcher, SkillTargets};
use crate::processing::text_processor::TextProcessor;
use log::{debug, info, warn};
use serde::Serialize;
use std::path::Path;

/// Operation outcome as seen by a caller at the boundary.
///
/// Recoverable lookups that come up empty are reported in-band as
/// `{"error": "..."}` rather than as an `Err`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response<T> {
    Ok(T),
    Error { error: String },
}

impl<T> Response<T> {
    /// Turn recoverable errors into `Response::Error`; everything else stays `Err`.
    pub fn from_result(result: Result<T>) -> Result<Self> {
        match result {
            Ok(value) => Ok(Response::Ok(value)),
            Err(e) if e.is_recoverable() => {
                warn!("{}", e);
                Ok(Response::Error {
                    error: e.to_string(),
                })
            }
            Err(e) => Err(e),
        }
    }

    pub fn ok(&self) -> Option<&T> {
        match self {
            Response::Ok(value) => Some(value),
            Response::Error { .. } => None,
        }
    }

    pub fn into_ok(self) -> Option<T> {
        match self {
            Response::Ok(value) => Some(value),
            Response::Error { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Response::Ok(_) => None,
            Response::Error { error } => Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Response::Ok(_))
    }
}

pub struct WorkforceService {
    config: Config,
    source: Box<dyn RecordSource>,
    catalog: Box<dyn JobCatalog>,
    cache: AnalysisCache,
    companies: CompanyEngine,
    matcher: ResumeMatcher,
    input: InputManager,
}

impl WorkforceService {
    /// Service over the CSV files and job catalog named in `config`.
    pub fn new(config: Config) -> Self {
        let source = CsvRecordSource::from_config(&config);
        let catalog = JsonJobCatalog::new(config.jobs_path());
        Self::with_sources(config, source, catalog)
    }

    pub fn with_sources(
        config: Config,
        source: impl RecordSource + 'static,
        catalog: impl JobCatalog + 'static,
    ) -> Self {
        let planning_year = config.horizon.planning_year;
        Self {
            source: Box::new(source),
            catalog: Box::new(catalog),
            cache: AnalysisCache::new(),
            companies: CompanyEngine::new(planning_year),
            matcher: ResumeMatcher::new(planning_year),
            input: InputManager::new(),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn planning_year(&self) -> i32 {
        self.config.horizon.planning_year
    }

    fn scored_dataset(&self) -> Result<ScoredDataset> {
        let historical = self.cache.dataset(self.source.as_ref())?;
        let models = self.cache.models(&historical)?;
        Ok(ScoredDataset::build(
            historical,
            &models,
            &self.config.horizon.future_years,
        ))
    }

    fn roster(&self, industry: &str) -> Result<&[String]> {
        self.config
            .companies_for(industry)
            .filter(|roster| !roster.is_empty())
            .ok_or_else(|| WorkforceError::IndustryNotFound(industry.to_string()))
    }

    fn build_report(
        &self,
        dataset: &ScoredDataset,
        industry: &str,
        year: i32,
        include_companies: bool,
    ) -> Result<IndustryReport> {
        let mut report = industry_report(dataset, industry, year, self.planning_year())?;

        if include_companies {
            if let Some(roster) = self.config.companies_for(industry) {
                let summaries = self
                    .companies
                    .compare(&report.metrics, industry, roster, roster, year)
                    .iter()
                    .map(CompanySummary::from)
                    .collect();
                report.company_metrics = Some(summaries);
            }
        }

        Ok(report)
    }

    fn student_report(&self, industry: &str, year: i32, include_companies: bool) -> Result<IndustryReport> {
        info!("Running student analysis for {} {}", industry, year);
        let dataset = self.scored_dataset()?;

        let row = dataset
            .find(industry, year)
            .ok_or_else(|| WorkforceError::DataUnavailable(DATA_NOT_AVAILABLE.to_string()))?;
        let insights = student_insights(row, &dataset, self.planning_year());

        let mut report = self.build_report(&dataset, industry, year, include_companies)?;
        report.student_insights = Some(insights);
        Ok(report)
    }

    /// Industry dashboard for `(industry, year)`.
    pub fn run_analysis(&self, industry: &str, year: i32, include_companies: bool) -> Result<Response<IndustryReport>> {
        let result = self
            .scored_dataset()
            .and_then(|dataset| self.build_report(&dataset, industry, year, include_companies));
        Response::from_result(result)
    }

    /// Industry dashboard plus the student-facing insights.
    pub fn run_student_analysis(
        &self,
        industry: &str,
        year: i32,
        include_companies: bool,
    ) -> Result<Response<IndustryReport>> {
        Response::from_result(self.student_report(industry, year, include_companies))
    }

    fn baseline_report(&self, industry: &str, year: i32) -> Result<IndustryReport> {
        let dataset = self.scored_dataset()?;
        industry_report(&dataset, industry, year, self.planning_year())
    }

    pub fn get_company_metrics(&self, industry: &str, year: i32, company: &str) -> Result<Response<CompanyMetrics>> {
        let result = self
            .baseline_report(industry, year)
            .map(|report| self.companies.derive(&report.metrics, industry, year, company));
        Response::from_result(result)
    }

    /// Compare `company_names` against the industry roster. Names outside
    /// the roster are left out of the result.
    pub fn compare_companies(
        &self,
        industry: &str,
        company_names: &[String],
        year: i32,
    ) -> Result<Response<Vec<CompanyComparison>>> {
        info!("Comparing {} companies in {} {}", company_names.len(), industry, year);

        let result = self.roster(industry).and_then(|roster| {
            let report = self.baseline_report(industry, year)?;
            Ok(self
                .companies
                .compare(&report.metrics, industry, roster, company_names, year))
        });
        Response::from_result(result)
    }

    /// Score a resume file against a job in the catalog.
    ///
    /// Extraction failures propagate as `Err`; a missing job is reported
    /// in-band.
    pub async fn analyze_resume(
        &self,
        file_path: &Path,
        industry: &str,
        company: &str,
        job_title: &str,
        year: i32,
    ) -> Result<Response<ResumeMatchResult>> {
        info!(
            "Analyzing resume {} for {} at {} ({} {})",
            file_path.display(),
            job_title,
            company,
            industry,
            year
        );

        let raw = self.input.extract_text(file_path).await?;
        let text = TextProcessor::normalize(&raw)?;
        debug!("Resume text: {} words", text.word_count());

        let job = match self.catalog.find_job(industry, job_title) {
            Ok(job) => job,
            Err(e) => return Response::from_result(Err(e)),
        };

        let skills = match self.student_report(industry, year, false) {
            Ok(report) => report.student_insights.map(|s| s.skills).unwrap_or_default(),
            Err(e) if e.is_recoverable() => {
                warn!("No industry skill summary for {} {}: {}", industry, year, e);
                Default::default()
            }
            Err(e) => return Err(e),
        };

        let targets = SkillTargets {
            core: job.core_skills,
            industry: skills.in_demand_names(),
            future: skills.future_names(),
        };

        self.matcher.match_resume(&text, &targets).map(Response::Ok)
    }

    /// Industries present in the source data, sorted.
    pub fn list_industries(&self) -> Result<Vec<String>> {
        let dataset = self.cache.dataset(self.source.as_ref())?;
        let mut industries: Vec<String> = dataset.iter().map(|r| r.industry.clone()).collect();
        industries.sort();
        industries.dedup();
        Ok(industries)
    }

    pub fn list_companies(&self, industry: &str) -> Result<Response<Vec<String>>> {
        Response::from_result(self.roster(industry).map(<[String]>::to_vec))
    }

    /// Catalog jobs for an industry; empty when the industry has none.
    pub fn list_jobs(&self, industry: &str) -> Result<Vec<JobSkillProfile>> {
        self.catalog.jobs_for(industry)
    }

    /// What-if re-scoring of `(industry, year)` under `scenario`.
    pub fn simulate(&self, industry: &str, year: i32, scenario: &Scenario) -> Result<Response<SimulationResult>> {
        info!("Simulating {} {} with {:?}", industry, year, scenario);

        let result = self.baseline_report(industry, year).map(|report| {
            simulate(
                industry,
                year,
                &report.simulation_context,
                scenario,
                self.planning_year(),
            )
        });
        Response::from_result(result)
    }
}
