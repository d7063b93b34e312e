//! Job catalog: industry → job titles → required core skills

use crate::data::records::JobSkillProfile;
use crate::error::{Result, WorkforceError};
use log::warn;
use std::collections::BTreeMap;
use std::path::PathBuf;

pub type JobsByIndustry = BTreeMap<String, Vec<JobSkillProfile>>;

pub trait JobCatalog: Send + Sync {
    fn load_jobs(&self) -> Result<JobsByIndustry>;

    /// Jobs listed for one industry; an unknown industry has none.
    fn jobs_for(&self, industry: &str) -> Result<Vec<JobSkillProfile>> {
        Ok(self.load_jobs()?.remove(industry).unwrap_or_default())
    }

    fn find_job(&self, industry: &str, title: &str) -> Result<JobSkillProfile> {
        self.jobs_for(industry)?
            .into_iter()
            .find(|job| job.title == title)
            .ok_or_else(|| WorkforceError::JobNotFound {
                industry: industry.to_string(),
                title: title.to_string(),
            })
    }
}

impl JobCatalog for JobsByIndustry {
    fn load_jobs(&self) -> Result<JobsByIndustry> {
        Ok(self.clone())
    }
}

/// `jobs.json` on disk. Re-read on every call so edits show up without a restart.
#[derive(Debug, Clone)]
pub struct JsonJobCatalog {
    path: PathBuf,
}

impl JsonJobCatalog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl JobCatalog for JsonJobCatalog {
    fn load_jobs(&self) -> Result<JobsByIndustry> {
        if !self.path.exists() {
            warn!("Job catalog not found at {}", self.path.display());
            return Ok(JobsByIndustry::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        let jobs = serde_json::from_str(&content)?;
        Ok(jobs)
    }
}
