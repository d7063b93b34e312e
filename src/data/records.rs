//! Row types shared by the loader, forecaster and scoring pipeline

use serde::{Deserialize, Serialize};

/// One merged (Industry, Year) observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryYearRecord {
    pub industry: String,
    pub year: i32,
    pub interns_intake: f64,
    pub conversion_rate: f64,
    pub attrition_rate: f64,
    pub growth_rate: f64,
    /// Comma-separated skill list; forecast rows never carry one.
    pub top_skills: Option<String>,
}

impl IndustryYearRecord {
    /// Talent supply before normalization: intake × conversion.
    pub fn supply_raw(&self) -> f64 {
        self.interns_intake * self.conversion_rate
    }

    /// Talent demand index before normalization.
    pub fn demand_raw(&self) -> f64 {
        demand_index(self.growth_rate, self.attrition_rate)
    }
}

pub fn demand_index(growth_rate: f64, attrition_rate: f64) -> f64 {
    growth_rate * 1.0 + attrition_rate * 1.5
}

/// A record after normalization and risk scoring.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRecord {
    pub record: IndustryYearRecord,
    pub supply_raw: f64,
    pub demand_raw: f64,
    pub supply_score: f64,
    pub demand_score: f64,
    pub demand_trend: f64,
    pub risk_score: f64,
}

impl ScoredRecord {
    pub fn industry(&self) -> &str {
        &self.record.industry
    }

    pub fn year(&self) -> i32 {
        self.record.year
    }

    /// Demand score minus supply score.
    pub fn gap(&self) -> f64 {
        self.demand_score - self.supply_score
    }
}

/// A job title and the skills it requires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSkillProfile {
    pub title: String,
    pub core_skills: Vec<String>,
}
