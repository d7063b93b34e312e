//! Company-level metrics derived from an industry baseline
//!
//! There is no company history to learn from, so each company gets stable
//! scale and variance factors drawn from a stream seeded by its name (and the
//! year). Companies are then compared against each other with the same P5–P95
//! normalization used for industries, grouped across the roster.

use crate::analysis::industry::IndustryMetrics;
use crate::analysis::normalizer::{group_normalize, NormalizedScore};
use crate::analysis::risk::{core_risk, RiskLevel};
use crate::analysis::rng::{company_year_seed, name_seed, SeededGenerator, StdGenerator, UniformStream};
use crate::analysis::round_to;
use crate::analysis::surge::{hiring_pressure_index, SurgeWindow};
use crate::data::records::demand_index;
use log::debug;
use serde::Serialize;

const MAX_INSIGHTS: usize = 2;

/// Company raw metrics before normalization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompanyRaw {
    #[serde(rename = "Supply")]
    pub supply: f64,
    #[serde(rename = "Demand")]
    pub demand: f64,
    #[serde(rename = "Internship_Intake")]
    pub internship_intake: f64,
    #[serde(rename = "Conversion_Rate")]
    pub conversion_rate: f64,
    #[serde(rename = "Attrition_Rate")]
    pub attrition_rate: f64,
    #[serde(rename = "Growth_Rate")]
    pub growth_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyMetrics {
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Industry")]
    pub industry: String,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Raw")]
    pub raw: CompanyRaw,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyScores {
    #[serde(rename = "Supply_Score")]
    pub supply_score: f64,
    #[serde(rename = "Demand_Score")]
    pub demand_score: f64,
    #[serde(rename = "Risk_Score")]
    pub risk_score: f64,
    #[serde(rename = "Risk_Level")]
    pub risk_level: RiskLevel,
    #[serde(rename = "Attrition_Rate")]
    pub attrition_rate: f64,
    #[serde(rename = "Hiring_Surge")]
    pub hiring_surge: Option<SurgeWindow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyComparison {
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Metrics")]
    pub metrics: CompanyScores,
    #[serde(rename = "Insights")]
    pub insights: Vec<String>,
}

/// Compact per-company line attached to an industry report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanySummary {
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Risk_Score")]
    pub risk_score: f64,
    #[serde(rename = "Risk_Level")]
    pub risk_level: RiskLevel,
    #[serde(rename = "Hiring_Surge")]
    pub hiring_surge: Option<SurgeWindow>,
}

impl From<&CompanyComparison> for CompanySummary {
    fn from(comparison: &CompanyComparison) -> Self {
        Self {
            company: comparison.company.clone(),
            risk_score: comparison.metrics.risk_score,
            risk_level: comparison.metrics.risk_level,
            hiring_surge: comparison.metrics.hiring_surge,
        }
    }
}

pub struct CompanyEngine<G: SeededGenerator = StdGenerator> {
    generator: G,
    planning_year: i32,
}

impl CompanyEngine<StdGenerator> {
    pub fn new(planning_year: i32) -> Self {
        Self::with_generator(StdGenerator, planning_year)
    }
}

impl<G: SeededGenerator> CompanyEngine<G> {
    pub fn with_generator(generator: G, planning_year: i32) -> Self {
        Self {
            generator,
            planning_year,
        }
    }

    /// Derive one company's raw metrics from the industry baseline.
    pub fn derive(&self, baseline: &IndustryMetrics, industry: &str, year: i32, company: &str) -> CompanyMetrics {
        let mut draws = self.generator.stream(company_year_seed(company, year));

        let scale = draws.next_in(0.8, 0.4);
        let growth_bias = draws.next_in(0.7, 0.6);
        let attrition_variance = draws.next_in(-0.5, 1.0) * 0.05;
        let conversion_variance = draws.next_in(-0.5, 1.0) * 0.04;

        let internship_intake = baseline.internship_intake as f64 * scale;
        let conversion_rate = (baseline.conversion_rate + conversion_variance).clamp(0.4, 0.95);
        let attrition_rate = (baseline.attrition_rate + attrition_variance).clamp(0.02, 0.35);
        let growth_rate = baseline.growth_rate * growth_bias;

        CompanyMetrics {
            company: company.to_string(),
            industry: industry.to_string(),
            year,
            raw: CompanyRaw {
                supply: internship_intake * conversion_rate,
                demand: demand_index(growth_rate, attrition_rate),
                internship_intake,
                conversion_rate,
                attrition_rate,
                growth_rate,
            },
        }
    }

    /// Stand-in for a multi-year company demand trend, in [-5, 5).
    pub fn trend_proxy(&self, company: &str) -> f64 {
        self.generator.stream(name_seed(company)).next_in(-0.5, 1.0) * 10.0
    }

    /// Score the selected companies against the whole roster.
    ///
    /// Output follows roster order; names outside the roster are skipped.
    pub fn compare(
        &self,
        baseline: &IndustryMetrics,
        industry: &str,
        roster: &[String],
        selected: &[String],
        year: i32,
    ) -> Vec<CompanyComparison> {
        let derived: Vec<CompanyMetrics> = roster
            .iter()
            .map(|company| self.derive(baseline, industry, year, company))
            .collect();

        let (scores, bounds) = group_normalize(
            &derived,
            |m: &CompanyMetrics| m.industry.clone(),
            |m| m.raw.supply,
            |m| m.raw.demand,
        );
        if let Some(b) = bounds.get(industry) {
            debug!(
                "Company normalization context ({} {}): supply P5 {:.2} P95 {:.2}, demand P5 {:.2} P95 {:.2}",
                industry, year, b.supply.p5, b.supply.p95, b.demand.p5, b.demand.p95
            );
        }

        derived
            .iter()
            .zip(scores)
            .filter(|(m, _)| selected.iter().any(|s| s == &m.company))
            .map(|(m, score)| self.score_company(m, score, year))
            .collect()
    }

    fn score_company(&self, metrics: &CompanyMetrics, score: NormalizedScore, year: i32) -> CompanyComparison {
        let NormalizedScore {
            supply_score,
            demand_score,
        } = score;
        let attrition = metrics.raw.attrition_rate;

        let risk = core_risk(demand_score, supply_score, attrition).clamp(0.0, 100.0);

        let trend = self.trend_proxy(&metrics.company);
        let hpi = hiring_pressure_index(demand_score, supply_score, attrition, trend);
        let hiring_surge = (year == self.planning_year).then(|| SurgeWindow::from_pressure(hpi, trend));

        let mut insights = Vec::new();
        if attrition > 0.15 {
            insights.push("High attrition is driving elevated hiring pressure.");
        }
        if supply_score > 70.0 {
            insights.push("Strong internal talent pipeline reduces supply-side risk.");
        }
        if demand_score > 75.0 {
            insights.push("Rapid growth requirements are outpacing current supply.");
        }
        if risk < 30.0 {
            insights.push("Workforce stability is exceptionally high.");
        }
        if insights.is_empty() {
            insights.push("Workforce metrics are currently in a state of equilibrium.");
        }

        CompanyComparison {
            company: metrics.company.clone(),
            metrics: CompanyScores {
                supply_score: round_to(supply_score, 2),
                demand_score: round_to(demand_score, 2),
                risk_score: round_to(risk, 2),
                risk_level: RiskLevel::from_company_score(risk),
                attrition_rate: round_to(attrition, 3),
                hiring_surge,
            },
            insights: insights
                .into_iter()
                .take(MAX_INSIGHTS)
                .map(str::to_string)
                .collect(),
        }
    }
}
