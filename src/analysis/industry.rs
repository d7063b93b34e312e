//! Industry dashboard report for one (industry, year)

use crate::analysis::company::CompanySummary;
use crate::analysis::pipeline::ScoredDataset;
use crate::analysis::risk::{explain, RiskLevel};
use crate::analysis::round_to;
use crate::analysis::student::StudentInsights;
use crate::analysis::surge::{hiring_surge, SurgeWindow};
use crate::error::{Result, WorkforceError};
use log::info;
use serde::Serialize;

pub const DATA_NOT_AVAILABLE: &str = "Data not available for this year/industry";

#[derive(Debug, Clone, Serialize)]
pub struct IndustryReport {
    #[serde(rename = "Industry")]
    pub industry: String,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Metrics")]
    pub metrics: IndustryMetrics,
    #[serde(rename = "Hiring_Surge_Timeline")]
    pub hiring_surge: Option<SurgeWindow>,
    #[serde(rename = "AI_Explanation")]
    pub explanation: String,
    #[serde(rename = "Supply_Demand_Trend")]
    pub trend: Vec<TrendPoint>,
    #[serde(rename = "Simulation_Context")]
    pub simulation_context: SimulationContext,
    #[serde(rename = "Company_Metrics", skip_serializing_if = "Option::is_none")]
    pub company_metrics: Option<Vec<CompanySummary>>,
    #[serde(rename = "Student_Insights", skip_serializing_if = "Option::is_none")]
    pub student_insights: Option<StudentInsights>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndustryMetrics {
    #[serde(rename = "Talent_Supply_Score")]
    pub supply_score: f64,
    #[serde(rename = "Talent_Demand_Score")]
    pub demand_score: f64,
    #[serde(rename = "Workforce_Risk_Score")]
    pub risk_score: f64,
    #[serde(rename = "Risk_Level")]
    pub risk_level: RiskLevel,
    #[serde(rename = "Internship_Intake")]
    pub internship_intake: i64,
    #[serde(rename = "Conversion_Rate")]
    pub conversion_rate: f64,
    #[serde(rename = "Attrition_Rate")]
    pub attrition_rate: f64,
    #[serde(rename = "Growth_Rate")]
    pub growth_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Talent_Supply")]
    pub supply: f64,
    #[serde(rename = "Talent_Demand")]
    pub demand: f64,
}

/// Everything a what-if simulation needs to re-score the row locally.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationContext {
    #[serde(rename = "Supply_P5")]
    pub supply_p5: f64,
    #[serde(rename = "Supply_P95")]
    pub supply_p95: f64,
    #[serde(rename = "Demand_P5")]
    pub demand_p5: f64,
    #[serde(rename = "Demand_P95")]
    pub demand_p95: f64,
    #[serde(rename = "Demand_Trend")]
    pub demand_trend: f64,
    #[serde(rename = "Baseline")]
    pub baseline: BaselineMetrics,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BaselineMetrics {
    #[serde(rename = "Internship_Intake")]
    pub internship_intake: i64,
    #[serde(rename = "Conversion_Rate")]
    pub conversion_rate: f64,
    #[serde(rename = "Attrition_Rate")]
    pub attrition_rate: f64,
    #[serde(rename = "Growth_Rate")]
    pub growth_rate: f64,
}

/// Build the report for `(industry, year)` from a scored dataset.
///
/// Company summaries and student insights are attached by the caller.
pub fn industry_report(
    dataset: &ScoredDataset,
    industry: &str,
    year: i32,
    planning_year: i32,
) -> Result<IndustryReport> {
    info!("Running industry analysis for {} {}", industry, year);

    let row = dataset
        .find(industry, year)
        .ok_or_else(|| WorkforceError::DataUnavailable(DATA_NOT_AVAILABLE.to_string()))?;
    let bounds = dataset
        .bounds(industry)
        .ok_or_else(|| WorkforceError::DataUnavailable(DATA_NOT_AVAILABLE.to_string()))?;

    let series: Vec<_> = dataset.industry_rows(industry).collect();

    // Momentum over the last three points of the whole series
    let recent_trend = if series.len() >= 3 {
        series[series.len() - 1].demand_score - series[series.len() - 3].demand_score
    } else {
        0.0
    };

    let trend = series
        .iter()
        .map(|r| TrendPoint {
            year: r.year(),
            supply: round_to(r.supply_score, 2),
            demand: round_to(r.demand_score, 2),
        })
        .collect();

    let record = &row.record;
    let internship_intake = record.interns_intake.trunc() as i64;

    Ok(IndustryReport {
        industry: industry.to_string(),
        year,
        metrics: IndustryMetrics {
            supply_score: round_to(row.supply_score, 2),
            demand_score: round_to(row.demand_score, 2),
            risk_score: round_to(row.risk_score, 2),
            risk_level: RiskLevel::from_score(row.risk_score),
            internship_intake,
            conversion_rate: round_to(record.conversion_rate, 2),
            attrition_rate: round_to(record.attrition_rate, 3),
            growth_rate: round_to(record.growth_rate, 3),
        },
        hiring_surge: hiring_surge(row, planning_year),
        explanation: explain(row, planning_year),
        trend,
        simulation_context: SimulationContext {
            supply_p5: round_to(bounds.supply.p5, 2),
            supply_p95: round_to(bounds.supply.p95, 2),
            demand_p5: round_to(bounds.demand.p5, 2),
            demand_p95: round_to(bounds.demand.p95, 2),
            demand_trend: round_to(recent_trend, 2),
            baseline: BaselineMetrics {
                internship_intake,
                conversion_rate: record.conversion_rate,
                attrition_rate: record.attrition_rate,
                growth_rate: record.growth_rate,
            },
        },
        company_metrics: None,
        student_insights: None,
    })
}
