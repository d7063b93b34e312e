//! What-if re-scoring of one industry row
//!
//! Percentage deltas are applied to the baseline raw metrics carried in a
//! report's simulation context, and the result is scored against the bounds
//! that produced the report's scores. No data is reloaded.

use crate::analysis::industry::{BaselineMetrics, SimulationContext};
use crate::analysis::normalizer::Bounds;
use crate::analysis::risk::{risk_score, RiskLevel};
use crate::analysis::round_to;
use crate::analysis::surge::{hiring_pressure_index, SurgeWindow};
use crate::data::records::demand_index;
use serde::{Deserialize, Serialize};

/// Percentage changes, e.g. `10.0` for +10%.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(rename = "Internship_Intake_Pct")]
    pub internship_pct: f64,
    #[serde(rename = "Conversion_Rate_Pct")]
    pub conversion_pct: f64,
    #[serde(rename = "Attrition_Rate_Pct")]
    pub attrition_pct: f64,
    #[serde(rename = "Growth_Rate_Pct")]
    pub growth_pct: f64,
}

impl Scenario {
    pub fn is_baseline(&self) -> bool {
        *self == Scenario::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreSnapshot {
    #[serde(rename = "Talent_Supply_Score")]
    pub supply_score: f64,
    #[serde(rename = "Talent_Demand_Score")]
    pub demand_score: f64,
    #[serde(rename = "Workforce_Risk_Score")]
    pub risk_score: f64,
    #[serde(rename = "Risk_Level")]
    pub risk_level: RiskLevel,
    #[serde(rename = "Hiring_Surge")]
    pub hiring_surge: Option<SurgeWindow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    #[serde(rename = "Industry")]
    pub industry: String,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Scenario")]
    pub scenario: Scenario,
    #[serde(rename = "Baseline")]
    pub baseline: ScoreSnapshot,
    #[serde(rename = "Simulated")]
    pub simulated: ScoreSnapshot,
}

fn adjust(value: f64, pct: f64) -> f64 {
    value * (1.0 + pct / 100.0)
}

fn score(
    context: &SimulationContext,
    baseline: &BaselineMetrics,
    scenario: &Scenario,
    year: i32,
    planning_year: i32,
) -> ScoreSnapshot {
    let intake = adjust(baseline.internship_intake as f64, scenario.internship_pct);
    let conversion = adjust(baseline.conversion_rate, scenario.conversion_pct);
    let attrition = adjust(baseline.attrition_rate, scenario.attrition_pct);
    let growth = adjust(baseline.growth_rate, scenario.growth_pct);

    let supply_bounds = Bounds {
        p5: context.supply_p5,
        p95: context.supply_p95,
    };
    let demand_bounds = Bounds {
        p5: context.demand_p5,
        p95: context.demand_p95,
    };
    let supply_score = supply_bounds.scale(intake * conversion);
    let demand_score = demand_bounds.scale(demand_index(growth, attrition));

    let trend = context.demand_trend;
    let risk = risk_score(demand_score, supply_score, attrition, trend);
    let hiring_surge = (year == planning_year).then(|| {
        SurgeWindow::from_pressure(
            hiring_pressure_index(demand_score, supply_score, attrition, trend),
            trend,
        )
    });

    ScoreSnapshot {
        supply_score: round_to(supply_score, 2),
        demand_score: round_to(demand_score, 2),
        risk_score: round_to(risk, 2),
        risk_level: RiskLevel::from_score(risk),
        hiring_surge,
    }
}

/// Score the baseline and the adjusted scenario side by side.
pub fn simulate(
    industry: &str,
    year: i32,
    context: &SimulationContext,
    scenario: &Scenario,
    planning_year: i32,
) -> SimulationResult {
    let baseline = &context.baseline;

    SimulationResult {
        industry: industry.to_string(),
        year,
        scenario: *scenario,
        baseline: score(context, baseline, &Scenario::default(), year, planning_year),
        simulated: score(context, baseline, scenario, year, planning_year),
    }
}
