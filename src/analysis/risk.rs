//! Trend-aware workforce risk scoring and rule-based explanations

use crate::data::records::ScoredRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const BASE_RISK: f64 = 5.0;
const BASELINE_ATTRITION_FACTOR: f64 = 10.0;
const BASELINE_TREND_FACTOR: f64 = 0.5;
const CORE_ATTRITION_WEIGHT: f64 = 15.0;
const MAX_REASONS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "Low Risk")]
    Low,
    #[serde(rename = "Medium Risk")]
    Medium,
    #[serde(rename = "High Risk")]
    High,
}

impl RiskLevel {
    /// Industry bands: ≤35 low, ≤65 medium, otherwise high.
    pub fn from_score(score: f64) -> Self {
        if score <= 35.0 {
            RiskLevel::Low
        } else if score <= 65.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    /// Company bands: <30 low, <60 medium, otherwise high.
    pub fn from_company_score(score: f64) -> Self {
        if score < 30.0 {
            RiskLevel::Low
        } else if score < 60.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Medium => "Medium Risk",
            RiskLevel::High => "High Risk",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Baseline that keeps risk from collapsing to zero; never below `BASE_RISK`.
pub fn dynamic_baseline(attrition_rate: f64, demand_trend: f64) -> f64 {
    (BASE_RISK + attrition_rate * BASELINE_ATTRITION_FACTOR + demand_trend * BASELINE_TREND_FACTOR)
        .max(BASE_RISK)
}

pub fn core_risk(demand_score: f64, supply_score: f64, attrition_rate: f64) -> f64 {
    (demand_score - supply_score) + attrition_rate * CORE_ATTRITION_WEIGHT
}

/// Final risk: the larger of core risk and the dynamic baseline, in [0, 100].
pub fn risk_score(demand_score: f64, supply_score: f64, attrition_rate: f64, demand_trend: f64) -> f64 {
    let core = core_risk(demand_score, supply_score, attrition_rate);
    let baseline = dynamic_baseline(attrition_rate, demand_trend);
    core.max(baseline).clamp(0.0, 100.0)
}

/// Fill in demand trend and risk score.
///
/// `rows` must be sorted by industry, then year ascending.
pub fn apply_risk(rows: &mut [ScoredRecord]) {
    let mut previous: Option<(String, f64)> = None;

    for row in rows.iter_mut() {
        row.demand_trend = match &previous {
            Some((industry, demand)) if industry == row.industry() => row.demand_score - demand,
            _ => 0.0,
        };
        row.risk_score = risk_score(
            row.demand_score,
            row.supply_score,
            row.record.attrition_rate,
            row.demand_trend,
        );
        previous = Some((row.record.industry.clone(), row.demand_score));
    }
}

/// Plain-language account of why a row scored the way it did.
pub fn explain(row: &ScoredRecord, planning_year: i32) -> String {
    let level = RiskLevel::from_score(row.risk_score);
    let gap = row.gap();
    let trend = row.demand_trend;
    let attrition = row.record.attrition_rate;
    let mut reasons: Vec<&str> = Vec::new();

    if gap > 20.0 {
        reasons.push("demand significantly exceeds supply, creating critical shortage pressure");
    } else if gap > 0.0 {
        reasons.push("demand outpaces supply, tightening the talent pipeline");
    } else if gap < -20.0 {
        reasons.push("talent supply is robust relative to current market demand");
    } else {
        reasons.push("supply and demand are currently in a state of relative equilibrium");
    }

    if trend > 10.0 {
        reasons.push("strong demand momentum suggests accelerating hiring needs");
    } else if trend > 0.0 {
        reasons.push("positive demand momentum indicates steady market growth");
    } else if trend < -10.0 {
        reasons.push("declining demand trend is easing immediate workforce pressure");
    }

    if attrition > 0.18 {
        reasons.push("aggressive attrition rates are accelerating workforce leakage");
    } else if attrition > 0.12 {
        reasons.push("steady attrition continues to drive routine hiring requirements");
    } else if attrition < 0.05 {
        reasons.push("exceptionally stable retention rates are mitigating overall risk");
    }

    if (row.risk_score - BASE_RISK).abs() < 5.0 {
        reasons.push("workforce risk is at a historic low for this industry");
    } else if gap < 0.0 && row.risk_score > 20.0 {
        reasons.push("operational risk remains elevated due to high attrition despite healthy supply");
    }

    reasons.truncate(MAX_REASONS);
    let horizon = if row.year() == planning_year {
        " (Current Planning Horizon)"
    } else {
        ""
    };

    format!(
        "{}{} detected. {}.",
        level,
        horizon,
        sentence_case(&reasons.join("; "))
    )
}

/// Upper-case the first character, lower-case the rest.
fn sentence_case(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::records::IndustryYearRecord;

    fn scored(industry: &str, year: i32, supply: f64, demand: f64, attrition: f64) -> ScoredRecord {
        ScoredRecord {
            record: IndustryYearRecord {
                industry: industry.to_string(),
                year,
                interns_intake: 100.0,
                conversion_rate: 0.5,
                attrition_rate: attrition,
                growth_rate: 0.05,
                top_skills: None,
            },
            supply_raw: 0.0,
            demand_raw: 0.0,
            supply_score: supply,
            demand_score: demand,
            demand_trend: 0.0,
            risk_score: 0.0,
        }
    }

    #[test]
    fn test_risk_levels() {
        assert_eq!(RiskLevel::from_score(35.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(35.1), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(65.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(65.1), RiskLevel::High);
        assert_eq!(RiskLevel::from_company_score(29.9), RiskLevel::Low);
        assert_eq!(RiskLevel::from_company_score(30.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_company_score(60.0), RiskLevel::High);
        assert_eq!(serde_json::to_string(&RiskLevel::High).unwrap(), "\"High Risk\"");
    }

    #[test]
    fn test_baseline_floor() {
        assert_eq!(dynamic_baseline(0.0, -40.0), BASE_RISK);
        assert!((dynamic_baseline(0.2, 10.0) - 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_risk_score_bounds() {
        // Oversupplied market: core risk is negative, baseline takes over
        assert_eq!(risk_score(10.0, 90.0, 0.0, 0.0), BASE_RISK);
        assert_eq!(risk_score(90.0, 10.0, 0.9, 0.0), 93.5);
        assert_eq!(risk_score(90.0, 10.0, 2.0, 0.0), 100.0);
    }

    #[test]
    fn test_apply_risk_trend_resets_per_industry() {
        let mut rows = vec![
            scored("EV", 2023, 50.0, 40.0, 0.1),
            scored("EV", 2024, 50.0, 60.0, 0.1),
            scored("IT", 2023, 50.0, 80.0, 0.1),
            scored("IT", 2024, 50.0, 70.0, 0.1),
        ];
        apply_risk(&mut rows);

        assert_eq!(rows[0].demand_trend, 0.0);
        assert_eq!(rows[1].demand_trend, 20.0);
        assert_eq!(rows[2].demand_trend, 0.0);
        assert_eq!(rows[3].demand_trend, -10.0);
        assert!(rows.iter().all(|r| r.risk_score >= BASE_RISK && r.risk_score <= 100.0));
    }

    #[test]
    fn test_explanation_for_shortage_in_planning_year() {
        let mut row = scored("IT", 2026, 20.0, 80.0, 0.2);
        row.demand_trend = 15.0;
        row.risk_score = 63.0;

        let text = explain(&row, 2026);
        assert_eq!(
            text,
            "Medium Risk (Current Planning Horizon) detected. Demand significantly exceeds supply, \
             creating critical shortage pressure; strong demand momentum suggests accelerating hiring \
             needs; aggressive attrition rates are accelerating workforce leakage."
        );
    }

    #[test]
    fn test_explanation_keeps_three_reasons() {
        let mut row = scored("IT", 2024, 50.0, 50.0, 0.02);
        row.demand_trend = -12.0;
        row.risk_score = 5.0;

        let text = explain(&row, 2026);
        assert!(text.starts_with("Low Risk detected. Supply and demand"));
        assert!(text.contains("declining demand trend"));
        assert!(text.contains("exceptionally stable retention"));
        // Fourth reason (historic low) is dropped
        assert!(!text.contains("historic low"));
        assert_eq!(text.matches("; ").count(), 2);
    }

    #[test]
    fn test_explanation_equilibrium_only() {
        let mut row = scored("IT", 2024, 50.0, 50.0, 0.08);
        row.risk_score = 20.0;
        assert_eq!(
            explain(&row, 2026),
            "Low Risk detected. Supply and demand are currently in a state of relative equilibrium."
        );
    }
}
