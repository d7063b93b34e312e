//! Hiring Pressure Index (HPI) and surge-window prediction

use crate::data::records::ScoredRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

const HPI_ATTRITION_WEIGHT: f64 = 20.0;
const HPI_TREND_WEIGHT: f64 = 0.8;

/// When the next hiring surge is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurgeWindow {
    #[serde(rename = "1-3 months")]
    Immediate,
    #[serde(rename = "4-6 months")]
    NearTerm,
    #[serde(rename = "6-12 months")]
    LongTerm,
}

impl SurgeWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            SurgeWindow::Immediate => "1-3 months",
            SurgeWindow::NearTerm => "4-6 months",
            SurgeWindow::LongTerm => "6-12 months",
        }
    }

    pub fn from_pressure(hpi: f64, demand_trend: f64) -> Self {
        if hpi >= 30.0 || (hpi >= 20.0 && demand_trend > 5.0) {
            SurgeWindow::Immediate
        } else if hpi >= 15.0 || demand_trend > 0.0 {
            SurgeWindow::NearTerm
        } else {
            SurgeWindow::LongTerm
        }
    }
}

impl fmt::Display for SurgeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn hiring_pressure_index(
    demand_score: f64,
    supply_score: f64,
    attrition_rate: f64,
    demand_trend: f64,
) -> f64 {
    (demand_score - supply_score) + attrition_rate * HPI_ATTRITION_WEIGHT + demand_trend * HPI_TREND_WEIGHT
}

/// Surge prediction for a scored row.
///
/// Only issued for the planning year; every other year gets `None`.
pub fn hiring_surge(row: &ScoredRecord, planning_year: i32) -> Option<SurgeWindow> {
    if row.year() != planning_year {
        return None;
    }

    let hpi = hiring_pressure_index(
        row.demand_score,
        row.supply_score,
        row.record.attrition_rate,
        row.demand_trend,
    );
    Some(SurgeWindow::from_pressure(hpi, row.demand_trend))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::records::IndustryYearRecord;

    fn scored(year: i32, supply: f64, demand: f64, attrition: f64, trend: f64) -> ScoredRecord {
        ScoredRecord {
            record: IndustryYearRecord {
                industry: "IT".to_string(),
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
            demand_trend: trend,
            risk_score: 50.0,
        }
    }

    #[test]
    fn test_window_mapping() {
        assert_eq!(SurgeWindow::from_pressure(30.0, -3.0), SurgeWindow::Immediate);
        assert_eq!(SurgeWindow::from_pressure(22.0, 6.0), SurgeWindow::Immediate);
        assert_eq!(SurgeWindow::from_pressure(22.0, 5.0), SurgeWindow::NearTerm);
        assert_eq!(SurgeWindow::from_pressure(15.0, -1.0), SurgeWindow::NearTerm);
        assert_eq!(SurgeWindow::from_pressure(-20.0, 0.5), SurgeWindow::NearTerm);
        assert_eq!(SurgeWindow::from_pressure(14.9, 0.0), SurgeWindow::LongTerm);
    }

    #[test]
    fn test_hpi_formula() {
        assert!((hiring_pressure_index(60.0, 40.0, 0.1, 5.0) - 26.0).abs() < 1e-12);
    }

    #[test]
    fn test_only_planning_year_gets_prediction() {
        for year in [2020, 2023, 2025, 2027, 2029] {
            assert_eq!(hiring_surge(&scored(year, 10.0, 90.0, 0.3, 20.0), 2026), None);
        }
        assert_eq!(
            hiring_surge(&scored(2026, 10.0, 90.0, 0.3, 20.0), 2026),
            Some(SurgeWindow::Immediate)
        );
        assert_eq!(
            hiring_surge(&scored(2026, 80.0, 20.0, 0.05, -4.0), 2026),
            Some(SurgeWindow::LongTerm)
        );
    }

    #[test]
    fn test_serializes_as_label() {
        assert_eq!(
            serde_json::to_string(&Some(SurgeWindow::NearTerm)).unwrap(),
            "\"4-6 months\""
        );
        assert_eq!(serde_json::to_string(&None::<SurgeWindow>).unwrap(), "null");
    }
}
