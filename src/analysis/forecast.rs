//! Linear trend forecasting of the four raw metrics
//!
//! Each metric is regressed on Year plus a one-hot Industry encoding. That
//! model has one shared slope and one intercept per industry, so it is fitted
//! in closed form with the within-industry least-squares estimator:
//!
//! ```text
//! slope       = Σ (year - mean_year[i]) (y - mean_y[i]) / Σ (year - mean_year[i])²
//! intercept_i = mean_y[i] - slope × mean_year[i]
//! ```
//!
//! When no industry spans two distinct years the denominator is zero and the
//! slope falls back to 0, i.e. each industry's mean is carried forward flat.
//! Predictions are never clamped: a conversion rate may well leave [0, 1].

use crate::data::records::IndustryYearRecord;
use crate::error::{Result, WorkforceError};
use log::debug;
use std::collections::HashMap;

/// Shared-slope, per-industry-intercept line for one metric.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearTrend {
    pub slope: f64,
    intercepts: HashMap<String, f64>,
}

impl LinearTrend {
    pub fn fit(points: &[(&str, i32, f64)]) -> Self {
        let mut sums: HashMap<&str, (f64, f64, usize)> = HashMap::new();
        for &(industry, year, y) in points {
            let entry = sums.entry(industry).or_insert((0.0, 0.0, 0));
            entry.0 += year as f64;
            entry.1 += y;
            entry.2 += 1;
        }

        let means: HashMap<&str, (f64, f64)> = sums
            .into_iter()
            .map(|(industry, (sx, sy, n))| (industry, (sx / n as f64, sy / n as f64)))
            .collect();

        let mut sxy = 0.0;
        let mut sxx = 0.0;
        for &(industry, year, y) in points {
            let (mx, my) = means[industry];
            let dx = year as f64 - mx;
            sxy += dx * (y - my);
            sxx += dx * dx;
        }

        let slope = if sxx > 0.0 { sxy / sxx } else { 0.0 };
        let intercepts = means
            .into_iter()
            .map(|(industry, (mx, my))| (industry.to_string(), my - slope * mx))
            .collect();

        Self { slope, intercepts }
    }

    pub fn predict(&self, industry: &str, year: i32) -> Option<f64> {
        self.intercepts
            .get(industry)
            .map(|intercept| intercept + self.slope * year as f64)
    }
}

/// One trained trend per raw metric, plus the industries seen in training.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendModels {
    industries: Vec<String>,
    interns_intake: LinearTrend,
    conversion_rate: LinearTrend,
    growth_rate: LinearTrend,
    attrition_rate: LinearTrend,
}

impl TrendModels {
    pub fn train(records: &[IndustryYearRecord]) -> Result<Self> {
        if records.is_empty() {
            return Err(WorkforceError::DataUnavailable(
                "Cannot train trend models without historical rows".to_string(),
            ));
        }

        let mut industries: Vec<String> = Vec::new();
        for record in records {
            if !industries.contains(&record.industry) {
                industries.push(record.industry.clone());
            }
        }

        let fit = |metric: fn(&IndustryYearRecord) -> f64| {
            let points: Vec<(&str, i32, f64)> = records
                .iter()
                .map(|r| (r.industry.as_str(), r.year, metric(r)))
                .collect();
            LinearTrend::fit(&points)
        };

        let models = Self {
            interns_intake: fit(|r| r.interns_intake),
            conversion_rate: fit(|r| r.conversion_rate),
            growth_rate: fit(|r| r.growth_rate),
            attrition_rate: fit(|r| r.attrition_rate),
            industries,
        };

        debug!(
            "Trained trend models: intake slope {:.4}, conversion slope {:.4}, growth slope {:.4}, attrition slope {:.4}",
            models.interns_intake.slope,
            models.conversion_rate.slope,
            models.growth_rate.slope,
            models.attrition_rate.slope
        );

        Ok(models)
    }

    pub fn industries(&self) -> &[String] {
        &self.industries
    }

    /// Forecast rows for every known industry and each requested year.
    pub fn predict_future(&self, years: &[i32]) -> Vec<IndustryYearRecord> {
        let mut rows = Vec::with_capacity(self.industries.len() * years.len());

        for industry in &self.industries {
            for &year in years {
                let predict = |trend: &LinearTrend| trend.predict(industry, year).unwrap_or(0.0);
                rows.push(IndustryYearRecord {
                    industry: industry.clone(),
                    year,
                    interns_intake: predict(&self.interns_intake),
                    conversion_rate: predict(&self.conversion_rate),
                    attrition_rate: predict(&self.attrition_rate),
                    growth_rate: predict(&self.growth_rate),
                    top_skills: None,
                });
            }
        }

        rows
    }
}
