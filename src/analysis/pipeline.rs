//! Forecast → normalize → score pipeline over the full dataset

use crate::analysis::forecast::TrendModels;
use crate::analysis::normalizer::{group_normalize, NormalizationBounds};
use crate::analysis::risk::apply_risk;
use crate::data::records::{IndustryYearRecord, ScoredRecord};
use log::info;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

/// Historical plus forecast rows, scored, with the per-industry bounds that
/// produced the scores. Rebuilt for every request.
#[derive(Debug, Clone)]
pub struct ScoredDataset {
    rows: Vec<ScoredRecord>,
    bounds: BTreeMap<String, NormalizationBounds>,
    historical: Arc<Vec<IndustryYearRecord>>,
}

impl ScoredDataset {
    pub fn build(
        historical: Arc<Vec<IndustryYearRecord>>,
        models: &TrendModels,
        future_years: &[i32],
    ) -> Self {
        let known: HashSet<(&str, i32)> = historical
            .iter()
            .map(|r| (r.industry.as_str(), r.year))
            .collect();

        // A forecast year that already has an observation keeps the observation
        let future: Vec<IndustryYearRecord> = models
            .predict_future(future_years)
            .into_iter()
            .filter(|r| !known.contains(&(r.industry.as_str(), r.year)))
            .collect();

        let mut combined: Vec<IndustryYearRecord> =
            historical.iter().cloned().chain(future).collect();
        combined.sort_by(|a, b| a.industry.cmp(&b.industry).then(a.year.cmp(&b.year)));

        let (scores, bounds) = group_normalize(
            &combined,
            |r: &IndustryYearRecord| r.industry.clone(),
            IndustryYearRecord::supply_raw,
            IndustryYearRecord::demand_raw,
        );

        let mut rows: Vec<ScoredRecord> = combined
            .into_iter()
            .zip(scores)
            .map(|(record, score)| ScoredRecord {
                supply_raw: record.supply_raw(),
                demand_raw: record.demand_raw(),
                supply_score: score.supply_score,
                demand_score: score.demand_score,
                demand_trend: 0.0,
                risk_score: 0.0,
                record,
            })
            .collect();
        apply_risk(&mut rows);

        info!(
            "Scored {} rows across {} industries",
            rows.len(),
            bounds.len()
        );

        Self {
            rows,
            bounds,
            historical,
        }
    }

    pub fn rows(&self) -> &[ScoredRecord] {
        &self.rows
    }

    pub fn historical(&self) -> &[IndustryYearRecord] {
        &self.historical
    }

    pub fn find(&self, industry: &str, year: i32) -> Option<&ScoredRecord> {
        self.rows
            .iter()
            .find(|r| r.industry() == industry && r.year() == year)
    }

    /// Rows of one industry, ascending by year.
    pub fn industry_rows<'a>(&'a self, industry: &'a str) -> impl Iterator<Item = &'a ScoredRecord> + 'a {
        self.rows.iter().filter(move |r| r.industry() == industry)
    }

    pub fn bounds(&self, industry: &str) -> Option<&NormalizationBounds> {
        self.bounds.get(industry)
    }

    /// Industry names in sorted order.
    pub fn industries(&self) -> impl Iterator<Item = &str> {
        self.bounds.keys().map(|k| k.as_str())
    }
}
