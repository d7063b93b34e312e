//! Loading and merging of the attrition, growth and internship tables

use crate::config::Config;
use crate::data::records::IndustryYearRecord;
use crate::error::{Result, WorkforceError};
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Anything able to produce the merged historical table.
pub trait RecordSource: Send + Sync {
    fn load(&self) -> Result<Vec<IndustryYearRecord>>;
}

/// Rows already held in memory, mostly for embedding and tests.
impl RecordSource for Vec<IndustryYearRecord> {
    fn load(&self) -> Result<Vec<IndustryYearRecord>> {
        if self.is_empty() {
            return Err(WorkforceError::DataUnavailable(
                "No industry records available".to_string(),
            ));
        }
        Ok(self.clone())
    }
}

#[derive(Debug, Deserialize)]
struct AttritionRow {
    #[serde(rename = "Industry")]
    industry: String,
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Attrition_Rate")]
    attrition_rate: f64,
    #[serde(rename = "Top_Skills", default)]
    top_skills: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GrowthRow {
    #[serde(rename = "Industry")]
    industry: String,
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Growth_Rate")]
    growth_rate: f64,
    #[serde(rename = "Top_Skills", default)]
    top_skills: Option<String>,
}

#[derive(Debug, Deserialize)]
struct InternshipRow {
    #[serde(rename = "Industry")]
    industry: String,
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Interns_Intake")]
    interns_intake: f64,
    #[serde(rename = "Conversion_Rate")]
    conversion_rate: f64,
    #[serde(rename = "Top_Skills", default)]
    top_skills: Option<String>,
}

/// The three CSV files on disk.
#[derive(Debug, Clone)]
pub struct CsvRecordSource {
    attrition: PathBuf,
    growth: PathBuf,
    internship: PathBuf,
}

impl CsvRecordSource {
    pub fn new(attrition: PathBuf, growth: PathBuf, internship: PathBuf) -> Self {
        Self {
            attrition,
            growth,
            internship,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.attrition_path(),
            config.growth_path(),
            config.internship_path(),
        )
    }
}

impl RecordSource for CsvRecordSource {
    fn load(&self) -> Result<Vec<IndustryYearRecord>> {
        let attrition: Vec<AttritionRow> = read_table(&self.attrition)?;
        let growth: Vec<GrowthRow> = read_table(&self.growth)?;
        let internship: Vec<InternshipRow> = read_table(&self.internship)?;

        let records = merge_tables(attrition, growth, internship)?;
        info!("Data loaded successfully: {} merged rows", records.len());
        Ok(records)
    }
}

fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Err(WorkforceError::Configuration(format!(
            "Data file not found: {}",
            path.display()
        )));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| csv_error(path, e))?;

    let mut rows = Vec::new();
    for result in reader.deserialize::<T>() {
        rows.push(result.map_err(|e| csv_error(path, e))?);
    }

    debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

fn csv_error(path: &Path, err: csv::Error) -> WorkforceError {
    WorkforceError::Configuration(format!("Failed to read CSV {}: {}", path.display(), err))
}

type Key = (String, i32);

fn index_unique<T>(rows: Vec<T>, key: impl Fn(&T) -> Key, table: &str) -> Result<HashMap<Key, T>> {
    let mut index = HashMap::with_capacity(rows.len());
    for row in rows {
        let k = key(&row);
        if index.contains_key(&k) {
            return Err(WorkforceError::Configuration(format!(
                "Duplicate ({}, {}) row in {} table",
                k.0, k.1, table
            )));
        }
        index.insert(k, row);
    }
    Ok(index)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Inner join on (Industry, Year), keeping the attrition table's row order.
fn merge_tables(
    attrition: Vec<AttritionRow>,
    growth: Vec<GrowthRow>,
    internship: Vec<InternshipRow>,
) -> Result<Vec<IndustryYearRecord>> {
    let mut growth = index_unique(growth, |r| (r.industry.clone(), r.year), "growth")?;
    let mut internship = index_unique(internship, |r| (r.industry.clone(), r.year), "internship")?;

    let mut seen = HashMap::new();
    let mut records = Vec::with_capacity(attrition.len());

    for row in attrition {
        let key = (row.industry.clone(), row.year);
        if seen.insert(key.clone(), ()).is_some() {
            return Err(WorkforceError::Configuration(format!(
                "Duplicate ({}, {}) row in attrition table",
                key.0, key.1
            )));
        }

        let (Some(g), Some(i)) = (growth.remove(&key), internship.remove(&key)) else {
            continue;
        };

        let top_skills = non_empty(row.top_skills)
            .or_else(|| non_empty(g.top_skills))
            .or_else(|| non_empty(i.top_skills));

        records.push(IndustryYearRecord {
            industry: row.industry,
            year: row.year,
            interns_intake: i.interns_intake,
            conversion_rate: i.conversion_rate,
            attrition_rate: row.attrition_rate,
            growth_rate: g.growth_rate,
            top_skills,
        });
    }

    if records.is_empty() {
        return Err(WorkforceError::DataUnavailable(
            "Joining attrition, growth and internship data produced no rows".to_string(),
        ));
    }

    Ok(records)
}
