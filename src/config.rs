//! Configuration management for the workforce analytics engine

use crate::error::{Result, WorkforceError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    pub horizon: HorizonConfig,
    pub output: OutputConfig,
    /// Company roster per industry, used for derivation and comparison.
    pub companies: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub data_dir: PathBuf,
    pub attrition_file: String,
    pub growth_file: String,
    pub internship_file: String,
    pub jobs_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HorizonConfig {
    /// Years the trend forecaster extrapolates to.
    pub future_years: Vec<i32>,
    /// The only year hiring-surge predictions are issued for.
    pub planning_year: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
    pub pretty_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for HorizonConfig {
    fn default() -> Self {
        Self {
            future_years: vec![2027, 2028, 2029],
            planning_year: 2026,
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            attrition_file: "attrition_data.csv".to_string(),
            growth_file: "industry_growth.csv".to_string(),
            internship_file: "internship_data.csv".to_string(),
            jobs_file: "jobs.json".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            horizon: HorizonConfig::default(),
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
                pretty_json: true,
            },
            companies: default_company_roster(),
        }
    }
}

fn default_company_roster() -> BTreeMap<String, Vec<String>> {
    let roster: [(&str, [&str; 5]); 5] = [
        ("IT", ["MetaSystems", "CyberCloud", "DataPulse", "NexTech", "CloudCore"]),
        ("Healthcare", ["BioHealth", "MediLife", "NanoCare", "PulseMedical", "LifeStream"]),
        ("Manufacturing", ["SteelForge", "AutoMaker", "IndustrialX", "GlobalFab", "PrecisionParts"]),
        ("EV", ["VoltMotors", "ChargePoint", "EcoDrive", "LithiumIon", "SparkEV"]),
        ("Finance", ["WealthWise", "SecureBank", "FinFlow", "CapitalOne", "TradeMaster"]),
    ];

    roster
        .iter()
        .map(|(industry, names)| {
            (
                industry.to_string(),
                names.iter().map(|n| n.to_string()).collect(),
            )
        })
        .collect()
}

impl Config {
    /// Load from the default location, writing defaults on first run.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| WorkforceError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| WorkforceError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("workforce-pulse")
            .join("config.toml")
    }

    fn validate(&self) -> Result<()> {
        if self.horizon.future_years.is_empty() {
            return Err(WorkforceError::Configuration(
                "horizon.future_years must list at least one year".to_string(),
            ));
        }
        Ok(())
    }

    pub fn attrition_path(&self) -> PathBuf {
        self.data.data_dir.join(&self.data.attrition_file)
    }

    pub fn growth_path(&self) -> PathBuf {
        self.data.data_dir.join(&self.data.growth_file)
    }

    pub fn internship_path(&self) -> PathBuf {
        self.data.data_dir.join(&self.data.internship_file)
    }

    pub fn jobs_path(&self) -> PathBuf {
        self.data.data_dir.join(&self.data.jobs_file)
    }

    pub fn companies_for(&self, industry: &str) -> Option<&[String]> {
        self.companies.get(industry).map(|c| c.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_roundtrips_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();

        assert_eq!(parsed.horizon.planning_year, 2026);
        assert_eq!(parsed.horizon.future_years, vec![2027, 2028, 2029]);
        assert_eq!(parsed.output.format, OutputFormat::Console);
        assert_eq!(parsed.companies.len(), 5);
    }

    #[test]
    fn test_default_roster() {
        let config = Config::default();
        let it = config.companies_for("IT").unwrap();
        assert_eq!(it[0], "MetaSystems");
        assert_eq!(it.len(), 5);
        assert!(config.companies_for("Space").is_none());
    }

    #[test]
    fn test_empty_future_years_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        config.horizon.future_years.clear();
        std::fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(WorkforceError::Configuration(_))
        ));
    }
}
