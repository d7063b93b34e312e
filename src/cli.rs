//! CLI interface for the workforce analytics engine

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "workforce-pulse")]
#[command(about = "Workforce risk, talent supply/demand and resume readiness analytics")]
#[command(long_about = "Score industries and companies for workforce risk and hiring pressure, \
forecast talent supply and demand, and check a resume against a target job's skill set")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format: console, json, markdown (defaults to the configured format)
    #[arg(short, long, global = true)]
    pub output: Option<String>,

    /// Save output to file
    #[arg(short, long, global = true)]
    pub save: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Industry workforce analysis for one year
    Analyze {
        industry: String,
        year: i32,

        /// Include per-company risk summaries
        #[arg(long)]
        companies: bool,
    },

    /// Industry analysis with student-facing outlook and guidance
    Student {
        industry: String,
        year: i32,

        /// Include per-company risk summaries
        #[arg(long)]
        companies: bool,
    },

    /// Compare companies within an industry
    Compare {
        industry: String,
        year: i32,

        /// Comma-separated company names (defaults to the whole roster)
        #[arg(long, value_delimiter = ',')]
        companies: Vec<String>,
    },

    /// Derived raw metrics for a single company
    Company {
        industry: String,
        company: String,
        year: i32,
    },

    /// Score a resume against a job from the catalog
    Resume {
        /// Path to resume file (PDF, TXT, MD)
        resume: PathBuf,

        #[arg(short, long)]
        industry: String,

        /// Target job title
        #[arg(short, long)]
        job: String,

        /// Target company
        #[arg(long, default_value = "")]
        company: String,

        /// Analysis year (defaults to the planning year)
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// What-if simulation with percentage changes to the raw metrics
    Simulate {
        industry: String,
        year: i32,

        /// Internship intake change in percent
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        intake: f64,

        /// Conversion rate change in percent
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        conversion: f64,

        /// Attrition rate change in percent
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        attrition: f64,

        /// Growth rate change in percent
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        growth: f64,
    },

    /// List industries in the dataset
    Industries,

    /// List the company roster of an industry
    Companies { industry: String },

    /// List catalog jobs of an industry
    Jobs { industry: String },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("md"), Ok(OutputFormat::Markdown));
        assert!(parse_output_format("html").is_err());
    }

    #[test]
    fn test_parse_simulate_with_negative_deltas() {
        let cli = Cli::parse_from([
            "workforce-pulse",
            "simulate",
            "IT",
            "2026",
            "--intake",
            "-10",
            "--growth",
            "5",
        ]);
        match cli.command {
            Commands::Simulate {
                intake, growth, conversion, ..
            } => {
                assert_eq!(intake, -10.0);
                assert_eq!(growth, 5.0);
                assert_eq!(conversion, 0.0);
            }
            _ => panic!("expected simulate"),
        }
    }

    #[test]
    fn test_parse_compare_list() {
        let cli = Cli::parse_from([
            "workforce-pulse",
            "compare",
            "IT",
            "2026",
            "--companies",
            "MetaSystems,NexTech",
            "-o",
            "json",
        ]);
        assert_eq!(cli.output.as_deref(), Some("json"));
        match cli.command {
            Commands::Compare { companies, .. } => assert_eq!(companies, vec!["MetaSystems", "NexTech"]),
            _ => panic!("expected compare"),
        }
    }
}
