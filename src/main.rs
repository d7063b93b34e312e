//! workforce-pulse: workforce risk and talent analytics from the command line

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use std::process;
use std::time::Duration;
use workforce_pulse::analysis::simulation::Scenario;
use workforce_pulse::cli::{self, Cli, Commands, ConfigAction};
use workforce_pulse::output::{save_report_to_file, Report, ReportGenerator};
use workforce_pulse::{Config, Result, WorkforceError, WorkforceService};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Run `work` behind a spinner.
fn with_spinner<T>(message: &str, work: impl FnOnce() -> Result<T>) -> Result<T> {
    let pb = spinner(message);
    let result = work();
    pb.finish_and_clear();
    result
}

async fn run_command(cli: Cli, config: Config) -> Result<()> {
    let format = match &cli.output {
        Some(format) => cli::parse_output_format(format).map_err(WorkforceError::InvalidInput)?,
        None => config.output.format,
    };

    let report = match cli.command {
        Commands::Config { action } => return run_config(action, &config),
        command => {
            let service = WorkforceService::new(config.clone());
            build_report(&service, command).await?
        }
    };

    let rendered = ReportGenerator::new(&config.output).generate_report(&report, format)?;
    match &cli.save {
        Some(path) => {
            save_report_to_file(&rendered, path)?;
            info!("Report saved to {}", path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

async fn build_report(service: &WorkforceService, command: Commands) -> Result<Report> {
    let report = match command {
        Commands::Analyze {
            industry,
            year,
            companies,
        } => {
            let response = with_spinner("Scoring industry data...", || {
                service.run_analysis(&industry, year, companies)
            })?;
            Report::from_response(response, Report::from)
        }
        Commands::Student {
            industry,
            year,
            companies,
        } => {
            let response = with_spinner("Scoring industry data...", || {
                service.run_student_analysis(&industry, year, companies)
            })?;
            Report::from_response(response, Report::from)
        }
        Commands::Compare {
            industry,
            year,
            companies,
        } => {
            let names = if companies.is_empty() {
                service.config().companies_for(&industry).map(<[String]>::to_vec).unwrap_or_default()
            } else {
                companies
            };
            let response = with_spinner("Comparing companies...", || {
                service.compare_companies(&industry, &names, year)
            })?;
            Report::from_response(response, |comparisons| Report::Companies {
                industry: industry.clone(),
                year,
                comparisons,
            })
        }
        Commands::Company {
            industry,
            company,
            year,
        } => Report::from_response(service.get_company_metrics(&industry, year, &company)?, Report::from),
        Commands::Resume {
            resume,
            industry,
            job,
            company,
            year,
        } => {
            let year = year.unwrap_or_else(|| service.planning_year());
            let pb = spinner("Analyzing resume...");
            let response = service.analyze_resume(&resume, &industry, &company, &job, year).await;
            pb.finish_and_clear();
            Report::from_response(response?, Report::from)
        }
        Commands::Simulate {
            industry,
            year,
            intake,
            conversion,
            attrition,
            growth,
        } => {
            let scenario = Scenario {
                internship_pct: intake,
                conversion_pct: conversion,
                attrition_pct: attrition,
                growth_pct: growth,
            };
            let response = with_spinner("Simulating...", || service.simulate(&industry, year, &scenario))?;
            Report::from_response(response, Report::from)
        }
        Commands::Industries => Report::Listing {
            title: "Industries".to_string(),
            items: service.list_industries()?,
        },
        Commands::Companies { industry } => {
            let title = format!("Companies in {}", industry);
            Report::from_response(service.list_companies(&industry)?, |items| Report::Listing { title, items })
        }
        Commands::Jobs { industry } => Report::Jobs {
            jobs: service.list_jobs(&industry)?,
            industry,
        },
        Commands::Config { .. } => {
            return Err(WorkforceError::InvalidInput(
                "config is handled before the service starts".to_string(),
            ))
        }
    };

    Ok(report)
}

fn run_config(action: Option<ConfigAction>, config: &Config) -> Result<()> {
    match action {
        Some(ConfigAction::Show) | None => {
            let text = toml::to_string_pretty(config).context("Failed to serialize config")?;
            println!("{}", text);
        }
        Some(ConfigAction::Reset) => {
            Config::default().save()?;
            println!("Configuration reset to defaults at {}", Config::config_path().display());
        }
        Some(ConfigAction::Path) => {
            println!("{}", Config::config_path().display());
        }
    }
    Ok(())
}
