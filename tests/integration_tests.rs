//! Integration tests for the workforce analytics engine

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use workforce_pulse::analysis::risk::{RiskLevel, BASE_RISK};
use workforce_pulse::analysis::simulation::Scenario;
use workforce_pulse::data::{IndustryYearRecord, JobsByIndustry};
use workforce_pulse::input::InputManager;
use workforce_pulse::processing::resume_matcher::ReadinessLevel;
use workforce_pulse::{Config, WorkforceError, WorkforceService};

fn fixture_config() -> Config {
    let mut config = Config::default();
    config.data.data_dir = PathBuf::from("tests/fixtures/data");
    config
}

fn fixture_service() -> WorkforceService {
    WorkforceService::new(fixture_config())
}

fn record(industry: &str, year: i32, intake: f64, attrition: f64, growth: f64) -> IndustryYearRecord {
    IndustryYearRecord {
        industry: industry.to_string(),
        year,
        interns_intake: intake,
        conversion_rate: 0.7,
        attrition_rate: attrition,
        growth_rate: growth,
        top_skills: Some("Python, Cloud, GenAI, SQL, Docker".to_string()),
    }
}

/// IT with rising attrition and a collapsing 2026 intake, balanced by a
/// mirror-image industry so the pooled forecast slope is flat.
fn shortage_scenario() -> Vec<IndustryYearRecord> {
    let it_intake = [1000.0, 1000.0, 1000.0, 400.0];
    let it_attrition = [0.10, 0.12, 0.14, 0.30];

    let mut rows = Vec::new();
    for (i, year) in (2023..=2026).enumerate() {
        rows.push(record("IT", year, it_intake[i], it_attrition[i], 0.05));
        rows.push(record("Retail", year, it_intake[3 - i], it_attrition[3 - i], 0.03));
    }
    rows
}

#[test]
fn test_end_to_end_shortage_is_high_risk() {
    let service = WorkforceService::with_sources(Config::default(), shortage_scenario(), JobsByIndustry::new());

    let report = service.run_analysis("IT", 2026, false).unwrap().into_ok().unwrap();

    assert_eq!(report.metrics.risk_level, RiskLevel::High);
    assert!(report.metrics.risk_score > 65.0);
    assert_eq!(report.metrics.supply_score, 10.0);
    assert_eq!(report.metrics.demand_score, 90.0);
    assert!(report.hiring_surge.is_some());
    assert!(report
        .explanation
        .starts_with("High Risk (Current Planning Horizon) detected."));

    let years: Vec<i32> = report.trend.iter().map(|p| p.year).collect();
    assert_eq!(years, vec![2023, 2024, 2025, 2026, 2027, 2028, 2029]);
}

#[test]
fn test_analysis_is_idempotent() {
    let service = fixture_service();
    let first = service.run_analysis("IT", 2026, true).unwrap();
    let second = service.run_analysis("IT", 2026, true).unwrap();

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );

    // A fresh service over the same files produces the same bytes
    let other = fixture_service().run_analysis("IT", 2026, true).unwrap();
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&other).unwrap()
    );
}

#[test]
fn test_scores_and_risk_stay_in_bounds() {
    let service = fixture_service();
    for industry in ["IT", "Finance"] {
        for year in 2021..=2029 {
            let report = service.run_analysis(industry, year, false).unwrap().into_ok().unwrap();
            let m = &report.metrics;
            assert!((10.0..=90.0).contains(&m.supply_score));
            assert!((10.0..=90.0).contains(&m.demand_score));
            assert!(m.risk_score >= BASE_RISK && m.risk_score <= 100.0);
        }
    }
}

#[test]
fn test_surge_only_for_planning_year() {
    let service = fixture_service();
    for year in 2021..=2029 {
        let report = service.run_analysis("Finance", year, false).unwrap().into_ok().unwrap();
        assert_eq!(report.hiring_surge.is_some(), year == 2026, "year {}", year);
    }
}

#[test]
fn test_inner_join_drops_partial_rows() {
    let service = fixture_service();
    assert_eq!(service.list_industries().unwrap(), vec!["Finance", "IT"]);

    let response = service.run_analysis("Healthcare", 2025, false).unwrap();
    assert_eq!(
        response.error(),
        Some("Data not available for this year/industry")
    );
}

#[test]
fn test_missing_data_file_is_configuration_error() {
    let mut config = Config::default();
    config.data.data_dir = PathBuf::from("tests/fixtures/no_such_dir");
    let service = WorkforceService::new(config);

    assert!(matches!(
        service.run_analysis("IT", 2025, false),
        Err(WorkforceError::Configuration(_))
    ));
}

#[test]
fn test_company_metrics_are_deterministic() {
    let service = fixture_service();
    let first = service.get_company_metrics("IT", 2026, "MetaSystems").unwrap().into_ok().unwrap();
    let second = fixture_service()
        .get_company_metrics("IT", 2026, "MetaSystems")
        .unwrap()
        .into_ok()
        .unwrap();

    assert_eq!(first.raw, second.raw);

    assert!(first.raw.internship_intake > 0.0);

    let next_year = service.get_company_metrics("IT", 2027, "MetaSystems").unwrap().into_ok().unwrap();
    assert_eq!(next_year.year, 2027);
    assert_ne!(first.raw, next_year.raw);
}

#[test]
fn test_compare_companies() {
    let service = fixture_service();
    let names = vec!["NexTech".to_string(), "MetaSystems".to_string()];
    let results = service.compare_companies("IT", &names, 2026).unwrap().into_ok().unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].company, "MetaSystems");
    for result in &results {
        assert!(result.metrics.hiring_surge.is_some());
        assert!(!result.insights.is_empty() && result.insights.len() <= 2);
        assert!((0.0..=100.0).contains(&result.metrics.risk_score));
    }

    let unknown = service.compare_companies("Space", &names, 2026).unwrap();
    assert_eq!(unknown.error(), Some("Industry Space not found"));
}

#[test]
fn test_custom_roster_from_config() {
    let mut config = fixture_config();
    config.companies = BTreeMap::from([("Finance".to_string(), vec!["Ledgerly".to_string()])]);
    let service = WorkforceService::new(config);

    let listed = service.list_companies("Finance").unwrap().into_ok().unwrap();
    assert_eq!(listed, vec!["Ledgerly"]);
    assert!(service.list_companies("IT").unwrap().error().is_some());
}

#[test]
fn test_student_analysis() {
    let service = fixture_service();
    let report = service.run_student_analysis("IT", 2026, true).unwrap().into_ok().unwrap();
    let insights = report.student_insights.as_ref().unwrap();

    assert_eq!(report.company_metrics.as_ref().map(Vec::len), Some(5));
    assert!(insights.preparation_guidance.len() >= 3);
    assert_eq!(insights.skills.in_demand_names(), vec!["cloud", "genai"]);

    let json = serde_json::to_value(&report).unwrap();
    assert!(json["Student_Insights"]["Skills"]["future"].is_array());
}

#[test]
fn test_simulation_changes_scores() {
    let service = fixture_service();
    let scenario = Scenario {
        attrition_pct: 10.0,
        growth_pct: 15.0,
        ..Scenario::default()
    };
    let result = service.simulate("IT", 2026, &scenario).unwrap().into_ok().unwrap();

    assert!(result.simulated.demand_score >= result.baseline.demand_score);
    assert!(result.simulated.hiring_surge.is_some());
}

#[tokio::test]
async fn test_resume_against_software_engineer() {
    let service = fixture_service();
    let result = service
        .analyze_resume(
            Path::new("tests/fixtures/sample_resume.txt"),
            "IT",
            "MetaSystems",
            "Software Engineer",
            2026,
        )
        .await
        .unwrap()
        .into_ok()
        .unwrap();

    assert_eq!(result.score, 60);
    assert_eq!(result.readiness, ReadinessLevel::Moderate);
    assert!(result.missing_core.is_empty());
    assert_eq!(result.missing_industry, vec!["Cloud", "Genai"]);
    assert_eq!(result.missing_future, vec!["Genai", "Cloud Architecture"]);
    assert_eq!(
        result.recommendations,
        vec![
            "Enhance your industry alignment by adding projects related to Cloud.",
            "Prepare for 2026 hiring trends by learning Genai.",
            "Strengthening foundational skills will significantly improve your match rate.",
        ]
    );
}

#[tokio::test]
async fn test_resume_unknown_job_is_in_band() {
    let response = fixture_service()
        .analyze_resume(
            Path::new("tests/fixtures/sample_resume.md"),
            "IT",
            "",
            "Astronaut",
            2026,
        )
        .await
        .unwrap();
    assert_eq!(response.error(), Some("Job Astronaut not found in IT"));
}

#[tokio::test]
async fn test_resume_without_industry_data_uses_core_only() {
    let response = fixture_service()
        .analyze_resume(
            Path::new("tests/fixtures/sample_resume.txt"),
            "IT",
            "",
            "Data Scientist",
            2040,
        )
        .await
        .unwrap();
    let result = response.into_ok().unwrap();

    // python + sql out of four core skills: 30, plus full industry and future weight
    assert_eq!(result.score, 70);
    assert_eq!(result.missing_core, vec!["Machine Learning", "Statistics"]);
    assert!(result.missing_industry.is_empty() && result.missing_future.is_empty());
}

#[tokio::test]
async fn test_blank_resume_is_extraction_error() {
    let result = fixture_service()
        .analyze_resume(
            Path::new("tests/fixtures/blank_resume.txt"),
            "IT",
            "",
            "Software Engineer",
            2026,
        )
        .await;
    assert!(matches!(result, Err(WorkforceError::Extraction(_))));
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let text = InputManager::new()
        .extract_text(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Node.js"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let text = InputManager::new()
        .extract_text(Path::new("tests/fixtures/sample_resume.md"))
        .await
        .unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("React"));
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_unsupported_and_missing_files() {
    let manager = InputManager::new();
    assert!(matches!(
        manager.extract_text(Path::new("tests/fixtures/unsupported.xyz")).await,
        Err(WorkforceError::UnsupportedFormat(_))
    ));
    assert!(matches!(
        manager.extract_text(Path::new("tests/fixtures/nonexistent.txt")).await,
        Err(WorkforceError::InvalidInput(_))
    ));
}

#[test]
fn test_generated_data_directory() {
    let dir = tempfile::tempdir().unwrap();
    let write = |name: &str, body: &str| std::fs::write(dir.path().join(name), body).unwrap();
    write("attrition_data.csv", "Industry,Year,Attrition_Rate\nEV,2024,0.2\nEV,2025,0.22\n");
    write("industry_growth.csv", "Industry,Year,Growth_Rate\nEV,2024,0.15\nEV,2025,0.18\n");
    write(
        "internship_data.csv",
        "Industry,Year,Interns_Intake,Conversion_Rate\nEV,2024,300,0.6\nEV,2025,320,0.62\n",
    );

    let mut config = Config::default();
    config.data.data_dir = dir.path().to_path_buf();
    let service = WorkforceService::new(config);

    let report = service.run_student_analysis("EV", 2025, false).unwrap().into_ok().unwrap();
    let skills = &report.student_insights.unwrap().skills;
    // No Top_Skills column: only the fixed fillers remain
    assert_eq!(skills.in_demand_names(), vec!["data analysis"]);
    assert!(service.list_jobs("EV").unwrap().is_empty());
}
