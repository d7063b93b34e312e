//! Output formatters: colored console, JSON and Markdown

use crate::analysis::company::CompanyComparison;
use crate::analysis::industry::IndustryReport;
use crate::analysis::risk::RiskLevel;
use crate::analysis::simulation::{ScoreSnapshot, SimulationResult};
use crate::analysis::surge::SurgeWindow;
use crate::config::{OutputConfig, OutputFormat};
use crate::error::Result;
use crate::output::report::Report;
use crate::processing::resume_matcher::{ReadinessLevel, ResumeMatchResult};
use colored::{Color, Colorize};
use serde::Serialize;
use std::path::Path;

pub trait ReportFormatter {
    fn format_report(&self, report: &Report) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

pub struct ConsoleFormatter {
    use_colors: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter;

/// Picks the formatter for the configured output format.
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

fn surge_text(surge: Option<SurgeWindow>) -> &'static str {
    surge.map_or("No prediction", |s| s.as_str())
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };
        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn risk_badge(&self, level: RiskLevel) -> String {
        let color = match level {
            RiskLevel::Low => Color::Green,
            RiskLevel::Medium => Color::Yellow,
            RiskLevel::High => Color::Red,
        };
        self.colorize(&format!("[{}]", level), color)
    }

    fn readiness_badge(&self, readiness: ReadinessLevel) -> String {
        let color = match readiness {
            ReadinessLevel::High => Color::Green,
            ReadinessLevel::Moderate => Color::Yellow,
            ReadinessLevel::CriticalReviewNeeded => Color::Red,
        };
        self.colorize(&format!("[{}]", readiness), color)
    }

    fn format_industry(&self, report: &IndustryReport) -> String {
        let mut output = String::new();
        let m = &report.metrics;

        output.push_str(&self.format_header(
            &format!("WORKFORCE ANALYSIS: {} {}", report.industry, report.year),
            1,
        ));
        output.push_str(&format!(
            "Risk Score: {:.2} {}\n",
            m.risk_score,
            self.risk_badge(m.risk_level)
        ));
        output.push_str(&format!("Talent Supply: {:.2} | Talent Demand: {:.2}\n", m.supply_score, m.demand_score));
        output.push_str(&format!(
            "Intake: {} | Conversion: {:.2} | Attrition: {:.3} | Growth: {:.3}\n",
            m.internship_intake, m.conversion_rate, m.attrition_rate, m.growth_rate
        ));
        output.push_str(&format!(
            "Hiring Surge: {}\n",
            self.colorize(surge_text(report.hiring_surge), Color::Cyan)
        ));
        output.push_str(&format!("\n{}\n", report.explanation));

        output.push_str(&self.format_header("Supply / Demand Trend", 2));
        for point in &report.trend {
            output.push_str(&format!(
                "  {}  supply {:>6.2}  demand {:>6.2}\n",
                point.year, point.supply, point.demand
            ));
        }

        if let Some(companies) = &report.company_metrics {
            output.push_str(&self.format_header("Companies", 2));
            for company in companies {
                output.push_str(&format!(
                    "  {:<16} {:>6.2} {}  surge: {}\n",
                    company.company,
                    company.risk_score,
                    self.risk_badge(company.risk_level),
                    surge_text(company.hiring_surge)
                ));
            }
        }

        if let Some(insights) = &report.student_insights {
            output.push_str(&self.format_header("Student Outlook", 2));
            output.push_str(&format!(
                "Outlook: {}\n{}\n",
                self.colorize(insights.hiring_outlook.as_str(), Color::Cyan),
                insights.outlook_description
            ));
            output.push_str(&format!(
                "\nCompetition: {}\n{}\n",
                self.colorize(insights.competition_level.as_str(), Color::Cyan),
                insights.competition_description
            ));

            output.push_str(&self.format_header("Preparation Guidance", 3));
            for line in &insights.preparation_guidance {
                output.push_str(&format!("  • {}\n", line));
            }

            let skills = &insights.skills;
            output.push_str(&self.format_header("Skills", 3));
            for (label, bucket) in [("Core", &skills.core), ("In demand", &skills.in_demand), ("Future", &skills.future)] {
                let names: Vec<&str> = bucket.iter().flatten().map(|s| s.name.as_str()).collect();
                output.push_str(&format!("  {}: {}\n", label, names.join(", ")));
            }

            if let Some(switch) = &insights.industry_switch {
                output.push_str(&format!(
                    "\n{} {}\n",
                    self.colorize("Consider:", Color::Magenta),
                    switch.reason
                ));
            }
        }

        output
    }

    fn format_companies(&self, industry: &str, year: i32, comparisons: &[CompanyComparison]) -> String {
        let mut output = self.format_header(&format!("COMPANY COMPARISON: {} {}", industry, year), 1);

        if comparisons.is_empty() {
            output.push_str("No matching companies in the roster.\n");
        }
        for c in comparisons {
            let m = &c.metrics;
            output.push_str(&self.format_header(&c.company, 2));
            output.push_str(&format!(
                "Risk: {:.2} {} | Supply: {:.2} | Demand: {:.2} | Attrition: {:.3}\n",
                m.risk_score,
                self.risk_badge(m.risk_level),
                m.supply_score,
                m.demand_score,
                m.attrition_rate
            ));
            output.push_str(&format!("Hiring Surge: {}\n", surge_text(m.hiring_surge)));
            for insight in &c.insights {
                output.push_str(&format!("  • {}\n", insight));
            }
        }

        output
    }

    fn format_resume(&self, result: &ResumeMatchResult) -> String {
        let mut output = self.format_header("RESUME MATCH", 1);
        output.push_str(&format!(
            "ATS Match Score: {}% {}\n",
            result.score,
            self.readiness_badge(result.readiness)
        ));

        let lists = [
            ("Found", &result.found_skills, Color::Green),
            ("Missing (core)", &result.missing_core, Color::Red),
            ("Missing (industry)", &result.missing_industry, Color::Yellow),
            ("Missing (future)", &result.missing_future, Color::Yellow),
        ];
        for (label, skills, color) in lists {
            if !skills.is_empty() {
                output.push_str(&format!("{}: {}\n", label, self.colorize(&skills.join(", "), color)));
            }
        }

        output.push_str(&self.format_header("Recommendations", 2));
        for (i, rec) in result.recommendations.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, rec));
        }
        output
    }

    fn format_snapshot(&self, label: &str, s: &ScoreSnapshot) -> String {
        format!(
            "{:<10} supply {:>6.2}  demand {:>6.2}  risk {:>6.2} {}  surge: {}\n",
            label,
            s.supply_score,
            s.demand_score,
            s.risk_score,
            self.risk_badge(s.risk_level),
            surge_text(s.hiring_surge)
        )
    }

    fn format_simulation(&self, result: &SimulationResult) -> String {
        let sc = &result.scenario;
        let mut output = self.format_header(&format!("WHAT-IF: {} {}", result.industry, result.year), 1);
        output.push_str(&format!(
            "Intake {:+.1}% | Conversion {:+.1}% | Attrition {:+.1}% | Growth {:+.1}%\n\n",
            sc.internship_pct, sc.conversion_pct, sc.attrition_pct, sc.growth_pct
        ));
        output.push_str(&self.format_snapshot("Baseline", &result.baseline));
        output.push_str(&self.format_snapshot("Simulated", &result.simulated));
        output
    }
}

impl ReportFormatter for ConsoleFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        let output = match report {
            Report::Industry(r) => self.format_industry(r),
            Report::Companies {
                industry,
                year,
                comparisons,
            } => self.format_companies(industry, *year, comparisons),
            Report::CompanyMetrics(m) => {
                let r = &m.raw;
                let mut output = self.format_header(&format!("{} ({} {})", m.company, m.industry, m.year), 1);
                output.push_str(&format!("Supply (raw): {:.2}\nDemand (raw): {:.4}\n", r.supply, r.demand));
                output.push_str(&format!(
                    "Intake: {:.1} | Conversion: {:.3} | Attrition: {:.3} | Growth: {:.4}\n",
                    r.internship_intake, r.conversion_rate, r.attrition_rate, r.growth_rate
                ));
                output
            }
            Report::Resume(r) => self.format_resume(r),
            Report::Simulation(s) => self.format_simulation(s),
            Report::Listing { title, items } => {
                let mut output = self.format_header(title, 2);
                for item in items {
                    output.push_str(&format!("  • {}\n", item));
                }
                output
            }
            Report::Jobs { industry, jobs } => {
                let mut output = self.format_header(&format!("Jobs in {}", industry), 2);
                if jobs.is_empty() {
                    output.push_str("  (none)\n");
                }
                for job in jobs {
                    output.push_str(&format!(
                        "  • {}: {}\n",
                        self.colorize(&job.title, Color::Cyan),
                        job.core_skills.join(", ")
                    ));
                }
                output
            }
            Report::Error(error) => format!("{} {}\n", self.colorize("Error:", Color::Red), error),
        };
        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn to_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl ReportFormatter for JsonFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        match report {
            Report::Industry(r) => self.to_json(r),
            Report::Companies { comparisons, .. } => self.to_json(comparisons),
            Report::CompanyMetrics(m) => self.to_json(m),
            Report::Resume(r) => self.to_json(r),
            Report::Simulation(s) => self.to_json(s),
            Report::Listing { items, .. } => self.to_json(items),
            Report::Jobs { jobs, .. } => self.to_json(jobs),
            Report::Error(error) => self.to_json(&serde_json::json!({ "error": error })),
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    fn format_industry(report: &IndustryReport) -> String {
        let m = &report.metrics;
        let mut output = format!("# Workforce Analysis: {} {}\n\n", report.industry, report.year);

        output.push_str("| Metric | Value |\n|--------|-------|\n");
        output.push_str(&format!("| Talent Supply Score | {:.2} |\n", m.supply_score));
        output.push_str(&format!("| Talent Demand Score | {:.2} |\n", m.demand_score));
        output.push_str(&format!("| Workforce Risk Score | {:.2} ({}) |\n", m.risk_score, m.risk_level));
        output.push_str(&format!("| Internship Intake | {} |\n", m.internship_intake));
        output.push_str(&format!("| Conversion Rate | {:.2} |\n", m.conversion_rate));
        output.push_str(&format!("| Attrition Rate | {:.3} |\n", m.attrition_rate));
        output.push_str(&format!("| Growth Rate | {:.3} |\n", m.growth_rate));
        output.push_str(&format!("| Hiring Surge | {} |\n\n", surge_text(report.hiring_surge)));
        output.push_str(&format!("> {}\n\n", report.explanation));

        output.push_str("## Supply / Demand Trend\n\n| Year | Supply | Demand |\n|------|--------|--------|\n");
        for point in &report.trend {
            output.push_str(&format!("| {} | {:.2} | {:.2} |\n", point.year, point.supply, point.demand));
        }

        if let Some(companies) = &report.company_metrics {
            output.push_str("\n## Companies\n\n| Company | Risk | Level | Surge |\n|---------|------|-------|-------|\n");
            for c in companies {
                output.push_str(&format!(
                    "| {} | {:.2} | {} | {} |\n",
                    c.company,
                    c.risk_score,
                    c.risk_level,
                    surge_text(c.hiring_surge)
                ));
            }
        }

        if let Some(insights) = &report.student_insights {
            output.push_str(&format!(
                "\n## Student Outlook: {}\n\n{}\n\n**Competition:** {}. {}\n\n",
                insights.hiring_outlook,
                insights.outlook_description,
                insights.competition_level,
                insights.competition_description
            ));
            output.push_str("### Preparation Guidance\n\n");
            for line in &insights.preparation_guidance {
                output.push_str(&format!("- {}\n", line));
            }
            if let Some(switch) = &insights.industry_switch {
                output.push_str(&format!("\n**Consider {}:** {}\n", switch.target_industry, switch.reason));
            }
        }

        output
    }

    fn format_resume(result: &ResumeMatchResult) -> String {
        let mut output = format!(
            "# Resume Match\n\n**ATS Match Score:** {}% ({})\n\n",
            result.score, result.readiness
        );
        let lists = [
            ("Found Skills", &result.found_skills),
            ("Missing Critical Skills", &result.missing_core),
            ("Missing Industry Skills", &result.missing_industry),
            ("Missing Future Skills", &result.missing_future),
        ];
        for (label, skills) in lists {
            if !skills.is_empty() {
                output.push_str(&format!("**{}:** {}\n\n", label, skills.join(", ")));
            }
        }
        output.push_str("## Recommendations\n\n");
        for (i, rec) in result.recommendations.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, rec));
        }
        output
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for MarkdownFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        let output = match report {
            Report::Industry(r) => Self::format_industry(r),
            Report::Companies {
                industry,
                year,
                comparisons,
            } => {
                let mut output = format!(
                    "# Company Comparison: {} {}\n\n| Company | Supply | Demand | Risk | Level | Surge |\n|---------|--------|--------|------|-------|-------|\n",
                    industry, year
                );
                for c in comparisons {
                    let m = &c.metrics;
                    output.push_str(&format!(
                        "| {} | {:.2} | {:.2} | {:.2} | {} | {} |\n",
                        c.company,
                        m.supply_score,
                        m.demand_score,
                        m.risk_score,
                        m.risk_level,
                        surge_text(m.hiring_surge)
                    ));
                }
                output
            }
            Report::CompanyMetrics(m) => {
                let r = &m.raw;
                format!(
                    "# {} ({} {})\n\n| Metric | Value |\n|--------|-------|\n| Supply | {:.2} |\n| Demand | {:.4} |\n| Internship Intake | {:.1} |\n| Conversion Rate | {:.3} |\n| Attrition Rate | {:.3} |\n| Growth Rate | {:.4} |\n",
                    m.company,
                    m.industry,
                    m.year,
                    r.supply,
                    r.demand,
                    r.internship_intake,
                    r.conversion_rate,
                    r.attrition_rate,
                    r.growth_rate
                )
            }
            Report::Resume(r) => Self::format_resume(r),
            Report::Simulation(s) => {
                let mut output = format!(
                    "# What-if: {} {}\n\n| | Supply | Demand | Risk | Level | Surge |\n|-|--------|--------|------|-------|-------|\n",
                    s.industry, s.year
                );
                for (label, snap) in [("Baseline", &s.baseline), ("Simulated", &s.simulated)] {
                    output.push_str(&format!(
                        "| {} | {:.2} | {:.2} | {:.2} | {} | {} |\n",
                        label,
                        snap.supply_score,
                        snap.demand_score,
                        snap.risk_score,
                        snap.risk_level,
                        surge_text(snap.hiring_surge)
                    ));
                }
                output
            }
            Report::Listing { title, items } => {
                let mut output = format!("## {}\n\n", title);
                for item in items {
                    output.push_str(&format!("- {}\n", item));
                }
                output
            }
            Report::Jobs { industry, jobs } => {
                let mut output = format!("## Jobs in {}\n\n", industry);
                for job in jobs {
                    output.push_str(&format!("- **{}**: {}\n", job.title, job.core_skills.join(", ")));
                }
                output
            }
            Report::Error(error) => format!("**Error:** {}\n", error),
        };
        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new(config: &OutputConfig) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(config.color_output),
            json_formatter: JsonFormatter::new(config.pretty_json),
            markdown_formatter: MarkdownFormatter::new(),
        }
    }

    pub fn generate_report(&self, report: &Report, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}
