//! Student-facing reading of an industry row: outlook, competition,
//! preparation guidance and an optional industry switch

use crate::analysis::pipeline::ScoredDataset;
use crate::analysis::skills::{skills_for_industry, SkillSummary};
use crate::analysis::surge::{hiring_surge, SurgeWindow};
use crate::data::records::ScoredRecord;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HiringOutlook {
    Excellent,
    Favorable,
    Promising,
    Moderate,
    Competitive,
    #[serde(rename = "Niche-only")]
    NicheOnly,
}

impl HiringOutlook {
    pub fn as_str(&self) -> &'static str {
        match self {
            HiringOutlook::Excellent => "Excellent",
            HiringOutlook::Favorable => "Favorable",
            HiringOutlook::Promising => "Promising",
            HiringOutlook::Moderate => "Moderate",
            HiringOutlook::Competitive => "Competitive",
            HiringOutlook::NicheOnly => "Niche-only",
        }
    }
}

impl fmt::Display for HiringOutlook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CompetitionLevel {
    #[serde(rename = "Hyper-Competitive")]
    HyperCompetitive,
    Selective,
    #[serde(rename = "High Opportunity")]
    HighOpportunity,
    #[serde(rename = "Growth-led")]
    GrowthLed,
    Balanced,
}

impl CompetitionLevel {
    /// Classify by the demand − supply score gap.
    pub fn from_gap(gap: f64, growth_rate: f64) -> Self {
        if gap < -30.0 {
            CompetitionLevel::HyperCompetitive
        } else if gap < -15.0 {
            CompetitionLevel::Selective
        } else if gap > 20.0 {
            CompetitionLevel::HighOpportunity
        } else if gap > 5.0 || (gap > 0.0 && growth_rate > 0.08) {
            CompetitionLevel::GrowthLed
        } else {
            CompetitionLevel::Balanced
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompetitionLevel::HyperCompetitive => "Hyper-Competitive",
            CompetitionLevel::Selective => "Selective",
            CompetitionLevel::HighOpportunity => "High Opportunity",
            CompetitionLevel::GrowthLed => "Growth-led",
            CompetitionLevel::Balanced => "Balanced",
        }
    }

    fn describe(&self, industry: &str) -> String {
        match self {
            CompetitionLevel::HyperCompetitive => format!(
                "Market saturation in {industry} is high. Generalist roles are extremely contested; focus on distinct technical edge cases."
            ),
            CompetitionLevel::Selective => format!(
                "Applicant supply in {industry} outpaces standard demand. Focus on highly specialized niches to stand out from the general pool."
            ),
            CompetitionLevel::HighOpportunity => format!(
                "Significant talent shortage in {industry}. Employers are actively competing for graduates with core competencies."
            ),
            CompetitionLevel::GrowthLed => format!(
                "Emerging demand in {industry} is creating new vacancies faster than they can be filled. Early entry is highly advantageous."
            ),
            CompetitionLevel::Balanced => format!(
                "Stable talent equilibrium in {industry}. Typical recruitment cycles; standard qualifications and strong portfolios are the keys to success."
            ),
        }
    }
}

impl fmt::Display for CompetitionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndustrySwitch {
    #[serde(rename = "Target_Industry")]
    pub target_industry: String,
    #[serde(rename = "Reason")]
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentInsights {
    #[serde(rename = "Hiring_Outlook")]
    pub hiring_outlook: HiringOutlook,
    #[serde(rename = "Outlook_Description")]
    pub outlook_description: String,
    #[serde(rename = "Competition_Level")]
    pub competition_level: CompetitionLevel,
    #[serde(rename = "Competition_Description")]
    pub competition_description: String,
    #[serde(rename = "Preparation_Guidance")]
    pub preparation_guidance: Vec<String>,
    #[serde(rename = "Industry_Switch")]
    pub industry_switch: Option<IndustrySwitch>,
    #[serde(rename = "Skills")]
    pub skills: SkillSummary,
}

pub fn student_insights(row: &ScoredRecord, dataset: &ScoredDataset, planning_year: i32) -> StudentInsights {
    let industry = row.industry();
    let (hiring_outlook, outlook_description) = outlook(row);
    let competition_level = CompetitionLevel::from_gap(row.gap(), row.record.growth_rate);

    StudentInsights {
        hiring_outlook,
        outlook_description,
        competition_level,
        competition_description: competition_level.describe(industry),
        preparation_guidance: guidance(row, competition_level, planning_year),
        industry_switch: industry_switch(row, dataset),
        skills: skills_for_industry(dataset.historical(), industry, row.year()),
    }
}

fn outlook(row: &ScoredRecord) -> (HiringOutlook, String) {
    let industry = row.industry();
    let growth = row.record.growth_rate;
    let conversion = row.record.conversion_rate;

    if row.risk_score <= 30.0 && row.demand_score >= 60.0 {
        let level = if growth > 0.08 {
            HiringOutlook::Excellent
        } else {
            HiringOutlook::Favorable
        };
        let description = if growth > 0.05 {
            format!("Rapidly expanding {industry} market. Strong demand combined with high growth makes this an ideal entry point for early-career professionals.")
        } else {
            format!("Stable and favorable {industry} outlook. Consistent hiring and low risk provide a secure career trajectory.")
        };
        (level, description)
    } else if row.risk_score <= 55.0 {
        let level = if conversion > 0.8 {
            HiringOutlook::Promising
        } else {
            HiringOutlook::Moderate
        };
        let description = if conversion > 0.75 {
            "Balanced market with high internship-to-job conversion. Competition exists, but focus on hands-on experience as a primary differentiator.".to_string()
        } else {
            format!("Transitional {industry} market. Evolving industry requirements mean students should focus on both traditional and emerging skills to stay relevant.")
        };
        (level, description)
    } else {
        let level = if row.risk_score > 85.0 {
            HiringOutlook::NicheOnly
        } else {
            HiringOutlook::Competitive
        };
        (
            level,
            format!("High-bar entry environment in {industry}. Success requires elite technical specializations and a strong professional network to bypass standard filters."),
        )
    }
}

fn guidance(row: &ScoredRecord, competition: CompetitionLevel, planning_year: i32) -> Vec<String> {
    let mut lines = Vec::with_capacity(4);

    lines.push(
        match hiring_surge(row, planning_year) {
            Some(SurgeWindow::Immediate) => {
                "Immediate Action: Finalize your portfolio and start applying now to catch the upcoming hiring peak."
            }
            Some(SurgeWindow::NearTerm) => {
                "Strategic Prep: Use the next quarter to master 1-2 'In-Demand' skills before the surge begins."
            }
            _ => "Plan Ahead: Aim for foundational certifications and early internships to build a long-term lead.",
        }
        .to_string(),
    );

    match competition {
        CompetitionLevel::HyperCompetitive | CompetitionLevel::Selective => lines.push(
            "Differentiation: Focus on multi-disciplinary projects to stand out in a crowded applicant pool.".to_string(),
        ),
        CompetitionLevel::HighOpportunity | CompetitionLevel::GrowthLed => lines.push(
            "Speed-to-Market: Optimize your LinkedIn and resume for rapid technical screening.".to_string(),
        ),
        CompetitionLevel::Balanced => {}
    }

    lines.push(format!(
        "Network Strategy: Connect with 3-5 professionals currently in {} to understand team culture.",
        row.industry()
    ));

    lines.push(
        if row.record.conversion_rate > 0.7 {
            "Internship Focus: Target top-tier internships here, as conversion rates to full-time roles are exceptional."
        } else {
            "Broaden Search: Diversify your applications beyond just internships to include direct entry-level roles."
        }
        .to_string(),
    );

    lines
}

/// Best other industry in the same year by demand − risk, if it beats the
/// current one.
fn industry_switch(row: &ScoredRecord, dataset: &ScoredDataset) -> Option<IndustrySwitch> {
    let current = row.demand_score - row.risk_score;
    let mut best: Option<(&str, f64)> = None;

    for candidate in dataset.industries().filter(|name| *name != row.industry()) {
        let Some(other) = dataset.find(candidate, row.year()) else {
            continue;
        };
        let diff = other.demand_score - other.risk_score;
        if best.map_or(true, |(_, best_diff)| diff > best_diff) {
            best = Some((candidate, diff));
        }
    }

    best.filter(|(_, diff)| *diff > current).map(|(name, _)| IndustrySwitch {
        target_industry: name.to_string(),
        reason: format!("{name} offers stronger opportunities with a better demand-to-risk ratio."),
    })
}
