//! Per-industry skill summary
//!
//! Buckets are filled positionally from the comma-separated `Top_Skills`
//! column, padded with fixed skills when the list is short. This is a plain
//! heuristic, not a taxonomy.

use crate::data::records::IndustryYearRecord;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Skill {
    pub name: String,
    pub level: &'static str,
    pub why: &'static str,
}

impl Skill {
    fn new(name: impl Into<String>, level: &'static str, why: &'static str) -> Self {
        Self {
            name: name.into(),
            level,
            why,
        }
    }
}

/// Absent positional slots serialize as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SkillSummary {
    pub core: Vec<Option<Skill>>,
    pub in_demand: Vec<Option<Skill>>,
    pub future: Vec<Option<Skill>>,
}

impl SkillSummary {
    pub fn in_demand_names(&self) -> Vec<String> {
        lowercase_names(&self.in_demand)
    }

    pub fn future_names(&self) -> Vec<String> {
        lowercase_names(&self.future)
    }
}

fn lowercase_names(skills: &[Option<Skill>]) -> Vec<String> {
    skills
        .iter()
        .flatten()
        .map(|s| s.name.to_lowercase())
        .collect()
}

/// Skill summary from the historical row for `year`, or the latest year on
/// record when that year was not observed.
pub fn skills_for_industry(historical: &[IndustryYearRecord], industry: &str, year: i32) -> SkillSummary {
    let rows: Vec<&IndustryYearRecord> = historical.iter().filter(|r| r.industry == industry).collect();
    if rows.is_empty() {
        return SkillSummary::default();
    }

    let row = rows
        .iter()
        .find(|r| r.year == year)
        .or_else(|| rows.iter().max_by_key(|r| r.year))
        .copied();

    let all: Vec<&str> = row
        .and_then(|r| r.top_skills.as_deref())
        .map(|s| s.split(',').map(str::trim).collect())
        .unwrap_or_default();

    let third = all.get(2).copied();

    SkillSummary {
        core: vec![
            all.first()
                .map(|s| Skill::new(*s, "High", "Essential foundational competency")),
            Some(Skill::new("Communication", "High", "Cross-functional collaboration")),
        ],
        in_demand: vec![
            all.get(1)
                .map(|s| Skill::new(*s, "Medium", "High-velocity technical requirement")),
            Some(Skill::new(
                if all.len() > 4 { third.unwrap_or("Data Analysis") } else { "Data Analysis" },
                "Medium",
                "Data-driven decision making",
            )),
        ],
        future: vec![
            third.map(|s| Skill::new(s, "Emerging", "Next-gen technical frontier")),
            Some(Skill::new("Cloud Architecture", "Emerging", "Scalable infrastructure expertise")),
        ],
    }
}
