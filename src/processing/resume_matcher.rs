//! Resume-to-job skill matching and ATS-style scoring

use crate::error::{Result, WorkforceError};
use crate::processing::text_processor::{NormalizedText, TextProcessor};
use log::debug;
use regex::Regex;
use serde::Serialize;
use std::fmt;

/// Short form ↔ long form pairs tried as alternative spellings.
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("ml", "machine learning"),
    ("ai", "artificial intelligence"),
    ("js", "javascript"),
    ("aws", "amazon web services"),
    ("genai", "generative ai"),
    ("nlp", "natural language processing"),
];

const CORE_WEIGHT: f64 = 60.0;
const INDUSTRY_WEIGHT: f64 = 30.0;
const FUTURE_WEIGHT: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReadinessLevel {
    High,
    Moderate,
    #[serde(rename = "Critical Review Needed")]
    CriticalReviewNeeded,
}

impl ReadinessLevel {
    pub fn from_score(score: u32) -> Self {
        if score >= 80 {
            ReadinessLevel::High
        } else if score >= 50 {
            ReadinessLevel::Moderate
        } else {
            ReadinessLevel::CriticalReviewNeeded
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReadinessLevel::High => "High",
            ReadinessLevel::Moderate => "Moderate",
            ReadinessLevel::CriticalReviewNeeded => "Critical Review Needed",
        }
    }
}

impl fmt::Display for ReadinessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeMatchResult {
    #[serde(rename = "ATS_Match_Score")]
    pub score: u32,
    #[serde(rename = "Readiness_Level")]
    pub readiness: ReadinessLevel,
    #[serde(rename = "Found_Skills")]
    pub found_skills: Vec<String>,
    #[serde(rename = "Missing_Critical_Skills")]
    pub missing_core: Vec<String>,
    #[serde(rename = "Missing_Industry_Skills")]
    pub missing_industry: Vec<String>,
    #[serde(rename = "Missing_Future_Skills")]
    pub missing_future: Vec<String>,
    #[serde(rename = "Recommendations")]
    pub recommendations: Vec<String>,
}

/// The three skill buckets a resume is checked against. Names are matched
/// case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct SkillTargets {
    pub core: Vec<String>,
    pub industry: Vec<String>,
    pub future: Vec<String>,
}

#[derive(Debug, Default)]
struct BucketMatch {
    total: usize,
    found: Vec<String>,
    missing: Vec<String>,
}

impl BucketMatch {
    /// Weighted share of found skills; an empty bucket earns the full weight.
    fn score(&self, weight: f64) -> f64 {
        if self.total == 0 {
            weight
        } else {
            self.found.len() as f64 / self.total as f64 * weight
        }
    }
}

pub struct ResumeMatcher {
    planning_year: i32,
}

impl ResumeMatcher {
    pub fn new(planning_year: i32) -> Self {
        Self { planning_year }
    }

    /// Spellings tried for a skill: itself plus any abbreviation partner.
    fn variants(skill: &str) -> Vec<&str> {
        let mut variants = vec![skill];
        for (short, long) in ABBREVIATIONS {
            if skill == *long {
                variants.push(short);
            }
            if skill == *short {
                variants.push(long);
            }
        }
        variants
    }

    fn contains_word(text: &NormalizedText, phrase: &str) -> Result<bool> {
        let pattern = format!(r"\b{}\b", regex::escape(phrase));
        let re = Regex::new(&pattern)
            .map_err(|e| WorkforceError::AnalysisFailed(format!("Invalid skill pattern '{}': {}", phrase, e)))?;
        Ok(re.is_match(text.as_str()))
    }

    fn check_bucket(&self, text: &NormalizedText, skills: &[String]) -> Result<BucketMatch> {
        let mut bucket = BucketMatch {
            total: skills.len(),
            ..BucketMatch::default()
        };

        for skill in skills {
            let skill = skill.to_lowercase();
            let mut matched = false;
            for variant in Self::variants(&skill) {
                if Self::contains_word(text, variant)? {
                    matched = true;
                    break;
                }
            }

            let display = TextProcessor::title_case(&skill);
            if matched {
                bucket.found.push(display);
            } else {
                bucket.missing.push(display);
            }
        }

        Ok(bucket)
    }

    /// Score normalized resume text against the skill targets.
    pub fn match_resume(&self, text: &NormalizedText, targets: &SkillTargets) -> Result<ResumeMatchResult> {
        let core = self.check_bucket(text, &targets.core)?;
        let industry = self.check_bucket(text, &targets.industry)?;
        let future = self.check_bucket(text, &targets.future)?;

        let raw = core.score(CORE_WEIGHT) + industry.score(INDUSTRY_WEIGHT) + future.score(FUTURE_WEIGHT);
        let score = raw.round_ties_even().clamp(0.0, 100.0) as u32;
        debug!(
            "Resume match: core {}/{}, industry {}/{}, future {}/{} → {}",
            core.found.len(),
            core.total,
            industry.found.len(),
            industry.total,
            future.found.len(),
            future.total,
            score
        );

        let recommendations = self.recommendations(&core, &industry, &future, score);

        Ok(ResumeMatchResult {
            score,
            readiness: ReadinessLevel::from_score(score),
            found_skills: core
                .found
                .into_iter()
                .chain(industry.found)
                .chain(future.found)
                .collect(),
            missing_core: core.missing,
            missing_industry: industry.missing,
            missing_future: future.missing,
            recommendations,
        })
    }

    fn recommendations(
        &self,
        core: &BucketMatch,
        industry: &BucketMatch,
        future: &BucketMatch,
        score: u32,
    ) -> Vec<String> {
        let mut recommendations = Vec::new();

        if !core.missing.is_empty() {
            let first_two: Vec<&str> = core.missing.iter().take(2).map(String::as_str).collect();
            recommendations.push(format!(
                "Focus on mastering core job requirements: {}.",
                first_two.join(", ")
            ));
        }
        if let Some(skill) = industry.missing.first() {
            recommendations.push(format!(
                "Enhance your industry alignment by adding projects related to {}.",
                skill
            ));
        }
        if let Some(skill) = future.missing.first() {
            recommendations.push(format!(
                "Prepare for {} hiring trends by learning {}.",
                self.planning_year, skill
            ));
        }

        recommendations.push(if score > 70 {
            "Your resume shows strong readiness for the current hiring window.".to_string()
        } else {
            "Strengthening foundational skills will significantly improve your match rate.".to_string()
        });

        recommendations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn targets() -> SkillTargets {
        SkillTargets {
            core: strings(&["Python", "SQL", "Machine Learning"]),
            industry: strings(&["cloud", "data analysis"]),
            future: strings(&["generative ai", "cloud architecture"]),
        }
    }

    fn text(raw: &str) -> NormalizedText {
        TextProcessor::normalize(raw).unwrap()
    }

    #[test]
    fn test_no_skills_scores_zero() {
        let matcher = ResumeMatcher::new(2026);
        let result = matcher.match_resume(&text("Barista with five years of latte art"), &targets()).unwrap();

        assert_eq!(result.score, 0);
        assert_eq!(result.readiness, ReadinessLevel::CriticalReviewNeeded);
        assert!(result.found_skills.is_empty());
        assert_eq!(
            result.recommendations,
            vec![
                "Focus on mastering core job requirements: Python, Sql.",
                "Enhance your industry alignment by adding projects related to Cloud.",
                "Prepare for 2026 hiring trends by learning Generative Ai.",
                "Strengthening foundational skills will significantly improve your match rate.",
            ]
        );
    }

    #[test]
    fn test_all_skills_scores_hundred() {
        let matcher = ResumeMatcher::new(2026);
        let resume = "Python, SQL and ML. Cloud data analysis. GenAI on a cloud architecture.";
        let result = matcher.match_resume(&text(resume), &targets()).unwrap();

        assert_eq!(result.score, 100);
        assert_eq!(result.readiness, ReadinessLevel::High);
        assert_eq!(result.found_skills.len(), 7);
        assert!(result.missing_core.is_empty());
        assert_eq!(
            result.recommendations,
            vec!["Your resume shows strong readiness for the current hiring window."]
        );
    }

    #[test]
    fn test_empty_buckets_get_full_weight() {
        let matcher = ResumeMatcher::new(2026);
        let targets = SkillTargets {
            core: strings(&["rust", "go"]),
            ..SkillTargets::default()
        };
        let result = matcher.match_resume(&text("I write Rust"), &targets).unwrap();

        // 30 + 30 + 10
        assert_eq!(result.score, 70);
        assert_eq!(result.readiness, ReadinessLevel::Moderate);
        assert_eq!(result.found_skills, vec!["Rust"]);
        assert_eq!(result.missing_core, vec!["Go"]);
        assert_eq!(
            result.recommendations.last().map(String::as_str),
            Some("Strengthening foundational skills will significantly improve your match rate.")
        );
    }

    #[test]
    fn test_whole_word_matching() {
        let matcher = ResumeMatcher::new(2026);
        let targets = SkillTargets {
            core: strings(&["go", "r"]),
            ..SkillTargets::default()
        };
        let result = matcher.match_resume(&text("Google and React developer"), &targets).unwrap();
        assert_eq!(result.missing_core, vec!["Go", "R"]);
    }

    #[test]
    fn test_abbreviations_work_both_ways() {
        let matcher = ResumeMatcher::new(2026);
        let targets = SkillTargets {
            core: strings(&["ai", "natural language processing", "aws"]),
            ..SkillTargets::default()
        };
        let result = matcher
            .match_resume(&text("Artificial Intelligence, NLP and Amazon Web Services"), &targets)
            .unwrap();
        assert_eq!(result.found_skills, vec!["Ai", "Natural Language Processing", "Aws"]);
        assert_eq!(result.score, 100);
    }

    #[test]
    fn test_score_rounds_half_to_even() {
        let matcher = ResumeMatcher::new(2026);
        // core 1/8 → 7.5, industry/future empty → 40; total 47.5 → 48
        let targets = SkillTargets {
            core: strings(&["a1", "b2", "c3", "d4", "e5", "f6", "g7", "h8"]),
            ..SkillTargets::default()
        };
        let result = matcher.match_resume(&text("a1"), &targets).unwrap();
        assert_eq!(result.score, 48);

        // core 3/16 → 11.25, +40 → 51.25 → 51
        let targets = SkillTargets {
            core: (0..16).map(|i| format!("s{}", i)).collect(),
            ..SkillTargets::default()
        };
        let result = matcher.match_resume(&text("s0 s1 s2"), &targets).unwrap();
        assert_eq!(result.score, 51);
    }

    #[test]
    fn test_readiness_thresholds() {
        assert_eq!(ReadinessLevel::from_score(80), ReadinessLevel::High);
        assert_eq!(ReadinessLevel::from_score(79), ReadinessLevel::Moderate);
        assert_eq!(ReadinessLevel::from_score(50), ReadinessLevel::Moderate);
        assert_eq!(ReadinessLevel::from_score(49), ReadinessLevel::CriticalReviewNeeded);
    }
}
