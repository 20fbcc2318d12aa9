//! Experience-level detection from year counts and seniority keywords

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed ordered seniority bands. `MidLevel` is the default when the text
/// carries no signal at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExperienceLevel {
    #[serde(rename = "Intern")]
    Intern,
    #[serde(rename = "Junior (0-2 years)")]
    Junior,
    #[serde(rename = "Mid-level (3-5 years)")]
    MidLevel,
    #[serde(rename = "Senior (6-8 years)")]
    Senior,
    #[serde(rename = "Principal/Lead (8+ years)")]
    Principal,
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExperienceLevel::Intern => "Intern",
            ExperienceLevel::Junior => "Junior (0-2 years)",
            ExperienceLevel::MidLevel => "Mid-level (3-5 years)",
            ExperienceLevel::Senior => "Senior (6-8 years)",
            ExperienceLevel::Principal => "Principal/Lead (8+ years)",
        };
        write!(f, "{}", label)
    }
}

/// Keyword lists tried in priority order when no explicit year count exists
const LEVEL_KEYWORDS: &[(ExperienceLevel, &[&str])] = &[
    (ExperienceLevel::Intern, &["intern", "internship", "trainee", "student"]),
    (ExperienceLevel::Junior, &["junior", "entry", "fresher", "graduate", "new grad"]),
    (ExperienceLevel::MidLevel, &["mid-level", "intermediate", "regular", "experienced"]),
    (ExperienceLevel::Senior, &["senior", "sr.", "lead", "experienced"]),
    (ExperienceLevel::Principal, &["principal", "staff", "architect", "director", "head of", "vp", "chief"]),
];

pub struct ExperienceClassifier {
    year_patterns: Vec<Regex>,
}

impl Default for ExperienceClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ExperienceClassifier {
    pub fn new() -> Self {
        let year_patterns = [
            r"(?i)(\d+)\+?\s*years?",
            r"(?i)(\d+)\+?\s*yrs?",
            r"(?i)(\d+)\s*to\s*(\d+)\s*years?",
            r"(?i)(\d+)\+?\s*years?\s*of\s*experience",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("Invalid year pattern"))
        .collect();

        Self { year_patterns }
    }

    /// Always produces exactly one level
    pub fn classify(&self, text: &str) -> ExperienceLevel {
        let mut years_found: Vec<u32> = Vec::new();
        for pattern in &self.year_patterns {
            for captures in pattern.captures_iter(text) {
                for group in captures.iter().skip(1).flatten() {
                    if let Ok(years) = group.as_str().parse::<u32>() {
                        years_found.push(years);
                    }
                }
            }
        }

        if let Some(max_years) = years_found.into_iter().max() {
            return match max_years {
                0..=2 => ExperienceLevel::Junior,
                3..=5 => ExperienceLevel::MidLevel,
                6..=8 => ExperienceLevel::Senior,
                _ => ExperienceLevel::Principal,
            };
        }

        let lower = text.to_lowercase();
        for (level, keywords) in LEVEL_KEYWORDS {
            if keywords.iter().any(|k| lower.contains(k)) {
                return *level;
            }
        }

        ExperienceLevel::MidLevel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> ExperienceLevel {
        ExperienceClassifier::new().classify(text)
    }

    #[test]
    fn test_five_plus_years_maps_to_mid_level() {
        assert_eq!(
            classify("Candidates need 5+ years of experience shipping software."),
            ExperienceLevel::MidLevel
        );
    }

    #[test]
    fn test_ten_years_maps_to_principal() {
        assert_eq!(
            classify("We expect 10 years experience building platforms."),
            ExperienceLevel::Principal
        );
    }

    #[test]
    fn test_year_range_uses_maximum() {
        assert_eq!(
            classify("Looking for 3 to 7 years in production environments."),
            ExperienceLevel::Senior
        );
    }

    #[test]
    fn test_numeric_signal_outranks_keywords() {
        // "senior" appears but the explicit year count decides
        assert_eq!(
            classify("Senior title, though 2 years of exposure suffices."),
            ExperienceLevel::Junior
        );
    }

    #[test]
    fn test_keyword_priority_order() {
        // Intern keywords win over senior ones when no year count exists
        assert_eq!(
            classify("An internship supporting our senior platform group."),
            ExperienceLevel::Intern
        );
        assert_eq!(classify("A senior position on the platform team."), ExperienceLevel::Senior);
    }

    #[test]
    fn test_defaults_to_mid_level() {
        assert_eq!(
            classify("A friendly workplace doing interesting projects."),
            ExperienceLevel::MidLevel
        );
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(ExperienceLevel::Junior.to_string(), "Junior (0-2 years)");
        assert_eq!(ExperienceLevel::MidLevel.to_string(), "Mid-level (3-5 years)");
        assert_eq!(ExperienceLevel::Principal.to_string(), "Principal/Lead (8+ years)");
    }
}
