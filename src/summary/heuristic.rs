//! Rule-based summary assembly used when ranking fails
//!
//! Four topic categories are tried in order (role, responsibilities,
//! experience, environment), each contributing at most one sentence. Missing
//! slots are padded with fixed filler lines so a usable 3-4 line summary
//! comes out even from very thin text.

use regex::Regex;

/// Returned when the text yields nothing usable at all
pub const DEFAULT_SUMMARY: &str = "Software Developer\n\
    Responsible for developing and maintaining software applications\n\
    Requires experience in software development and programming\n\
    Collaborates with cross-functional teams to deliver high-quality solutions";

const MAX_SUMMARY_LINES: usize = 4;
const MAX_FALLBACK_CHARS: usize = 400;

pub struct HeuristicSummarizer {
    role_patterns: Vec<Regex>,
    responsibility_patterns: Vec<Regex>,
    experience_patterns: Vec<Regex>,
    environment_patterns: Vec<Regex>,
    sentence_split: Regex,
}

impl Default for HeuristicSummarizer {
    fn default() -> Self {
        Self::new()
    }
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(&format!("(?i){}", p)).expect("Invalid summary pattern"))
        .collect()
}

impl HeuristicSummarizer {
    pub fn new() -> Self {
        Self {
            role_patterns: compile(&[
                r"[^.]*full stack[^.]*\.",
                r"[^.]*fullstack[^.]*\.",
                r"[^.]*software developer[^.]*\.",
                r"[^.]*engineer[^.]*\.",
            ]),
            responsibility_patterns: compile(&[
                r"[^.]*responsible for[^.]*\.",
                r"[^.]*will[^.]*\.",
                r"[^.]*develop[^.]*\.",
                r"[^.]*create[^.]*\.",
                r"[^.]*build[^.]*\.",
                r"[^.]*design[^.]*\.",
                r"[^.]*collaborate[^.]*\.",
                r"[^.]*work with[^.]*\.",
                r"[^.]*assist[^.]*\.",
                r"[^.]*support[^.]*\.",
            ]),
            experience_patterns: compile(&[
                r"[^.]*\d+\+?\s*years?[^.]*\.",
                r"[^.]*experience[^.]*\.",
                r"[^.]*qualifications[^.]*\.",
                r"[^.]*requirements[^.]*\.",
                r"[^.]*degree[^.]*\.",
            ]),
            environment_patterns: compile(&[
                r"[^.]*team[^.]*\.",
                r"[^.]*collaboration[^.]*\.",
                r"[^.]*organization[^.]*\.",
                r"[^.]*mentor[^.]*\.",
            ]),
            sentence_split: Regex::new(r"[.!?]+").expect("Invalid sentence split pattern"),
        }
    }

    /// Assemble up to four summary lines from the original text. Returns
    /// `None` when the text yields nothing usable; the caller substitutes
    /// [`DEFAULT_SUMMARY`].
    pub fn summarize(&self, text: &str) -> Option<String> {
        let mut parts: Vec<String> = Vec::new();

        let categories: [(&[Regex], usize); 4] = [
            (self.role_patterns.as_slice(), 1),
            (self.responsibility_patterns.as_slice(), 2),
            (self.experience_patterns.as_slice(), 3),
            (self.environment_patterns.as_slice(), 4),
        ];

        for (patterns, slot_limit) in categories {
            for pattern in patterns {
                if parts.len() >= slot_limit {
                    break;
                }
                if let Some(found) = pattern.find(text) {
                    parts.push(found.as_str().trim().to_string());
                }
            }
        }

        if !parts.is_empty() {
            match parts.len() {
                1 => parts.extend(FILLER_LINES.iter().map(|s| s.to_string())),
                2 => parts.extend(FILLER_LINES[1..].iter().map(|s| s.to_string())),
                _ => {}
            }
            parts.truncate(MAX_SUMMARY_LINES);
            return Some(parts.join("\n"));
        }

        // No category matched: take the first sufficiently long sentences
        let mut sentences: Vec<String> = self
            .sentence_split
            .split(text)
            .map(str::trim)
            .filter(|s| !s.is_empty() && s.chars().count() > 20)
            .take(MAX_SUMMARY_LINES)
            .map(str::to_string)
            .collect();

        if sentences.is_empty() {
            return None;
        }

        while sentences.len() < 3 {
            sentences.push("Responsible for software development and system maintenance".to_string());
        }

        let mut summary = sentences.join("\n");
        if summary.chars().count() > MAX_FALLBACK_CHARS {
            summary = summary.chars().take(MAX_FALLBACK_CHARS).collect();
        }
        Some(summary)
    }
}

const FILLER_LINES: &[&str] = &[
    "Responsible for developing and maintaining software applications",
    "Requires experience in software development and programming",
    "Collaborates with cross-functional teams to deliver solutions",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assembles_one_line_per_category() {
        let text = "We need a platform engineer for our payments stack. \
                    You will be responsible for keeping settlement flows healthy. \
                    Applicants bring 4+ years running production systems. \
                    Our team values careful code review.";
        let summary = HeuristicSummarizer::new().summarize(text).unwrap();
        let lines: Vec<&str> = summary.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("engineer"));
        assert!(lines[1].contains("responsible"));
        assert!(lines[2].contains("4+ years"));
        assert!(lines[3].contains("team"));
    }

    #[test]
    fn test_pads_missing_slots_with_filler() {
        let text = "We need a security engineer immediately for our platform.";
        let summary = HeuristicSummarizer::new().summarize(text).unwrap();
        let lines: Vec<&str> = summary.lines().collect();

        assert!(lines.len() >= 3);
        assert!(lines[0].contains("engineer"));
        assert!(lines.iter().any(|l| l.contains("cross-functional")));
    }

    #[test]
    fn test_sentence_fallback_when_no_category_matches() {
        let text = "The morning market sells vegetables and flowers to visitors. \
                    Vendors arrive early and arrange their stalls carefully.";
        let summary = HeuristicSummarizer::new().summarize(text).unwrap();
        assert!(summary.lines().count() >= 2);
        assert!(summary.contains("morning market"));
    }

    #[test]
    fn test_nothing_usable_returns_none() {
        assert!(HeuristicSummarizer::new().summarize("ok. no. hi.").is_none());
    }
}
