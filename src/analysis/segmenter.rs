//! Section segmentation for responsibility and requirement blocks

use crate::lexicon::Lexicon;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Responsibilities,
    Requirements,
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionKind::Responsibilities => write!(f, "responsibilities"),
            SectionKind::Requirements => write!(f, "requirements"),
        }
    }
}

/// Section name mapped to its cleaned content lines, in original order. A key
/// is present only when at least one qualifying line followed its header.
pub type SectionMap = BTreeMap<SectionKind, Vec<String>>;

/// Splits the raw text into lines, tracks the current section as header
/// synonyms are encountered, and collects qualifying content lines. Header
/// lines themselves are swallowed; lines seen before any header are dropped.
/// An empty map is a valid, non-error result.
pub fn extract_sections(text: &str, lexicon: &Lexicon, min_line_chars: usize) -> SectionMap {
    let mut sections: SectionMap = BTreeMap::new();
    let mut current_section: Option<SectionKind> = None;

    for line in text.lines() {
        let clean_line = clean_line(line);
        if clean_line.is_empty() {
            continue;
        }

        let lower = clean_line.to_lowercase();

        if lexicon.responsibility_headers().iter().any(|h| lower.contains(h)) {
            current_section = Some(SectionKind::Responsibilities);
            continue;
        }
        if lexicon.requirement_headers().iter().any(|h| lower.contains(h)) {
            current_section = Some(SectionKind::Requirements);
            continue;
        }

        if let Some(section) = current_section {
            if clean_line.chars().count() > min_line_chars {
                sections.entry(section).or_default().push(clean_line);
            }
        }
    }

    log::debug!(
        "Extracted {} responsibility and {} requirement lines",
        sections.get(&SectionKind::Responsibilities).map_or(0, Vec::len),
        sections.get(&SectionKind::Requirements).map_or(0, Vec::len),
    );

    sections
}

/// Strip leading bullet and numbering characters plus surrounding whitespace
fn clean_line(line: &str) -> String {
    line.trim()
        .trim_start_matches(|c: char| {
            c.is_ascii_digit() || matches!(c, '.' | '-' | '•' | '*' | ' ' | '\t')
        })
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(text: &str) -> SectionMap {
        extract_sections(text, &Lexicon::new(), 10)
    }

    #[test]
    fn test_requirements_section_preserves_order() {
        let text = "About the position\n\
                    Requirements:\n\
                    - 5 years writing production services\n\
                    - Comfortable reviewing pull requests\n\
                    - Works well with distributed teams\n";
        let sections = segment(text);

        let requirements = sections.get(&SectionKind::Requirements).unwrap();
        assert_eq!(
            requirements,
            &vec![
                "5 years writing production services".to_string(),
                "Comfortable reviewing pull requests".to_string(),
                "Works well with distributed teams".to_string(),
            ]
        );
    }

    #[test]
    fn test_header_line_is_not_emitted_as_content() {
        let text = "Key Responsibilities\n- Ship features continuously and safely\n";
        let sections = segment(text);
        let lines = sections.get(&SectionKind::Responsibilities).unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("Ship features"));
    }

    #[test]
    fn test_lines_before_any_header_are_dropped() {
        let text = "We are an exciting startup doing exciting things\n\
                    Qualifications:\n\
                    - Excellent debugging instincts required\n";
        let sections = segment(text);
        assert!(!sections.contains_key(&SectionKind::Responsibilities));
        let requirements = sections.get(&SectionKind::Requirements).unwrap();
        assert_eq!(requirements.len(), 1);
    }

    #[test]
    fn test_short_lines_are_skipped() {
        let text = "Duties:\n- Code\n- Build resilient data pipelines\n";
        let sections = segment(text);
        let lines = sections.get(&SectionKind::Responsibilities).unwrap();
        assert_eq!(lines, &vec!["Build resilient data pipelines".to_string()]);
    }

    #[test]
    fn test_no_headers_yields_empty_map() {
        let sections = segment("Just one paragraph describing a vacancy in prose.\n");
        assert!(sections.is_empty());
    }

    #[test]
    fn test_bullet_and_numbering_stripping() {
        let text = "What you will do\n\
                    1. Design new ingestion workflows\n\
                    • Maintain existing reporting tooling\n\
                    * Mentor newer colleagues patiently\n";
        let sections = segment(text);
        let lines = sections.get(&SectionKind::Responsibilities).unwrap();
        assert_eq!(lines[0], "Design new ingestion workflows");
        assert_eq!(lines[1], "Maintain existing reporting tooling");
        assert_eq!(lines[2], "Mentor newer colleagues patiently");
    }
}
