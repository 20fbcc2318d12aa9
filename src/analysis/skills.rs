//! Multi-strategy skill extraction

use crate::error::Result;
use crate::lexicon::Lexicon;
use crate::nlp::{AnnotatedDocument, Annotator, PosTag};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// Identifies technical skills by running independent strategies over the
/// annotated document and merging their results. The substring scan recovers
/// nearly all lexicon hits on its own; phrase and entity matching exist so
/// the extractor can later grow beyond literal lexicon membership.
pub struct SkillExtractor {
    lexicon: Arc<Lexicon>,
    fallback_count: usize,
}

impl SkillExtractor {
    pub fn new(lexicon: Arc<Lexicon>, fallback_count: usize) -> Self {
        Self {
            lexicon,
            fallback_count,
        }
    }

    /// Returns the sorted, deduplicated union of all matched skill tokens
    pub fn extract(
        &self,
        doc: &AnnotatedDocument,
        annotator: &dyn Annotator,
    ) -> Result<Vec<String>> {
        let mut found: BTreeSet<String> = BTreeSet::new();

        // Strategy 1: exact phrase matches against the skill lexicon
        for phrase in annotator.phrase_matches(&doc.text, self.lexicon.tech_skills())? {
            found.insert(phrase);
        }

        // Strategy 2: named entities whose surface text is a known skill
        for entity in &doc.entities {
            let lower = entity.text.to_lowercase();
            if self.lexicon.is_skill(&lower) {
                found.insert(lower);
            }
        }

        // Strategy 3: literal containment scan over the full text
        let text_lower = doc.text.to_lowercase();
        for skill in self.lexicon.tech_skills() {
            if text_lower.contains(skill.as_str()) {
                found.insert(skill.clone());
            }
        }

        // Strategy 4: only when nothing matched, fall back to the most
        // frequent content-bearing lemmas as ad hoc skills
        if found.is_empty() {
            for keyword in self.fallback_keywords(doc) {
                found.insert(keyword);
            }
        }

        log::info!("Extracted {} skills", found.len());
        Ok(found.into_iter().collect())
    }

    /// Frequency-ranked noun and proper-noun lemmas. Equal counts keep
    /// first-occurrence order; the caller's final sort makes the returned
    /// set deterministic regardless.
    fn fallback_keywords(&self, doc: &AnnotatedDocument) -> Vec<String> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut order: Vec<String> = Vec::new();

        for token in &doc.tokens {
            if token.is_stop || !token.is_alpha || token.text.chars().count() <= 2 {
                continue;
            }
            if !matches!(token.pos, PosTag::Noun | PosTag::ProperNoun) {
                continue;
            }
            let lemma = token.lemma.clone();
            let count = counts.entry(lemma.clone()).or_insert(0);
            if *count == 0 {
                order.push(lemma);
            }
            *count += 1;
        }

        let mut ranked: Vec<(usize, String)> = order.into_iter().enumerate().collect();
        ranked.sort_by(|a, b| counts[&b.1].cmp(&counts[&a.1]).then(a.0.cmp(&b.0)));

        ranked
            .into_iter()
            .take(self.fallback_count)
            .map(|(_, lemma)| lemma)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::LexicalAnnotator;

    fn extract(text: &str) -> Vec<String> {
        let lexicon = Arc::new(Lexicon::new());
        let annotator = LexicalAnnotator::default();
        let doc = annotator.annotate(text).unwrap();
        SkillExtractor::new(lexicon, 5)
            .extract(&doc, &annotator)
            .unwrap()
    }

    #[test]
    fn test_lexicon_skills_found() {
        let skills = extract(
            "We need someone fluent in Python and Django, comfortable with \
             PostgreSQL and Docker deployments.",
        );
        assert!(skills.contains(&"python".to_string()));
        assert!(skills.contains(&"django".to_string()));
        assert!(skills.contains(&"postgresql".to_string()));
        assert!(skills.contains(&"docker".to_string()));
    }

    #[test]
    fn test_output_sorted_and_deduplicated() {
        let skills = extract("Python, python, PYTHON and more Python with Docker.");
        let mut sorted = skills.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(skills, sorted);
        assert_eq!(skills.iter().filter(|s| s.as_str() == "python").count(), 1);
    }

    #[test]
    fn test_multi_word_skills() {
        let skills = extract(
            "The position focuses on machine learning pipelines and deep \
             learning model serving in production.",
        );
        assert!(skills.contains(&"machine learning".to_string()));
        assert!(skills.contains(&"deep learning".to_string()));
    }

    #[test]
    fn test_substring_scan_is_literal() {
        // Single-letter lexicon entries match inside words under the
        // containment scan
        let skills = extract("Building reporting dashboards for analysts.");
        assert!(skills.contains(&"r".to_string()));
    }

    #[test]
    fn test_fallback_keyword_extraction() {
        // Crafted so no lexicon skill occurs, even as a substring: the
        // fallback ranker must supply ad hoc keywords instead.
        let skills = extract(
            "we multiply and add many little sums while silly llamas munch \
             leaves all day long",
        );
        assert!(!skills.is_empty());
        assert!(skills.len() <= 5);
        assert!(skills.contains(&"multiply".to_string()));
    }
}
