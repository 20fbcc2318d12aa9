//! Document annotation: tokenization, lemmas, part-of-speech tags, entities
//!
//! The pipeline consumes annotation through the narrow [`Annotator`] contract
//! so the backing model can be swapped without touching the classifiers.
//! [`LexicalAnnotator`] is the shipped implementation: a deterministic,
//! dictionary-and-heuristics annotator that covers everything the pipeline
//! actually reads from the document representation.

use crate::error::{JobInsightError, Result};
use aho_corasick::AhoCorasick;
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosTag {
    Noun,
    ProperNoun,
    Verb,
    Number,
    Other,
}

#[derive(Debug, Clone)]
pub struct Token {
    pub text: String,
    pub lemma: String,
    pub pos: PosTag,
    pub is_stop: bool,
    pub is_alpha: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityLabel {
    Organization,
    Product,
    Language,
    CreativeWork,
}

#[derive(Debug, Clone)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
}

/// Tokenized, annotated view of one job description
#[derive(Debug, Clone)]
pub struct AnnotatedDocument {
    pub text: String,
    pub tokens: Vec<Token>,
    pub entities: Vec<Entity>,
    pub sentences: Vec<String>,
}

/// Narrow contract over the annotation service
pub trait Annotator: Send + Sync {
    fn annotate(&self, text: &str) -> Result<AnnotatedDocument>;

    /// Case-insensitive multi-word phrase matching against a supplied
    /// vocabulary. Returns the lowercased vocabulary phrases found in the
    /// text, deduplicated.
    fn phrase_matches(&self, text: &str, vocabulary: &[String]) -> Result<Vec<String>>;
}

/// Split text into word-bounded chunks so annotation cost stays proportional
/// to the chunk budget rather than the full document.
pub fn chunk_text(text: &str, max_words: usize) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return Vec::new();
    }
    words
        .chunks(max_words.max(1))
        .map(|chunk| chunk.join(" "))
        .collect()
}

/// Deterministic lexical annotator
pub struct LexicalAnnotator {
    stop_words: HashSet<String>,
    chunk_words: usize,
}

impl Default for LexicalAnnotator {
    fn default() -> Self {
        Self::new(400)
    }
}

impl LexicalAnnotator {
    pub fn new(chunk_words: usize) -> Self {
        Self {
            stop_words: create_stop_words(),
            chunk_words,
        }
    }

    fn annotate_chunk(&self, chunk: &str, tokens: &mut Vec<Token>, entities: &mut Vec<Entity>) {
        let mut entity_run: Vec<String> = Vec::new();
        let mut prev_was_boundary = true;

        for word in chunk.unicode_words() {
            let lower = word.to_lowercase();
            let is_alpha = word.chars().all(|c| c.is_alphabetic());
            let is_stop = self.stop_words.contains(&lower);
            let capitalized = word.chars().next().map_or(false, |c| c.is_uppercase());

            let pos = if word.chars().all(|c| c.is_ascii_digit()) {
                PosTag::Number
            } else if !is_alpha {
                PosTag::Other
            } else if capitalized && !prev_was_boundary {
                PosTag::ProperNoun
            } else if is_stop {
                PosTag::Other
            } else if looks_like_verb(&lower) {
                PosTag::Verb
            } else {
                PosTag::Noun
            };

            // Capitalized runs away from sentence starts become entity spans
            if capitalized && is_alpha && !prev_was_boundary && !is_stop {
                entity_run.push(word.to_string());
            } else {
                flush_entity_run(&mut entity_run, entities);
            }

            tokens.push(Token {
                text: word.to_string(),
                lemma: lemmatize(&lower),
                pos,
                is_stop,
                is_alpha,
            });

            prev_was_boundary = false;
        }
        flush_entity_run(&mut entity_run, entities);
    }
}

impl Annotator for LexicalAnnotator {
    fn annotate(&self, text: &str) -> Result<AnnotatedDocument> {
        if text.trim().is_empty() {
            return Err(JobInsightError::Analysis(
                "Cannot annotate empty text".to_string(),
            ));
        }

        let mut tokens = Vec::new();
        let mut entities = Vec::new();
        for chunk in chunk_text(text, self.chunk_words) {
            self.annotate_chunk(&chunk, &mut tokens, &mut entities);
        }

        let sentences = text
            .unicode_sentences()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(AnnotatedDocument {
            text: text.to_string(),
            tokens,
            entities,
            sentences,
        })
    }

    fn phrase_matches(&self, text: &str, vocabulary: &[String]) -> Result<Vec<String>> {
        if vocabulary.is_empty() {
            return Ok(Vec::new());
        }

        let patterns: Vec<&str> = vocabulary.iter().map(|s| s.as_str()).collect();
        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(aho_corasick::MatchKind::LeftmostLongest)
            .build(&patterns)
            .map_err(|e| {
                JobInsightError::Analysis(format!("Failed to build phrase matcher: {}", e))
            })?;

        let bytes = text.as_bytes();
        let mut found = Vec::new();
        let mut seen = HashSet::new();
        for mat in matcher.find_iter(text) {
            // Token-style matching: both match edges must sit on word
            // boundaries, otherwise "r" would match inside every word.
            let before_ok = mat.start() == 0
                || !(bytes[mat.start() - 1] as char).is_alphanumeric();
            let after_ok = mat.end() == bytes.len()
                || !(bytes[mat.end()] as char).is_alphanumeric();
            if !before_ok || !after_ok {
                continue;
            }
            let phrase = vocabulary[mat.pattern().as_usize()].to_lowercase();
            if seen.insert(phrase.clone()) {
                found.push(phrase);
            }
        }
        Ok(found)
    }
}

fn flush_entity_run(run: &mut Vec<String>, entities: &mut Vec<Entity>) {
    if run.is_empty() {
        return;
    }
    let text = run.join(" ");
    let label = classify_entity(&text, run.len());
    entities.push(Entity { text, label });
    run.clear();
}

fn classify_entity(text: &str, words: usize) -> EntityLabel {
    let lower = text.to_lowercase();
    if KNOWN_LANGUAGES.contains(&lower.as_str()) {
        EntityLabel::Language
    } else if text.chars().all(|c| !c.is_lowercase()) {
        EntityLabel::Organization
    } else if words > 1 {
        EntityLabel::CreativeWork
    } else {
        EntityLabel::Product
    }
}

fn looks_like_verb(lower: &str) -> bool {
    lower.len() > 4 && (lower.ends_with("ing") || lower.ends_with("ed") || lower.ends_with("ize"))
}

/// Plural-stripping lemmatizer, sufficient for frequency ranking
fn lemmatize(lower: &str) -> String {
    if let Some(stem) = lower.strip_suffix("ies") {
        if stem.len() > 2 {
            return format!("{}y", stem);
        }
    }
    if let Some(stem) = lower.strip_suffix("es") {
        if stem.len() > 2 && (stem.ends_with('x') || stem.ends_with("ch") || stem.ends_with("sh")) {
            return stem.to_string();
        }
    }
    if let Some(stem) = lower.strip_suffix('s') {
        if stem.len() > 2 && !stem.ends_with('s') && !stem.ends_with('u') {
            return stem.to_string();
        }
    }
    lower.to_string()
}

const KNOWN_LANGUAGES: &[&str] = &[
    "python", "java", "javascript", "typescript", "ruby", "go", "rust", "swift",
    "kotlin", "scala", "php", "perl", "r", "matlab",
];

/// Common English stop words
fn create_stop_words() -> HashSet<String> {
    let stop_words = [
        "a", "an", "and", "are", "as", "at", "be", "been", "but", "by", "can",
        "could", "did", "do", "does", "for", "from", "had", "has", "have", "he",
        "her", "him", "his", "how", "if", "in", "into", "is", "it", "its",
        "just", "like", "may", "me", "might", "more", "most", "must", "my",
        "no", "not", "of", "on", "once", "only", "or", "our", "out", "over",
        "own", "she", "should", "so", "some", "such", "than", "that", "the",
        "their", "them", "then", "there", "these", "they", "this", "those",
        "through", "to", "too", "under", "until", "up", "us", "very", "was",
        "we", "were", "what", "when", "where", "which", "while", "who", "why",
        "will", "with", "would", "you", "your",
    ];

    stop_words.iter().map(|&s| s.to_string()).collect()
}
