//! Narrative summary generation with validation and cascading fallbacks
//!
//! One analysis walks at most: generate -> validate -> extractive ->
//! heuristic -> clean. Every transition is a deterministic function of the
//! current candidate, no state repeats, and the final tier always produces
//! text, so the walk terminates in bounded steps.

use crate::analysis::experience::ExperienceLevel;
use crate::config::SummaryConfig;
use crate::error::Result;
use crate::lexicon::Lexicon;
use crate::model::generation::{GenerationConfig, TextGenerator};
use crate::summary::extractive::TextRankSummarizer;
use crate::summary::heuristic::{HeuristicSummarizer, DEFAULT_SUMMARY};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Which tier produced the summary candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummarySource {
    Generated,
    Extractive,
    Heuristic,
    Default,
}

impl fmt::Display for SummarySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SummarySource::Generated => "generated",
            SummarySource::Extractive => "extractive",
            SummarySource::Heuristic => "heuristic",
            SummarySource::Default => "default",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryReport {
    pub text: String,
    pub source: SummarySource,
}

/// Prefixes that betray echoed prompt scaffolding
const SCAFFOLD_PREFIXES: &[&str] = &["Write a", "Summary:", "Line 1:", "Focus on:"];

/// Literal line labels from the prompt template
const LINE_LABELS: &[&str] = &["Line 1:", "Line 2:", "Line 3:", "Line 4:"];

pub struct SummaryGenerator {
    lexicon: Arc<Lexicon>,
    config: SummaryConfig,
    generator: Option<Box<dyn TextGenerator>>,
    extractive: TextRankSummarizer,
    heuristic: HeuristicSummarizer,
    rederive_patterns: Vec<Regex>,
    sentence_split: Regex,
}

impl SummaryGenerator {
    pub fn new(lexicon: Arc<Lexicon>, config: SummaryConfig) -> Self {
        let rederive_patterns = [
            r"(?i)responsible for[^.]*\.",
            r"(?i)will[^.]*\.",
            r"(?i)develop[^.]*\.",
            r"(?i)create[^.]*\.",
            r"(?i)build[^.]*\.",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("Invalid rederive pattern"))
        .collect();

        Self {
            lexicon,
            config,
            generator: None,
            extractive: TextRankSummarizer::default(),
            heuristic: HeuristicSummarizer::new(),
            rederive_patterns,
            sentence_split: Regex::new(r"[.!?\n]+").expect("Invalid sentence split pattern"),
        }
    }

    pub fn with_generator(mut self, generator: Box<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn has_generator(&self) -> bool {
        self.generator.is_some()
    }

    /// Produce the cleaned summary plus the tier that supplied it
    pub async fn summarize(
        &mut self,
        text: &str,
        role: &str,
        level: ExperienceLevel,
    ) -> Result<SummaryReport> {
        let (candidate, source) = match self.generated_candidate(text, role, level).await {
            Some(generated) => (generated, SummarySource::Generated),
            None => self.fallback(text),
        };

        let cleaned = self.clean(&candidate, text);
        log::info!("Summary produced by {} tier", source);
        Ok(SummaryReport {
            text: cleaned,
            source,
        })
    }

    /// GENERATE state: returns a candidate only when the model call succeeds
    /// and its output survives the validation gate
    async fn generated_candidate(
        &mut self,
        text: &str,
        role: &str,
        level: ExperienceLevel,
    ) -> Option<String> {
        let generator = self.generator.as_mut()?;

        let prompt = build_prompt(text, role, level, self.config.prompt_char_budget);
        let decoding = GenerationConfig {
            max_new_tokens: self.config.max_new_tokens,
            min_new_tokens: self.config.min_new_tokens,
            beam_width: self.config.beam_width,
            repetition_penalty: self.config.repetition_penalty,
            repeat_last_n: self.config.repeat_last_n,
        };

        match generator.generate(&prompt, &decoding).await {
            Ok(result) => {
                let candidate = result.text.trim().to_string();
                if self.passes_validation(&candidate) {
                    Some(candidate)
                } else {
                    log::info!("Generated summary failed validation, using fallback");
                    None
                }
            }
            Err(e) => {
                log::warn!("Generative summarization failed: {}", e);
                None
            }
        }
    }

    /// FALLBACK states: extractive ranking first, heuristic assembly when
    /// the ranker fails, canonical default when even that yields nothing
    fn fallback(&self, text: &str) -> (String, SummarySource) {
        match self.extractive.summarize(text, self.config.sentence_count) {
            Ok(sentences) => (sentences.join("\n"), SummarySource::Extractive),
            Err(e) => {
                log::warn!("Extractive summarization failed ({}), assembling heuristically", e);
                match self.heuristic.summarize(text) {
                    Some(summary) => (summary, SummarySource::Heuristic),
                    None => (DEFAULT_SUMMARY.to_string(), SummarySource::Default),
                }
            }
        }
    }

    /// Validation gate for generated candidates
    fn passes_validation(&self, candidate: &str) -> bool {
        if SCAFFOLD_PREFIXES.iter().any(|p| candidate.starts_with(p)) {
            return false;
        }
        if candidate.contains('[') || candidate.contains(']') {
            return false;
        }
        if LINE_LABELS.iter().any(|l| candidate.contains(l)) {
            return false;
        }
        let words = candidate.split_whitespace().count();
        if words < self.config.min_summary_words {
            return false;
        }
        if candidate.chars().count() < self.config.min_summary_chars {
            return false;
        }
        true
    }

    /// CLEAN state: strip company boilerplate and raw skill tokens, keeping
    /// job-content sentences and short connective ones
    fn clean(&self, candidate: &str, original: &str) -> String {
        let mut kept: Vec<String> = Vec::new();

        for raw in self.sentence_split.split(candidate) {
            let sentence = normalize_whitespace(raw);
            if sentence.is_empty() {
                continue;
            }
            let lower = sentence.to_lowercase();

            let has_company = self
                .lexicon
                .company_markers()
                .iter()
                .any(|m| lower.contains(m.as_str()));
            let has_skill = self
                .lexicon
                .skill_markers()
                .iter()
                .any(|m| lower.contains(m.as_str()));
            if has_company || has_skill {
                continue;
            }

            let has_job = self
                .lexicon
                .job_content_markers()
                .iter()
                .any(|m| lower.contains(m.as_str()));
            if has_job || sentence.split_whitespace().count() <= 8 {
                kept.push(sentence);
            }
        }

        if kept.is_empty() {
            for pattern in &self.rederive_patterns {
                if let Some(found) = pattern.find(original) {
                    kept.push(normalize_whitespace(found.as_str()));
                    break;
                }
            }
        }
        if kept.is_empty() {
            return DEFAULT_SUMMARY.to_string();
        }

        kept.iter()
            .map(|line| ensure_terminator(line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn build_prompt(text: &str, role: &str, level: ExperienceLevel, char_budget: usize) -> String {
    let excerpt: String = text.chars().take(char_budget).collect();
    format!(
        "Write a comprehensive 3-4 line job summary for this position.\n\
         \n\
         Structure the summary with 3-4 distinct lines covering:\n\
         Line 1: Role and main responsibility\n\
         Line 2: Key duties and responsibilities\n\
         Line 3: Required experience and qualifications\n\
         Line 4: Work environment and team collaboration\n\
         \n\
         Focus on:\n\
         - Detailed role responsibilities\n\
         - Experience requirements and qualifications\n\
         - Team collaboration and project scope\n\
         - Work environment and industry focus\n\
         \n\
         Avoid:\n\
         - Company background or history\n\
         - Benefits, perks, or compensation\n\
         - Company culture or values\n\
         - Technical skills (these are listed separately)\n\
         \n\
         Job Description: {}\n\
         Role: {}\n\
         Experience Level: {}\n\
         \n\
         Summary:",
        excerpt, role, level
    )
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn ensure_terminator(line: &str) -> String {
    if line.ends_with('.') || line.ends_with('!') || line.ends_with('?') {
        line.to_string()
    } else {
        format!("{}.", line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::JobInsightError;
    use crate::model::generation::GeneratedText;
    use async_trait::async_trait;

    struct StubGenerator {
        output: String,
    }

    #[async_trait]
    impl TextGenerator for StubGenerator {
        async fn generate(
            &mut self,
            _prompt: &str,
            _config: &GenerationConfig,
        ) -> Result<GeneratedText> {
            Ok(GeneratedText {
                text: self.output.clone(),
                token_count: self.output.split_whitespace().count(),
                generation_time_ms: 1,
            })
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(
            &mut self,
            _prompt: &str,
            _config: &GenerationConfig,
        ) -> Result<GeneratedText> {
            Err(JobInsightError::Model("inference backend offline".to_string()))
        }
    }

    fn generator() -> SummaryGenerator {
        SummaryGenerator::new(Arc::new(Lexicon::new()), Config::default().summary)
    }

    const JOB_TEXT: &str = "The engineering group is expanding its platform capabilities. \
        You will be responsible for designing resilient services and improving existing \
        systems across the product. The project demands collaboration with several \
        product teams and careful attention to requirements. Candidates need solid \
        experience operating production workloads at scale.";

    #[test]
    fn test_validation_rejects_scaffolding_echo() {
        let gen = generator();
        assert!(!gen.passes_validation(
            "Line 1: The role involves building services for the data platform team daily."
        ));
        assert!(!gen.passes_validation(
            "Write a comprehensive summary describing the responsibilities of this position today."
        ));
    }

    #[test]
    fn test_validation_rejects_leaked_placeholders() {
        let gen = generator();
        assert!(!gen.passes_validation(
            "The position covers [ROLE] duties across the platform and requires long experience."
        ));
    }

    #[test]
    fn test_validation_rejects_degenerate_output() {
        let gen = generator();
        assert!(!gen.passes_validation("Too short to be a usable summary."));
    }

    #[test]
    fn test_validation_accepts_reasonable_output() {
        let gen = generator();
        assert!(gen.passes_validation(
            "The team is responsible for building and operating the order management \
             platform, supporting several internal consumers and improving reliability."
        ));
    }

    #[tokio::test]
    async fn test_line_label_output_never_surfaces_raw() {
        let poisoned = "Line 1: role overview. Line 2: duties. Line 3: experience. \
                        Line 4: environment and collaboration across multiple teams."
            .to_string();
        let mut gen = generator().with_generator(Box::new(StubGenerator { output: poisoned }));

        let report = gen
            .summarize(JOB_TEXT, "Backend Developer", ExperienceLevel::MidLevel)
            .await
            .unwrap();

        assert_ne!(report.source, SummarySource::Generated);
        assert!(!report.text.contains("Line 1:"));
    }

    #[tokio::test]
    async fn test_generator_failure_degrades_to_extractive() {
        let mut gen = generator().with_generator(Box::new(FailingGenerator));
        let report = gen
            .summarize(JOB_TEXT, "Backend Developer", ExperienceLevel::MidLevel)
            .await
            .unwrap();

        assert_eq!(report.source, SummarySource::Extractive);
        assert!(!report.text.is_empty());
    }

    #[tokio::test]
    async fn test_no_generator_goes_straight_to_fallback() {
        let mut gen = generator();
        let report = gen
            .summarize(JOB_TEXT, "Backend Developer", ExperienceLevel::MidLevel)
            .await
            .unwrap();

        assert_eq!(report.source, SummarySource::Extractive);
        assert!(report.text.ends_with('.'));
    }

    #[tokio::test]
    async fn test_good_generated_output_is_kept() {
        let good = "This position is responsible for designing the order platform and \
                    improving existing systems. The work involves close collaboration \
                    with product teams to deliver project milestones on schedule."
            .to_string();
        let mut gen = generator().with_generator(Box::new(StubGenerator { output: good }));

        let report = gen
            .summarize(JOB_TEXT, "Backend Developer", ExperienceLevel::MidLevel)
            .await
            .unwrap();

        assert_eq!(report.source, SummarySource::Generated);
        assert!(report.text.contains("responsible for designing"));
    }

    #[test]
    fn test_clean_drops_company_boilerplate() {
        let gen = generator();
        let candidate = "The company is a global leader founded in 1999. \
                         You will develop features for the ordering platform. \
                         The team supports flexible project requirements.";
        let cleaned = gen.clean(candidate, JOB_TEXT);

        assert!(!cleaned.contains("global leader"));
        assert!(cleaned.contains("develop features"));
    }

    #[test]
    fn test_clean_drops_raw_skill_tokens() {
        let gen = generator();
        let candidate = "You will develop ingestion pipelines for the project. \
                         Experience with Python and Docker is essential here.";
        let cleaned = gen.clean(candidate, JOB_TEXT);

        assert!(!cleaned.to_lowercase().contains("python"));
        assert!(cleaned.contains("ingestion pipelines"));
    }

    #[test]
    fn test_clean_rederives_when_everything_is_stripped() {
        let gen = generator();
        // Every sentence mentions boilerplate, so cleaning empties the
        // candidate and a responsibility sentence is pulled from the source
        let candidate = "We are a global leader in logistics. \
                         Our mission drives everything we ship.";
        let cleaned = gen.clean(candidate, JOB_TEXT);

        assert!(!cleaned.is_empty());
        assert!(cleaned.ends_with('.'));
    }
}
