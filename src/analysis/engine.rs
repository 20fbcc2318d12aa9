//! Analysis orchestration: validation, stage sequencing, result assembly

use crate::analysis::experience::{ExperienceClassifier, ExperienceLevel};
use crate::analysis::role::RoleClassifier;
use crate::analysis::segmenter::{extract_sections, SectionMap};
use crate::analysis::skills::SkillExtractor;
use crate::config::Config;
use crate::error::{JobInsightError, Result};
use crate::lexicon::Lexicon;
use crate::model::generation::TextGenerator;
use crate::nlp::{Annotator, LexicalAnnotator};
use crate::summary::generator::{SummaryGenerator, SummarySource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

/// Complete analysis of one job description. Built fresh per call; the
/// analyzer retains nothing between analyses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub skills: Vec<String>,
    pub role: String,
    pub experience_level: ExperienceLevel,
    pub summary: String,
    pub summary_source: SummarySource,
    pub sections: SectionMap,
    pub word_count: usize,
    pub processing_time_ms: u64,
    pub analyzed_at: DateTime<Utc>,
}

/// Sequences the pipeline stages. Stage order is data-dependent: role
/// classification consumes the skill set, and summarization consumes the
/// role and experience outputs as prompt context.
pub struct JobAnalyzer {
    config: Config,
    lexicon: Arc<Lexicon>,
    annotator: Arc<dyn Annotator>,
    skill_extractor: SkillExtractor,
    role_classifier: RoleClassifier,
    experience_classifier: ExperienceClassifier,
    summarizer: SummaryGenerator,
}

impl JobAnalyzer {
    pub fn new(config: Config) -> Self {
        let annotator: Arc<dyn Annotator> =
            Arc::new(LexicalAnnotator::new(config.analysis.annotation_chunk_words));
        Self::with_annotator(config, annotator)
    }

    /// Construct with an injected annotation service; tests substitute
    /// deterministic stubs here
    pub fn with_annotator(config: Config, annotator: Arc<dyn Annotator>) -> Self {
        let lexicon = Arc::new(Lexicon::new());
        let skill_extractor = SkillExtractor::new(
            Arc::clone(&lexicon),
            config.analysis.fallback_keyword_count,
        );
        let role_classifier = RoleClassifier::new(
            Arc::clone(&lexicon),
            config.analysis.role_rules.clone(),
            config.analysis.default_role.clone(),
        );
        let summarizer = SummaryGenerator::new(Arc::clone(&lexicon), config.summary.clone());

        Self {
            config,
            lexicon,
            annotator,
            skill_extractor,
            role_classifier,
            experience_classifier: ExperienceClassifier::new(),
            summarizer,
        }
    }

    /// Attach a generative model for the summary stage; without one the
    /// summarizer starts at the extractive tier
    pub fn with_generator(mut self, generator: Box<dyn TextGenerator>) -> Self {
        let summarizer = self.summarizer;
        self.summarizer = summarizer.with_generator(generator);
        self
    }

    /// Run the full pipeline over one job description
    pub async fn analyze(&mut self, text: &str) -> Result<AnalysisResult> {
        let trimmed = text.trim();
        if trimmed.chars().count() < self.config.analysis.min_input_chars {
            return Err(JobInsightError::InvalidInput(
                "Job description text is too short or empty".to_string(),
            ));
        }

        let start = Instant::now();
        log::info!("Analyzing job description of length {}", text.chars().count());

        let doc = self.annotator.annotate(text)?;
        let skills = self.skill_extractor.extract(&doc, self.annotator.as_ref())?;
        let role = self.role_classifier.classify(text, &skills);
        let experience_level = self.experience_classifier.classify(text);
        let summary = self
            .summarizer
            .summarize(text, &role, experience_level)
            .await?;
        let sections = extract_sections(
            text,
            &self.lexicon,
            self.config.analysis.min_section_line_chars,
        );

        let result = AnalysisResult {
            skills,
            role,
            experience_level,
            summary: summary.text,
            summary_source: summary.source,
            sections,
            word_count: text.split_whitespace().count(),
            processing_time_ms: start.elapsed().as_millis() as u64,
            analyzed_at: Utc::now(),
        };

        log::info!(
            "Analysis completed: role '{}', {} skills",
            result.role,
            result.skills.len()
        );
        Ok(result)
    }
}
