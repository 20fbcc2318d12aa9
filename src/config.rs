//! Configuration management for the job insight analyzer
//!
//! The classifier thresholds and decoding parameters are hand-tuned values;
//! they live here as data so they can be adjusted without touching pipeline
//! control flow.

use crate::error::{JobInsightError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub summary: SummaryConfig,
    pub models: ModelConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Minimum trimmed input length accepted by the pipeline
    pub min_input_chars: usize,
    /// Minimum cleaned line length for a line to count as section content
    pub min_section_line_chars: usize,
    /// Number of ad hoc keywords extracted when no lexicon skill matches
    pub fallback_keyword_count: usize,
    /// Word budget per annotation chunk
    pub annotation_chunk_words: usize,
    /// Ordered skill-composition rules; first match wins
    pub role_rules: Vec<RoleRule>,
    /// Role returned when no rule matches
    pub default_role: String,
}

/// One skill-composition rule: matches when every bucket count meets its
/// minimum. A minimum of zero places no constraint on that bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleRule {
    pub frontend_min: usize,
    pub backend_min: usize,
    pub data_min: usize,
    pub devops_min: usize,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Characters of the job text embedded in the generation prompt
    pub prompt_char_budget: usize,
    /// Sentences requested from the extractive ranker
    pub sentence_count: usize,
    /// Generated summaries shorter than this many words are rejected
    pub min_summary_words: usize,
    /// Generated summaries shorter than this many characters are rejected
    pub min_summary_chars: usize,
    pub max_new_tokens: usize,
    pub min_new_tokens: usize,
    pub beam_width: usize,
    pub repetition_penalty: f32,
    pub repeat_last_n: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub models_dir: PathBuf,
    pub default_model: String,
    pub available_models: Vec<AvailableModel>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableModel {
    pub name: String,
    pub repo_id: String,
    pub size_mb: u64,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        let models_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".job-insight")
            .join("models");

        Self {
            analysis: AnalysisConfig {
                min_input_chars: 50,
                min_section_line_chars: 10,
                fallback_keyword_count: 5,
                annotation_chunk_words: 400,
                role_rules: default_role_rules(),
                default_role: "Software Developer".to_string(),
            },
            summary: SummaryConfig {
                prompt_char_budget: 1200,
                sentence_count: 4,
                min_summary_words: 15,
                min_summary_chars: 80,
                max_new_tokens: 120,
                min_new_tokens: 50,
                beam_width: 3,
                repetition_penalty: 1.1,
                repeat_last_n: 64,
            },
            models: ModelConfig {
                models_dir,
                default_model: "flan-t5-base".to_string(),
                available_models: vec![
                    AvailableModel {
                        name: "flan-t5-small".to_string(),
                        repo_id: "google/flan-t5-small".to_string(),
                        size_mb: 310,
                        description: "Fast instruction-tuned T5 for constrained machines".to_string(),
                    },
                    AvailableModel {
                        name: "flan-t5-base".to_string(),
                        repo_id: "google/flan-t5-base".to_string(),
                        size_mb: 990,
                        description: "Default instruction-tuned T5 summarization model".to_string(),
                    },
                    AvailableModel {
                        name: "flan-t5-large".to_string(),
                        repo_id: "google/flan-t5-large".to_string(),
                        size_mb: 3100,
                        description: "Higher-quality summaries at a latency cost".to_string(),
                    },
                ],
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

/// The fixed priority table for skill-composition role inference. Order
/// matters: rules are evaluated top to bottom and the first match wins.
fn default_role_rules() -> Vec<RoleRule> {
    let rule = |fe: usize, be: usize, ds: usize, ops: usize, role: &str| RoleRule {
        frontend_min: fe,
        backend_min: be,
        data_min: ds,
        devops_min: ops,
        role: role.to_string(),
    };
    vec![
        rule(3, 3, 0, 0, "Fullstack Developer"),
        rule(2, 2, 0, 0, "Fullstack Developer"),
        rule(0, 0, 0, 3, "DevOps Engineer"),
        rule(0, 0, 2, 0, "Data Scientist"),
        rule(0, 2, 0, 0, "Backend Developer"),
        rule(2, 0, 0, 0, "Frontend Developer"),
        rule(0, 1, 0, 0, "Backend Developer"),
        rule(1, 0, 0, 0, "Frontend Developer"),
        rule(0, 0, 1, 0, "Data Scientist"),
    ]
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content).map_err(|e| {
                JobInsightError::Configuration(format!("Failed to parse config: {}", e))
            })?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            JobInsightError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("job-insight")
            .join("config.toml")
    }

    pub fn models_dir(&self) -> PathBuf {
        self.models.models_dir.clone()
    }

    pub fn ensure_models_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.models.models_dir)?;
        Ok(())
    }

    pub fn get_model_by_name(&self, name: &str) -> Option<&AvailableModel> {
        self.models.available_models.iter().find(|m| m.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let config = Config::default();
        assert_eq!(config.analysis.min_input_chars, 50);
        assert_eq!(config.analysis.min_section_line_chars, 10);
        assert_eq!(config.analysis.fallback_keyword_count, 5);
        assert_eq!(config.summary.prompt_char_budget, 1200);
        assert_eq!(config.summary.sentence_count, 4);
    }

    #[test]
    fn test_role_rule_order() {
        let config = Config::default();
        let rules = &config.analysis.role_rules;
        // Fullstack rules outrank everything else
        assert_eq!(rules[0].role, "Fullstack Developer");
        assert_eq!(rules[0].frontend_min, 3);
        assert_eq!(rules[0].backend_min, 3);
        // Single-bucket fallbacks come last
        assert_eq!(rules.last().unwrap().role, "Data Scientist");
        assert_eq!(rules.last().unwrap().data_min, 1);
    }

    #[test]
    fn test_config_round_trip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.analysis.min_input_chars, config.analysis.min_input_chars);
        assert_eq!(parsed.analysis.role_rules.len(), config.analysis.role_rules.len());
        assert_eq!(parsed.models.default_model, config.models.default_model);
    }
}
