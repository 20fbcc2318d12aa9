//! CLI interface for the job insight analyzer

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "job-insight")]
#[command(about = "NLP-powered job description analysis tool")]
#[command(
    long_about = "Extract skills, role type, seniority level, section breakdown and a \
                  narrative summary from free-text job descriptions"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a job description file
    Analyze {
        /// Path to the job description (TXT, MD)
        #[arg(short, long)]
        input: PathBuf,

        /// Generation model to use for the summary
        #[arg(short, long)]
        model: Option<String>,

        /// Skip the generative model (extractive summarization only)
        #[arg(long)]
        no_model: bool,

        /// Output format: console, json, markdown
        #[arg(short, long, default_value = "console")]
        output: String,

        /// Save the report to a file instead of printing it
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Include processing statistics in console output
        #[arg(short, long)]
        detailed: bool,
    },

    /// Model management commands
    Models {
        #[command(subcommand)]
        action: ModelAction,
    },

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ModelAction {
    /// List available generation models
    List,

    /// Download a model by name
    Download {
        /// Model name from the registry
        name: String,
    },

    /// Remove a downloaded model
    Remove {
        /// Model name from the registry
        name: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the active configuration
    Show,

    /// Restore the default configuration
    Reset,
}

/// Parse an output format name from the command line
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        other => Err(format!(
            "Unknown output format '{}'. Expected console, json or markdown",
            other
        )),
    }
}

/// Check a file extension against the allowed set
pub fn validate_file_extension(path: &PathBuf, allowed: &[&str]) -> Result<(), String> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| format!("File '{}' has no extension", path.display()))?;

    if allowed.contains(&extension.as_str()) {
        Ok(())
    } else {
        Err(format!(
            "Unsupported file type '.{}'. Expected one of: {}",
            extension,
            allowed.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("console").unwrap(), OutputFormat::Console);
        assert_eq!(parse_output_format("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(parse_output_format("md").unwrap(), OutputFormat::Markdown);
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        let path = PathBuf::from("job.txt");
        assert!(validate_file_extension(&path, &["txt", "md"]).is_ok());

        let path = PathBuf::from("job.docx");
        assert!(validate_file_extension(&path, &["txt", "md"]).is_err());

        let path = PathBuf::from("job");
        assert!(validate_file_extension(&path, &["txt", "md"]).is_err());
    }
}
