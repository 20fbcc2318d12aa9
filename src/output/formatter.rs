//! Output formatters for analysis reports

use crate::analysis::engine::AnalysisResult;
use crate::config::OutputFormat;
use crate::error::Result;
use colored::Colorize;

/// Trait for formatting analysis results
pub trait OutputFormatter {
    fn format_report(&self, result: &AnalysisResult) -> Result<String>;
}

/// Console formatter with colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            use_colors,
            detailed,
        }
    }

    fn heading(&self, text: &str) -> String {
        if self.use_colors {
            text.bold().cyan().to_string()
        } else {
            text.to_string()
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, result: &AnalysisResult) -> Result<String> {
        let mut out = String::new();

        out.push_str(&self.heading("Job Description Analysis"));
        out.push_str("\n\n");

        out.push_str(&format!("{} {}\n", self.heading("Role:"), result.role));
        out.push_str(&format!(
            "{} {}\n",
            self.heading("Experience:"),
            result.experience_level
        ));

        out.push_str(&format!("\n{}\n", self.heading("Skills")));
        if result.skills.is_empty() {
            out.push_str("  (none found)\n");
        } else {
            for skill in &result.skills {
                out.push_str(&format!("  - {}\n", skill));
            }
        }

        out.push_str(&format!("\n{}\n", self.heading("Summary")));
        for line in result.summary.lines() {
            out.push_str(&format!("  {}\n", line));
        }

        for (section, lines) in &result.sections {
            out.push_str(&format!("\n{}\n", self.heading(&section.to_string())));
            for line in lines {
                out.push_str(&format!("  - {}\n", line));
            }
        }

        if self.detailed {
            out.push_str(&format!(
                "\n{} {} words, {} ms, summary via {} tier\n",
                self.heading("Stats:"),
                result.word_count,
                result.processing_time_ms,
                result.summary_source
            ));
        }

        Ok(out)
    }
}

/// JSON formatter for structured consumers
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, result: &AnalysisResult) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(result)?
        } else {
            serde_json::to_string(result)?
        };
        Ok(json)
    }
}

/// Markdown formatter for documentation and sharing
pub struct MarkdownFormatter;

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, result: &AnalysisResult) -> Result<String> {
        let mut out = String::new();

        out.push_str("# Job Description Analysis\n\n");
        out.push_str(&format!("- **Role**: {}\n", result.role));
        out.push_str(&format!("- **Experience**: {}\n", result.experience_level));
        out.push_str(&format!(
            "- **Analyzed**: {}\n\n",
            result.analyzed_at.format("%Y-%m-%d %H:%M UTC")
        ));

        out.push_str("## Skills\n\n");
        if result.skills.is_empty() {
            out.push_str("_None found._\n");
        } else {
            for skill in &result.skills {
                out.push_str(&format!("- {}\n", skill));
            }
        }

        out.push_str("\n## Summary\n\n");
        for line in result.summary.lines() {
            out.push_str(&format!("> {}\n", line));
        }

        for (section, lines) in &result.sections {
            out.push_str(&format!("\n## {}\n\n", capitalize(&section.to_string())));
            for line in lines {
                out.push_str(&format!("- {}\n", line));
            }
        }

        Ok(out)
    }
}

/// Coordinates the configured formatters
pub struct ReportGenerator {
    console: ConsoleFormatter,
    json: JsonFormatter,
    markdown: MarkdownFormatter,
}

impl ReportGenerator {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            console: ConsoleFormatter::new(use_colors, detailed),
            json: JsonFormatter::new(true),
            markdown: MarkdownFormatter,
        }
    }

    pub fn format(&self, result: &AnalysisResult, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console.format_report(result),
            OutputFormat::Json => self.json.format_report(result),
            OutputFormat::Markdown => self.markdown.format_report(result),
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
