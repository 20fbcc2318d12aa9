//! Summary generation with cascading fallbacks

pub mod extractive;
pub mod generator;
pub mod heuristic;

pub use extractive::TextRankSummarizer;
pub use generator::{SummaryGenerator, SummaryReport, SummarySource};
pub use heuristic::HeuristicSummarizer;
