//! Job insight library: structured analysis of free-text job descriptions

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod lexicon;
pub mod model;
pub mod nlp;
pub mod output;
pub mod summary;

pub use analysis::{AnalysisResult, JobAnalyzer};
pub use config::Config;
pub use error::{JobInsightError, Result};
