//! The job-description analysis pipeline

pub mod engine;
pub mod experience;
pub mod role;
pub mod segmenter;
pub mod skills;

pub use engine::{AnalysisResult, JobAnalyzer};
pub use experience::ExperienceLevel;
pub use segmenter::{SectionKind, SectionMap};
