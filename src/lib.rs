pub mod annotator;
pub mod complexity;
pub mod config;
pub mod error;
pub mod lexicon;
pub mod pipeline;
pub mod simplifier;
pub mod storage;
pub mod summarizer;
pub mod text;

// Re-export main types for convenient access
pub use annotator::{AnnotatedFragment, Annotator, Paragraph, Segment};
pub use complexity::{ComplexityAnalyzer, ComplexityMetrics, ComplexityReport};
pub use config::{ComplexityConfig, PipelineConfig, ReadingLevel, ReadingLevelProfile, Settings};
pub use error::ExplainError;
pub use lexicon::{Lexicon, TermMatcher};
pub use simplifier::{SimplificationStats, Simplifier};
pub use summarizer::{Sentence, Summarizer};
pub use text::OriginalPreview;

// Re-export the session and its collaborators for hosts
pub use pipeline::{
    DocumentModel, ExplainOutcome, ExplainReport, ExplainSession, GateDecision, PipelineState,
    RunToken, SelectionExplanation,
};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore, UsageCounters};
