// WHY: failures that cross the pipeline boundary get a closed set of variants
// Everything below the boundary stays on anyhow

use thiserror::Error;

/// Message shown to the reader whenever a stage fails
pub const GENERIC_FAILURE_MESSAGE: &str = "Could not process this content. Please try again.";

#[derive(Debug, Error)]
pub enum ExplainError {
    /// A pipeline stage returned an error or panicked
    #[error("{stage} stage failed: {message}")]
    StageFailed { stage: &'static str, message: String },

    /// Vocabulary patterns could not be compiled
    #[error("lexicon unavailable: {0}")]
    Lexicon(#[source] anyhow::Error),

    /// The key-value store rejected a read or write
    #[error("storage unavailable: {0}")]
    Storage(#[source] anyhow::Error),
}

impl ExplainError {
    pub fn stage_failed(stage: &'static str, message: impl Into<String>) -> Self {
        Self::StageFailed {
            stage,
            message: message.into(),
        }
    }

    /// Text suitable for the reader; internal detail stays in the logs
    pub fn user_message(&self) -> &'static str {
        GENERIC_FAILURE_MESSAGE
    }
}
