// WHY: every tunable threshold lives here so analysis stays deterministic for a given config
// Defaults mirror the behaviour users already know from the browser extension

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Named reading level selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReadingLevel {
    Elementary,
    #[default]
    Middle,
    High,
}

/// Sentence length and summary size for one reading level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingLevelProfile {
    /// Chunks longer than this many words get split
    pub max_sentence_words: usize,
    /// Number of sentences kept by the summarizer
    pub summary_sentence_count: usize,
}

impl ReadingLevel {
    pub const ALL: [ReadingLevel; 3] = [Self::Elementary, Self::Middle, Self::High];

    pub fn profile(self) -> ReadingLevelProfile {
        match self {
            Self::Elementary => ReadingLevelProfile {
                max_sentence_words: 10,
                summary_sentence_count: 2,
            },
            Self::Middle => ReadingLevelProfile {
                max_sentence_words: 15,
                summary_sentence_count: 3,
            },
            Self::High => ReadingLevelProfile {
                max_sentence_words: 22,
                summary_sentence_count: 4,
            },
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Elementary => "elementary",
            Self::Middle => "middle",
            Self::High => "high",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Elementary => "Very simple words and short sentences",
            Self::Middle => "Moderate complexity with clear explanations",
            Self::High => "Standard complexity with detailed information",
        }
    }

    /// Lenient lookup for stored settings: unknown keys fall back to middle
    pub fn from_key_or_default(key: &str) -> Self {
        key.parse().unwrap_or_default()
    }
}

impl FromStr for ReadingLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "elementary" => Ok(Self::Elementary),
            "middle" => Ok(Self::Middle),
            "high" => Ok(Self::High),
            other => Err(format!(
                "unknown reading level '{other}' (expected elementary, middle or high)"
            )),
        }
    }
}

impl fmt::Display for ReadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Thresholds for the complexity gate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplexityConfig {
    /// Texts shorter than this (in characters) are never complex
    pub min_text_length: usize,
    /// A word longer than this many characters counts as long
    pub long_word_threshold: usize,
    /// Long-word ratio above which +2 is scored
    pub long_word_ratio: f64,
    /// Distinct jargon terms needed for +3
    pub jargon_threshold: usize,
    /// A sentence with more words than this counts as long
    pub long_sentence_words: usize,
    /// Long-sentence ratio above which +2 is scored
    pub long_sentence_ratio: f64,
    /// More lexicon words than this scores +1
    pub advanced_word_threshold: usize,
    /// Score at or above which a page is complex
    pub complex_score: u32,
}

impl Default for ComplexityConfig {
    fn default() -> Self {
        Self {
            min_text_length: 300,
            long_word_threshold: 8,
            long_word_ratio: 0.15,
            jargon_threshold: 3,
            long_sentence_words: 25,
            long_sentence_ratio: 0.3,
            advanced_word_threshold: 5,
            complex_score: 3,
        }
    }
}

/// Configuration for one explain session
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Pause before a run starts summarizing
    pub pacing_delay: Duration,
    /// Pages with less trimmed text than this have nothing to explain
    pub min_explain_chars: usize,
    pub complexity: ComplexityConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            // WHY: matches the UX pacing of the overlay's loading state
            pacing_delay: Duration::from_millis(800),
            min_explain_chars: 50,
            complexity: ComplexityConfig::default(),
        }
    }
}

/// User settings read once per run from the settings store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub reading_level: ReadingLevel,
    pub auto_detect: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reading_level: ReadingLevel::Middle,
            auto_detect: true,
        }
    }
}
