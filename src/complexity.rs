// WHY: the gate that decides whether a page gets the "looks complex" banner
// Pure function of (text, config, lexicon): the same text always yields the same verdict

use anyhow::Result;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

use crate::config::ComplexityConfig;
use crate::lexicon::{fold_key, Lexicon, TermMatcher};
use crate::text::{count_words, SentenceSplitter};

/// Raw measurements behind a verdict
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComplexityMetrics {
    pub word_count: usize,
    pub long_word_ratio: f64,
    pub jargon_hits: usize,
    pub long_sentence_ratio: f64,
    pub advanced_words: usize,
}

/// Verdict of one analysis call
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComplexityReport {
    pub is_complex: bool,
    pub score: u32,
    /// Human-readable reason per triggered condition
    pub reasons: Vec<String>,
    pub metrics: ComplexityMetrics,
}

pub struct ComplexityAnalyzer {
    config: ComplexityConfig,
    lexicon: Arc<Lexicon>,
    jargon: TermMatcher,
    splitter: SentenceSplitter,
}

impl ComplexityAnalyzer {
    pub fn new(lexicon: Arc<Lexicon>, config: ComplexityConfig) -> Result<Self> {
        let jargon = TermMatcher::new(lexicon.jargon_terms())?;
        let splitter = SentenceSplitter::new()?;

        Ok(Self {
            config,
            lexicon,
            jargon,
            splitter,
        })
    }

    pub fn analyze(&self, text: &str) -> ComplexityReport {
        if text.chars().count() < self.config.min_text_length {
            debug!(
                chars = text.chars().count(),
                "Text below minimum length, not complex"
            );
            return ComplexityReport::default();
        }

        let words: Vec<&str> = text.split_whitespace().collect();
        let mut score = 0;
        let mut reasons = Vec::new();

        let long_words = words
            .iter()
            .filter(|word| word.chars().count() > self.config.long_word_threshold)
            .count();
        let long_word_ratio = ratio(long_words, words.len());
        if long_word_ratio > self.config.long_word_ratio {
            score += 2;
            reasons.push(format!("{}% long words", percent(long_word_ratio)));
        }

        let jargon_hits = self.distinct_jargon(text);
        if jargon_hits >= self.config.jargon_threshold {
            score += 3;
            reasons.push(format!("{jargon_hits} technical terms found"));
        }

        let sentences = self.splitter.segments(text);
        let long_sentences = sentences
            .iter()
            .filter(|sentence| count_words(sentence) > self.config.long_sentence_words)
            .count();
        let long_sentence_ratio = ratio(long_sentences, sentences.len());
        if long_sentence_ratio > self.config.long_sentence_ratio {
            score += 2;
            reasons.push(format!("{}% long sentences", percent(long_sentence_ratio)));
        }

        let advanced_words = words
            .iter()
            .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
            .filter(|word| self.lexicon.is_simplifiable(word))
            .count();
        if advanced_words > self.config.advanced_word_threshold {
            score += 1;
            reasons.push(format!("{advanced_words} complex words detected"));
        }

        let is_complex = score >= self.config.complex_score;

        debug!(
            score,
            is_complex,
            word_count = words.len(),
            jargon_hits,
            "Complexity analysis complete"
        );

        ComplexityReport {
            is_complex,
            score,
            reasons,
            metrics: ComplexityMetrics {
                word_count: words.len(),
                long_word_ratio,
                jargon_hits,
                long_sentence_ratio,
                advanced_words,
            },
        }
    }

    /// Number of distinct dictionary terms present, whole-word and case-insensitive
    fn distinct_jargon(&self, text: &str) -> usize {
        self.jargon
            .find_iter(text)
            .map(|range| fold_key(&text[range]))
            .collect::<HashSet<_>>()
            .len()
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

fn percent(ratio: f64) -> u32 {
    (ratio * 100.0).round() as u32
}
