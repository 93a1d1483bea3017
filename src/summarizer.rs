// WHY: extractive summary sized to the reading level
// Sentences are ranked by term frequency but always returned in document order

use anyhow::Result;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::config::ReadingLevelProfile;
use crate::lexicon::Lexicon;
use crate::text::{fallback_lines, SentenceSplitter};

/// Sentences at or below this many characters are treated as headers or labels
pub const MIN_SENTENCE_CHARS: usize = 10;

/// Fraction of the document that counts as the lead
const LEAD_FRACTION: f64 = 0.3;
/// Sentences past this fraction count as the conclusion
const CONCLUSION_FRACTION: f64 = 0.7;
const LEAD_BOOST: f64 = 1.5;
const CONCLUSION_BOOST: f64 = 1.2;

/// A scored sentence borrowed from the page text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sentence<'a> {
    /// Position among qualifying sentences, in document order
    pub index: usize,
    pub text: &'a str,
    pub score: f64,
}

pub struct Summarizer {
    lexicon: Arc<Lexicon>,
    splitter: SentenceSplitter,
}

impl Summarizer {
    pub fn new(lexicon: Arc<Lexicon>) -> Result<Self> {
        Ok(Self {
            lexicon,
            splitter: SentenceSplitter::new()?,
        })
    }

    /// Pick the top `summary_sentence_count` sentences and return them in document order.
    /// Returns an empty list when no terminated sentence qualifies.
    pub fn summarize<'a>(&self, text: &'a str, profile: ReadingLevelProfile) -> Vec<Sentence<'a>> {
        let candidates: Vec<&'a str> = self
            .splitter
            .terminated_sentences(text)
            .into_iter()
            .map(|span| span.raw())
            .filter(|sentence| sentence.chars().count() > MIN_SENTENCE_CHARS)
            .collect();

        if candidates.is_empty() {
            debug!("No qualifying sentences found");
            return Vec::new();
        }

        let content: Vec<Vec<String>> = candidates
            .iter()
            .map(|sentence| self.content_words(sentence))
            .collect();

        let mut frequencies: HashMap<&str, usize> = HashMap::new();
        for word in content.iter().flatten() {
            *frequencies.entry(word.as_str()).or_insert(0) += 1;
        }

        let total = candidates.len() as f64;
        let mut scored: Vec<Sentence<'a>> = candidates
            .iter()
            .zip(&content)
            .enumerate()
            .map(|(index, (text, words))| {
                let density = if words.is_empty() {
                    0.0
                } else {
                    let sum: usize = words.iter().map(|w| frequencies[w.as_str()]).sum();
                    sum as f64 / (words.len() as f64).sqrt()
                };
                Sentence {
                    index,
                    text,
                    score: density * position_boost(index, total),
                }
            })
            .collect();

        // WHY: equal scores resolve to the earlier sentence so selection is deterministic
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then(a.index.cmp(&b.index))
        });
        scored.truncate(profile.summary_sentence_count);
        scored.sort_by_key(|sentence| sentence.index);

        debug!(
            candidates = candidates.len(),
            selected = scored.len(),
            "Summarization complete"
        );
        scored
    }

    /// Degraded summary for text without sentence punctuation
    pub fn fallback<'a>(&self, text: &'a str, profile: ReadingLevelProfile) -> Vec<&'a str> {
        fallback_lines(text, profile.summary_sentence_count)
    }

    /// Lower-cased words with punctuation stripped, minus stop words and words under 3 characters
    fn content_words(&self, sentence: &str) -> Vec<String> {
        let cleaned: String = sentence
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '_' { c } else { ' ' })
            .collect();

        cleaned
            .split_whitespace()
            .filter(|word| word.chars().count() > 2 && !self.lexicon.is_stop_word(word))
            .map(str::to_string)
            .collect()
    }
}

fn position_boost(index: usize, total: f64) -> f64 {
    let position = index as f64;
    if position < total * LEAD_FRACTION {
        LEAD_BOOST
    } else if position > total * CONCLUSION_FRACTION {
        CONCLUSION_BOOST
    } else {
        1.0
    }
}
