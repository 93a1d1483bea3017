// WHY: rewrites one summary sentence into plain-language chunks
// Word substitutions are counted per match; phrase rewrites are cosmetic and not counted

use anyhow::{Context, Result};
use regex_automata::meta::Regex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::config::ReadingLevelProfile;
use crate::lexicon::data::BREAK_CONJUNCTIONS;
use crate::lexicon::{Lexicon, TermMatcher};
use crate::text::{count_words, normalize_whitespace};

/// Per-run counters threaded through simplification and annotation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplificationStats {
    pub words_simplified: usize,
    pub jargon_explained: usize,
}

pub struct Simplifier {
    lexicon: Arc<Lexicon>,
    words: TermMatcher,
    phrases: TermMatcher,
    /// Commas, semicolons, or a conjunction surrounded by whitespace
    natural_breaks: Regex,
}

impl Simplifier {
    pub fn new(lexicon: Arc<Lexicon>) -> Result<Self> {
        let words = TermMatcher::new(lexicon.simplification_terms())?;
        let phrases = TermMatcher::new(lexicon.phrase_terms())?;

        let pattern = format!(r"(?i)[,;]|\s+(?:{})\s+", BREAK_CONJUNCTIONS.join("|"));
        let natural_breaks =
            Regex::new(&pattern).context("failed to compile natural break pattern")?;

        Ok(Self {
            lexicon,
            words,
            phrases,
            natural_breaks,
        })
    }

    /// Substitute complex words and wordy phrases.
    /// `stats.words_simplified` grows by the number of word matches.
    pub fn simplify(&self, sentence: &str, stats: &mut SimplificationStats) -> String {
        let (simplified, replaced) = self.simplify_words(sentence);
        stats.words_simplified += replaced;

        let (simplified, _) = self.phrases.replace_all(&simplified, |phrase| {
            let short = self.lexicon.phrase_replacement(phrase).unwrap_or(phrase);
            match_case(phrase, short)
        });

        simplified
    }

    /// Word substitution only; returns the rewritten text and the number of replaced words
    pub fn simplify_words(&self, text: &str) -> (String, usize) {
        self.words.replace_all(text, |word| {
            let simple = self.lexicon.simple_form(word).unwrap_or(word);
            match_case(word, simple)
        })
    }

    /// Normalize, simplify and split one sentence into reading-level sized chunks
    pub fn simplify_into_chunks(
        &self,
        sentence: &str,
        profile: ReadingLevelProfile,
        stats: &mut SimplificationStats,
    ) -> Vec<String> {
        let simplified = self.simplify(&normalize_whitespace(sentence), stats);
        self.break_sentence(&simplified, profile.max_sentence_words)
    }

    /// Split a sentence longer than `max_words`, preferring natural break points.
    /// Chunks keep reading order; a sentence of exactly `max_words` is left whole.
    pub fn break_sentence(&self, sentence: &str, max_words: usize) -> Vec<String> {
        let max_words = max_words.max(1);
        let sentence = sentence.trim();

        if sentence.is_empty() {
            return Vec::new();
        }
        if count_words(sentence) <= max_words {
            return vec![sentence.to_string()];
        }

        let pieces = self.natural_pieces(sentence);
        if pieces.len() <= 1 {
            return hard_split(sentence, max_words);
        }

        let mut chunks = Vec::new();
        for piece in pieces {
            if count_words(piece) <= max_words {
                chunks.push(piece.to_string());
            } else {
                chunks.extend(hard_split(piece, max_words));
            }
        }

        debug!(chunks = chunks.len(), max_words, "Split long sentence");
        chunks
    }

    /// Pieces between natural breaks. Punctuation breaks are dropped; a conjunction
    /// stays at the start of the piece it introduces.
    fn natural_pieces<'a>(&self, sentence: &'a str) -> Vec<&'a str> {
        let mut pieces = Vec::new();
        let mut piece_start = 0;

        for m in self.natural_breaks.find_iter(sentence) {
            push_piece(&mut pieces, &sentence[piece_start..m.start()]);

            let matched = &sentence[m.range()];
            piece_start = if matched.starts_with([',', ';']) {
                m.end()
            } else {
                m.start() + (matched.len() - matched.trim_start().len())
            };
        }
        push_piece(&mut pieces, &sentence[piece_start..]);

        pieces
    }
}

fn push_piece<'a>(pieces: &mut Vec<&'a str>, piece: &'a str) {
    let trimmed = piece.trim();
    if !trimmed.is_empty() {
        pieces.push(trimmed);
    }
}

/// Fixed-size word groups of exactly `max_words` (the last group may be shorter)
fn hard_split(text: &str, max_words: usize) -> Vec<String> {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .chunks(max_words)
        .map(|group| group.join(" "))
        .collect()
}

/// Carry the casing of the matched text over to its replacement
fn match_case(original: &str, replacement: &str) -> String {
    let letters: Vec<char> = original.chars().filter(|c| c.is_alphabetic()).collect();

    if letters.len() > 1 && letters.iter().all(|c| c.is_uppercase()) {
        return replacement.to_uppercase();
    }

    let mut chars = replacement.chars();
    match (original.chars().next(), chars.next()) {
        (Some(first), Some(head)) if first.is_uppercase() => {
            head.to_uppercase().chain(chars).collect()
        }
        _ => replacement.to_string(),
    }
}
