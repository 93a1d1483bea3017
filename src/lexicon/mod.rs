// WHY: single owner of the vocabulary used by analysis, simplification and annotation
// Lookups are O(1) through case-folded indexes; matching is delegated to TermMatcher

use std::collections::{HashMap, HashSet};

pub mod data;
pub mod matcher;

pub use data::FALLBACK_DEFINITION;
pub use matcher::TermMatcher;

/// Word simplifications, wordy phrases, jargon definitions and stop words
#[derive(Debug, Clone)]
pub struct Lexicon {
    simplifications: Vec<(String, String)>,
    simplification_index: HashMap<String, usize>,
    phrases: Vec<(String, String)>,
    phrase_index: HashMap<String, usize>,
    jargon: Vec<(String, String)>,
    jargon_exact: HashMap<String, usize>,
    jargon_folded: HashMap<String, usize>,
    stop_words: HashSet<&'static str>,
}

impl Lexicon {
    /// Lexicon with the built-in English tables
    pub fn builtin() -> Self {
        Self::new(
            data::WORD_SIMPLIFICATIONS.iter().copied(),
            data::PHRASE_REPLACEMENTS.iter().copied(),
            data::JARGON_DEFINITIONS.iter().copied(),
        )
    }

    /// Build a lexicon from custom tables; stop words are always the built-in set.
    /// Later entries override earlier ones with the same case-folded term.
    pub fn new<'a, S, P, J>(simplifications: S, phrases: P, jargon: J) -> Self
    where
        S: IntoIterator<Item = (&'a str, &'a str)>,
        P: IntoIterator<Item = (&'a str, &'a str)>,
        J: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut lexicon = Self {
            simplifications: Vec::new(),
            simplification_index: HashMap::new(),
            phrases: Vec::new(),
            phrase_index: HashMap::new(),
            jargon: Vec::new(),
            jargon_exact: HashMap::new(),
            jargon_folded: HashMap::new(),
            stop_words: data::STOP_WORDS.iter().copied().collect(),
        };

        for (term, replacement) in simplifications {
            insert_entry(
                &mut lexicon.simplifications,
                &mut lexicon.simplification_index,
                term,
                replacement,
            );
        }
        for (phrase, replacement) in phrases {
            insert_entry(&mut lexicon.phrases, &mut lexicon.phrase_index, phrase, replacement);
        }
        lexicon.with_jargon(jargon)
    }

    /// Add or override jargon definitions
    pub fn with_jargon<'a, J>(mut self, jargon: J) -> Self
    where
        J: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (term, definition) in jargon {
            let key = fold_key(term);
            if key.is_empty() {
                continue;
            }
            let slot = match self.jargon_folded.get(&key) {
                Some(&existing) => {
                    self.jargon_exact.remove(&self.jargon[existing].0);
                    self.jargon[existing] = (term.trim().to_string(), definition.to_string());
                    existing
                }
                None => {
                    self.jargon.push((term.trim().to_string(), definition.to_string()));
                    self.jargon.len() - 1
                }
            };
            self.jargon_folded.insert(key, slot);
            self.jargon_exact.insert(term.trim().to_string(), slot);
        }
        self
    }

    /// Plain replacement for a complex word, matched case-insensitively
    pub fn simple_form(&self, word: &str) -> Option<&str> {
        self.simplification_index
            .get(&fold_key(word))
            .map(|&i| self.simplifications[i].1.as_str())
    }

    pub fn is_simplifiable(&self, word: &str) -> bool {
        self.simplification_index.contains_key(&fold_key(word))
    }

    /// Short form for a wordy phrase, matched case-insensitively
    pub fn phrase_replacement(&self, phrase: &str) -> Option<&str> {
        self.phrase_index
            .get(&fold_key(phrase))
            .map(|&i| self.phrases[i].1.as_str())
    }

    /// Definition for a jargon term: exact spelling first, then case-folded
    pub fn definition(&self, term: &str) -> Option<&str> {
        self.jargon_exact
            .get(term.trim())
            .or_else(|| self.jargon_folded.get(&fold_key(term)))
            .map(|&i| self.jargon[i].1.as_str())
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    pub fn simplification_terms(&self) -> impl Iterator<Item = &str> {
        self.simplifications.iter().map(|(term, _)| term.as_str())
    }

    pub fn phrase_terms(&self) -> impl Iterator<Item = &str> {
        self.phrases.iter().map(|(phrase, _)| phrase.as_str())
    }

    pub fn jargon_terms(&self) -> impl Iterator<Item = &str> {
        self.jargon.iter().map(|(term, _)| term.as_str())
    }

    pub fn jargon_len(&self) -> usize {
        self.jargon.len()
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Case-fold and collapse inner whitespace so "Machine\nLearning" finds "machine learning"
pub fn fold_key(term: &str) -> String {
    term.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn insert_entry(
    entries: &mut Vec<(String, String)>,
    index: &mut HashMap<String, usize>,
    term: &str,
    replacement: &str,
) {
    let key = fold_key(term);
    if key.is_empty() {
        return;
    }
    match index.get(&key) {
        Some(&existing) => entries[existing].1 = replacement.to_string(),
        None => {
            entries.push((term.trim().to_string(), replacement.to_string()));
            index.insert(key, entries.len() - 1);
        }
    }
}
