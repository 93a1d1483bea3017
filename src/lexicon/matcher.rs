// WHY: one compiled alternation per term list, scanned once left to right
// Replaces per-term replacement loops that double-count and depend on iteration order

use anyhow::{Context, Result};
use regex_automata::meta::Regex;
use std::ops::Range;
use tracing::debug;

/// Whole-word, case-insensitive matcher over a fixed set of terms
pub struct TermMatcher {
    regex: Option<Regex>,
}

impl TermMatcher {
    /// Compile terms into a single pattern, longest terms first so that
    /// "artificial intelligence" wins over any shorter overlapping term
    pub fn new<'a, I>(terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut terms: Vec<&str> = terms
            .into_iter()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .collect();

        terms.sort_by(|a, b| {
            b.chars()
                .count()
                .cmp(&a.chars().count())
                .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        });
        terms.dedup_by(|a, b| a.eq_ignore_ascii_case(b));

        if terms.is_empty() {
            return Ok(Self { regex: None });
        }

        let alternation = terms
            .iter()
            .map(|term| term_pattern(term))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = format!(r"(?i)\b(?:{alternation})\b");

        let regex = Regex::new(&pattern)
            .with_context(|| format!("failed to compile matcher for {} terms", terms.len()))?;

        debug!("Compiled term matcher over {} terms", terms.len());

        Ok(Self { regex: Some(regex) })
    }

    /// Byte ranges of every non-overlapping match, in document order
    pub fn find_iter<'h>(&'h self, haystack: &'h str) -> impl Iterator<Item = Range<usize>> + 'h {
        self.regex
            .iter()
            .flat_map(move |regex| regex.find_iter(haystack).map(|m| m.range()))
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex
            .as_ref()
            .is_some_and(|regex| regex.is_match(haystack))
    }

    /// Replace every match with the closure's output; returns the new text and the match count
    pub fn replace_all<F>(&self, haystack: &str, mut replacement: F) -> (String, usize)
    where
        F: FnMut(&str) -> String,
    {
        let mut output = String::with_capacity(haystack.len());
        let mut last_end = 0;
        let mut count = 0;

        for range in self.find_iter(haystack) {
            output.push_str(&haystack[last_end..range.start]);
            output.push_str(&replacement(&haystack[range.clone()]));
            last_end = range.end;
            count += 1;
        }

        output.push_str(&haystack[last_end..]);
        (output, count)
    }
}

/// Escape a term and let its inner spaces match any run of whitespace
fn term_pattern(term: &str) -> String {
    term.split_whitespace()
        .map(regex_syntax::escape)
        .collect::<Vec<_>>()
        .join(r"\s+")
}
