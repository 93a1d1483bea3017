// WHY: shared text primitives for the gate and the summarizer
// Sentences are borrowed slices of the page text so scoring never copies the document

use anyhow::{Context, Result};
use regex_automata::meta::Regex;
use serde::Serialize;
use tracing::debug;

pub mod normalization;

pub use normalization::normalize_whitespace;

/// Fragments at or below this many characters are dropped as boilerplate
pub const MIN_BLOCK_CHARS: usize = 20;

/// Paragraphs shown in the original-content preview
pub const PREVIEW_PARAGRAPHS: usize = 5;

/// A terminated sentence borrowed from the source text
#[derive(Debug, Clone, PartialEq)]
pub struct SentenceSpan<'a> {
    /// Position among all extracted sentences, in document order
    pub index: usize,
    /// Trimmed slice of the source text, terminator included
    pub raw_content: &'a str,
    /// Byte offset of `raw_content` in the source text
    pub start: usize,
}

impl<'a> SentenceSpan<'a> {
    pub fn raw(&self) -> &'a str {
        self.raw_content
    }
}

/// Compiled sentence patterns
pub struct SentenceSplitter {
    /// Text run followed by one or more terminators
    terminated: Regex,
    /// Terminator runs only, for coarse segmentation
    terminators: Regex,
}

impl SentenceSplitter {
    pub fn new() -> Result<Self> {
        let terminated = Regex::new(r"[^.!?]+[.!?]+")
            .context("failed to compile terminated-sentence pattern")?;
        let terminators =
            Regex::new(r"[.!?]+").context("failed to compile terminator pattern")?;

        Ok(Self {
            terminated,
            terminators,
        })
    }

    /// Sentences that end in `.`, `!` or `?`; trailing text without a terminator is not a sentence
    pub fn terminated_sentences<'a>(&self, text: &'a str) -> Vec<SentenceSpan<'a>> {
        let mut sentences = Vec::new();

        for m in self.terminated.find_iter(text) {
            let slice = &text[m.range()];
            let trimmed = slice.trim();
            if trimmed.is_empty() {
                continue;
            }

            let leading = slice.len() - slice.trim_start().len();
            sentences.push(SentenceSpan {
                index: sentences.len(),
                raw_content: trimmed,
                start: m.start() + leading,
            });
        }

        debug!("Extracted {} terminated sentences", sentences.len());
        sentences
    }

    /// Non-empty segments between terminator runs, including an unterminated tail
    pub fn segments<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut segments = Vec::new();
        let mut last_end = 0;

        for m in self.terminators.find_iter(text) {
            push_segment(&mut segments, &text[last_end..m.start()]);
            last_end = m.end();
        }
        push_segment(&mut segments, &text[last_end..]);

        segments
    }
}

fn push_segment<'a>(segments: &mut Vec<&'a str>, segment: &'a str) {
    let trimmed = segment.trim();
    if !trimmed.is_empty() {
        segments.push(trimmed);
    }
}

/// Whitespace-delimited word count
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// First `limit` non-trivial lines, used when no terminated sentence exists
pub fn fallback_lines(text: &str, limit: usize) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| line.chars().count() > MIN_BLOCK_CHARS)
        .take(limit)
        .collect()
}

/// Leading paragraphs of the original text shown next to the simplified view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OriginalPreview {
    pub paragraphs: Vec<String>,
    /// Paragraphs left out of the preview
    pub remaining: usize,
}

impl OriginalPreview {
    /// Split on blank lines, drop short fragments, keep the first `PREVIEW_PARAGRAPHS`
    pub fn from_text(text: &str) -> Self {
        let mut paragraphs = Vec::new();
        let mut current = String::new();

        for line in text.lines() {
            if line.trim().is_empty() {
                flush_paragraph(&mut paragraphs, &mut current);
            } else {
                if !current.is_empty() {
                    current.push('\n');
                }
                current.push_str(line);
            }
        }
        flush_paragraph(&mut paragraphs, &mut current);

        let remaining = paragraphs.len().saturating_sub(PREVIEW_PARAGRAPHS);
        paragraphs.truncate(PREVIEW_PARAGRAPHS);

        Self {
            paragraphs,
            remaining,
        }
    }
}

fn flush_paragraph(paragraphs: &mut Vec<String>, current: &mut String) {
    let trimmed = current.trim();
    if trimmed.chars().count() > MIN_BLOCK_CHARS {
        paragraphs.push(trimmed.to_string());
    }
    current.clear();
}
