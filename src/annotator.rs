// WHY: turns simplified chunks into structured paragraphs with inline glossary markers
// The renderer only ever sees these segments, never raw markup

use anyhow::Result;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

use crate::lexicon::{fold_key, Lexicon, TermMatcher, FALLBACK_DEFINITION};
use crate::simplifier::SimplificationStats;

/// A run of plain text or one matched jargon term
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    Text { text: String },
    Jargon { term: String, definition: String },
}

impl Segment {
    /// Surface text as it appears in the paragraph
    pub fn as_str(&self) -> &str {
        match self {
            Segment::Text { text } => text,
            Segment::Jargon { term, .. } => term,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Paragraph {
    pub segments: Vec<Segment>,
}

impl Paragraph {
    pub fn plain_text(&self) -> String {
        self.segments.iter().map(Segment::as_str).collect()
    }
}

/// Paragraphs in chunk order, ready for a `DocumentModel` to render
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnnotatedFragment {
    pub paragraphs: Vec<Paragraph>,
}

impl AnnotatedFragment {
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Paragraph texts separated by blank lines, markers dropped
    pub fn to_plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::plain_text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Jargon segments in reading order
    pub fn jargon(&self) -> impl Iterator<Item = (&str, &str)> {
        self.paragraphs
            .iter()
            .flat_map(|paragraph| &paragraph.segments)
            .filter_map(|segment| match segment {
                Segment::Jargon { term, definition } => Some((term.as_str(), definition.as_str())),
                Segment::Text { .. } => None,
            })
    }

    /// First occurrence of each term, compared case-insensitively
    pub fn glossary(&self) -> Vec<(&str, &str)> {
        let mut seen = HashSet::new();
        self.jargon()
            .filter(|(term, _)| seen.insert(fold_key(term)))
            .collect()
    }
}

pub struct Annotator {
    lexicon: Arc<Lexicon>,
    jargon: TermMatcher,
}

impl Annotator {
    pub fn new(lexicon: Arc<Lexicon>) -> Result<Self> {
        let jargon = TermMatcher::new(lexicon.jargon_terms())?;
        Ok(Self { lexicon, jargon })
    }

    /// One paragraph per chunk; `stats.jargon_explained` grows by one per marked term
    pub fn annotate<I, S>(&self, chunks: I, stats: &mut SimplificationStats) -> AnnotatedFragment
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let paragraphs: Vec<Paragraph> = chunks
            .into_iter()
            .map(|chunk| self.annotate_chunk(chunk.as_ref(), stats))
            .filter(|paragraph| !paragraph.segments.is_empty())
            .collect();

        debug!(
            paragraphs = paragraphs.len(),
            jargon_explained = stats.jargon_explained,
            "Annotation complete"
        );

        AnnotatedFragment { paragraphs }
    }

    fn annotate_chunk(&self, chunk: &str, stats: &mut SimplificationStats) -> Paragraph {
        let mut segments = Vec::new();
        let mut last_end = 0;

        for range in self.jargon.find_iter(chunk) {
            if range.start > last_end {
                segments.push(Segment::Text {
                    text: chunk[last_end..range.start].to_string(),
                });
            }

            let term = &chunk[range.clone()];
            segments.push(Segment::Jargon {
                term: term.to_string(),
                definition: self.definition_for(term).to_string(),
            });
            stats.jargon_explained += 1;
            last_end = range.end;
        }

        if last_end < chunk.len() {
            segments.push(Segment::Text {
                text: chunk[last_end..].to_string(),
            });
        }

        Paragraph { segments }
    }

    fn definition_for(&self, term: &str) -> &str {
        match self.lexicon.definition(term) {
            Some(definition) => definition,
            None => {
                debug!(term, "No definition entry, using fallback label");
                FALLBACK_DEFINITION
            }
        }
    }
}
