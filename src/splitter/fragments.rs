use std::iter::FusedIterator;

use serde::Serialize;
use tracing::{debug, warn};

use super::boundary;
use super::config::SplitConfig;
use crate::markup::MarkupDocument;

/// A contiguous slice of the input markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment<'a> {
    /// The fragment text, borrowed from the input
    pub text: &'a str,
    /// Metadata about the fragment
    pub metadata: FragmentMetadata,
}

/// Metadata for a fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FragmentMetadata {
    /// Position in the fragment sequence
    pub index: usize,
    /// Byte offset in the input (start)
    pub start_offset: usize,
    /// Byte offset in the input (end, exclusive)
    pub end_offset: usize,
    /// Length in characters
    pub char_count: usize,
    /// Which rule chose the fragment's end
    pub cut: CutReason,
}

/// Why a fragment ends where it does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CutReason {
    /// Just after a paragraph's `</p>`
    ParagraphEnd,
    /// Just after some other tag's `>`
    TagEnd,
    /// At the length limit, inside text
    Limit,
    /// Moved onto the nearest tag boundary around the limit
    TagGuard,
    /// Moved in front of a heading paragraph
    HeadingDeferred,
    /// No acceptable boundary; cut exactly at the limit
    Forced,
    /// Remainder fit; last fragment
    EndOfInput,
}

/// Splits markup into bounded fragments without cutting through tags or headings
#[derive(Debug, Clone, Copy, Default)]
pub struct FragmentSplitter {
    config: SplitConfig,
}

impl FragmentSplitter {
    pub fn new(config: SplitConfig) -> Self {
        Self {
            config: config.max_length(config.max_length),
        }
    }

    /// Splitter with default windows and the given maximum length
    pub fn with_max_length(max_length: usize) -> Self {
        Self::new(SplitConfig::new(max_length))
    }

    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    /// Lazily produce fragments with metadata
    pub fn fragments<'a>(&self, content: &'a str) -> Fragments<'a> {
        Fragments {
            doc: MarkupDocument::parse(content),
            config: self.config,
            cursor: 0,
            index: 0,
        }
    }

    /// Split into fragment slices whose concatenation is `content`
    pub fn split<'a>(&self, content: &'a str) -> Vec<&'a str> {
        self.fragments(content).map(|f| f.text).collect()
    }
}

/// Split `content` into fragments of at most `max_length` characters where
/// markup structure allows. A `max_length` of zero is treated as 1.
pub fn split_markup(content: &str, max_length: usize) -> Vec<&str> {
    FragmentSplitter::with_max_length(max_length).split(content)
}

/// Iterator over the fragments of one document
#[derive(Debug, Clone)]
pub struct Fragments<'a> {
    doc: MarkupDocument<'a>,
    config: SplitConfig,
    cursor: usize,
    index: usize,
}

impl<'a> Iterator for Fragments<'a> {
    type Item = Fragment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.cursor;
        if start >= self.doc.source().len() {
            return None;
        }

        let (end, cut) = next_cut(&self.doc, &self.config, start);
        let char_count = self.doc.chars_between(start, end);
        let metadata = FragmentMetadata {
            index: self.index,
            start_offset: start,
            end_offset: end,
            char_count,
            cut,
        };

        let remaining = self.doc.char_len() - self.doc.char_at(end);
        if cut == CutReason::Forced {
            warn!(
                index = self.index,
                chars = char_count,
                remaining,
                "no safe boundary found, forcing cut at max length"
            );
        } else {
            debug!(index = self.index, chars = char_count, remaining, cut = ?cut, "fragment");
        }

        self.cursor = end;
        self.index += 1;

        Some(Fragment {
            text: self.doc.slice(start..end),
            metadata,
        })
    }
}

impl FusedIterator for Fragments<'_> {}

/// Choose the end of the fragment starting at byte offset `start`
fn next_cut(doc: &MarkupDocument<'_>, config: &SplitConfig, start: usize) -> (usize, CutReason) {
    let max = config.max_length;
    let start_c = doc.char_at(start);
    if doc.char_len() - start_c <= max {
        return (doc.source().len(), CutReason::EndOfInput);
    }

    let limit_c = start_c + max;
    let limit = doc.byte_at(limit_c);
    let floor = |lookback: usize| doc.byte_at(limit_c.saturating_sub(lookback).max(start_c + 1));

    // The paragraph search always reaches down to the minimum fill
    let paragraph_lookback = config.paragraph_lookback.max(max - config.min_fill());

    let (mut offset, mut cut) =
        if let Some(end) = boundary::last_paragraph_end(doc, floor(paragraph_lookback), limit) {
            (end, CutReason::ParagraphEnd)
        } else if let Some(end) = boundary::last_tag_end(doc, floor(config.tag_lookback), limit) {
            (end, CutReason::TagEnd)
        } else {
            (limit, CutReason::Limit)
        };

    let min_end = doc.byte_at(start_c + config.min_fill());
    if let Some(moved) = boundary::tag_guard(doc, offset, min_end, config.tag_guard_window) {
        offset = moved;
        cut = CutReason::TagGuard;
    }

    if let Some(moved) = boundary::heading_guard(doc, offset, config.heading_lookback, max) {
        offset = moved;
        cut = CutReason::HeadingDeferred;
    }

    if offset <= start || doc.chars_between(start, offset) < config.min_fill() {
        return (limit, CutReason::Forced);
    }

    (offset, cut)
}
