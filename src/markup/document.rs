use std::ops::Range;

use super::token::Token;
use super::tokenizer::tokenize;

/// Tokenized, indexed view over a markup string.
///
/// Offsets handed out by this type are byte offsets into `source`; lengths
/// the splitter reasons about are counted in characters (Unicode scalar
/// values), so the document keeps a mapping between the two.
#[derive(Debug, Clone)]
pub struct MarkupDocument<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    chars: CharIndex,
    headings: Vec<HeadingSpan>,
}

/// A heading paragraph: its opening tag through the matching `</p>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadingSpan {
    /// Byte offset of the opening `<`
    pub start: usize,
    /// Byte offset just past the closing `</p>` (or the opening tag if unclosed)
    pub end: usize,
    /// Heading level 1-6
    pub level: u8,
}

impl HeadingSpan {
    /// Cutting at `offset` would split the heading or strand it at a fragment's tail
    pub fn guards(&self, offset: usize) -> bool {
        self.start < offset && offset <= self.end
    }
}

#[derive(Debug, Clone)]
enum CharIndex {
    /// Pure ASCII: byte and char offsets coincide
    Ascii { len: usize },
    /// Byte offset of every char start, plus the total length as sentinel
    Mapped(Vec<usize>),
}

impl<'a> MarkupDocument<'a> {
    pub fn parse(source: &'a str) -> Self {
        let tokens = tokenize(source);
        let headings = collect_headings(&tokens);
        let chars = if source.is_ascii() {
            CharIndex::Ascii { len: source.len() }
        } else {
            let mut starts: Vec<usize> = source.char_indices().map(|(i, _)| i).collect();
            starts.push(source.len());
            CharIndex::Mapped(starts)
        };

        Self {
            source,
            tokens,
            chars,
            headings,
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn headings(&self) -> &[HeadingSpan] {
        &self.headings
    }

    /// Slice of the source between two byte offsets on char boundaries
    pub fn slice(&self, range: Range<usize>) -> &'a str {
        &self.source[range]
    }

    /// Total length in characters
    pub fn char_len(&self) -> usize {
        match &self.chars {
            CharIndex::Ascii { len } => *len,
            CharIndex::Mapped(starts) => starts.len() - 1,
        }
    }

    /// Byte offset of the `char_pos`-th character (clamped to the end)
    pub fn byte_at(&self, char_pos: usize) -> usize {
        match &self.chars {
            CharIndex::Ascii { len } => char_pos.min(*len),
            CharIndex::Mapped(starts) => starts[char_pos.min(starts.len() - 1)],
        }
    }

    /// Character position of a byte offset that lies on a char boundary
    pub fn char_at(&self, byte_pos: usize) -> usize {
        match &self.chars {
            CharIndex::Ascii { len } => byte_pos.min(*len),
            CharIndex::Mapped(starts) => starts.partition_point(|&b| b < byte_pos),
        }
    }

    /// Number of characters between two byte offsets
    pub fn chars_between(&self, from: usize, to: usize) -> usize {
        self.char_at(to).saturating_sub(self.char_at(from))
    }

    /// Index of the first token ending after `byte_pos`, i.e. the token that
    /// contains `byte_pos` or starts at it
    pub fn token_index_at(&self, byte_pos: usize) -> usize {
        self.tokens.partition_point(|t| t.end() <= byte_pos)
    }

    /// Token whose interior strictly contains `byte_pos`
    pub fn token_containing(&self, byte_pos: usize) -> Option<&Token> {
        self.tokens
            .get(self.token_index_at(byte_pos))
            .filter(|t| t.contains_strictly(byte_pos))
    }

    /// Heading paragraph that a cut at `byte_pos` would split or strand
    pub fn heading_guarding(&self, byte_pos: usize) -> Option<&HeadingSpan> {
        // Headings are sorted and disjoint; the candidate is the last one starting before the cut
        let idx = self.headings.partition_point(|h| h.start < byte_pos);
        idx.checked_sub(1)
            .map(|i| &self.headings[i])
            .filter(|h| h.guards(byte_pos))
    }
}

fn collect_headings(tokens: &[Token]) -> Vec<HeadingSpan> {
    let mut headings = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let Some(level) = tokens[i].heading_level() else {
            i += 1;
            continue;
        };

        let start = tokens[i].start();
        // Paragraphs don't nest, so the next `<p>` means this heading was never closed
        let boundary = tokens[i + 1..]
            .iter()
            .position(|t| t.is_paragraph_close() || t.is_paragraph_open());
        match boundary.filter(|&offset| tokens[i + 1 + offset].is_paragraph_close()) {
            Some(offset) => {
                let close = i + 1 + offset;
                headings.push(HeadingSpan {
                    start,
                    end: tokens[close].end(),
                    level,
                });
                i = close + 1;
            }
            None => {
                headings.push(HeadingSpan {
                    start,
                    end: tokens[i].end(),
                    level,
                });
                i += 1;
            }
        }
    }

    headings
}
