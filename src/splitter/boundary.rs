//! Decision helpers for choosing a single cut.
//!
//! All offsets are byte offsets into the document source and always sit on
//! token boundaries or char boundaries; windows are in characters.

use crate::markup::{MarkupDocument, Token};

/// Tokens ending inside `[floor, limit]`, nearest to `limit` first
fn ending_between<'d>(
    doc: &'d MarkupDocument<'_>,
    floor: usize,
    limit: usize,
) -> impl Iterator<Item = &'d Token> + 'd {
    let upto = doc.token_index_at(limit);
    doc.tokens()[..upto]
        .iter()
        .rev()
        .take_while(move |t| t.end() >= floor)
}

/// Offset just past the nearest `</p>` that does not close a heading paragraph
pub(super) fn last_paragraph_end(
    doc: &MarkupDocument<'_>,
    floor: usize,
    limit: usize,
) -> Option<usize> {
    ending_between(doc, floor, limit)
        .find(|t| t.is_paragraph_close() && doc.heading_guarding(t.end()).is_none())
        .map(Token::end)
}

/// Offset just past the nearest tag of any kind outside heading paragraphs
pub(super) fn last_tag_end(doc: &MarkupDocument<'_>, floor: usize, limit: usize) -> Option<usize> {
    ending_between(doc, floor, limit)
        .find(|t| t.is_tag() && doc.heading_guarding(t.end()).is_none())
        .map(Token::end)
}

/// Move an offset off the middle of a token onto a tag boundary.
///
/// Inside a tag: advances past the tag's `>` when that is within `window`
/// characters, otherwise retreats to the tag's `<`.
///
/// Inside text: retreats to the end of the preceding tag when that is within
/// `window` characters and not before `min_end`, otherwise advances to the
/// start of the following tag when that is within `window` characters.
pub(super) fn tag_guard(
    doc: &MarkupDocument<'_>,
    offset: usize,
    min_end: usize,
    window: usize,
) -> Option<usize> {
    let token = doc.token_containing(offset)?;

    if token.is_tag() {
        return if doc.chars_between(offset, token.end()) <= window {
            Some(token.end())
        } else {
            Some(token.start())
        };
    }

    if token.start() >= min_end && doc.chars_between(token.start(), offset) <= window {
        return Some(token.start());
    }

    // Text running to the end of input has no tag after it
    let followed_by_tag = token.end() < doc.source().len();
    (followed_by_tag && doc.chars_between(offset, token.end()) <= window).then(|| token.end())
}

/// Pull the cut in front of a heading paragraph it would split or strand.
///
/// Applies when the heading's opening tag starts within `lookback` characters
/// of the cut, or when the whole heading fits in one fragment anyway.
pub(super) fn heading_guard(
    doc: &MarkupDocument<'_>,
    offset: usize,
    lookback: usize,
    max_length: usize,
) -> Option<usize> {
    let heading = doc.heading_guarding(offset)?;

    let near = doc.chars_between(heading.start, offset) <= lookback;
    let fits = doc.chars_between(heading.start, heading.end) <= max_length;
    (near || fits).then_some(heading.start)
}
