use super::token::{Tag, Token, TokenKind};

/// Class-name markers the renderer uses to flag heading paragraphs.
/// Matched as plain substrings of the class attribute value.
pub const HEADING_MARKERS: [&str; 6] = [
    "heading-1",
    "heading-2",
    "heading-3",
    "heading-4",
    "heading-5",
    "heading-6",
];

/// Tokenize markup in one linear pass.
///
/// Every byte of `source` belongs to exactly one token and tokens are emitted
/// in document order, so the spans tile the input. A `<` that does not open a
/// well-formed tag (no name, or no closing `>` anywhere after it) is kept as
/// text.
pub fn tokenize(source: &str) -> Vec<Token> {
    let bytes = source.as_bytes();
    let mut scanner = TagScanner::new(bytes);
    let mut tokens = Vec::new();
    let mut text_start = 0;
    let mut pos = 0;

    while pos < bytes.len() {
        if bytes[pos] == b'<' {
            if let Some(end) = scanner.tag_end(pos) {
                if text_start < pos {
                    tokens.push(Token {
                        kind: TokenKind::Text,
                        span: text_start..pos,
                    });
                }
                tokens.push(Token {
                    kind: classify(&source[pos..end]),
                    span: pos..end,
                });
                pos = end;
                text_start = end;
                continue;
            }
        }
        pos += 1;
    }

    if text_start < bytes.len() {
        tokens.push(Token {
            kind: TokenKind::Text,
            span: text_start..bytes.len(),
        });
    }

    tokens
}

/// Finds tag ends without rescanning input a failed tag already covered.
///
/// A scan that fails runs to the end of the input, so whatever made it fail
/// is remembered and later candidates are rejected up front.
struct TagScanner<'a> {
    bytes: &'a [u8],
    /// Position of the last `>` in the input
    last_gt: Option<usize>,
    /// Start of the last `-->` in the input
    last_comment_close: Option<usize>,
    /// Cleared once a quote-aware scan reaches the end of input
    quotes_balanced: bool,
}

impl<'a> TagScanner<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            last_gt: bytes.iter().rposition(|&b| b == b'>'),
            last_comment_close: bytes.windows(3).rposition(|w| w == b"-->"),
            quotes_balanced: true,
        }
    }

    /// Exclusive end of the tag opening at `start`, if it is one
    fn tag_end(&mut self, start: usize) -> Option<usize> {
        let bytes = self.bytes;
        let next = *bytes.get(start + 1)?;
        if !(next.is_ascii_alphabetic() || matches!(next, b'/' | b'!' | b'?')) {
            return None;
        }

        if bytes[start..].starts_with(b"<!--") {
            // Only searched when a closer is known to follow
            let body = start + 4;
            return match self.last_comment_close {
                Some(close) if close >= body => {
                    find_subslice(&bytes[body..], b"-->").map(|i| body + i + 3)
                }
                _ => None,
            };
        }

        if !self.last_gt.is_some_and(|gt| gt > start) {
            return None;
        }

        if self.quotes_balanced {
            if let Some(end) = quote_aware_end(bytes, start) {
                return Some(end);
            }
            // Unbalanced quote: later tags end at their first `>`
            self.quotes_balanced = false;
        }

        bytes[start + 1..]
            .iter()
            .position(|&b| b == b'>')
            .map(|i| start + 1 + i + 1)
    }
}

/// Scan for the `>` closing the tag at `start`, skipping `>` inside quoted
/// attribute values
fn quote_aware_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut quote: Option<u8> = None;
    let mut last_significant = b'<';
    for (i, &b) in bytes.iter().enumerate().skip(start + 1) {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None => match b {
                b'>' => return Some(i + 1),
                b'"' | b'\'' if last_significant == b'=' => quote = Some(b),
                _ => {}
            },
        }
        if !b.is_ascii_whitespace() {
            last_significant = b;
        }
    }
    None
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn classify(raw: &str) -> TokenKind {
    if raw.starts_with("<!") || raw.starts_with("<?") {
        return TokenKind::Declaration;
    }

    if let Some(rest) = raw.strip_prefix("</") {
        return TokenKind::Close(Tag::new(element_name(rest)));
    }

    let name = element_name(&raw[1..]);
    let heading = attribute_value(raw, "class").and_then(heading_level);
    let self_closing = raw.ends_with("/>");

    TokenKind::Open(Tag {
        name,
        heading,
        self_closing,
    })
}

fn element_name(s: &str) -> String {
    s.chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == ':')
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Value of attribute `name` inside a raw start tag
pub fn attribute_value<'a>(raw_tag: &'a str, name: &str) -> Option<&'a str> {
    // ASCII lowercasing keeps byte offsets identical
    let lower = raw_tag.to_ascii_lowercase();
    let bytes = raw_tag.as_bytes();

    for (idx, _) in lower.match_indices(name) {
        if idx == 0 || !bytes[idx - 1].is_ascii_whitespace() {
            continue;
        }

        let mut i = idx + name.len();
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if bytes.get(i) != Some(&b'=') {
            continue;
        }
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }

        return match bytes.get(i) {
            Some(&q) if q == b'"' || q == b'\'' => {
                let value_start = i + 1;
                let len = bytes[value_start..].iter().position(|&b| b == q)?;
                Some(&raw_tag[value_start..value_start + len])
            }
            Some(_) => {
                let len = bytes[i..]
                    .iter()
                    .position(|&b| b.is_ascii_whitespace() || b == b'>' || b == b'/')
                    .unwrap_or(bytes.len() - i);
                Some(&raw_tag[i..i + len])
            }
            None => None,
        };
    }

    None
}

/// Heading level flagged by a class attribute value
pub fn heading_level(class_value: &str) -> Option<u8> {
    HEADING_MARKERS
        .iter()
        .zip(1u8..)
        .find(|(marker, _)| class_value.contains(**marker))
        .map(|(_, level)| level)
}
