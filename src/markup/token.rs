use std::ops::Range;

/// A lexical unit of rendered markup, addressed by byte span into the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What this token is
    pub kind: TokenKind,
    /// Byte range in the source document
    pub span: Range<usize>,
}

/// Classification of markup tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Start tag such as `<p class="heading-2">` or `<br/>`
    Open(Tag),
    /// End tag such as `</p>`
    Close(Tag),
    /// Comment, doctype or processing instruction (`<!...>`, `<?...>`)
    Declaration,
    /// Character data between tags
    Text,
}

/// Tag details the splitter cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Lowercased element name (e.g. "p", "span", "td")
    pub name: String,
    /// Heading level 1-6 when the class attribute carries a `heading-N` marker
    pub heading: Option<u8>,
    /// Written as `<name ... />`
    pub self_closing: bool,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            heading: None,
            self_closing: false,
        }
    }

    pub fn is_paragraph(&self) -> bool {
        self.name == "p"
    }
}

impl Token {
    pub fn start(&self) -> usize {
        self.span.start
    }

    pub fn end(&self) -> usize {
        self.span.end
    }

    /// Any bracketed `< ... >` token
    pub fn is_tag(&self) -> bool {
        !matches!(self.kind, TokenKind::Text)
    }

    /// `</p>`
    pub fn is_paragraph_close(&self) -> bool {
        matches!(&self.kind, TokenKind::Close(tag) if tag.is_paragraph())
    }

    pub fn is_paragraph_open(&self) -> bool {
        matches!(&self.kind, TokenKind::Open(tag) if tag.is_paragraph())
    }

    /// `<p ...>` carrying a heading class
    pub fn heading_level(&self) -> Option<u8> {
        match &self.kind {
            TokenKind::Open(tag) if tag.is_paragraph() => tag.heading,
            _ => None,
        }
    }

    /// True when `offset` lies strictly between the token's first and last byte
    pub fn contains_strictly(&self, offset: usize) -> bool {
        self.span.start < offset && offset < self.span.end
    }
}
