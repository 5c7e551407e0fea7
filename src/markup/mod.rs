mod document;
mod token;
mod tokenizer;


pub use document::{HeadingSpan, MarkupDocument};
pub use token::{Tag, Token, TokenKind};
pub use tokenizer::{HEADING_MARKERS, attribute_value, heading_level, tokenize};
