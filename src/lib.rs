// Public API exports
pub mod convert;
pub mod markup;
pub mod plain;
pub mod splitter;
pub mod telemetry;

// Re-export main types for convenience
pub use markup::{HeadingSpan, MarkupDocument, Tag, Token, TokenKind, tokenize};

pub use splitter::{
    CutReason, DEFAULT_MAX_LENGTH, Fragment, FragmentMetadata, FragmentSplitter, Fragments,
    SplitConfig, split_markup,
};

pub use plain::{strip_tags, to_plain_fragments};

pub use convert::{
    ConvertError, ConvertLimits, ConvertRequest, ConvertResponse, ErrorResponse, convert_markup,
};
