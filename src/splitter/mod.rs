mod boundary;
mod config;
mod fragments;

#[cfg(test)]
mod tests;

pub use config::SplitConfig;
pub use fragments::{
    CutReason, Fragment, FragmentMetadata, FragmentSplitter, Fragments, split_markup,
};

/// Default maximum fragment length in characters
pub const DEFAULT_MAX_LENGTH: usize = 10_000;

/// Lookback for the nearest paragraph end
pub const DEFAULT_PARAGRAPH_LOOKBACK: usize = 500;

/// Lookback for the nearest tag end when no paragraph end is close
pub const DEFAULT_TAG_LOOKBACK: usize = 500;

/// Reach when moving a cut out of a tag
pub const DEFAULT_TAG_GUARD_WINDOW: usize = 100;

/// How close a heading must start before the cut to be deferred whole
pub const DEFAULT_HEADING_LOOKBACK: usize = 200;
