use serde::{Deserialize, Serialize};

use super::{
    DEFAULT_HEADING_LOOKBACK, DEFAULT_MAX_LENGTH, DEFAULT_PARAGRAPH_LOOKBACK,
    DEFAULT_TAG_GUARD_WINDOW, DEFAULT_TAG_LOOKBACK,
};

/// Configuration for fragment splitting.
///
/// All lengths and windows are counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Target maximum fragment length
    pub max_length: usize,
    /// How far back from the limit to look for a `</p>`
    pub paragraph_lookback: usize,
    /// How far back from the limit to look for any tag end
    pub tag_lookback: usize,
    /// Forward/backward reach when moving a cut out of a tag
    pub tag_guard_window: usize,
    /// How close a heading's opening tag must be to the cut to defer the heading
    pub heading_lookback: usize,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LENGTH)
    }
}

impl SplitConfig {
    /// Create a config with default windows. A zero length is raised to 1.
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length: max_length.max(1),
            paragraph_lookback: DEFAULT_PARAGRAPH_LOOKBACK,
            tag_lookback: DEFAULT_TAG_LOOKBACK,
            tag_guard_window: DEFAULT_TAG_GUARD_WINDOW,
            heading_lookback: DEFAULT_HEADING_LOOKBACK,
        }
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length.max(1);
        self
    }

    pub fn paragraph_lookback(mut self, chars: usize) -> Self {
        self.paragraph_lookback = chars;
        self
    }

    pub fn tag_lookback(mut self, chars: usize) -> Self {
        self.tag_lookback = chars;
        self
    }

    pub fn tag_guard_window(mut self, chars: usize) -> Self {
        self.tag_guard_window = chars;
        self
    }

    pub fn heading_lookback(mut self, chars: usize) -> Self {
        self.heading_lookback = chars;
        self
    }

    /// Shortest fragment accepted before the cut is forced to `max_length`
    pub fn min_fill(&self) -> usize {
        self.max_length.div_ceil(2)
    }
}
