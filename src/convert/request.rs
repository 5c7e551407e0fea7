use serde::{Deserialize, Serialize};
use std::env;

use super::ConvertError;
use crate::splitter::DEFAULT_MAX_LENGTH;

/// Recommended lower bound for a requested maximum length
pub const MIN_MAX_LENGTH: usize = 1_000;

/// Recommended upper bound for a requested maximum length
pub const MAX_MAX_LENGTH: usize = 50_000;

/// A conversion request as received from a client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertRequest {
    /// Requested maximum fragment length; the default applies when absent
    #[serde(default)]
    pub maxlength: Option<i64>,
    /// Strip all tags from each fragment
    #[serde(default)]
    pub plain: bool,
}

impl ConvertRequest {
    pub fn from_json(body: &str) -> Result<Self, ConvertError> {
        Ok(serde_json::from_str(body)?)
    }
}

/// Validation rules for requested maximum lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertLimits {
    pub default_max_length: usize,
    pub min_max_length: usize,
    pub max_max_length: usize,
    /// Reject lengths outside `min_max_length..=max_max_length` instead of
    /// only rejecting non-positive ones
    pub enforce_bounds: bool,
}

impl Default for ConvertLimits {
    fn default() -> Self {
        Self {
            default_max_length: DEFAULT_MAX_LENGTH,
            min_max_length: MIN_MAX_LENGTH,
            max_max_length: MAX_MAX_LENGTH,
            enforce_bounds: false,
        }
    }
}

impl ConvertLimits {
    /// Read overrides from `DOCFRAG_*` environment variables
    pub fn from_env() -> Result<Self, ConvertError> {
        let mut limits = Self::default();

        if let Some(v) = read_env("DOCFRAG_DEFAULT_MAX_LENGTH")? {
            limits.default_max_length = v;
        }
        if let Some(v) = read_env("DOCFRAG_MIN_MAX_LENGTH")? {
            limits.min_max_length = v;
        }
        if let Some(v) = read_env("DOCFRAG_MAX_MAX_LENGTH")? {
            limits.max_max_length = v;
        }
        if let Some(v) = read_env("DOCFRAG_ENFORCE_BOUNDS")? {
            limits.enforce_bounds = v;
        }

        Ok(limits)
    }

    pub fn enforce_bounds(mut self, enforce: bool) -> Self {
        self.enforce_bounds = enforce;
        self
    }

    /// Turn bound enforcement on when `strict`; never turns it off
    pub fn strict(mut self, strict: bool) -> Self {
        self.enforce_bounds |= strict;
        self
    }

    /// Turn a requested maximum length into the one the splitter gets
    pub fn resolve(&self, requested: Option<i64>) -> Result<usize, ConvertError> {
        let Some(value) = requested else {
            return Ok(self.default_max_length.max(1));
        };

        if value <= 0 {
            return Err(ConvertError::NonPositiveMaxLength(value));
        }

        let out_of_range = || ConvertError::MaxLengthOutOfRange {
            value,
            min: self.min_max_length,
            max: self.max_max_length,
        };
        let length = usize::try_from(value).map_err(|_| out_of_range())?;

        if self.enforce_bounds && !(self.min_max_length..=self.max_max_length).contains(&length) {
            return Err(out_of_range());
        }

        Ok(length)
    }
}

fn read_env<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ConvertError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConvertError::InvalidSetting { name, value: raw }),
        Err(_) => Ok(None),
    }
}
