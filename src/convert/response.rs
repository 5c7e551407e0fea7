//! JSON envelopes returned to clients

use serde::{Deserialize, Serialize};

use super::ConvertError;

/// Successful conversion envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertResponse {
    pub success: bool,
    pub data: Vec<String>,
    pub total_fragments: usize,
    pub maxlength: usize,
}

impl ConvertResponse {
    pub fn new(data: Vec<String>, maxlength: usize) -> Self {
        Self {
            success: true,
            total_fragments: data.len(),
            data,
            maxlength,
        }
    }
}

/// Failed conversion envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl From<&ConvertError> for ErrorResponse {
    fn from(err: &ConvertError) -> Self {
        Self {
            success: false,
            error: err.to_string(),
        }
    }
}
