use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("maxlength must be a positive integer, got {0}")]
    NonPositiveMaxLength(i64),

    #[error("maxlength {value} is outside the allowed range {min}..={max}")]
    MaxLengthOutOfRange { value: i64, min: usize, max: usize },

    #[error("Invalid request body: {0}")]
    InvalidRequest(#[from] serde_json::Error),

    #[error("Invalid setting {name}={value}")]
    InvalidSetting { name: &'static str, value: String },
}
