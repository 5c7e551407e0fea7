mod error;
mod request;
mod response;


pub use error::ConvertError;
pub use request::{ConvertLimits, ConvertRequest, MAX_MAX_LENGTH, MIN_MAX_LENGTH};
pub use response::{ConvertResponse, ErrorResponse};

use tracing::{info, info_span};

use crate::plain::to_plain_fragments;
use crate::splitter::{FragmentSplitter, SplitConfig};

/// Validate a request, split the markup and wrap the fragments.
///
/// The splitter is never run when validation fails.
pub fn convert_markup(
    markup: &str,
    request: &ConvertRequest,
    limits: &ConvertLimits,
) -> Result<ConvertResponse, ConvertError> {
    let max_length = limits.resolve(request.maxlength)?;
    let _span = info_span!("convert", max_length, plain = request.plain).entered();

    let splitter = FragmentSplitter::new(SplitConfig::new(max_length));
    let fragments = splitter.split(markup);

    let data = if request.plain {
        to_plain_fragments(&fragments)
    } else {
        fragments.iter().map(|f| f.to_string()).collect()
    };

    info!(
        input_chars = markup.chars().count(),
        fragments = data.len(),
        "conversion complete"
    );

    Ok(ConvertResponse::new(data, max_length))
}
