use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    /// Missing or malformed caller input; raised before any network call.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// DNS, connect, timeout, or body-read failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("request failed: {status} {reason} ({url})")]
    Fetch {
        status: u16,
        reason: String,
        url: String,
    },

    #[error("document could not be parsed as markup: {0}")]
    Parse(String),

    #[error("invalid selector \"{selector}\" for {field}: {reason}")]
    InvalidSelector {
        field: &'static str,
        selector: String,
        reason: String,
    },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

/// Failure while extracting one field of one search-result candidate.
///
/// Never surfaced to callers: the candidate is logged and dropped, and the
/// rest of the page is still processed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("rating {value} outside 0-5 in \"{text}\"")]
    RatingOutOfRange { value: f64, text: String },

    #[error("review count \"{digits}\" does not fit in u64")]
    ReviewCountOverflow { digits: String },
}
