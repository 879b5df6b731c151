//! Free-text to number conversions for rating and review-count fragments.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::FieldError;

static DECIMAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+[.,]?\d*)").expect("valid regex"));

const MAX_RATING: f64 = 5.0;

/// Parses the first decimal number from a star-rating fragment.
///
/// `"4.5 out of 5 stars"` and `"4,5 von 5 Sternen"` both yield `4.5`.
/// Text without digits yields `Ok(None)`.
///
/// # Errors
///
/// Returns [`FieldError::RatingOutOfRange`] when the number is not in `0..=5`;
/// such text does not describe a star rating.
pub(crate) fn parse_rating(text: &str) -> Result<Option<f64>, FieldError> {
    let Some(found) = DECIMAL_RE.find(text) else {
        return Ok(None);
    };

    let Ok(value) = found.as_str().replace(',', ".").parse::<f64>() else {
        return Ok(None);
    };

    if !(0.0..=MAX_RATING).contains(&value) {
        return Err(FieldError::RatingOutOfRange {
            value,
            text: text.trim().to_owned(),
        });
    }

    Ok(Some(value))
}

/// Keeps only the ASCII digits of `text` and parses them as a count.
///
/// `"1,234 ratings"` yields `1234`; text without digits yields `Ok(None)`.
///
/// # Errors
///
/// Returns [`FieldError::ReviewCountOverflow`] if the digit string exceeds `u64`.
pub(crate) fn parse_review_count(text: &str) -> Result<Option<u64>, FieldError> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Ok(None);
    }

    digits
        .parse::<u64>()
        .map(Some)
        .map_err(|_| FieldError::ReviewCountOverflow { digits })
}
