//! Extraction of products and pagination from a search-results document.
//!
//! Every candidate container is processed independently. Each of its four
//! fields walks an ordered selector chain until one yields a non-empty value.
//! A field that fails outright (see [`FieldError`]) discards only that
//! candidate; a candidate without a title or image is skipped silently.

use reqwest::Url;
use scraper::{ElementRef, Html, Selector};

use crate::error::{FieldError, ScraperError};
use crate::pagination::detect_pagination;
use crate::parse_helpers::{parse_rating, parse_review_count};
use crate::selectors::SelectorTable;
use crate::types::{Product, SearchPage};
use crate::urls::qualify_url;

/// Parses `html` into products and pagination state.
///
/// Malformed-but-parseable markup never fails: missing fields degrade to
/// `None` or drop the candidate. The same input always produces the same
/// output.
///
/// # Errors
///
/// Returns [`ScraperError::Parse`] when `html` contains no markup at all.
pub fn extract_search_page(
    html: &str,
    selectors: &SelectorTable,
    base: &Url,
    current_page: u32,
) -> Result<SearchPage, ScraperError> {
    if html.trim().is_empty() {
        return Err(ScraperError::Parse("document is empty".to_string()));
    }
    if !html.contains('<') {
        return Err(ScraperError::Parse(
            "document contains no markup tags".to_string(),
        ));
    }

    let document = Html::parse_document(html);
    let products = extract_products(&document, selectors, base);
    let pagination = detect_pagination(&document, selectors, base, current_page);

    tracing::info!(
        products = products.len(),
        current_page = pagination.current_page,
        is_last_page = pagination.is_last_page,
        "extracted search results page"
    );

    Ok(SearchPage {
        products,
        pagination,
    })
}

fn extract_products(document: &Html, selectors: &SelectorTable, base: &Url) -> Vec<Product> {
    let candidates: Vec<ElementRef<'_>> = document.select(&selectors.product_item).collect();
    tracing::debug!(candidates = candidates.len(), "found search result candidates");

    let mut products = Vec::with_capacity(candidates.len());
    for (index, candidate) in candidates.into_iter().enumerate() {
        match extract_candidate(candidate, selectors, base) {
            Ok(Some(product)) => products.push(product),
            Ok(None) => {
                tracing::debug!(index, "candidate missing title or image; skipped");
            }
            Err(e) => {
                tracing::warn!(index, error = %e, "discarding malformed search result candidate");
            }
        }
    }

    products
}

/// Runs all four field extractions, then applies the inclusion filter.
///
/// Extractions are not short-circuited so every field failure is observable
/// in the logs.
fn extract_candidate(
    candidate: ElementRef<'_>,
    selectors: &SelectorTable,
    base: &Url,
) -> Result<Option<Product>, FieldError> {
    let title = first_text(candidate, &selectors.title);
    let rating = first_text(candidate, &selectors.rating)
        .map_or(Ok(None), |text| parse_rating(&text));
    let review_count = first_text(candidate, &selectors.review_count)
        .map_or(Ok(None), |text| parse_review_count(&text));
    let image_url = extract_image_url(candidate, selectors, base);

    if let Err(e) = &rating {
        tracing::debug!(error = %e, "rating extraction failed");
    }
    if let Err(e) = &review_count {
        tracing::debug!(error = %e, "review count extraction failed");
    }

    let rating = rating?;
    let review_count = review_count?;

    let (Some(title), Some(image_url)) = (title, image_url) else {
        return Ok(None);
    };

    Ok(Some(Product {
        title,
        rating,
        review_count,
        image_url,
    }))
}

/// Trimmed text of the first element, in chain order, whose text is non-empty.
fn first_text(scope: ElementRef<'_>, chain: &[Selector]) -> Option<String> {
    chain.iter().find_map(|selector| {
        let element = scope.select(selector).next()?;
        let text = element.text().collect::<String>();
        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_owned())
    })
}

/// First non-empty image attribute (`src`, then `data-src` by default) along
/// the image chain, qualified to an absolute URL.
fn extract_image_url(
    scope: ElementRef<'_>,
    selectors: &SelectorTable,
    base: &Url,
) -> Option<String> {
    selectors.image.iter().find_map(|selector| {
        let element = scope.select(selector).next()?;
        selectors
            .image_attributes
            .iter()
            .filter_map(|attr| element.value().attr(attr))
            .map(str::trim)
            .find(|value| !value.is_empty())
            .and_then(|value| qualify_url(value, base))
    })
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
