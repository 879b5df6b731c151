//! Next-page detection for search-results documents.
//!
//! On the last page the storefront keeps the "next" control in place and
//! marks it disabled, e.g.
//!
//! ```text
//! <span class="s-pagination-item s-pagination-next s-pagination-disabled">Next</span>
//! ```
//!
//! while earlier pages render it as a link:
//!
//! ```text
//! <a href="/s?k=shoes&page=2" class="s-pagination-item s-pagination-next">Next</a>
//! ```

use reqwest::Url;
use scraper::Html;

use crate::selectors::SelectorTable;
use crate::types::PaginationState;
use crate::urls::qualify_page_url;

/// Computes pagination state from `document`.
///
/// `is_last_page` is true iff a disabled-next marker is present; in that case
/// `next_page_url` is `None` regardless of any `href` on the marker.
/// Otherwise the first `href` along the next-link chain that resolves to an
/// http(s) URL against `base` is used.
#[must_use]
pub fn detect_pagination(
    document: &Html,
    selectors: &SelectorTable,
    base: &Url,
    current_page: u32,
) -> PaginationState {
    let is_last_page = selectors
        .next_disabled
        .iter()
        .any(|selector| document.select(selector).next().is_some());

    let next_page_url = if is_last_page {
        None
    } else {
        selectors
            .next_link
            .iter()
            .find_map(|selector| {
                document
                    .select(selector)
                    .next()
                    .and_then(|element| element.value().attr("href"))
                    .and_then(|href| qualify_page_url(href, base))
            })
    };

    if !is_last_page && next_page_url.is_none() {
        tracing::debug!(current_page, "no next-page link found");
    }

    PaginationState {
        is_last_page,
        next_page_url,
        current_page,
    }
}
