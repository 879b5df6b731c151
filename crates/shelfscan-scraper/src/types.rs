//! Result and request types for one search-results page.
//!
//! Field values are raw: titles are untruncated and unescaped, ratings and
//! review counts are plain numbers. Formatting belongs to whoever renders them.
//!
//! Every [`SearchPage`] is computed fresh from one document. Continuation state
//! lives in the returned [`PaginationState`]; callers chain pages by turning it
//! into the next [`SearchRequest`] with [`SearchRequest::next_after`].

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::ScraperError;
use crate::urls::{page_from_url, qualify_url};

/// One product entry from a search-results page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub title: String,
    /// Star rating in `0.0..=5.0`.
    pub rating: Option<f64>,
    pub review_count: Option<u64>,
    /// Absolute image URL.
    pub image_url: String,
}

/// Where the current batch sits in the result sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationState {
    pub is_last_page: bool,
    /// Absolute URL of the following page. Always `None` when `is_last_page`.
    pub next_page_url: Option<String>,
    pub current_page: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    pub products: Vec<Product>,
    pub pagination: PaginationState,
}

/// What to fetch: a fresh keyword search or a previously returned page URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchRequest {
    Keyword {
        keyword: String,
        /// 1-based page number.
        page: u32,
    },
    Url {
        /// Absolute URL, or a path relative to the storefront origin.
        url: String,
        /// Page number the caller already knows this URL corresponds to.
        page: Option<u32>,
    },
}

impl SearchRequest {
    #[must_use]
    pub fn keyword(keyword: impl Into<String>, page: u32) -> Self {
        Self::Keyword {
            keyword: keyword.into(),
            page,
        }
    }

    #[must_use]
    pub fn url(url: impl Into<String>) -> Self {
        Self::Url {
            url: url.into(),
            page: None,
        }
    }

    /// Builds a request from loosely-typed caller input, such as query
    /// parameters. A non-blank `url` takes precedence over `keyword`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidRequest`] when neither a URL nor a
    /// non-blank keyword is given, or when `page` is zero.
    pub fn from_parts(
        keyword: Option<&str>,
        page: Option<u32>,
        url: Option<&str>,
    ) -> Result<Self, ScraperError> {
        if page == Some(0) {
            return Err(ScraperError::InvalidRequest(
                "page must be a positive integer".to_string(),
            ));
        }

        if let Some(url) = url.map(str::trim).filter(|u| !u.is_empty()) {
            return Ok(Self::Url {
                url: url.to_owned(),
                page,
            });
        }

        match keyword.map(str::trim).filter(|k| !k.is_empty()) {
            Some(keyword) => Ok(Self::Keyword {
                keyword: keyword.to_owned(),
                page: page.unwrap_or(1),
            }),
            None => Err(ScraperError::InvalidRequest(
                "missing required parameter: keyword".to_string(),
            )),
        }
    }

    /// Request for the page after `state`, or `None` when there is nowhere
    /// left to go.
    #[must_use]
    pub fn next_after(state: &PaginationState) -> Option<Self> {
        if state.is_last_page {
            return None;
        }
        let url = state.next_page_url.clone()?;
        Some(Self::Url {
            url,
            page: Some(state.current_page.saturating_add(1)),
        })
    }

    /// Page number reported back in [`PaginationState::current_page`].
    ///
    /// URL requests use the caller-supplied page, then the URL's own `page`
    /// query parameter, then 1.
    #[must_use]
    pub fn current_page(&self, base: &Url) -> u32 {
        match self {
            Self::Keyword { page, .. } => (*page).max(1),
            Self::Url { url, page } => page
                .or_else(|| qualify_url(url, base).as_deref().and_then(page_from_url))
                .filter(|p| *p > 0)
                .unwrap_or(1),
        }
    }
}
