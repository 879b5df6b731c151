//! HTTP client for storefront search-results pages.

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{header, Client, StatusCode, Url};
use shelfscan_core::{AppConfig, SelectorConfig};

use crate::error::ScraperError;
use crate::parse::extract_search_page;
use crate::selectors::SelectorTable;
use crate::types::{SearchPage, SearchRequest};
use crate::urls::{origin_of, parse_base_url, qualify_page_url};

/// Characters left unescaped by JavaScript's `encodeURIComponent`, which is
/// how the storefront's own search box encodes the `k` parameter.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const ACCEPT_HTML: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";

/// Fetches and parses one search-results page per call.
///
/// Holds no per-search state, so a single instance can be shared across
/// concurrent callers. Non-200 responses and network failures are returned
/// as errors without retrying.
#[derive(Debug, Clone)]
pub struct SearchClient {
    client: Client,
    base_url: Url,
    accept_language: String,
    selectors: SelectorTable,
}

impl SearchClient {
    /// Creates a `SearchClient` with a browser-like header profile.
    ///
    /// `base_url` is reduced to its origin; relative links found in pages and
    /// relative resume URLs are qualified against it.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidBaseUrl`] if `base_url` is not an absolute http(s) URL.
    /// - [`ScraperError::InvalidSelector`] if a selector in `selectors` does not compile.
    /// - [`ScraperError::Transport`] if the underlying `reqwest::Client` cannot be built.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        accept_language: &str,
        selectors: &SelectorConfig,
    ) -> Result<Self, ScraperError> {
        let base_url = parse_base_url(base_url)?;
        let selectors = SelectorTable::compile(selectors)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url,
            accept_language: accept_language.to_owned(),
            selectors,
        })
    }

    /// Creates a `SearchClient` from application settings.
    ///
    /// # Errors
    ///
    /// See [`SearchClient::new`].
    pub fn from_config(config: &AppConfig, selectors: &SelectorConfig) -> Result<Self, ScraperError> {
        Self::new(
            &config.base_url,
            config.request_timeout_secs,
            &config.user_agent,
            &config.accept_language,
            selectors,
        )
    }

    /// Storefront origin this client resolves relative links against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetches the page described by `request` and extracts its products and
    /// pagination state.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidRequest`] if the request is unusable; nothing is sent.
    /// - [`ScraperError::Fetch`] if the storefront answers with anything but 200.
    /// - [`ScraperError::Transport`] on network or body-read failure.
    /// - [`ScraperError::Parse`] if the body contains no markup.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchPage, ScraperError> {
        let url = self.resolve_url(request)?;
        let current_page = request.current_page(&self.base_url);
        let body = self.fetch_page(&url).await?;
        self.parse_page(&body, current_page)
    }

    /// Extracts products and pagination from an already-fetched document.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Parse`] when `html` contains no markup.
    pub fn parse_page(&self, html: &str, current_page: u32) -> Result<SearchPage, ScraperError> {
        extract_search_page(html, &self.selectors, &self.base_url, current_page)
    }

    /// Builds the absolute URL to fetch for `request`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidRequest`] for a blank keyword, page 0,
    /// or a resume URL that is blank or does not resolve to an http(s) URL.
    pub fn resolve_url(&self, request: &SearchRequest) -> Result<String, ScraperError> {
        match request {
            SearchRequest::Keyword { keyword, page } => {
                let keyword = keyword.trim();
                if keyword.is_empty() {
                    return Err(ScraperError::InvalidRequest(
                        "invalid or empty search keyword".to_string(),
                    ));
                }
                if *page == 0 {
                    return Err(ScraperError::InvalidRequest(
                        "page must be a positive integer".to_string(),
                    ));
                }
                tracing::info!(keyword, page, "searching products");
                Ok(Self::keyword_url(&origin_of(&self.base_url), keyword, *page))
            }
            SearchRequest::Url { url, .. } => {
                let resolved = qualify_page_url(url, &self.base_url).ok_or_else(|| {
                    ScraperError::InvalidRequest(format!("invalid page URL \"{url}\""))
                })?;
                tracing::info!(url = %resolved, "fetching next page");
                Ok(resolved)
            }
        }
    }

    /// Issues a single GET for `url` and returns the body of a 200 response.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Fetch`] for any status other than 200.
    /// - [`ScraperError::Transport`] for network or body-read failures.
    pub async fn fetch_page(&self, url: &str) -> Result<String, ScraperError> {
        tracing::debug!(url, "requesting search results page");

        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, ACCEPT_HTML)
            .header(header::ACCEPT_LANGUAGE, &self.accept_language)
            .header(header::CACHE_CONTROL, "no-cache")
            .header(header::UPGRADE_INSECURE_REQUESTS, "1")
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let reason = status.canonical_reason().unwrap_or("Unknown").to_owned();
            tracing::warn!(url, status = status.as_u16(), reason = %reason, "search page request failed");
            return Err(ScraperError::Fetch {
                status: status.as_u16(),
                reason,
                url: url.to_owned(),
            });
        }

        Ok(response.text().await?)
    }

    /// Builds the search URL for `keyword`. Page 1 omits the `page` parameter,
    /// matching the storefront's own links.
    fn keyword_url(origin: &str, keyword: &str, page: u32) -> String {
        let encoded = utf8_percent_encode(keyword, COMPONENT);
        if page > 1 {
            format!("{origin}/s?k={encoded}&page={page}")
        } else {
            format!("{origin}/s?k={encoded}")
        }
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
