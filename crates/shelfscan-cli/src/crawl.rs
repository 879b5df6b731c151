use std::time::Duration;

use serde::Serialize;
use shelfscan_scraper::{PaginationState, Product, ScraperError, SearchClient, SearchRequest};

#[derive(Debug, Clone)]
pub(crate) struct CrawlOptions {
    pub max_pages: u32,
    pub delay: Duration,
}

/// Products stitched together across every page visited, plus the pagination
/// state of the last page fetched.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CrawlResult {
    pub products: Vec<Product>,
    pub pages_fetched: u32,
    pub pagination: PaginationState,
}

/// Fetches pages one at a time starting from `first`, following each page's
/// next link.
///
/// Stops at the last page, when no next link is found, on a page with no
/// products, or after `max_pages` pages. Any fetch or parse failure aborts the
/// crawl; pages already collected are discarded with it.
pub(crate) async fn crawl(
    client: &SearchClient,
    first: SearchRequest,
    options: &CrawlOptions,
) -> Result<CrawlResult, ScraperError> {
    let max_pages = options.max_pages.max(1);
    let mut products = Vec::new();
    let mut pages_fetched = 0;
    let mut request = first;

    loop {
        let page = client.search(&request).await?;
        pages_fetched += 1;
        let found = page.products.len();
        products.extend(page.products);

        tracing::info!(
            page = page.pagination.current_page,
            products = found,
            total = products.len(),
            is_last_page = page.pagination.is_last_page,
            "crawled page"
        );

        let next = if found == 0 || pages_fetched >= max_pages {
            None
        } else {
            SearchRequest::next_after(&page.pagination)
        };

        match next {
            Some(next) => {
                request = next;
                if !options.delay.is_zero() {
                    tokio::time::sleep(options.delay).await;
                }
            }
            None => {
                return Ok(CrawlResult {
                    products,
                    pages_fetched,
                    pagination: page.pagination,
                });
            }
        }
    }
}
