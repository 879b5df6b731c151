use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use shelfscan_scraper::{SearchPage, SearchRequest};

use super::{map_scraper_error, ApiError, AppState};
use crate::middleware::RequestId;

/// `GET /api/scrape` query. Either `keyword` (with optional `page`) or `url`
/// to resume from a previously returned `nextPageUrl`; `url` wins when both
/// are present.
#[derive(Debug, Deserialize)]
pub(super) struct ScrapeQuery {
    pub keyword: Option<String>,
    /// Kept as text so a malformed value gets a JSON 400 instead of axum's
    /// plain-text query rejection.
    pub page: Option<String>,
    pub url: Option<String>,
}

pub(super) async fn scrape(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ScrapeQuery>,
) -> Result<Json<SearchPage>, ApiError> {
    let page = parse_page(query.page.as_deref())?;
    let request = SearchRequest::from_parts(query.keyword.as_deref(), page, query.url.as_deref())
        .map_err(|e| map_scraper_error(&req_id.0, &e))?;

    let result = state
        .client
        .search(&request)
        .await
        .map_err(|e| map_scraper_error(&req_id.0, &e))?;

    Ok(Json(result))
}

fn parse_page(raw: Option<&str>) -> Result<Option<u32>, ApiError> {
    match raw.map(str::trim).filter(|p| !p.is_empty()) {
        None => Ok(None),
        Some(value) => value.parse::<u32>().map(Some).map_err(|_| {
            ApiError::bad_request(format!(
                "invalid page \"{value}\": must be a positive integer"
            ))
        }),
    }
}
