//! REST API shared utilities (pageable queries, pagination headers)

pub mod entity_with_pagination;
pub mod headers;
pub mod health;
pub mod metrics;

use crate::domain::pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::domain::{PageRequest, SortOrder};
use crate::error::{AppError, Result};
use axum::http::{header::LINK, HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// Pageable query parameters: `page` (zero-based), `size`, repeated `sort`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct PageableQuery {
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub size: Option<i64>,
    #[serde(default)]
    pub sort: Vec<String>,
}

impl PageableQuery {
    pub fn into_page_request(self) -> Result<PageRequest> {
        let page = self.page.unwrap_or(0);
        if page < 0 {
            return Err(AppError::BadRequest(
                "page must be a non-negative integer (>= 0)".to_string(),
            ));
        }

        let size = self.size.unwrap_or(DEFAULT_PAGE_SIZE);
        if size < 1 {
            return Err(AppError::BadRequest(
                "size must be a positive integer (>= 1)".to_string(),
            ));
        }

        let size = size.min(MAX_PAGE_SIZE);
        if page.checked_mul(size).is_none() {
            return Err(AppError::BadRequest(format!(
                "page {} is out of range for size {}",
                page, size
            )));
        }

        let mut sort = Vec::new();
        for param in &self.sort {
            sort.extend(SortOrder::parse_param(param).map_err(AppError::BadRequest)?);
        }

        Ok(PageRequest::new(page, size).with_sort(sort))
    }
}

fn page_uri(base_path: &str, page: i64, size: i64) -> String {
    format!("{}?page={}&size={}", base_path, page, size)
}

/// `X-Total-Count` plus an RFC 5988 `Link` header for a listing.
pub fn pagination_headers(base_path: &str, page: &PageRequest, total: i64) -> HeaderMap {
    let total_pages = page.total_pages(total);
    let mut links = Vec::new();

    let next_page = page.page.saturating_add(1);
    if next_page < total_pages {
        links.push(format!(
            "<{}>; rel=\"next\"",
            page_uri(base_path, next_page, page.size)
        ));
    }
    if page.page > 0 {
        links.push(format!(
            "<{}>; rel=\"prev\"",
            page_uri(base_path, page.page - 1, page.size)
        ));
    }
    let last_page = (total_pages - 1).max(0);
    links.push(format!(
        "<{}>; rel=\"last\"",
        page_uri(base_path, last_page, page.size)
    ));
    links.push(format!(
        "<{}>; rel=\"first\"",
        page_uri(base_path, 0, page.size)
    ));

    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static(TOTAL_COUNT_HEADER),
        HeaderValue::from(total),
    );
    if let Ok(link) = HeaderValue::from_str(&links.join(",")) {
        headers.insert(LINK, link);
    }
    headers
}
