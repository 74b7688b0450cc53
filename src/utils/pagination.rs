//! Shared pagination contract for all list endpoints.
//!
//! Every listing returns `{ pagination, data }` where `pagination` carries
//! the total row count, the page geometry, and absolute `next`/`prev`
//! navigation links built from the caller-supplied base URL. The base URL
//! is caller-supplied because the service layer has no knowledge of the
//! address it is exposed on.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// `page`/`limit` query parameters, accepted as numbers or numeric strings.
///
/// Zero and negative values are clamped rather than reaching offset
/// arithmetic; `limit` is capped at 100.
#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct PageQuery {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: Some(1),
            limit: Some(10),
        }
    }
}

impl PageQuery {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(10).clamp(1, 100)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }
}

/// Pagination descriptor returned alongside every list page.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: i64,
    pub limit: i64,
    pub current_page: i64,
    pub total_pages: i64,
    /// Absolute URL of the next page, `null` on (or past) the last page.
    pub next: Option<String>,
    /// Absolute URL of the previous page, `null` on the first page.
    pub prev: Option<String>,
}

impl Pagination {
    /// Builds the descriptor for one page. `limit` must already be clamped
    /// to >= 1 (see [`PageQuery::limit`]).
    pub fn new(total: i64, page: i64, limit: i64, base_url: &str) -> Self {
        let total_pages = if total == 0 {
            0
        } else {
            (total + limit - 1) / limit
        };

        let next = (page < total_pages)
            .then(|| format!("{}?page={}&limit={}", base_url, page + 1, limit));
        let prev = (page > 1).then(|| format!("{}?page={}&limit={}", base_url, page - 1, limit));

        Self {
            total,
            limit,
            current_page: page,
            total_pages,
            next,
            prev,
        }
    }
}
