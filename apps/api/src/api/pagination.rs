use axum::http::Uri;
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::domain::pagination::{LimitOffset, Paginated};
use crate::domain::repositories::LeagueFilter;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Query string accepted by list endpoints
///
/// `league` is a comma separated list of league ids, e.g. `?league=1,2`.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub league: Option<String>,
}

impl ListQuery {
    pub fn page_number(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    pub fn window(&self) -> Result<LimitOffset, ApiError> {
        if self.page_number() == 0 {
            return Err(invalid_page());
        }
        Ok(LimitOffset::page(self.page_number(), self.page_size()))
    }

    pub fn league_filter(&self) -> Result<LeagueFilter, ApiError> {
        let Some(raw) = self.league.as_deref() else {
            return Ok(LeagueFilter::default());
        };

        raw.split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| {
                id.parse::<i64>()
                    .map_err(|_| ApiError::bad_request(format!("Invalid league id: {}", id)))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(LeagueFilter)
    }
}

/// Pagination envelope returned by list endpoints
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Wraps one page of results, linking to its neighbours
    ///
    /// Asking for a page past the end is an error, except for the first page
    /// of an empty result set.
    pub fn from_paginated(uri: &Uri, query: &ListQuery, page: Paginated<T>) -> Result<Self, ApiError> {
        let number = query.page_number();
        if number > 1 && page.items.is_empty() {
            return Err(invalid_page());
        }

        let seen = i64::from(number) * i64::from(query.page_size());
        Ok(Self {
            count: page.total,
            next: (seen < page.total).then(|| page_link(uri, number + 1)),
            previous: (number > 1).then(|| page_link(uri, number - 1)),
            results: page.items,
        })
    }
}

fn invalid_page() -> ApiError {
    ApiError::not_found("Invalid page.")
}

/// Same path and query with the `page` parameter replaced
fn page_link(uri: &Uri, page: u32) -> String {
    let mut pairs: Vec<&str> = uri
        .query()
        .unwrap_or_default()
        .split('&')
        .filter(|pair| !pair.is_empty() && !pair.starts_with("page="))
        .collect();
    let page = format!("page={}", page);
    pairs.push(&page);

    format!("{}?{}", uri.path(), pairs.join("&"))
}
