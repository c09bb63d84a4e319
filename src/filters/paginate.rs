//! Pagination normalization.
//!
//! Parses `offset`/`limit` (and `from`/`to` on time-scoped routes) into the
//! scope. Never fails a request: missing or malformed values fall back to
//! the configured defaults, and `limit` is clamped to the configured
//! maximum to bound downstream load.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::chain::{Filter, FilterInput};
use crate::config::PaginationConfig;
use crate::context::{AttributeKey, PageSpec, RequestScope, TimeWindow};
use crate::error::ApiError;

pub struct Paginate {
    default_limit: u32,
    max_limit: u32,
    windowed: bool,
}

impl Paginate {
    pub fn new(config: &PaginationConfig) -> Self {
        Self {
            default_limit: config.default_limit,
            max_limit: config.max_limit,
            windowed: false,
        }
    }

    /// Variant for time-scoped domains that also parses `from`/`to`.
    pub fn windowed(config: &PaginationConfig) -> Self {
        Self { windowed: true, ..Self::new(config) }
    }

    fn parse_page(&self, input: &FilterInput) -> PageSpec {
        let offset = input
            .query("offset")
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(0);

        let limit = input
            .query("limit")
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|l| *l >= 1)
            .unwrap_or(self.default_limit)
            .min(self.max_limit);

        PageSpec { offset, limit }
    }

    fn parse_window(input: &FilterInput) -> TimeWindow {
        TimeWindow {
            from: input.query("from").and_then(parse_instant),
            to: input.query("to").and_then(parse_instant),
        }
    }
}

/// Accepts unix epoch seconds or RFC 3339; anything else leaves the bound open.
fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(secs) = raw.parse::<i64>() {
        return DateTime::from_timestamp(secs, 0);
    }
    DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.with_timezone(&Utc))
}

#[async_trait]
impl Filter for Paginate {
    fn name(&self) -> &'static str {
        "Paginate"
    }

    fn provides(&self) -> &'static [AttributeKey] {
        if self.windowed {
            &[
                AttributeKey::PaginateLimit,
                AttributeKey::PaginateOffset,
                AttributeKey::PaginateFrom,
                AttributeKey::PaginateTo,
            ]
        } else {
            &[AttributeKey::PaginateLimit, AttributeKey::PaginateOffset]
        }
    }

    async fn apply(&self, input: &FilterInput, scope: &mut RequestScope) -> Result<(), ApiError> {
        scope.set_page(self.parse_page(input));
        if self.windowed {
            scope.set_window(Self::parse_window(input));
        }
        Ok(())
    }
}
