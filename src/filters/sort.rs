//! Sort normalization.
//!
//! Parses `sort_by`/`sort_direction` against the route's whitelist. Sort is
//! an optimization, not a correctness requirement, so an unknown field or
//! direction degrades to the route's natural order instead of failing.

use async_trait::async_trait;

use super::chain::{Filter, FilterInput};
use crate::context::{AttributeKey, RequestScope, SortDirection, SortSpec};
use crate::error::ApiError;

pub struct SortFilter {
    allowed: &'static [&'static str],
    default_field: &'static str,
    default_direction: SortDirection,
}

impl SortFilter {
    pub fn new(
        allowed: &'static [&'static str],
        default_field: &'static str,
        default_direction: SortDirection,
    ) -> Self {
        debug_assert!(allowed.contains(&default_field));
        Self { allowed, default_field, default_direction }
    }

    fn parse(&self, input: &FilterInput) -> SortSpec {
        let field = input
            .query("sort_by")
            .filter(|f| self.allowed.contains(f))
            .unwrap_or(self.default_field);

        let direction = match input.query("sort_direction").map(str::to_ascii_lowercase).as_deref() {
            Some("asc") => SortDirection::Asc,
            Some("desc") => SortDirection::Desc,
            _ => self.default_direction,
        };

        SortSpec { field: field.to_string(), direction }
    }
}

#[async_trait]
impl Filter for SortFilter {
    fn name(&self) -> &'static str {
        "SortFilter"
    }

    fn provides(&self) -> &'static [AttributeKey] {
        &[AttributeKey::SortParameter, AttributeKey::SortDirection]
    }

    async fn apply(&self, input: &FilterInput, scope: &mut RequestScope) -> Result<(), ApiError> {
        scope.set_sort(self.parse(input));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderMap;

    const FIELDS: &[&str] = &["created_at", "title", "due_date"];

    fn sort_for(query: &[(&str, &str)]) -> SortSpec {
        let input = FilterInput::for_tests(query, HeaderMap::new());
        SortFilter::new(FIELDS, "created_at", SortDirection::Desc).parse(&input)
    }

    #[test]
    fn whitelisted_field_and_direction_pass_through() {
        let sort = sort_for(&[("sort_by", "title"), ("sort_direction", "asc")]);
        assert_eq!(sort.field, "title");
        assert_eq!(sort.direction, SortDirection::Asc);
    }

    #[test]
    fn direction_is_case_insensitive() {
        let sort = sort_for(&[("sort_direction", "ASC")]);
        assert_eq!(sort.direction, SortDirection::Asc);
    }

    #[test]
    fn unknown_field_degrades_to_default() {
        let sort = sort_for(&[("sort_by", "password"), ("sort_direction", "asc")]);
        assert_eq!(sort.field, "created_at");
        assert_eq!(sort.direction, SortDirection::Asc);
    }

    #[test]
    fn unknown_direction_degrades_to_default() {
        let sort = sort_for(&[("sort_by", "title"), ("sort_direction", "sideways")]);
        assert_eq!(sort.field, "title");
        assert_eq!(sort.direction, SortDirection::Desc);
    }

    #[test]
    fn absent_parameters_give_the_natural_order() {
        let sort = sort_for(&[]);
        assert_eq!(sort.field, "created_at");
        assert_eq!(sort.direction, SortDirection::Desc);
    }
}
