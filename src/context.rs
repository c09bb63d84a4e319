//! Request-scoped attribute context.
//!
//! Filters write resolved values here in chain order; handlers read them
//! through typed accessors. Reading an attribute the route's filter chain
//! never set is a programming error and surfaces as an internal error
//! response rather than a panic.

use chrono::{DateTime, Utc};

use crate::error::ApiError;

/// Well-known attribute keys, used by the chain executor to validate filter
/// ordering at registration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKey {
    UserId,
    OrgId,
    TeamId,
    PaginateLimit,
    PaginateOffset,
    PaginateFrom,
    PaginateTo,
    SortParameter,
    SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpec {
    pub offset: u32,
    pub limit: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

/// Optional time window for time-scoped listings; an unparsable or missing
/// bound stays open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeWindow {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// The per-request attribute store. Created empty when the filter chain
/// starts, populated by filters, read-only once the handler runs, dropped
/// with the request.
#[derive(Debug, Clone, Default)]
pub struct RequestScope {
    session: Option<String>,
    user_id: Option<String>,
    org_id: Option<String>,
    team_id: Option<String>,
    page: Option<PageSpec>,
    window: Option<TimeWindow>,
    sort: Option<SortSpec>,
}

impl RequestScope {
    pub fn new() -> Self {
        Self::default()
    }

    // Writers, used by filters only.

    pub fn set_session(&mut self, token: impl Into<String>) {
        self.session = Some(token.into());
    }

    pub fn set_user_id(&mut self, id: impl Into<String>) {
        self.user_id = Some(id.into());
    }

    pub fn set_org(&mut self, org_id: impl Into<String>, team_id: Option<String>) {
        self.org_id = Some(org_id.into());
        self.team_id = team_id;
    }

    pub fn set_page(&mut self, page: PageSpec) {
        self.page = Some(page);
    }

    pub fn set_window(&mut self, window: TimeWindow) {
        self.window = Some(window);
    }

    pub fn set_sort(&mut self, sort: SortSpec) {
        self.sort = Some(sort);
    }

    // Guaranteed accessors. A `None` here means the route's chain never set
    // the attribute, which is a wiring bug, not a client error.

    pub fn session(&self) -> Result<&str, ApiError> {
        self.session.as_deref().ok_or_else(|| {
            ApiError::internal(
                "gateway.RequestScope",
                "session token read before authentication ran",
            )
        })
    }

    pub fn user_id(&self) -> Result<&str, ApiError> {
        self.user_id.as_deref().ok_or_else(|| missing(AttributeKey::UserId))
    }

    pub fn org_id(&self) -> Result<&str, ApiError> {
        self.org_id.as_deref().ok_or_else(|| missing(AttributeKey::OrgId))
    }

    pub fn page(&self) -> Result<PageSpec, ApiError> {
        self.page.ok_or_else(|| missing(AttributeKey::PaginateLimit))
    }

    pub fn window(&self) -> Result<TimeWindow, ApiError> {
        self.window.ok_or_else(|| missing(AttributeKey::PaginateFrom))
    }

    pub fn sort(&self) -> Result<&SortSpec, ApiError> {
        self.sort.as_ref().ok_or_else(|| missing(AttributeKey::SortParameter))
    }

    /// Team membership is optional within an organisation; absence after
    /// organisation resolution is a valid state, not an error.
    pub fn team_id(&self) -> Option<&str> {
        self.team_id.as_deref()
    }

    // Presence probes for filters that guard their own prerequisites.

    pub fn has_user_id(&self) -> bool {
        self.user_id.is_some()
    }

    pub fn has_org_id(&self) -> bool {
        self.org_id.is_some()
    }
}

fn missing(key: AttributeKey) -> ApiError {
    ApiError::internal(
        "gateway.RequestScope",
        format!("attribute {:?} read before the filter chain set it", key),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_attribute_is_an_internal_error_not_a_panic() {
        let scope = RequestScope::new();
        let err = scope.org_id().unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.reason().contains("OrgId"));
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut scope = RequestScope::new();
        scope.set_user_id("u-1");
        scope.set_org("orgid", Some("team-9".into()));
        scope.set_page(PageSpec { offset: 0, limit: 10 });

        assert_eq!(scope.user_id().unwrap(), "u-1");
        assert_eq!(scope.org_id().unwrap(), "orgid");
        assert_eq!(scope.team_id(), Some("team-9"));
        assert_eq!(scope.page().unwrap(), PageSpec { offset: 0, limit: 10 });
    }

    #[test]
    fn team_id_absence_is_valid() {
        let mut scope = RequestScope::new();
        scope.set_org("orgid", None);
        assert_eq!(scope.org_id().unwrap(), "orgid");
        assert_eq!(scope.team_id(), None);
    }
}
