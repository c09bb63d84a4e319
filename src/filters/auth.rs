//! Authentication and authorization filters.

use std::sync::Arc;

use async_trait::async_trait;

use super::chain::{Filter, FilterInput};
use crate::backend::IdentityService;
use crate::context::{AttributeKey, RequestScope};
use crate::error::ApiError;
use crate::remote::{CallContext, RemoteError};

/// Pull the session token out of the `session` query parameter or the
/// `Authorization: Bearer` header.
fn session_token(input: &FilterInput) -> Option<String> {
    if let Some(token) = input.query("session") {
        if !token.is_empty() {
            return Some(token.to_string());
        }
    }
    input
        .header("authorization")
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Validates the session against the identity backend and records the
/// resolved user id. Every protected route runs this first.
pub struct BasicAuthenticate {
    identity: Arc<dyn IdentityService>,
}

impl BasicAuthenticate {
    pub fn new(identity: Arc<dyn IdentityService>) -> Self {
        Self { identity }
    }
}

#[async_trait]
impl Filter for BasicAuthenticate {
    fn name(&self) -> &'static str {
        "BasicAuthenticate"
    }

    fn provides(&self) -> &'static [AttributeKey] {
        &[AttributeKey::UserId]
    }

    async fn apply(&self, input: &FilterInput, scope: &mut RequestScope) -> Result<(), ApiError> {
        let token = session_token(input).ok_or_else(|| {
            ApiError::unauthorized("identity.ValidateSession", "session token missing")
        })?;

        let ctx = CallContext::from_headers(&input.headers, Some(&token));
        let identity = self
            .identity
            .validate_session(&ctx, &token)
            .await
            .map_err(|e| ApiError::unauthorized("identity.ValidateSession", e.to_string()))?;

        scope.set_session(token);
        scope.set_user_id(identity.user_id);
        Ok(())
    }
}

/// Resolves the organisation (and optional team) the session belongs to,
/// honouring an `X-Organisation-Id` header override. Must run after
/// [`BasicAuthenticate`]; the chain executor enforces that at registration
/// time, and the runtime guard below keeps a miswired chain from panicking.
pub struct OrganisationAuthenticate {
    identity: Arc<dyn IdentityService>,
}

impl OrganisationAuthenticate {
    pub fn new(identity: Arc<dyn IdentityService>) -> Self {
        Self { identity }
    }
}

#[async_trait]
impl Filter for OrganisationAuthenticate {
    fn name(&self) -> &'static str {
        "OrganisationAuthenticate"
    }

    fn requires(&self) -> &'static [AttributeKey] {
        &[AttributeKey::UserId]
    }

    fn provides(&self) -> &'static [AttributeKey] {
        &[AttributeKey::OrgId, AttributeKey::TeamId]
    }

    async fn apply(&self, input: &FilterInput, scope: &mut RequestScope) -> Result<(), ApiError> {
        if !scope.has_user_id() {
            return Err(ApiError::internal(
                "identity.ResolveOrganisation",
                "organisation resolution ran before authentication",
            ));
        }

        if let Some(org_id) = input.header("x-organisation-id") {
            let team_id = input.header("x-team-id").map(str::to_string);
            scope.set_org(org_id.to_string(), team_id);
            return Ok(());
        }

        let session = scope.session()?.to_string();
        let ctx = CallContext::from_headers(&input.headers, Some(&session));
        let membership = self
            .identity
            .resolve_organisation(&ctx, &session)
            .await
            .map_err(|e| ApiError::unauthorized("identity.ResolveOrganisation", e.to_string()))?;

        scope.set_org(membership.org_id, membership.team_id);
        Ok(())
    }
}

/// Confirms the caller holds employee privilege inside the resolved
/// organisation. Routes serving end-users omit this filter.
pub struct EmployeeAuthenticate {
    identity: Arc<dyn IdentityService>,
}

impl EmployeeAuthenticate {
    pub fn new(identity: Arc<dyn IdentityService>) -> Self {
        Self { identity }
    }
}

#[async_trait]
impl Filter for EmployeeAuthenticate {
    fn name(&self) -> &'static str {
        "EmployeeAuthenticate"
    }

    fn requires(&self) -> &'static [AttributeKey] {
        &[AttributeKey::UserId, AttributeKey::OrgId]
    }

    async fn apply(&self, input: &FilterInput, scope: &mut RequestScope) -> Result<(), ApiError> {
        let user_id = scope.user_id()?;
        let org_id = scope.org_id()?;

        let ctx = CallContext::from_headers(&input.headers, scope.session().ok());
        let employee = match self.identity.is_employee(&ctx, user_id, org_id).await {
            Ok(employee) => employee,
            Err(RemoteError::Denied(reason)) => {
                return Err(ApiError::forbidden("identity.CheckEmployee", reason))
            }
            Err(e) => {
                return Err(ApiError::internal("identity.CheckEmployee", e.to_string()))
            }
        };

        if !employee {
            return Err(ApiError::forbidden(
                "identity.CheckEmployee",
                format!("user {user_id} lacks employee privilege in organisation {org_id}"),
            ));
        }
        Ok(())
    }
}
