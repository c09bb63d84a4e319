use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::remote::{CallContext, HttpBackend, RemoteError};

/// The principal a session resolves to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionIdentity {
    pub user_id: String,
}

/// Organisation (and optional team) scope of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrgMembership {
    pub org_id: String,
    pub team_id: Option<String>,
}

/// Identity backend reached by the auth filters. This is the only backend a
/// filter is allowed to call.
#[async_trait]
pub trait IdentityService: Send + Sync {
    async fn validate_session(
        &self,
        ctx: &CallContext,
        session: &str,
    ) -> Result<SessionIdentity, RemoteError>;

    async fn resolve_organisation(
        &self,
        ctx: &CallContext,
        session: &str,
    ) -> Result<OrgMembership, RemoteError>;

    async fn is_employee(
        &self,
        ctx: &CallContext,
        user_id: &str,
        org_id: &str,
    ) -> Result<bool, RemoteError>;
}

#[derive(Debug, Serialize)]
struct SessionRequest<'a> {
    session: &'a str,
}

#[derive(Debug, Serialize)]
struct EmployeeRequest<'a> {
    user_id: &'a str,
    org_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmployeeResponse {
    employee: bool,
}

pub struct HttpIdentityService {
    backend: HttpBackend,
}

impl HttpIdentityService {
    pub fn new(backend: HttpBackend) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl IdentityService for HttpIdentityService {
    async fn validate_session(
        &self,
        ctx: &CallContext,
        session: &str,
    ) -> Result<SessionIdentity, RemoteError> {
        self.backend.call(ctx, "ValidateSession", &SessionRequest { session }).await
    }

    async fn resolve_organisation(
        &self,
        ctx: &CallContext,
        session: &str,
    ) -> Result<OrgMembership, RemoteError> {
        self.backend.call(ctx, "ResolveOrganisation", &SessionRequest { session }).await
    }

    async fn is_employee(
        &self,
        ctx: &CallContext,
        user_id: &str,
        org_id: &str,
    ) -> Result<bool, RemoteError> {
        let resp: EmployeeResponse = self
            .backend
            .call(ctx, "CheckEmployee", &EmployeeRequest { user_id, org_id })
            .await?;
        Ok(resp.employee)
    }
}
