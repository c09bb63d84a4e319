//! Audit stage.
//!
//! Runs after authorization and before the handler. Records who called what
//! and must never block or fail the request; presence on a route is a
//! configuration decision, not dead code.

use async_trait::async_trait;

use super::chain::{Filter, FilterInput};
use crate::context::{AttributeKey, RequestScope};
use crate::error::ApiError;

pub struct Audit;

#[async_trait]
impl Filter for Audit {
    fn name(&self) -> &'static str {
        "Audit"
    }

    fn requires(&self) -> &'static [AttributeKey] {
        &[AttributeKey::UserId, AttributeKey::OrgId]
    }

    async fn apply(&self, input: &FilterInput, scope: &mut RequestScope) -> Result<(), ApiError> {
        // Best effort only. The scope reads cannot fail here given the
        // requires() contract, but even a miswired chain must not lose the
        // request over its audit trail.
        let user_id = scope.user_id().unwrap_or("unknown");
        let org_id = scope.org_id().unwrap_or("unknown");

        tracing::info!(
            target: "audit",
            method = %input.method,
            path = %input.path,
            user_id,
            org_id,
            team_id = scope.team_id().unwrap_or("-"),
            "api call"
        );
        Ok(())
    }
}
