use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::codec::Recurrence;
use crate::remote::{CallContext, HttpBackend, RemoteError};

/// Goal as the plan backend stores it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub owner_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    pub target: GoalTarget,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalTarget {
    pub metric: String,
    pub count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Recurrence>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllGoalsRequest {
    pub org_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    pub offset: u32,
    pub limit: u32,
    pub sort_by: String,
    pub sort_direction: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllGoalsResponse {
    pub goals: Vec<Goal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGoalRequest {
    pub org_id: String,
    pub user_id: String,
    pub goal: Goal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalResponse {
    pub goal: Goal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadGoalRequest {
    pub org_id: String,
    pub goal_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateGoalRequest {
    pub org_id: String,
    pub user_id: String,
    pub goal_id: String,
    pub goal: Goal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteGoalRequest {
    pub org_id: String,
    pub user_id: String,
    pub goal_id: String,
}

#[async_trait]
pub trait PlanService: Send + Sync {
    async fn all_goals(
        &self,
        ctx: &CallContext,
        request: AllGoalsRequest,
    ) -> Result<AllGoalsResponse, RemoteError>;

    async fn create_goal(
        &self,
        ctx: &CallContext,
        request: CreateGoalRequest,
    ) -> Result<GoalResponse, RemoteError>;

    /// `Ok(None)` means the goal does not exist.
    async fn read_goal(
        &self,
        ctx: &CallContext,
        request: ReadGoalRequest,
    ) -> Result<Option<GoalResponse>, RemoteError>;

    async fn update_goal(
        &self,
        ctx: &CallContext,
        request: UpdateGoalRequest,
    ) -> Result<GoalResponse, RemoteError>;

    async fn delete_goal(
        &self,
        ctx: &CallContext,
        request: DeleteGoalRequest,
    ) -> Result<(), RemoteError>;
}

pub struct HttpPlanService {
    backend: HttpBackend,
}

impl HttpPlanService {
    pub fn new(backend: HttpBackend) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl PlanService for HttpPlanService {
    async fn all_goals(
        &self,
        ctx: &CallContext,
        request: AllGoalsRequest,
    ) -> Result<AllGoalsResponse, RemoteError> {
        self.backend.call(ctx, "AllGoals", &request).await
    }

    async fn create_goal(
        &self,
        ctx: &CallContext,
        request: CreateGoalRequest,
    ) -> Result<GoalResponse, RemoteError> {
        self.backend.call(ctx, "CreateGoal", &request).await
    }

    async fn read_goal(
        &self,
        ctx: &CallContext,
        request: ReadGoalRequest,
    ) -> Result<Option<GoalResponse>, RemoteError> {
        match self.backend.call(ctx, "ReadGoal", &request).await {
            Ok(resp) => Ok(Some(resp)),
            Err(RemoteError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn update_goal(
        &self,
        ctx: &CallContext,
        request: UpdateGoalRequest,
    ) -> Result<GoalResponse, RemoteError> {
        self.backend.call(ctx, "UpdateGoal", &request).await
    }

    async fn delete_goal(
        &self,
        ctx: &CallContext,
        request: DeleteGoalRequest,
    ) -> Result<(), RemoteError> {
        let _: serde_json::Value = self.backend.call(ctx, "DeleteGoal", &request).await?;
        Ok(())
    }
}
