use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::HeaderMap,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::backend::plan::{
    AllGoalsRequest, CreateGoalRequest, DeleteGoalRequest, Goal, GoalTarget, ReadGoalRequest,
    UpdateGoalRequest,
};
use crate::codec::{self, Recurrence};
use crate::context::RequestScope;
use crate::envelope::{ApiResult, Envelope};
use crate::error::{ApiError, Op};
use crate::routes::AppState;

/// Inbound goal shape; `target.recurrence` is a variant field and stays raw
/// until the codec has checked its discriminator.
#[derive(Debug, Deserialize)]
struct GoalBody {
    title: String,
    #[serde(default)]
    description: Option<String>,
    target: TargetBody,
}

#[derive(Debug, Deserialize)]
struct TargetBody {
    metric: String,
    count: u32,
    #[serde(default)]
    recurrence: Option<Value>,
}

impl GoalBody {
    fn into_goal(self, scope: &RequestScope) -> Result<Goal, ApiError> {
        let recurrence = codec::unmarshal_any_opt::<Recurrence>(
            "goal.target.recurrence",
            self.target.recurrence.as_ref(),
        )?;
        Ok(Goal {
            id: None,
            title: self.title,
            description: self.description,
            owner_id: scope.user_id()?.to_string(),
            team_id: scope.team_id().map(str::to_string),
            target: GoalTarget {
                metric: self.target.metric,
                count: self.target.count,
                recurrence,
            },
        })
    }
}

/// Outbound goal with the recurrence discriminator re-injected.
fn goal_wire(goal: &Goal) -> Result<Value, ApiError> {
    let recurrence = goal
        .target
        .recurrence
        .as_ref()
        .map(|r| {
            codec::marshal_any(r)
                .map_err(|e| ApiError::internal("codec.MarshalAny", e.to_string()))
        })
        .transpose()?;

    Ok(json!({
        "id": goal.id,
        "title": goal.title,
        "description": goal.description,
        "owner_id": goal.owner_id,
        "team_id": goal.team_id,
        "target": {
            "metric": goal.target.metric,
            "count": goal.target.count,
            "recurrence": recurrence,
        },
    }))
}

/// GET /goals/all
pub async fn all_goals(
    State(state): State<AppState>,
    Extension(scope): Extension<RequestScope>,
    headers: HeaderMap,
) -> ApiResult<Value> {
    let ctx = super::call_context(&headers, &scope);
    let page = scope.page()?;
    let sort = scope.sort()?;

    let request = AllGoalsRequest {
        org_id: scope.org_id()?.to_string(),
        team_id: scope.team_id().map(str::to_string),
        offset: page.offset,
        limit: page.limit,
        sort_by: sort.field.clone(),
        sort_direction: sort.direction.as_str().to_string(),
    };

    let response = state
        .plan
        .all_goals(&ctx, request)
        .await
        .map_err(|e| ApiError::remote(Op::Query, "plan.AllGoals", e))?;

    let goals = response.goals.iter().map(goal_wire).collect::<Result<Vec<_>, _>>()?;
    Ok(Envelope::ok(json!({ "goals": goals }), "Read all goals successfully"))
}

/// POST /goals
pub async fn create_goal(
    State(state): State<AppState>,
    Extension(scope): Extension<RequestScope>,
    headers: HeaderMap,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    const DOMAIN: &str = "plan.CreateGoal";

    let body = super::json_body(DOMAIN, payload)?;
    let goal_body: GoalBody = super::decode(DOMAIN, "goal", super::required(DOMAIN, &body, "goal")?)?;

    let ctx = super::call_context(&headers, &scope);
    let request = CreateGoalRequest {
        org_id: scope.org_id()?.to_string(),
        user_id: scope.user_id()?.to_string(),
        goal: goal_body.into_goal(&scope)?,
    };

    let response = state
        .plan
        .create_goal(&ctx, request)
        .await
        .map_err(|e| ApiError::remote(Op::Create, DOMAIN, e))?;

    Ok(Envelope::created(
        json!({ "goal": goal_wire(&response.goal)? }),
        "Created goal successfully",
    ))
}

/// GET /goals/:goal_id
pub async fn read_goal(
    State(state): State<AppState>,
    Extension(scope): Extension<RequestScope>,
    headers: HeaderMap,
    Path(goal_id): Path<String>,
) -> ApiResult<Value> {
    const DOMAIN: &str = "plan.ReadGoal";

    let ctx = super::call_context(&headers, &scope);
    let request = ReadGoalRequest {
        org_id: scope.org_id()?.to_string(),
        goal_id: goal_id.clone(),
    };

    let response = state
        .plan
        .read_goal(&ctx, request)
        .await
        .map_err(|e| ApiError::remote(Op::Read, DOMAIN, e))?
        .ok_or_else(|| ApiError::not_found(DOMAIN, format!("goal {goal_id} does not exist")))?;

    Ok(Envelope::ok(json!({ "goal": goal_wire(&response.goal)? }), "Read goal successfully"))
}

/// PUT /goals/:goal_id
pub async fn update_goal(
    State(state): State<AppState>,
    Extension(scope): Extension<RequestScope>,
    headers: HeaderMap,
    Path(goal_id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    const DOMAIN: &str = "plan.UpdateGoal";

    let body = super::json_body(DOMAIN, payload)?;
    let goal_body: GoalBody = super::decode(DOMAIN, "goal", super::required(DOMAIN, &body, "goal")?)?;

    let ctx = super::call_context(&headers, &scope);
    let request = UpdateGoalRequest {
        org_id: scope.org_id()?.to_string(),
        user_id: scope.user_id()?.to_string(),
        goal_id,
        goal: goal_body.into_goal(&scope)?,
    };

    let response = state
        .plan
        .update_goal(&ctx, request)
        .await
        .map_err(|e| ApiError::remote(Op::Update, DOMAIN, e))?;

    Ok(Envelope::ok(json!({ "goal": goal_wire(&response.goal)? }), "Updated goal successfully"))
}

/// DELETE /goals/:goal_id
pub async fn delete_goal(
    State(state): State<AppState>,
    Extension(scope): Extension<RequestScope>,
    headers: HeaderMap,
    Path(goal_id): Path<String>,
) -> ApiResult<Value> {
    const DOMAIN: &str = "plan.DeleteGoal";

    let ctx = super::call_context(&headers, &scope);
    let request = DeleteGoalRequest {
        org_id: scope.org_id()?.to_string(),
        user_id: scope.user_id()?.to_string(),
        goal_id,
    };

    state
        .plan
        .delete_goal(&ctx, request)
        .await
        .map_err(|e| ApiError::remote(Op::Delete, DOMAIN, e))?;

    Ok(Envelope::ok(json!({}), "Deleted goal successfully"))
}
