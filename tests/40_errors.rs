mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

use common::{gateway, gateway_with, SpyPlan, StubIdentity, VALID_SESSION};

// Error responder behavior: exactly one envelope shape per failure, with
// the status chosen by the failure class.

#[tokio::test]
async fn missing_goal_is_a_404_not_found() -> Result<()> {
    let gw = gateway();

    let uri = format!("/goals/g-missing?session={}", VALID_SESSION);
    let (status, body) = common::get(&gw.app, &uri).await?;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 404);
    assert_eq!(body["message"], "NotFound");
    assert_eq!(body["errors"][0]["domain"], "plan.ReadGoal");
    assert!(body.get("data").is_none(), "failure envelope must not carry data");
    Ok(())
}

#[tokio::test]
async fn backend_failure_surfaces_as_the_operation_error_kind() -> Result<()> {
    let gw = gateway_with(
        StubIdentity { employee: true },
        SpyPlan { fail_all_goals: true, ..SpyPlan::default() },
    );

    let uri = format!("/goals/all?session={}", VALID_SESSION);
    let (status, body) = common::get(&gw.app, &uri).await?;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "QueryError");
    assert_eq!(body["errors"][0]["domain"], "plan.AllGoals");
    let reason = body["errors"][0]["reason"].as_str().unwrap_or_default();
    assert!(reason.contains("plan backend down"), "reason: {}", reason);
    Ok(())
}

#[tokio::test]
async fn missing_body_object_is_a_bind_error() -> Result<()> {
    let gw = gateway();

    let uri = format!("/goals?session={}", VALID_SESSION);
    let (status, body) = common::post_json(&gw.app, &uri, json!({"not_goal": {}})).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "BindError");
    assert_eq!(body["errors"][0]["domain"], "plan.CreateGoal");
    assert_eq!(gw.plan.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn success_envelope_carries_data_code_and_message() -> Result<()> {
    let gw = gateway();

    let uri = format!("/goals/goal-1?session={}", VALID_SESSION);
    let (status, body) = common::get(&gw.app, &uri).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 200);
    assert_eq!(body["message"], "Read goal successfully");
    assert!(body["data"]["goal"].is_object());
    assert!(body.get("errors").is_none(), "success envelope must not carry errors");
    Ok(())
}

#[tokio::test]
async fn share_route_reports_recipient_count() -> Result<()> {
    let gw = gateway();

    let uri = format!("/content/c-9/share?session={}", VALID_SESSION);
    let body = json!({"recipients": ["user-2", "user-3"], "message": "worth a read"});
    let (status, response) = common::post_json(&gw.app, &uri, body).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["data"]["shared_with"], 2);
    assert_eq!(response["message"], "Shared content successfully");
    Ok(())
}
