mod common;

use anyhow::Result;
use axum::http::StatusCode;

use common::{gateway, VALID_SESSION};

// Pagination and sort normalization as observed by the backend: in-bounds
// values pass through unchanged, malformed values fall back to defaults,
// and oversized limits are clamped.

#[tokio::test]
async fn goals_listing_forwards_org_and_page_to_the_backend() -> Result<()> {
    let gw = gateway();

    let uri = format!("/goals/all?session={}&offset=0&limit=10", VALID_SESSION);
    let (status, body) = common::get(&gw.app, &uri).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 200);
    assert_eq!(body["message"], "Read all goals successfully");
    assert!(body["data"]["goals"].is_array());

    let calls = gw.plan.all_goals_calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].org_id, "orgid");
    assert_eq!(calls[0].offset, 0);
    assert_eq!(calls[0].limit, 10);
    Ok(())
}

#[tokio::test]
async fn malformed_page_parameters_fall_back_to_defaults() -> Result<()> {
    let gw = gateway();

    let uri = format!("/goals/all?session={}&offset=-3&limit=abc", VALID_SESSION);
    let (status, _) = common::get(&gw.app, &uri).await?;
    assert_eq!(status, StatusCode::OK);

    let calls = gw.plan.all_goals_calls.lock().unwrap();
    assert_eq!(calls[0].offset, 0);
    assert_eq!(calls[0].limit, 20);
    Ok(())
}

#[tokio::test]
async fn oversized_limit_is_clamped_to_the_maximum() -> Result<()> {
    let gw = gateway();

    let uri = format!("/goals/all?session={}&limit=999999", VALID_SESSION);
    let (status, _) = common::get(&gw.app, &uri).await?;
    assert_eq!(status, StatusCode::OK);

    let calls = gw.plan.all_goals_calls.lock().unwrap();
    assert_eq!(calls[0].limit, pulse_gateway::config::config().pagination.max_limit);
    Ok(())
}

#[tokio::test]
async fn unknown_sort_field_degrades_to_the_natural_order() -> Result<()> {
    let gw = gateway();

    let uri = format!(
        "/goals/all?session={}&sort_by=password&sort_direction=asc",
        VALID_SESSION
    );
    let (status, _) = common::get(&gw.app, &uri).await?;
    assert_eq!(status, StatusCode::OK);

    let calls = gw.plan.all_goals_calls.lock().unwrap();
    assert_eq!(calls[0].sort_by, "created_at");
    assert_eq!(calls[0].sort_direction, "asc");
    Ok(())
}

#[tokio::test]
async fn time_window_is_parsed_and_forwarded() -> Result<()> {
    let gw = gateway();

    let uri = format!(
        "/track/events?session={}&from=1700000000&to=2024-01-31T00:00:00Z",
        VALID_SESSION
    );
    let (status, body) = common::get(&gw.app, &uri).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Read events successfully");

    let calls = gw.track.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].from.unwrap().timestamp(), 1_700_000_000);
    assert_eq!(calls[0].to.unwrap().to_rfc3339(), "2024-01-31T00:00:00+00:00");
    assert_eq!(calls[0].sort_by, "occurred_at");
    Ok(())
}

#[tokio::test]
async fn malformed_window_bounds_stay_open() -> Result<()> {
    let gw = gateway();

    let uri = format!("/track/events?session={}&from=yesterday", VALID_SESSION);
    let (status, _) = common::get(&gw.app, &uri).await?;
    assert_eq!(status, StatusCode::OK);

    let calls = gw.track.calls.lock().unwrap();
    assert_eq!(calls[0].from, None);
    assert_eq!(calls[0].to, None);
    Ok(())
}
