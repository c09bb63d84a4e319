use axum::{extract::State, http::HeaderMap, Extension};
use serde_json::{json, Value};

use crate::backend::track::QueryEventsRequest;
use crate::context::RequestScope;
use crate::envelope::{ApiResult, Envelope};
use crate::error::{ApiError, Op};
use crate::routes::AppState;

/// GET /track/events - time-windowed listing
pub async fn events(
    State(state): State<AppState>,
    Extension(scope): Extension<RequestScope>,
    headers: HeaderMap,
) -> ApiResult<Value> {
    const DOMAIN: &str = "track.QueryEvents";

    let ctx = super::call_context(&headers, &scope);
    let page = scope.page()?;
    let window = scope.window()?;
    let sort = scope.sort()?;

    let request = QueryEventsRequest {
        org_id: scope.org_id()?.to_string(),
        team_id: scope.team_id().map(str::to_string),
        from: window.from,
        to: window.to,
        offset: page.offset,
        limit: page.limit,
        sort_by: sort.field.clone(),
        sort_direction: sort.direction.as_str().to_string(),
    };

    let response = state
        .track
        .query_events(&ctx, request)
        .await
        .map_err(|e| ApiError::remote(Op::Query, DOMAIN, e))?;

    Ok(Envelope::ok(json!({ "events": response.events }), "Read events successfully"))
}
