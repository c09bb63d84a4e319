use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::HeaderMap,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::backend::content::{AutocompleteTagsRequest, GetTopTagsRequest, ShareContentRequest};
use crate::context::RequestScope;
use crate::envelope::{ApiResult, Envelope};
use crate::error::{ApiError, Op};
use crate::routes::AppState;

/// GET /content/tags/top
pub async fn top_tags(
    State(state): State<AppState>,
    Extension(scope): Extension<RequestScope>,
    headers: HeaderMap,
) -> ApiResult<Value> {
    const DOMAIN: &str = "content.GetTopTags";

    let ctx = super::call_context(&headers, &scope);
    let request = GetTopTagsRequest {
        org_id: scope.org_id()?.to_string(),
        limit: scope.page()?.limit,
    };

    let response = state
        .content
        .get_top_tags(&ctx, request)
        .await
        .map_err(|e| ApiError::remote(Op::Query, DOMAIN, e))?;

    Ok(Envelope::ok(json!({ "tags": response.tags }), "Read top tags successfully"))
}

#[derive(Debug, Deserialize)]
pub struct AutocompleteQuery {
    #[serde(default)]
    q: String,
}

/// GET /content/tags/autocomplete - end-user route, no employee check
pub async fn autocomplete_tags(
    State(state): State<AppState>,
    Extension(scope): Extension<RequestScope>,
    headers: HeaderMap,
    Query(query): Query<AutocompleteQuery>,
) -> ApiResult<Value> {
    const DOMAIN: &str = "content.AutocompleteTags";

    let ctx = super::call_context(&headers, &scope);
    let request = AutocompleteTagsRequest {
        org_id: scope.org_id()?.to_string(),
        prefix: query.q,
        limit: scope.page()?.limit,
    };

    let response = state
        .content
        .autocomplete_tags(&ctx, request)
        .await
        .map_err(|e| ApiError::remote(Op::Search, DOMAIN, e))?;

    Ok(Envelope::ok(json!({ "tags": response.tags }), "Read tags successfully"))
}

#[derive(Debug, Deserialize)]
struct ShareBody {
    recipients: Vec<String>,
    #[serde(default)]
    message: Option<String>,
}

/// POST /content/:content_id/share - end-user route, no employee check
pub async fn share_content(
    State(state): State<AppState>,
    Extension(scope): Extension<RequestScope>,
    headers: HeaderMap,
    Path(content_id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    const DOMAIN: &str = "content.Share";

    let body = super::json_body(DOMAIN, payload)?;
    let share: ShareBody = super::decode(DOMAIN, "share", &body)?;

    let ctx = super::call_context(&headers, &scope);
    let request = ShareContentRequest {
        org_id: scope.org_id()?.to_string(),
        user_id: scope.user_id()?.to_string(),
        content_id,
        recipients: share.recipients,
        message: share.message,
    };

    let response = state
        .content
        .share_content(&ctx, request)
        .await
        .map_err(|e| ApiError::remote(Op::Create, DOMAIN, e))?;

    Ok(Envelope::ok(
        json!({ "shared_with": response.shared_with }),
        "Shared content successfully",
    ))
}
