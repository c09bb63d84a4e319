//! Route handlers.
//!
//! Every handler follows the same shape: read the attributes its filter
//! chain resolved, bind the body if there is one (running the payload codec
//! on variant fields), dispatch the typed backend call, and wrap the result
//! in the uniform envelope. Anything beyond that belongs in a filter, the
//! codec, or the backend itself.

pub mod content;
pub mod plan;
pub mod survey;
pub mod track;

use axum::extract::rejection::JsonRejection;
use axum::http::HeaderMap;
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::context::RequestScope;
use crate::error::ApiError;
use crate::remote::CallContext;

/// Backend call context for a handler: forwarded headers plus the session
/// the chain validated.
pub(crate) fn call_context(headers: &HeaderMap, scope: &RequestScope) -> CallContext {
    CallContext::from_headers(headers, scope.session().ok())
}

/// Bind the raw JSON body, converting an axum rejection into the uniform
/// bind-error envelope.
pub(crate) fn json_body(
    domain: &str,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Value, ApiError> {
    let Json(body) = payload.map_err(|e| ApiError::bind(domain, e.body_text()))?;
    Ok(body)
}

/// A required top-level object in the request body.
pub(crate) fn required<'a>(domain: &str, body: &'a Value, field: &str) -> Result<&'a Value, ApiError> {
    body.get(field)
        .filter(|v| !v.is_null())
        .ok_or_else(|| ApiError::bind(domain, format!("missing {field} object")))
}

/// Decode a body sub-object into its statically-known shape.
pub(crate) fn decode<T: DeserializeOwned>(
    domain: &str,
    field: &str,
    value: &Value,
) -> Result<T, ApiError> {
    serde_json::from_value(value.clone())
        .map_err(|e| ApiError::bind(domain, format!("invalid {field}: {e}")))
}
