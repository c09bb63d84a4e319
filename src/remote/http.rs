use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Serialize};
use url::Url;

use super::{CallContext, RemoteError};

/// JSON-over-HTTP transport for one backend service. Each typed operation
/// posts its request struct to `<base>/<Method>` with the context headers
/// and deadline applied; the response body deserializes into the operation's
/// response struct.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: reqwest::Client,
    base: Url,
}

impl HttpBackend {
    pub fn new(mut base: Url) -> Self {
        // Url::join replaces the last path segment unless the base ends
        // with a slash.
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        Self { http: reqwest::Client::new(), base }
    }

    pub async fn call<Q, R>(&self, ctx: &CallContext, method: &str, request: &Q) -> Result<R, RemoteError>
    where
        Q: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = self
            .base
            .join(method)
            .map_err(|e| RemoteError::Transport(format!("invalid method url {method:?}: {e}")))?;

        let mut req = self
            .http
            .post(url)
            .timeout(ctx.deadline)
            .header("x-trace-id", &ctx.trace_id)
            .json(request);

        for (name, value) in ctx.forwarded.iter() {
            req = req.header(name, value);
        }
        if let Some(session) = &ctx.session {
            req = req.bearer_auth(session);
        }

        let response = req.send().await.map_err(|e| {
            if e.is_timeout() {
                RemoteError::Timeout(ctx.deadline)
            } else if e.is_connect() {
                RemoteError::Unavailable(e.to_string())
            } else {
                RemoteError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<R>()
                .await
                .map_err(|e| RemoteError::Decode(e.to_string()));
        }

        let detail = Self::error_detail(response).await;
        Err(match status {
            StatusCode::NOT_FOUND => RemoteError::NotFound(detail),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => RemoteError::Denied(detail),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                RemoteError::InvalidArgument(detail)
            }
            s if s.is_server_error() => RemoteError::Unavailable(detail),
            s => RemoteError::Transport(format!("unexpected status {s}: {detail}")),
        })
    }

    /// Pull a human-readable reason out of the backend's error body, falling
    /// back to the raw text.
    async fn error_detail(response: reqwest::Response) -> String {
        let status = response.status();
        match response.text().await {
            Ok(body) => serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| {
                    v.get("message")
                        .or_else(|| v.get("reason"))
                        .and_then(|m| m.as_str())
                        .map(str::to_string)
                })
                .unwrap_or_else(|| {
                    if body.is_empty() {
                        status.to_string()
                    } else {
                        body
                    }
                }),
            Err(_) => status.to_string(),
        }
    }
}
