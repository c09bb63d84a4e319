use std::time::Duration;

use axum::http::{HeaderMap, HeaderName};
use uuid::Uuid;

/// Headers forwarded unchanged to the backends. Everything else on the
/// inbound request stays at the edge.
const FORWARDED_HEADERS: [&str; 4] = ["authorization", "x-trace-id", "x-request-id", "x-forwarded-for"];

/// Per-call context propagated with every backend operation: the caller's
/// session token, a trace id, the forwarded identity/tracing headers, and
/// the deadline the transport must enforce.
#[derive(Debug, Clone)]
pub struct CallContext {
    pub session: Option<String>,
    pub trace_id: String,
    pub forwarded: HeaderMap,
    pub deadline: Duration,
}

impl CallContext {
    /// Build the context from the inbound request headers. The trace id is
    /// taken from `X-Trace-Id` when the caller supplied one, otherwise
    /// generated here so every downstream call is correlated.
    pub fn from_headers(headers: &HeaderMap, session: Option<&str>) -> Self {
        let mut forwarded = HeaderMap::new();
        for name in FORWARDED_HEADERS {
            let name = HeaderName::from_static(name);
            for value in headers.get_all(&name) {
                forwarded.append(name.clone(), value.clone());
            }
        }

        let trace_id = headers
            .get("x-trace-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let deadline = Duration::from_millis(crate::config::config().backends.request_timeout_ms);

        Self {
            session: session.map(str::to_string),
            trace_id,
            forwarded,
            deadline,
        }
    }
}
