// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use serde_json::{json, Value};

use crate::remote::RemoteError;

/// Error classes surfaced by the gateway. The kind name is what clients see
/// in the envelope `message` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    // 401 Unauthorized
    Unauthorized,

    // 403 Forbidden
    Forbidden,

    // 400 Bad Request (malformed body or unresolvable variant discriminator)
    BindError,

    // 404 Not Found
    NotFound,

    // Backend call failures, named after the operation class that failed
    QueryError,
    ReadError,
    CreateError,
    UpdateError,
    DeleteError,
    SearchError,

    // 500 Internal Server Error (unexpected faults only)
    Internal,
}

/// Operation classes used when converting a backend failure into an error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Query,
    Read,
    Create,
    Update,
    Delete,
    Search,
}

impl Op {
    fn kind(self) -> ErrorKind {
        match self {
            Op::Query => ErrorKind::QueryError,
            Op::Read => ErrorKind::ReadError,
            Op::Create => ErrorKind::CreateError,
            Op::Update => ErrorKind::UpdateError,
            Op::Delete => ErrorKind::DeleteError,
            Op::Search => ErrorKind::SearchError,
        }
    }
}

/// One entry in the failure envelope's `errors` array.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetail {
    pub domain: String,
    pub reason: String,
}

/// Gateway error carrying the failure class plus the `(domain, reason)` pair
/// the calling handler or filter supplied.
#[derive(Debug, Clone)]
pub struct ApiError {
    kind: ErrorKind,
    status: StatusCode,
    detail: ErrorDetail,
}

impl ApiError {
    pub fn new(
        kind: ErrorKind,
        status: StatusCode,
        domain: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            status,
            detail: ErrorDetail { domain: domain.into(), reason: reason.into() },
        }
    }

    pub fn unauthorized(domain: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, StatusCode::UNAUTHORIZED, domain, reason)
    }

    pub fn forbidden(domain: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, StatusCode::FORBIDDEN, domain, reason)
    }

    pub fn bind(domain: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::BindError, StatusCode::BAD_REQUEST, domain, reason)
    }

    pub fn not_found(domain: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, StatusCode::NOT_FOUND, domain, reason)
    }

    pub fn internal(domain: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, StatusCode::INTERNAL_SERVER_ERROR, domain, reason)
    }

    /// Convert a backend failure into the envelope error for the given
    /// operation class. Backend-signalled not-found, denied, and invalid
    /// argument keep their client-facing status; everything else surfaces
    /// as an internal fault of the call.
    pub fn remote(op: Op, domain: impl Into<String>, err: RemoteError) -> Self {
        let domain = domain.into();
        match err {
            RemoteError::NotFound(reason) => Self::not_found(domain, reason),
            RemoteError::Denied(reason) => Self::forbidden(domain, reason),
            RemoteError::InvalidArgument(reason) => {
                Self::new(op.kind(), StatusCode::BAD_REQUEST, domain, reason)
            }
            other => {
                tracing::error!(%domain, error = %other, "backend call failed");
                Self::new(op.kind(), StatusCode::INTERNAL_SERVER_ERROR, domain, other.to_string())
            }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn reason(&self) -> &str {
        &self.detail.reason
    }

    /// Kind name as it appears in the envelope `message` field.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::Forbidden => "Forbidden",
            ErrorKind::BindError => "BindError",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::QueryError => "QueryError",
            ErrorKind::ReadError => "ReadError",
            ErrorKind::CreateError => "CreateError",
            ErrorKind::UpdateError => "UpdateError",
            ErrorKind::DeleteError => "DeleteError",
            ErrorKind::SearchError => "SearchError",
            ErrorKind::Internal => "InternalError",
        }
    }

    /// Failure envelope body: `{code, message, errors: [{domain, reason}]}`.
    pub fn to_json(&self) -> Value {
        json!({
            "code": self.status.as_u16(),
            "message": self.kind_name(),
            "errors": [&self.detail],
        })
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} ({})", self.kind_name(), self.detail.reason, self.detail.domain)
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self.to_json())).into_response()
    }
}

impl From<crate::codec::CodecError> for ApiError {
    fn from(err: crate::codec::CodecError) -> Self {
        ApiError::bind("codec.UnmarshalAny", err.to_string())
    }
}
