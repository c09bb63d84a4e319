//! Remote call dispatch.
//!
//! Backend operations are typed async traits (see [`crate::backend`]); this
//! module carries the pieces they share: the propagated call context, the
//! transport error taxonomy, and the HTTP/JSON transport. The gateway never
//! retries a remote call; retry policy, where it exists, is backend-side
//! configuration.

pub mod context;
pub mod http;

pub use context::CallContext;
pub use http::HttpBackend;

use std::time::Duration;
use thiserror::Error;

/// Failure classes a backend call can produce. Handlers convert these into
/// envelope errors via [`crate::error::ApiError::remote`].
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("denied: {0}")]
    Denied(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("backend unavailable: {0}")]
    Unavailable(String),

    #[error("call timed out after {0:?}")]
    Timeout(Duration),

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("malformed backend response: {0}")]
    Decode(String),
}
