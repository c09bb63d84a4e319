use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;

/// Wrapper for successful API responses: `{data, code, message}`.
#[derive(Debug)]
pub struct Envelope<T: Serialize> {
    pub data: T,
    pub message: String,
    pub status: StatusCode,
}

impl<T: Serialize> Envelope<T> {
    /// 200 OK with a human-readable message
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self { data, message: message.into(), status: StatusCode::OK }
    }

    /// 201 Created
    pub fn created(data: T, message: impl Into<String>) -> Self {
        Self { data, message: message.into(), status: StatusCode::CREATED }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let data = match serde_json::to_value(&self.data) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("failed to serialize response data: {}", e);
                return crate::error::ApiError::internal(
                    "gateway.Envelope",
                    "failed to serialize response data",
                )
                .into_response();
            }
        };

        let body = json!({
            "data": data,
            "code": self.status.as_u16(),
            "message": self.message,
        });

        (self.status, Json(body)).into_response()
    }
}

/// Handler return type: exactly one of the success or failure envelope.
pub type ApiResult<T> = Result<Envelope<T>, crate::error::ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_envelope_carries_code_and_message() {
        let env = Envelope::ok(json!({"goals": []}), "Read all goals successfully");
        assert_eq!(env.status, StatusCode::OK);
        assert_eq!(env.message, "Read all goals successfully");
    }

    #[test]
    fn created_envelope_is_201() {
        let env = Envelope::created(json!({}), "Created goal successfully");
        assert_eq!(env.status, StatusCode::CREATED);
    }
}
