use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::remote::{CallContext, HttpBackend, RemoteError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackEvent {
    pub id: String,
    pub kind: String,
    pub actor_id: String,
    pub occurred_at: DateTime<Utc>,
    pub payload: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryEventsRequest {
    pub org_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<DateTime<Utc>>,
    pub offset: u32,
    pub limit: u32,
    pub sort_by: String,
    pub sort_direction: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryEventsResponse {
    pub events: Vec<TrackEvent>,
}

#[async_trait]
pub trait TrackService: Send + Sync {
    async fn query_events(
        &self,
        ctx: &CallContext,
        request: QueryEventsRequest,
    ) -> Result<QueryEventsResponse, RemoteError>;
}

pub struct HttpTrackService {
    backend: HttpBackend,
}

impl HttpTrackService {
    pub fn new(backend: HttpBackend) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl TrackService for HttpTrackService {
    async fn query_events(
        &self,
        ctx: &CallContext,
        request: QueryEventsRequest,
    ) -> Result<QueryEventsResponse, RemoteError> {
        self.backend.call(ctx, "QueryEvents", &request).await
    }
}
