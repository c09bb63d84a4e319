use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::remote::{CallContext, HttpBackend, RemoteError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetTopTagsRequest {
    pub org_id: String,
    pub limit: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutocompleteTagsRequest {
    pub org_id: String,
    pub prefix: String,
    pub limit: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagsResponse {
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareContentRequest {
    pub org_id: String,
    pub user_id: String,
    pub content_id: String,
    pub recipients: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareContentResponse {
    pub shared_with: u32,
}

#[async_trait]
pub trait ContentService: Send + Sync {
    async fn get_top_tags(
        &self,
        ctx: &CallContext,
        request: GetTopTagsRequest,
    ) -> Result<TagsResponse, RemoteError>;

    async fn autocomplete_tags(
        &self,
        ctx: &CallContext,
        request: AutocompleteTagsRequest,
    ) -> Result<TagsResponse, RemoteError>;

    async fn share_content(
        &self,
        ctx: &CallContext,
        request: ShareContentRequest,
    ) -> Result<ShareContentResponse, RemoteError>;
}

pub struct HttpContentService {
    backend: HttpBackend,
}

impl HttpContentService {
    pub fn new(backend: HttpBackend) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl ContentService for HttpContentService {
    async fn get_top_tags(
        &self,
        ctx: &CallContext,
        request: GetTopTagsRequest,
    ) -> Result<TagsResponse, RemoteError> {
        self.backend.call(ctx, "GetTopTags", &request).await
    }

    async fn autocomplete_tags(
        &self,
        ctx: &CallContext,
        request: AutocompleteTagsRequest,
    ) -> Result<TagsResponse, RemoteError> {
        self.backend.call(ctx, "AutocompleteTags", &request).await
    }

    async fn share_content(
        &self,
        ctx: &CallContext,
        request: ShareContentRequest,
    ) -> Result<ShareContentResponse, RemoteError> {
        self.backend.call(ctx, "Share", &request).await
    }
}
