use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::codec::QuestionSettings;
use crate::remote::{CallContext, HttpBackend, RemoteError};

/// Survey question; `settings` is the per-type variant field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub settings: QuestionSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateQuestionRequest {
    pub org_id: String,
    pub survey_id: String,
    pub question: Question,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub question: Question,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListQuestionsRequest {
    pub org_id: String,
    pub survey_id: String,
    pub offset: u32,
    pub limit: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListQuestionsResponse {
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutocompleteTagsRequest {
    pub org_id: String,
    pub user_id: String,
    pub prefix: String,
    pub limit: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagsResponse {
    pub tags: Vec<String>,
}

#[async_trait]
pub trait SurveyService: Send + Sync {
    async fn create_question(
        &self,
        ctx: &CallContext,
        request: CreateQuestionRequest,
    ) -> Result<QuestionResponse, RemoteError>;

    async fn list_questions(
        &self,
        ctx: &CallContext,
        request: ListQuestionsRequest,
    ) -> Result<ListQuestionsResponse, RemoteError>;

    async fn autocomplete_tags(
        &self,
        ctx: &CallContext,
        request: AutocompleteTagsRequest,
    ) -> Result<TagsResponse, RemoteError>;
}

pub struct HttpSurveyService {
    backend: HttpBackend,
}

impl HttpSurveyService {
    pub fn new(backend: HttpBackend) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl SurveyService for HttpSurveyService {
    async fn create_question(
        &self,
        ctx: &CallContext,
        request: CreateQuestionRequest,
    ) -> Result<QuestionResponse, RemoteError> {
        self.backend.call(ctx, "CreateQuestion", &request).await
    }

    async fn list_questions(
        &self,
        ctx: &CallContext,
        request: ListQuestionsRequest,
    ) -> Result<ListQuestionsResponse, RemoteError> {
        self.backend.call(ctx, "ListQuestions", &request).await
    }

    async fn autocomplete_tags(
        &self,
        ctx: &CallContext,
        request: AutocompleteTagsRequest,
    ) -> Result<TagsResponse, RemoteError> {
        self.backend.call(ctx, "AutocompleteTags", &request).await
    }
}
