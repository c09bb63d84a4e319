use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::HeaderMap,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::backend::survey::{
    AutocompleteTagsRequest, CreateQuestionRequest, ListQuestionsRequest, Question,
};
use crate::codec::{self, QuestionSettings};
use crate::context::RequestScope;
use crate::envelope::{ApiResult, Envelope};
use crate::error::{ApiError, Op};
use crate::routes::AppState;

/// Inbound question; `settings` is a variant field and must carry a
/// registered discriminator.
#[derive(Debug, Deserialize)]
struct QuestionBody {
    title: String,
    settings: Value,
}

fn question_wire(question: &Question) -> Result<Value, ApiError> {
    let settings = codec::marshal_any(&question.settings)
        .map_err(|e| ApiError::internal("codec.MarshalAny", e.to_string()))?;
    Ok(json!({
        "id": question.id,
        "title": question.title,
        "settings": settings,
    }))
}

/// POST /survey/:survey_id/questions
pub async fn create_question(
    State(state): State<AppState>,
    Extension(scope): Extension<RequestScope>,
    headers: HeaderMap,
    Path(survey_id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    const DOMAIN: &str = "survey.CreateQuestion";

    let body = super::json_body(DOMAIN, payload)?;
    let question: QuestionBody =
        super::decode(DOMAIN, "question", super::required(DOMAIN, &body, "question")?)?;
    let settings =
        codec::unmarshal_any::<QuestionSettings>("question.settings", &question.settings)?;

    let ctx = super::call_context(&headers, &scope);
    let request = CreateQuestionRequest {
        org_id: scope.org_id()?.to_string(),
        survey_id,
        question: Question { id: None, title: question.title, settings },
    };

    let response = state
        .survey
        .create_question(&ctx, request)
        .await
        .map_err(|e| ApiError::remote(Op::Create, DOMAIN, e))?;

    Ok(Envelope::created(
        json!({ "question": question_wire(&response.question)? }),
        "Created question successfully",
    ))
}

/// GET /survey/:survey_id/questions
pub async fn list_questions(
    State(state): State<AppState>,
    Extension(scope): Extension<RequestScope>,
    headers: HeaderMap,
    Path(survey_id): Path<String>,
) -> ApiResult<Value> {
    const DOMAIN: &str = "survey.ListQuestions";

    let ctx = super::call_context(&headers, &scope);
    let page = scope.page()?;
    let request = ListQuestionsRequest {
        org_id: scope.org_id()?.to_string(),
        survey_id,
        offset: page.offset,
        limit: page.limit,
    };

    let response = state
        .survey
        .list_questions(&ctx, request)
        .await
        .map_err(|e| ApiError::remote(Op::Query, DOMAIN, e))?;

    let questions = response
        .questions
        .iter()
        .map(question_wire)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Envelope::ok(json!({ "questions": questions }), "Read questions successfully"))
}

#[derive(Debug, Deserialize)]
pub struct AutocompleteQuery {
    #[serde(default)]
    q: String,
}

/// GET /survey/tags/autocomplete - end-user route, no employee check
pub async fn autocomplete_tags(
    State(state): State<AppState>,
    Extension(scope): Extension<RequestScope>,
    headers: HeaderMap,
    Query(query): Query<AutocompleteQuery>,
) -> ApiResult<Value> {
    const DOMAIN: &str = "survey.AutocompleteTags";

    let ctx = super::call_context(&headers, &scope);
    let request = AutocompleteTagsRequest {
        org_id: scope.org_id()?.to_string(),
        user_id: scope.user_id()?.to_string(),
        prefix: query.q,
        limit: scope.page()?.limit,
    };

    let response = state
        .survey
        .autocomplete_tags(&ctx, request)
        .await
        .map_err(|e| ApiError::remote(Op::Search, DOMAIN, e))?;

    Ok(Envelope::ok(json!({ "tags": response.tags }), "Read tags successfully"))
}
