#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use pulse_gateway::backend::content::{
    AutocompleteTagsRequest as ContentAutocompleteRequest, GetTopTagsRequest, ShareContentRequest,
    ShareContentResponse, TagsResponse as ContentTagsResponse,
};
use pulse_gateway::backend::plan::{
    AllGoalsRequest, AllGoalsResponse, CreateGoalRequest, DeleteGoalRequest, Goal, GoalResponse,
    GoalTarget, ReadGoalRequest, UpdateGoalRequest,
};
use pulse_gateway::backend::survey::{
    AutocompleteTagsRequest, CreateQuestionRequest, ListQuestionsRequest, ListQuestionsResponse,
    QuestionResponse, TagsResponse,
};
use pulse_gateway::backend::track::{QueryEventsRequest, QueryEventsResponse};
use pulse_gateway::backend::{
    ContentService, IdentityService, PlanService, SurveyService, TrackService,
};
use pulse_gateway::backend::identity::{OrgMembership, SessionIdentity};
use pulse_gateway::codec::Recurrence;
use pulse_gateway::remote::{CallContext, RemoteError};
use pulse_gateway::routes::{router, Backends};

pub const VALID_SESSION: &str = "session-ok";
pub const EXPIRED_SESSION: &str = "session-expired";

/// Identity stub: accepts VALID_SESSION, rejects EXPIRED_SESSION as
/// expired, resolves everything to org `orgid`.
pub struct StubIdentity {
    pub employee: bool,
}

#[async_trait]
impl IdentityService for StubIdentity {
    async fn validate_session(
        &self,
        _ctx: &CallContext,
        session: &str,
    ) -> Result<SessionIdentity, RemoteError> {
        match session {
            VALID_SESSION => Ok(SessionIdentity { user_id: "user-1".to_string() }),
            EXPIRED_SESSION => Err(RemoteError::Denied("session expired".to_string())),
            _ => Err(RemoteError::Denied("unknown session".to_string())),
        }
    }

    async fn resolve_organisation(
        &self,
        _ctx: &CallContext,
        _session: &str,
    ) -> Result<OrgMembership, RemoteError> {
        Ok(OrgMembership { org_id: "orgid".to_string(), team_id: Some("team-1".to_string()) })
    }

    async fn is_employee(
        &self,
        _ctx: &CallContext,
        _user_id: &str,
        _org_id: &str,
    ) -> Result<bool, RemoteError> {
        Ok(self.employee)
    }
}

pub fn sample_goal() -> Goal {
    Goal {
        id: Some("goal-1".to_string()),
        title: "Run every morning".to_string(),
        description: None,
        owner_id: "user-1".to_string(),
        team_id: Some("team-1".to_string()),
        target: GoalTarget {
            metric: "sessions".to_string(),
            count: 5,
            recurrence: Some(Recurrence::Weekly { every_weeks: 1, weekdays: vec![1, 3, 5] }),
        },
    }
}

/// Plan spy: records every typed request it receives.
#[derive(Default)]
pub struct SpyPlan {
    pub all_goals_calls: Mutex<Vec<AllGoalsRequest>>,
    pub create_calls: Mutex<Vec<CreateGoalRequest>>,
    pub read_calls: Mutex<Vec<ReadGoalRequest>>,
    pub fail_all_goals: bool,
}

impl SpyPlan {
    pub fn call_count(&self) -> usize {
        self.all_goals_calls.lock().unwrap().len()
            + self.create_calls.lock().unwrap().len()
            + self.read_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl PlanService for SpyPlan {
    async fn all_goals(
        &self,
        _ctx: &CallContext,
        request: AllGoalsRequest,
    ) -> Result<AllGoalsResponse, RemoteError> {
        self.all_goals_calls.lock().unwrap().push(request);
        if self.fail_all_goals {
            return Err(RemoteError::Unavailable("plan backend down".to_string()));
        }
        Ok(AllGoalsResponse { goals: vec![sample_goal()] })
    }

    async fn create_goal(
        &self,
        _ctx: &CallContext,
        request: CreateGoalRequest,
    ) -> Result<GoalResponse, RemoteError> {
        let mut goal = request.goal.clone();
        self.create_calls.lock().unwrap().push(request);
        goal.id = Some("goal-new".to_string());
        Ok(GoalResponse { goal })
    }

    async fn read_goal(
        &self,
        _ctx: &CallContext,
        request: ReadGoalRequest,
    ) -> Result<Option<GoalResponse>, RemoteError> {
        let missing = request.goal_id == "g-missing";
        self.read_calls.lock().unwrap().push(request);
        if missing {
            return Ok(None);
        }
        Ok(Some(GoalResponse { goal: sample_goal() }))
    }

    async fn update_goal(
        &self,
        _ctx: &CallContext,
        request: UpdateGoalRequest,
    ) -> Result<GoalResponse, RemoteError> {
        let mut goal = request.goal;
        goal.id = Some(request.goal_id);
        Ok(GoalResponse { goal })
    }

    async fn delete_goal(
        &self,
        _ctx: &CallContext,
        _request: DeleteGoalRequest,
    ) -> Result<(), RemoteError> {
        Ok(())
    }
}

/// Survey spy: echoes created questions back with an id assigned.
#[derive(Default)]
pub struct SpySurvey {
    pub create_calls: Mutex<Vec<CreateQuestionRequest>>,
}

#[async_trait]
impl SurveyService for SpySurvey {
    async fn create_question(
        &self,
        _ctx: &CallContext,
        request: CreateQuestionRequest,
    ) -> Result<QuestionResponse, RemoteError> {
        let mut question = request.question.clone();
        self.create_calls.lock().unwrap().push(request);
        question.id = Some("q-1".to_string());
        Ok(QuestionResponse { question })
    }

    async fn list_questions(
        &self,
        _ctx: &CallContext,
        _request: ListQuestionsRequest,
    ) -> Result<ListQuestionsResponse, RemoteError> {
        Ok(ListQuestionsResponse { questions: vec![] })
    }

    async fn autocomplete_tags(
        &self,
        _ctx: &CallContext,
        request: AutocompleteTagsRequest,
    ) -> Result<TagsResponse, RemoteError> {
        Ok(TagsResponse {
            tags: vec![format!("{}-engagement", request.prefix), format!("{}-growth", request.prefix)],
        })
    }
}

#[derive(Default)]
pub struct SpyContent;

#[async_trait]
impl ContentService for SpyContent {
    async fn get_top_tags(
        &self,
        _ctx: &CallContext,
        _request: GetTopTagsRequest,
    ) -> Result<ContentTagsResponse, RemoteError> {
        Ok(ContentTagsResponse { tags: vec!["leadership".to_string(), "feedback".to_string()] })
    }

    async fn autocomplete_tags(
        &self,
        _ctx: &CallContext,
        _request: ContentAutocompleteRequest,
    ) -> Result<ContentTagsResponse, RemoteError> {
        Ok(ContentTagsResponse { tags: vec![] })
    }

    async fn share_content(
        &self,
        _ctx: &CallContext,
        request: ShareContentRequest,
    ) -> Result<ShareContentResponse, RemoteError> {
        Ok(ShareContentResponse { shared_with: request.recipients.len() as u32 })
    }
}

#[derive(Default)]
pub struct SpyTrack {
    pub calls: Mutex<Vec<QueryEventsRequest>>,
}

#[async_trait]
impl TrackService for SpyTrack {
    async fn query_events(
        &self,
        _ctx: &CallContext,
        request: QueryEventsRequest,
    ) -> Result<QueryEventsResponse, RemoteError> {
        self.calls.lock().unwrap().push(request);
        Ok(QueryEventsResponse { events: vec![] })
    }
}

pub struct TestApp {
    pub app: Router,
    pub plan: Arc<SpyPlan>,
    pub survey: Arc<SpySurvey>,
    pub track: Arc<SpyTrack>,
}

pub fn gateway() -> TestApp {
    gateway_with(StubIdentity { employee: true }, SpyPlan::default())
}

pub fn gateway_with(identity: StubIdentity, plan: SpyPlan) -> TestApp {
    let plan = Arc::new(plan);
    let survey = Arc::new(SpySurvey::default());
    let track = Arc::new(SpyTrack::default());

    let backends = Backends {
        identity: Arc::new(identity),
        plan: plan.clone(),
        survey: survey.clone(),
        content: Arc::new(SpyContent),
        track: track.clone(),
    };

    let app = router(backends, pulse_gateway::config::config()).expect("route registration");
    TestApp { app, plan, survey, track }
}

pub async fn get(app: &Router, uri: &str) -> Result<(StatusCode, Value)> {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty())?)
        .await?;
    read_response(response).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Result<(StatusCode, Value)> {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body)?))?,
        )
        .await?;
    read_response(response).await
}

async fn read_response(response: axum::response::Response) -> Result<(StatusCode, Value)> {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, value))
}
