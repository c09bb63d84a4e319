//! Router construction.
//!
//! The whole route set is assembled in one place, with every filter and
//! backend dependency passed in explicitly. Each route group carries its
//! own filter chain, fixed and validated here; a chain whose ordering is
//! wrong makes `router` fail, so the process never serves a miswired route.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::cors::{Any, AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::backend::{ContentService, IdentityService, PlanService, SurveyService, TrackService};
use crate::config::AppConfig;
use crate::context::SortDirection;
use crate::filters::{
    run_chain, Audit, BasicAuthenticate, ChainConfigError, EmployeeAuthenticate, Filter,
    FilterChain, OrganisationAuthenticate, Paginate, SortFilter,
};
use crate::handlers::{content, plan, survey, track};

/// Backend dependencies handlers dispatch to.
#[derive(Clone)]
pub struct AppState {
    pub plan: Arc<dyn PlanService>,
    pub survey: Arc<dyn SurveyService>,
    pub content: Arc<dyn ContentService>,
    pub track: Arc<dyn TrackService>,
}

/// Everything the router needs, constructed once at startup.
pub struct Backends {
    pub identity: Arc<dyn IdentityService>,
    pub plan: Arc<dyn PlanService>,
    pub survey: Arc<dyn SurveyService>,
    pub content: Arc<dyn ContentService>,
    pub track: Arc<dyn TrackService>,
}

const GOAL_SORT_FIELDS: &[&str] = &["created_at", "title", "due_date"];
const EVENT_SORT_FIELDS: &[&str] = &["occurred_at", "kind"];

struct ChainBuilder {
    identity: Arc<dyn IdentityService>,
    audit: bool,
}

impl ChainBuilder {
    /// Employee-protected chain: authenticate, resolve org, check employee
    /// privilege, then the route-specific normalization filters.
    fn staff(&self, tail: Vec<Arc<dyn Filter>>) -> Result<Arc<FilterChain>, ChainConfigError> {
        let mut filters: Vec<Arc<dyn Filter>> = vec![
            Arc::new(BasicAuthenticate::new(self.identity.clone())),
            Arc::new(OrganisationAuthenticate::new(self.identity.clone())),
            Arc::new(EmployeeAuthenticate::new(self.identity.clone())),
        ];
        self.finish(&mut filters, tail)
    }

    /// End-user chain: same as staff but without the employee check.
    fn member(&self, tail: Vec<Arc<dyn Filter>>) -> Result<Arc<FilterChain>, ChainConfigError> {
        let mut filters: Vec<Arc<dyn Filter>> = vec![
            Arc::new(BasicAuthenticate::new(self.identity.clone())),
            Arc::new(OrganisationAuthenticate::new(self.identity.clone())),
        ];
        self.finish(&mut filters, tail)
    }

    fn finish(
        &self,
        filters: &mut Vec<Arc<dyn Filter>>,
        tail: Vec<Arc<dyn Filter>>,
    ) -> Result<Arc<FilterChain>, ChainConfigError> {
        // Audit sits after authorization, before the handler-facing filters.
        if self.audit {
            filters.push(Arc::new(Audit));
        }
        filters.extend(tail);
        FilterChain::new(std::mem::take(filters)).map(Arc::new)
    }
}

fn with_chain(router: Router<AppState>, chain: Arc<FilterChain>) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(chain, run_chain))
}

pub fn router(backends: Backends, config: &AppConfig) -> Result<Router, ChainConfigError> {
    let state = AppState {
        plan: backends.plan,
        survey: backends.survey,
        content: backends.content,
        track: backends.track,
    };

    let chains = ChainBuilder {
        identity: backends.identity,
        audit: config.api.enable_audit_logging,
    };
    let paginate = || Arc::new(Paginate::new(&config.pagination)) as Arc<dyn Filter>;

    let goal_list = chains.staff(vec![
        paginate(),
        Arc::new(SortFilter::new(GOAL_SORT_FIELDS, "created_at", SortDirection::Desc)),
    ])?;
    let goal_write = chains.staff(vec![])?;
    let question_routes = chains.staff(vec![paginate()])?;
    let top_tags = chains.staff(vec![paginate()])?;
    let member_tags = chains.member(vec![paginate()])?;
    let member_share = chains.member(vec![])?;
    let event_list = chains.staff(vec![
        Arc::new(Paginate::windowed(&config.pagination)),
        Arc::new(SortFilter::new(EVENT_SORT_FIELDS, "occurred_at", SortDirection::Desc)),
    ])?;

    let api = Router::new()
        // plan
        .merge(with_chain(
            Router::new().route("/goals/all", get(plan::all_goals)),
            goal_list,
        ))
        .merge(with_chain(
            Router::new().route("/goals", post(plan::create_goal)),
            goal_write.clone(),
        ))
        .merge(with_chain(
            Router::new().route(
                "/goals/:goal_id",
                get(plan::read_goal).put(plan::update_goal).delete(plan::delete_goal),
            ),
            goal_write,
        ))
        // survey
        .merge(with_chain(
            Router::new().route(
                "/survey/:survey_id/questions",
                get(survey::list_questions).post(survey::create_question),
            ),
            question_routes,
        ))
        .merge(with_chain(
            Router::new().route("/survey/tags/autocomplete", get(survey::autocomplete_tags)),
            member_tags.clone(),
        ))
        // content
        .merge(with_chain(
            Router::new().route("/content/tags/top", get(content::top_tags)),
            top_tags,
        ))
        .merge(with_chain(
            Router::new().route("/content/tags/autocomplete", get(content::autocomplete_tags)),
            member_tags,
        ))
        .merge(with_chain(
            Router::new().route("/content/:content_id/share", post(content::share_content)),
            member_share,
        ))
        // track
        .merge(with_chain(
            Router::new().route("/track/events", get(track::events)),
            event_list,
        ));

    let mut app = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(api)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(config.api.request_timeout_secs))),
        );

    if config.api.enable_cors {
        let origins: Vec<HeaderValue> = config
            .api
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        app = app.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    Ok(app)
}

async fn root() -> axum::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::Json(json!({
        "data": {
            "name": "Pulse Gateway",
            "version": version,
            "endpoints": {
                "plan": "/goals/all, /goals, /goals/:goal_id",
                "survey": "/survey/:survey_id/questions, /survey/tags/autocomplete",
                "content": "/content/tags/top, /content/tags/autocomplete, /content/:content_id/share",
                "track": "/track/events",
            },
        },
        "code": 200,
        "message": "Read service info successfully",
    }))
}

async fn health() -> axum::Json<Value> {
    axum::Json(json!({
        "data": { "status": "ok", "timestamp": chrono::Utc::now() },
        "code": 200,
        "message": "Health check successful",
    }))
}
