use std::sync::Arc;

use pulse_gateway::backend::{
    HttpContentService, HttpIdentityService, HttpPlanService, HttpSurveyService, HttpTrackService,
};
use pulse_gateway::remote::HttpBackend;
use pulse_gateway::routes::{router, Backends};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up APP_ENV, backend URLs, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = pulse_gateway::config::config();
    tracing::info!("starting Pulse Gateway in {:?} mode", config.environment);

    let backends = Backends {
        identity: Arc::new(HttpIdentityService::new(HttpBackend::new(
            config.backends.identity_url.clone(),
        ))),
        plan: Arc::new(HttpPlanService::new(HttpBackend::new(config.backends.plan_url.clone()))),
        survey: Arc::new(HttpSurveyService::new(HttpBackend::new(
            config.backends.survey_url.clone(),
        ))),
        content: Arc::new(HttpContentService::new(HttpBackend::new(
            config.backends.content_url.clone(),
        ))),
        track: Arc::new(HttpTrackService::new(HttpBackend::new(config.backends.track_url.clone()))),
    };

    let app = router(backends, config)?;

    // Allow tests or deployments to override port via env
    let port = std::env::var("PULSE_GATEWAY_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("pulse gateway listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
