pub mod config;
pub mod domain;
pub mod error;
pub mod global;
pub mod logging;
pub mod response;
pub mod shutdown;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use domain::ai::{
    FlowError, GenerationRequest, ModelProvider, OpenAiClient, PreparednessAi, ProviderError,
};

use config::AppConfig;
use domain::ai::dto;

#[derive(OpenApi)]
#[openapi(
    paths(
        domain::ai::handler::generate_checklist,
        domain::ai::handler::generate_quiz,
        domain::ai::handler::virtual_drill_feedback,
        domain::health::handler::health_check,
    ),
    components(
        schemas(
            dto::ChecklistInput,
            dto::ChecklistOutput,
            dto::QuizInput,
            dto::QuizOutput,
            dto::QuizQuestion,
            dto::DrillFeedbackInput,
            dto::DrillFeedbackOutput,
            domain::health::dto::HealthStatus,
            response::ErrorResponse,
        )
    ),
    tags(
        (name = "AI", description = "재난 대비 AI API"),
        (name = "Health", description = "헬스체크 API")
    )
)]
pub struct ApiDoc;

/// 핸들러 공유 상태
#[derive(Clone)]
pub struct AppState {
    pub ai: PreparednessAi,
    pub model_credential_configured: bool,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// 설정으로부터 OpenAI 기반 상태 생성
    pub fn from_config(config: &AppConfig, metrics: Option<PrometheusHandle>) -> Self {
        let provider = Arc::new(OpenAiClient::new(&config.ai));
        Self {
            ai: PreparednessAi::new(provider, config.ai.strict_quiz_checks),
            model_credential_configured: config.ai.api_key.is_some(),
            metrics,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(domain::health::handler::health_check))
        .route("/metrics", get(domain::health::handler::metrics))
        .route(
            "/api/ai/checklist",
            post(domain::ai::handler::generate_checklist),
        )
        .route("/api/ai/quiz", post(domain::ai::handler::generate_quiz))
        .route(
            "/api/ai/drill-feedback",
            post(domain::ai::handler::virtual_drill_feedback),
        )
        .layer(middleware::from_fn(global::middleware::request_tracing))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// 테스트용 라우터 생성 (임의의 ModelProvider 주입)
pub fn create_router_with_provider<P>(provider: P, strict_quiz_checks: bool) -> Router
where
    P: ModelProvider + 'static,
{
    create_router(AppState {
        ai: PreparednessAi::new(Arc::new(provider), strict_quiz_checks),
        model_credential_configured: true,
        metrics: None,
    })
}
