use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use super::dto::HealthStatus;
use super::service::check_health;
use crate::AppState;

/// 헬스체크 API
///
/// 서버 상태, 버전, 가동 시간, 모델 API 키 설정 여부를 반환합니다.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "헬스체크 성공", body = HealthStatus)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(check_health(state.model_credential_configured))
}

/// Prometheus 메트릭 노출
///
/// 레코더가 설치되지 않은 경우(테스트 등) 404를 반환합니다.
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
