use serde::Serialize;
use utoipa::ToSchema;

/// 전체 헬스 상태 응답
#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    /// 서버 상태 (healthy/degraded)
    pub status: HealthState,
    /// 서버 버전
    #[schema(example = "0.1.0")]
    pub version: &'static str,
    /// 서버 가동 시간 (초)
    #[schema(example = 3600)]
    pub uptime_secs: u64,
    /// 의존성 체크 결과
    pub checks: HealthChecks,
}

/// 서버 상태
#[derive(Serialize, Debug, Clone, Copy, PartialEq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    /// 정상 상태
    Healthy,
    /// 모델 API 키가 없어 AI 기능이 모두 실패하는 상태
    Degraded,
}

/// 의존성 체크 결과 모음
#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthChecks {
    /// 모델 제공자 API 키 설정 여부 (실제 호출은 하지 않음)
    #[schema(example = true)]
    pub model_credential_configured: bool,
}
