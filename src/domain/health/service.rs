use std::time::Instant;

use super::dto::{HealthChecks, HealthState, HealthStatus};

/// 서버 시작 시간 (전역)
static START_TIME: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();

/// 서버 시작 시간 초기화
///
/// main 함수에서 서버 시작 시 호출해야 합니다.
pub fn init_start_time() {
    START_TIME.get_or_init(Instant::now);
}

/// 서버 가동 시간(초) 반환
pub fn get_uptime_secs() -> u64 {
    START_TIME.get().map(|t| t.elapsed().as_secs()).unwrap_or(0)
}

/// 헬스 상태 계산
///
/// 모델 제공자를 실제로 호출하지 않습니다. API 키 유무만 보고합니다.
pub fn check_health(model_credential_configured: bool) -> HealthStatus {
    HealthStatus {
        status: determine_health_state(model_credential_configured),
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: get_uptime_secs(),
        checks: HealthChecks {
            model_credential_configured,
        },
    }
}

fn determine_health_state(model_credential_configured: bool) -> HealthState {
    if model_credential_configured {
        HealthState::Healthy
    } else {
        HealthState::Degraded
    }
}
