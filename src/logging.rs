//! 로깅 초기화 모듈
//!
//! JSON 형식의 구조화된 로깅을 stdout으로 출력합니다.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 기본 로그 필터
pub const DEFAULT_FILTER: &str = "info,safeschool_server=debug,tower_http=debug";

/// 로깅 시스템을 초기화합니다.
///
/// 환경 변수 `RUST_LOG`로 로그 레벨을 설정할 수 있고, `LOG_FORMAT=pretty`이면
/// 로컬 개발용 사람이 읽기 쉬운 형식으로 출력합니다.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let pretty = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("pretty"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);

    let result = if pretty {
        registry.with(fmt::layer().pretty()).try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .flatten_event(false),
            )
            .try_init()
    };

    // 로깅 초기화에 실패해도 서버는 계속 실행
    if let Err(err) = result {
        eprintln!("Failed to initialize tracing: {}", err);
    }
}
