use metrics_exporter_prometheus::PrometheusBuilder;
use safeschool_server::{
    config::AppConfig, create_router, domain::health::service::init_start_time,
    logging::init_logging, shutdown::shutdown_signal, AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 환경변수 로드
    dotenvy::dotenv().ok();

    // 2. 로깅 초기화
    init_logging();
    init_start_time();

    // 3. 설정 로드
    let config = AppConfig::from_env()?;

    // 4. 메트릭 레코더 설치
    let metrics = match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to install Prometheus recorder");
            None
        }
    };

    // 5. 라우터 설정
    let state = AppState::from_config(&config, metrics);
    let app = create_router(state);

    // 6. 서버 실행
    let addr = format!("{}:{}", config.server_host, config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        model = %config.ai.model,
        strict_quiz_checks = config.ai.strict_quiz_checks,
        "Server listening on {}",
        addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
