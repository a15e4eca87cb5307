use std::fmt;

use tokio::signal;

/// 서버 종료를 일으킨 시그널
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    Interrupt,
    Terminate,
}

impl fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShutdownSignal::Interrupt => f.write_str("SIGINT"),
            ShutdownSignal::Terminate => f.write_str("SIGTERM"),
        }
    }
}

/// SIGINT(Ctrl+C) 또는 SIGTERM을 받을 때까지 대기
///
/// 핸들러 설치에 실패한 쪽은 영원히 대기하므로 나머지 시그널로만 종료됩니다.
pub async fn wait_for_signal() -> ShutdownSignal {
    let interrupt = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => ShutdownSignal::Interrupt,
        _ = terminate => ShutdownSignal::Terminate,
    }
}

/// `axum::serve(...).with_graceful_shutdown`에 넘기는 future
///
/// 진행 중인 모델 호출이 끝난 뒤 서버가 종료됩니다.
pub async fn shutdown_signal() {
    let received = wait_for_signal().await;
    tracing::info!(signal = %received, "Shutdown signal received, draining in-flight requests");
}
