//! Request tracing middleware.
//!
//! Assigns a request ID, wraps the request in a tracing span and records
//! request count/duration metrics.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use std::time::{Duration, Instant};
use tracing::Instrument;
use uuid::Uuid;

/// Request ID header name
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// 요청마다 ID를 부여하고 span으로 감싸 처리
///
/// ID는 span 필드로만 전달되므로 핸들러와 `AppError` 로그도 같은 ID로 묶입니다.
pub async fn request_tracing(request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(String::from)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let span = tracing::info_span!(
        "http_request",
        request_id = %request_id,
        method = %method,
        path = %path,
    );

    let start = Instant::now();

    async move {
        let mut response = next.run(request).await;
        let duration = start.elapsed();
        let status = response.status().as_u16();

        tracing::info!(
            status = status,
            duration_ms = duration.as_millis() as u64,
            "Request completed"
        );

        record_request_metrics(&method, &path, status, duration);

        response.headers_mut().insert(
            REQUEST_ID_HEADER,
            HeaderValue::from_str(&request_id)
                .unwrap_or_else(|_| HeaderValue::from_static("unknown")),
        );
        response
    }
    .instrument(span)
    .await
}

/// Record metrics for HTTP requests
fn record_request_metrics(method: &str, path: &str, status: u16, duration: Duration) {
    let status_str = status.to_string();

    metrics::counter!(
        "http_requests_total",
        "method" => method.to_string(),
        "path" => normalize_path(path),
        "status" => status_str.clone()
    )
    .increment(1);

    metrics::histogram!(
        "http_request_duration_seconds",
        "method" => method.to_string(),
        "path" => normalize_path(path),
        "status" => status_str
    )
    .record(duration.as_secs_f64());
}

/// Keep at most three segments so unknown paths don't blow up label cardinality
fn normalize_path(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.len() <= 3 {
        path.to_string()
    } else {
        format!("/{}/{}/{}", segments[0], segments[1], segments[2])
    }
}
