use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::domain::ai::error::{FlowError, ProviderError};
use crate::response::ErrorResponse;

/// 애플리케이션 전역 에러 타입 (HTTP 경계)
#[derive(Debug)]
pub enum AppError {
    /// 입력 스키마 검증 실패
    ValidationError(String),
    /// 요청 본문 JSON 파싱 실패
    JsonParseFailed(String),
    /// 모델 제공자 일시 장애 (네트워크, 타임아웃, 5xx)
    AiUnavailable(String),
    /// 모델 제공자 요청 한도 초과
    AiRateLimited,
    /// 모델이 응답을 거부함
    AiRefused(String),
    /// API 키 누락 또는 거부
    AiMisconfigured(String),
    /// 모델 응답이 출력 스키마와 맞지 않음
    AiOutputInvalid(String),
    /// 모델 제공자가 요청 자체를 거절함 (잘못된 모델명, 파라미터 등)
    AiRequestFailed(String),
    InternalError(String),
}

impl AppError {
    /// 에러 메시지 반환
    pub fn message(&self) -> String {
        match self {
            AppError::ValidationError(msg) => msg.clone(),
            AppError::JsonParseFailed(msg) => format!("잘못된 요청 형식입니다: {}", msg),
            AppError::AiUnavailable(_) => "AI 서비스에 일시적으로 연결할 수 없습니다.".to_string(),
            AppError::AiRateLimited => {
                "AI 요청 한도를 초과했습니다. 잠시 후 다시 시도해주세요.".to_string()
            }
            AppError::AiRefused(_) => "AI가 요청에 대한 응답을 거부했습니다.".to_string(),
            AppError::AiMisconfigured(_) => {
                "AI 서비스 설정 오류입니다. 관리자에게 문의 바랍니다.".to_string()
            }
            AppError::AiOutputInvalid(_) => "AI 응답 형식이 올바르지 않습니다.".to_string(),
            AppError::AiRequestFailed(_) => {
                "AI 서비스 요청이 처리되지 않았습니다. 관리자에게 문의 바랍니다.".to_string()
            }
            AppError::InternalError(_) => "서버 에러, 관리자에게 문의 바랍니다.".to_string(),
        }
    }

    /// 에러 코드 반환
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "COMMON400",
            AppError::JsonParseFailed(_) => "COMMON400",
            AppError::AiUnavailable(_) => "AI_001",
            AppError::AiRateLimited => "AI_002",
            AppError::AiRefused(_) => "AI_003",
            AppError::AiMisconfigured(_) => "AI_004",
            AppError::AiOutputInvalid(_) => "AI_005",
            AppError::AiRequestFailed(_) => "AI_006",
            AppError::InternalError(_) => "COMMON500",
        }
    }

    /// HTTP 상태 코드 반환
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::JsonParseFailed(_) => StatusCode::BAD_REQUEST,
            AppError::AiUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::AiRateLimited => StatusCode::TOO_MANY_REQUESTS,
            AppError::AiRefused(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::AiMisconfigured(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::AiOutputInvalid(_) => StatusCode::BAD_GATEWAY,
            AppError::AiRequestFailed(_) => StatusCode::BAD_GATEWAY,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 로그용 상세 내용 (응답에는 노출하지 않음)
    fn detail(&self) -> Option<&str> {
        match self {
            AppError::AiUnavailable(detail)
            | AppError::AiRefused(detail)
            | AppError::AiMisconfigured(detail)
            | AppError::AiOutputInvalid(detail)
            | AppError::AiRequestFailed(detail)
            | AppError::InternalError(detail) => Some(detail),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.message();

        // 에러 로깅
        if status.is_server_error() {
            error!(
                code = error_code,
                detail = self.detail().unwrap_or_default(),
                "Server Error: {}",
                message
            );
        } else {
            tracing::warn!(
                code = error_code,
                detail = self.detail().unwrap_or_default(),
                "Error [{}]: {}",
                error_code,
                message
            );
        }

        (status, Json(ErrorResponse::new(error_code, message))).into_response()
    }
}

/// JsonRejection을 AppError로 변환
///
/// 필드 누락이나 타입 불일치도 입력 스키마 위반이므로 400으로 응답합니다.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(e) => AppError::ValidationError(e.body_text()),
            other => AppError::JsonParseFailed(other.body_text()),
        }
    }
}

impl From<FlowError> for AppError {
    fn from(error: FlowError) -> Self {
        match error {
            FlowError::InputValidation(msg) => AppError::ValidationError(msg),
            FlowError::OutputValidation(msg) => AppError::AiOutputInvalid(msg),
            FlowError::Prompt(msg) => AppError::InternalError(msg),
            FlowError::Provider(provider) => match provider {
                ProviderError::MissingCredential | ProviderError::Unauthorized => {
                    AppError::AiMisconfigured(provider.to_string())
                }
                ProviderError::RateLimited => AppError::AiRateLimited,
                ProviderError::Unavailable(msg) => AppError::AiUnavailable(msg),
                ProviderError::Refused(msg) => AppError::AiRefused(msg),
                ProviderError::Api(msg) => AppError::AiRequestFailed(msg),
            },
        }
    }
}
