//! AI 플로우 에러 타입
//!
//! 플로우 한 번의 실행은 다음 중 하나의 이유로만 실패합니다.
//! - 입력 스키마 검증 실패 (모델 호출 전)
//! - 프롬프트 렌더링 실패 (모델 호출 전, 템플릿 결함)
//! - 모델 제공자 호출 실패
//! - 출력 스키마 검증 실패 (모델 응답 후)

/// 모델 제공자 호출 실패 종류
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// API 키가 설정되지 않음 (호출 시점에만 검사)
    #[error("model provider credential is not configured")]
    MissingCredential,

    /// API 키가 거부됨
    #[error("model provider rejected the credential")]
    Unauthorized,

    /// 요청 한도 초과
    #[error("model provider rate limit exceeded")]
    RateLimited,

    /// 네트워크 오류, 타임아웃, 5xx 등 일시적 장애
    #[error("model provider unavailable: {0}")]
    Unavailable(String),

    /// 콘텐츠 정책 등으로 모델이 응답을 거부함
    #[error("model refused to answer: {0}")]
    Refused(String),

    /// 그 외 API 에러
    #[error("model provider error: {0}")]
    Api(String),
}

/// 플로우 실행 에러
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    #[error("invalid input: {0}")]
    InputValidation(String),

    #[error("prompt rendering failed: {0}")]
    Prompt(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("model output does not match the declared schema: {0}")]
    OutputValidation(String),
}

impl FlowError {
    /// 메트릭/로그 라벨용 결과 이름
    pub fn kind(&self) -> &'static str {
        match self {
            FlowError::InputValidation(_) => "input_invalid",
            FlowError::Prompt(_) => "prompt_error",
            FlowError::Provider(_) => "provider_error",
            FlowError::OutputValidation(_) => "output_invalid",
        }
    }
}

impl From<validator::ValidationErrors> for FlowError {
    fn from(errors: validator::ValidationErrors) -> Self {
        FlowError::InputValidation(errors.to_string())
    }
}
