use std::env;

/// 기본 모델
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// OpenAI 호출 타임아웃 기본값 (초)
pub const DEFAULT_TIMEOUT_SECS: u64 = 25;

/// 애플리케이션 설정
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    pub ai: AiConfig,
}

/// 모델 제공자 설정
///
/// 프로세스 전역 상태 대신 `OpenAiClient::new`와 `PreparednessAi::new`에 명시적으로 전달됩니다.
#[derive(Debug, Clone, PartialEq)]
pub struct AiConfig {
    /// 없으면 서버는 뜨지만 모든 AI 호출이 실패합니다
    pub api_key: Option<String>,
    pub api_base: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
    /// 퀴즈 정답-보기 불일치, 문항 수 불일치를 실패로 처리할지 여부
    pub strict_quiz_checks: bool,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            strict_quiz_checks: false,
        }
    }
}

impl AppConfig {
    /// 환경 변수에서 설정 로드
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 키 조회 함수로부터 설정 생성 (테스트에서 환경 변수 없이 사용)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let server_host = non_empty("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let server_port = match non_empty("SERVER_PORT") {
            Some(v) => v.parse().map_err(|_| ConfigError::InvalidPort(v))?,
            None => 8080,
        };

        let api_key = non_empty("OPENAI_API_KEY");
        if api_key.is_none() {
            tracing::warn!(
                "OPENAI_API_KEY 환경변수가 설정되지 않았습니다. 모든 AI 요청이 실패합니다."
            );
        }

        let temperature = match non_empty("OPENAI_TEMPERATURE") {
            Some(v) => v
                .parse::<f32>()
                .ok()
                .filter(|t| (0.0..=2.0).contains(t))
                .ok_or(ConfigError::InvalidTemperature(v))?,
            None => 0.7,
        };

        let timeout_secs = match non_empty("OPENAI_TIMEOUT_SECS") {
            Some(v) => v
                .parse::<u64>()
                .ok()
                .filter(|t| *t > 0)
                .ok_or(ConfigError::InvalidTimeout(v))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let strict_quiz_checks = match non_empty("STRICT_QUIZ_CHECKS") {
            Some(v) => parse_bool(&v).ok_or(ConfigError::InvalidFlag("STRICT_QUIZ_CHECKS", v))?,
            None => false,
        };

        Ok(Self {
            server_host,
            server_port,
            ai: AiConfig {
                api_key,
                api_base: non_empty("OPENAI_API_BASE"),
                model: non_empty("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                temperature,
                timeout_secs,
                strict_quiz_checks,
            },
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(String),
    #[error("Invalid temperature (expected 0.0 ~ 2.0): {0}")]
    InvalidTemperature(String),
    #[error("Invalid timeout seconds: {0}")]
    InvalidTimeout(String),
    #[error("Invalid boolean for {0}: {1}")]
    InvalidFlag(&'static str, String),
}
