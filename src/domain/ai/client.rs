use std::sync::Arc;
use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatChoice, ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, ChatCompletionResponseFormat,
        ChatCompletionResponseFormatType, CreateChatCompletionRequestArgs, FinishReason,
    },
    Client,
};

use super::error::ProviderError;
use super::prompt::structured_output_instruction;
use crate::config::AiConfig;

/// 모델 제공자에게 보내는 한 번의 생성 요청
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// 요청을 보낸 플로우 이름 (로그용)
    pub flow: &'static str,
    /// 렌더링된 프롬프트
    pub prompt: String,
    /// 출력 형태 기술자 (JSON Schema)
    pub output_schema: serde_json::Value,
}

/// 모델 제공자 인터페이스
///
/// 외부 생성형 모델 호출을 추상화하여 테스트에서 Mock 객체로 대체할 수 있습니다.
/// 구현체는 응답 텍스트를 그대로 돌려주고, 출력 스키마 검증은 플로우가 담당합니다.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ModelProvider: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<String, ProviderError>;
}

/// Arc로 래핑된 ModelProvider (Clone 지원)
pub type ModelProviderRef = Arc<dyn ModelProvider>;

/// OpenAI 에러를 세분화된 ProviderError로 변환
///
/// 에러 코드가 메시지보다 우선합니다. 한도 초과 메시지에도 "API key" 문구가
/// 들어갈 수 있으므로 메시지 기반 인증 판정은 `invalid_request_error`로 제한합니다.
fn classify_openai_error(error: OpenAIError) -> ProviderError {
    match &error {
        OpenAIError::ApiError(api_err) => {
            let err_type = api_err.r#type.as_deref().unwrap_or("");
            let message = &api_err.message;

            // 에러 코드가 JSON Value일 수 있으므로 문자열로 변환
            let err_code = api_err
                .code
                .as_ref()
                .and_then(|v| v.as_str())
                .unwrap_or("");

            match err_code {
                "rate_limit_exceeded" | "insufficient_quota" => ProviderError::RateLimited,
                "content_policy_violation" | "content_filter" => {
                    ProviderError::Refused(message.clone())
                }
                "invalid_api_key" => ProviderError::Unauthorized,
                _ if err_type == "rate_limit_error" => ProviderError::RateLimited,
                _ if err_type == "invalid_request_error" && message.contains("API key") => {
                    ProviderError::Unauthorized
                }
                _ if message.contains("rate limit") => ProviderError::RateLimited,
                _ if err_type == "server_error" || err_code.contains("server") => {
                    ProviderError::Unavailable(message.clone())
                }
                _ => ProviderError::Api(message.clone()),
            }
        }
        OpenAIError::Reqwest(req_err) => {
            let status = req_err.status().map(|s| s.as_u16());
            if req_err.is_timeout() || req_err.is_connect() {
                ProviderError::Unavailable(req_err.to_string())
            } else if status == Some(401) {
                ProviderError::Unauthorized
            } else if status == Some(429) {
                ProviderError::RateLimited
            } else if req_err
                .status()
                .map(|s| s.is_server_error())
                .unwrap_or(false)
            {
                ProviderError::Unavailable(req_err.to_string())
            } else {
                ProviderError::Api(req_err.to_string())
            }
        }
        _ => ProviderError::Api(error.to_string()),
    }
}

/// 첫 번째 선택지에서 응답 본문 추출
///
/// 콘텐츠 필터로 중단되었거나 본문이 비어 있으면 `Refused`입니다.
fn extract_content(choice: ChatChoice) -> Result<String, ProviderError> {
    if matches!(choice.finish_reason, Some(FinishReason::ContentFilter)) {
        return Err(ProviderError::Refused(
            "response was blocked by the content filter".to_string(),
        ));
    }

    match choice.message.content {
        Some(content) if !content.trim().is_empty() => Ok(content),
        _ => Err(ProviderError::Refused("model returned no content".to_string())),
    }
}

/// OpenAI API 클라이언트 구현체
#[derive(Clone)]
pub struct OpenAiClient {
    client: Option<Client<OpenAIConfig>>,
    model: String,
    temperature: f32,
    timeout: Duration,
}

impl OpenAiClient {
    /// 설정으로 클라이언트 생성
    ///
    /// API 키가 없어도 생성은 성공하고, 호출 시점에 `MissingCredential`로 실패합니다.
    pub fn new(config: &AiConfig) -> Self {
        let client = config.api_key.as_ref().map(|api_key| {
            let mut openai_config = OpenAIConfig::new().with_api_key(api_key);
            if let Some(api_base) = &config.api_base {
                openai_config = openai_config.with_api_base(api_base);
            }
            Client::with_config(openai_config)
        });

        Self {
            client,
            model: config.model.clone(),
            temperature: config.temperature,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    fn build_messages(
        request: &GenerationRequest,
    ) -> Result<Vec<ChatCompletionRequestMessage>, ProviderError> {
        Ok(vec![
            build_system_message(&structured_output_instruction(&request.output_schema))?,
            build_user_message(&request.prompt)?,
        ])
    }
}

#[async_trait::async_trait]
impl ModelProvider for OpenAiClient {
    async fn generate(&self, request: GenerationRequest) -> Result<String, ProviderError> {
        let client = self.client.as_ref().ok_or(ProviderError::MissingCredential)?;

        let chat_request = CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .messages(Self::build_messages(&request)?)
            .temperature(self.temperature)
            .response_format(ChatCompletionResponseFormat {
                r#type: ChatCompletionResponseFormatType::JsonObject,
            })
            .build()
            .map_err(|e| ProviderError::Api(e.to_string()))?;

        tracing::debug!(flow = request.flow, model = %self.model, "Calling OpenAI");

        let response = tokio::time::timeout(self.timeout, client.chat().create(chat_request))
            .await
            .map_err(|_| {
                ProviderError::Unavailable(format!(
                    "request timed out after {}s",
                    self.timeout.as_secs()
                ))
            })?
            .map_err(classify_openai_error)?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Api("response contained no choices".to_string()))?;

        extract_content(choice)
    }
}

/// 메시지 빌더 헬퍼 함수 (crate 내부용)
pub(crate) fn build_system_message(
    content: &str,
) -> Result<ChatCompletionRequestMessage, ProviderError> {
    Ok(ChatCompletionRequestMessage::System(
        ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()
            .map_err(|e| ProviderError::Api(e.to_string()))?,
    ))
}

pub(crate) fn build_user_message(
    content: &str,
) -> Result<ChatCompletionRequestMessage, ProviderError> {
    Ok(ChatCompletionRequestMessage::User(
        ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()
            .map_err(|e| ProviderError::Api(e.to_string()))?,
    ))
}

#[cfg(test)]
mod tests {
    use async_openai::error::ApiError;

    use super::*;

    fn config(api_key: Option<&str>) -> AiConfig {
        AiConfig {
            api_key: api_key.map(str::to_string),
            ..AiConfig::default()
        }
    }

    fn request() -> GenerationRequest {
        GenerationRequest {
            flow: "generateChecklistFlow",
            prompt: "Generate a checklist for flood".to_string(),
            output_schema: serde_json::json!({ "type": "object" }),
        }
    }

    #[tokio::test]
    async fn should_fail_with_missing_credential_without_api_key() {
        // Arrange
        let client = OpenAiClient::new(&config(None));

        // Act
        let result = client.generate(request()).await;

        // Assert
        assert_eq!(result, Err(ProviderError::MissingCredential));
    }

    #[test]
    fn should_create_openai_client_with_key() {
        let client = OpenAiClient::new(&config(Some("test-api-key")));

        assert!(client.client.is_some());
        assert_eq!(client.model, "gpt-4o-mini");
        assert_eq!(client.timeout, Duration::from_secs(25));
    }

    #[test]
    fn should_build_system_and_user_messages() {
        let messages = OpenAiClient::build_messages(&request()).unwrap();

        assert_eq!(messages.len(), 2);
        assert!(matches!(messages[0], ChatCompletionRequestMessage::System(_)));
        assert!(matches!(messages[1], ChatCompletionRequestMessage::User(_)));
    }

    fn api_error(err_type: &str, code: Option<&str>, message: &str) -> OpenAIError {
        let api_err: ApiError = serde_json::from_value(serde_json::json!({
            "message": message,
            "type": err_type,
            "param": null,
            "code": code,
        }))
        .unwrap();
        OpenAIError::ApiError(api_err)
    }

    fn choice(finish_reason: &str, content: Option<&str>) -> ChatChoice {
        serde_json::from_value(serde_json::json!({
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": finish_reason,
        }))
        .unwrap()
    }

    #[test]
    fn should_classify_api_errors_by_code_before_message() {
        let cases = [
            (
                api_error(
                    "requests",
                    Some("rate_limit_exceeded"),
                    "Rate limit reached for gpt-4o-mini. Check your API key usage tier.",
                ),
                ProviderError::RateLimited,
            ),
            (
                api_error("insufficient_quota", Some("insufficient_quota"), "You exceeded your current quota"),
                ProviderError::RateLimited,
            ),
            (
                api_error("invalid_request_error", Some("invalid_api_key"), "Incorrect API key provided"),
                ProviderError::Unauthorized,
            ),
            (
                api_error("invalid_request_error", None, "You didn't provide an API key."),
                ProviderError::Unauthorized,
            ),
            (
                api_error(
                    "invalid_request_error",
                    Some("content_policy_violation"),
                    "Your request was rejected by the safety system",
                ),
                ProviderError::Refused("Your request was rejected by the safety system".to_string()),
            ),
            (
                api_error("server_error", None, "The server had an error"),
                ProviderError::Unavailable("The server had an error".to_string()),
            ),
            (
                api_error(
                    "invalid_request_error",
                    Some("model_not_found"),
                    "The model `gpt-9` does not exist",
                ),
                ProviderError::Api("The model `gpt-9` does not exist".to_string()),
            ),
        ];

        for (error, expected) in cases {
            let description = error.to_string();
            assert_eq!(classify_openai_error(error), expected, "{}", description);
        }
    }

    #[test]
    fn should_extract_content_from_completed_choice() {
        let content = extract_content(choice("stop", Some(r#"{"checklistItems": ["a"]}"#)));

        assert_eq!(content, Ok(r#"{"checklistItems": ["a"]}"#.to_string()));
    }

    #[test]
    fn should_refuse_content_filtered_choice() {
        let result = extract_content(choice("content_filter", Some("partial")));

        assert!(matches!(result, Err(ProviderError::Refused(_))));
    }

    #[test]
    fn should_refuse_missing_or_blank_content() {
        assert!(matches!(
            extract_content(choice("stop", None)),
            Err(ProviderError::Refused(_))
        ));
        assert!(matches!(
            extract_content(choice("stop", Some("   \n"))),
            Err(ProviderError::Refused(_))
        ));
    }

    #[test]
    fn should_classify_unknown_errors_as_api_error() {
        let error = OpenAIError::InvalidArgument("bad argument".to_string());

        let classified = classify_openai_error(error);

        assert!(matches!(classified, ProviderError::Api(_)));
    }
}
