//! 출력 스키마 기술자와 모델 응답 디코딩
//!
//! 입력 스키마는 DTO의 `Validate` 구현이, 출력 스키마는 여기서 만드는
//! JSON Schema 기술자와 `decode_output`이 담당합니다.

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use validator::Validate;

use super::error::FlowError;

/// 출력 타입의 JSON Schema 기술자
///
/// 모델 호출 계층에 그대로 전달되어 응답 형태를 지시하는 데 사용됩니다.
pub fn output_schema<O: JsonSchema>() -> serde_json::Value {
    let schema = schemars::schema_for!(O);
    serde_json::to_value(schema).unwrap_or(serde_json::Value::Null)
}

/// 입력 스키마 검증
pub fn validate_input<I: Validate>(input: &I) -> Result<(), FlowError> {
    input.validate().map_err(FlowError::from)
}

/// 모델 응답에서 JSON 객체 부분만 추출
///
/// 모델이 코드 블록이나 설명 문장을 덧붙여도 첫 `{`부터 마지막 `}`까지를 사용합니다.
pub fn extract_json(response: &str) -> &str {
    let trimmed = response.trim();
    if let Some(start) = trimmed.find('{') {
        if let Some(end) = trimmed.rfind('}') {
            if start < end {
                return &trimmed[start..=end];
            }
        }
    }
    trimmed
}

/// 모델 응답을 출력 타입으로 디코딩하고 검증
///
/// 파싱 실패, 필드 누락, 타입 불일치, 제약 위반은 모두 `OutputValidation`입니다.
pub fn decode_output<O>(raw: &str) -> Result<O, FlowError>
where
    O: DeserializeOwned + Validate,
{
    let json = extract_json(raw);

    let output: O = serde_json::from_str(json)
        .map_err(|e| FlowError::OutputValidation(e.to_string()))?;

    output
        .validate()
        .map_err(|e| FlowError::OutputValidation(e.to_string()))?;

    Ok(output)
}
