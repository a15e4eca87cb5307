//! AI 프롬프트 모듈
//!
//! 세 가지 플로우(체크리스트, 퀴즈, 훈련 피드백)의 프롬프트 템플릿을 관리합니다.
//! 템플릿은 상수 데이터이며 모델 호출 없이 단위 테스트할 수 있습니다.
//!
//! ## 구조
//! - `template`: Handlebars 렌더러
//! - `checklist`: 체크리스트 프롬프트
//! - `quiz`: 퀴즈 프롬프트
//! - `drill_feedback`: 훈련 피드백 프롬프트

mod checklist;
mod drill_feedback;
mod quiz;
mod template;

pub use template::{PromptRenderer, PromptTemplate};

pub use checklist::TEMPLATE as CHECKLIST_PROMPT;
pub use drill_feedback::TEMPLATE as DRILL_FEEDBACK_PROMPT;
pub use quiz::TEMPLATE as QUIZ_PROMPT;

/// 모든 플로우에 공통으로 붙는 시스템 지시문 (출력 JSON Schema 포함)
pub fn structured_output_instruction(schema: &serde_json::Value) -> String {
    format!(
        "Respond only with a single JSON object that conforms to this JSON Schema. \
Do not wrap it in markdown.\n\n{}",
        schema
    )
}
