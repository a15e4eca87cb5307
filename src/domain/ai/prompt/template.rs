//! 프롬프트 템플릿 렌더러
//!
//! 템플릿은 Handlebars 문법(`{{field}}`, `{{{field}}}`)을 쓰며 입력 DTO를
//! 직렬화한 camelCase 필드에 바인딩됩니다. 값은 이스케이프 없이 그대로 삽입되고,
//! 바인딩되지 않은 자리표시자가 있으면 렌더링이 실패합니다.

use handlebars::Handlebars;
use serde::Serialize;

use crate::domain::ai::error::FlowError;

/// 이름 있는 프롬프트 템플릿 (상수 데이터)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTemplate {
    pub name: &'static str,
    pub text: &'static str,
}

impl PromptTemplate {
    pub const fn new(name: &'static str, text: &'static str) -> Self {
        Self { name, text }
    }
}

/// 플로우들이 공유하는 Handlebars 렌더러
#[derive(Clone)]
pub struct PromptRenderer {
    registry: Handlebars<'static>,
}

impl Default for PromptRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptRenderer {
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);
        Self { registry }
    }

    /// 입력 값으로 프롬프트 문자열 생성
    pub fn render<T: Serialize>(
        &self,
        template: &PromptTemplate,
        input: &T,
    ) -> Result<String, FlowError> {
        self.registry
            .render_template(template.text, input)
            .map_err(|e| FlowError::Prompt(format!("{}: {}", template.name, e)))
    }
}
