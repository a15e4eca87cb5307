//! 플로우 실행기
//!
//! 플로우는 (입력 스키마, 출력 스키마, 프롬프트 템플릿) 한 쌍을 묶은 단위이며
//! 호출마다 정확히 한 번 모델을 호출합니다. 캐시와 재시도는 없습니다.

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Instant;

use schemars::JsonSchema;
use serde::{de::DeserializeOwned, Serialize};
use validator::Validate;

use super::client::{GenerationRequest, ModelProviderRef};
use super::error::FlowError;
use super::prompt::{PromptRenderer, PromptTemplate};
use super::schema::{decode_output, output_schema, validate_input};

pub struct Flow<I, O> {
    name: &'static str,
    template: &'static PromptTemplate,
    renderer: Arc<PromptRenderer>,
    output_schema: serde_json::Value,
    provider: ModelProviderRef,
    _schema: PhantomData<fn(I) -> O>,
}

impl<I, O> Clone for Flow<I, O> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            template: self.template,
            renderer: self.renderer.clone(),
            output_schema: self.output_schema.clone(),
            provider: self.provider.clone(),
            _schema: PhantomData,
        }
    }
}

impl<I, O> Flow<I, O>
where
    I: Validate + Serialize,
    O: DeserializeOwned + Validate + JsonSchema,
{
    pub fn new(
        name: &'static str,
        template: &'static PromptTemplate,
        renderer: Arc<PromptRenderer>,
        provider: ModelProviderRef,
    ) -> Self {
        Self {
            name,
            template,
            renderer,
            output_schema: output_schema::<O>(),
            provider,
            _schema: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// 입력 검증 → 프롬프트 생성 → 모델 호출 → 출력 검증
    pub async fn run(&self, input: I) -> Result<O, FlowError> {
        let start = Instant::now();
        let result = self.execute(input).await;
        let outcome = match &result {
            Ok(_) => "success",
            Err(e) => e.kind(),
        };

        metrics::counter!(
            "ai_flow_requests_total",
            "flow" => self.name,
            "outcome" => outcome
        )
        .increment(1);
        metrics::histogram!("ai_flow_duration_seconds", "flow" => self.name)
            .record(start.elapsed().as_secs_f64());

        match &result {
            Ok(_) => tracing::info!(
                flow = self.name,
                duration_ms = start.elapsed().as_millis() as u64,
                "Flow completed"
            ),
            Err(e) => tracing::warn!(
                flow = self.name,
                outcome,
                error = %e,
                "Flow failed"
            ),
        }

        result
    }

    async fn execute(&self, input: I) -> Result<O, FlowError> {
        validate_input(&input)?;

        let prompt = self.renderer.render(self.template, &input)?;
        tracing::debug!(
            flow = self.name,
            template = self.template.name,
            prompt_length = prompt.len(),
            "Prompt rendered"
        );

        let request = GenerationRequest {
            flow: self.name,
            prompt,
            output_schema: self.output_schema.clone(),
        };

        let raw = self.provider.generate(request).await?;

        decode_output::<O>(&raw)
    }
}
