use std::sync::Arc;

use super::client::ModelProviderRef;
use super::dto::{
    ChecklistInput, ChecklistOutput, DrillFeedbackInput, DrillFeedbackOutput, QuizInput,
    QuizOutput,
};
use super::error::FlowError;
use super::flow::Flow;
use super::prompt::{PromptRenderer, CHECKLIST_PROMPT, DRILL_FEEDBACK_PROMPT, QUIZ_PROMPT};

/// 재난 대비 AI 기능의 공개 진입점
///
/// 각 메서드는 대응하는 플로우를 그대로 호출하며 같은 에러를 전파합니다.
#[derive(Clone)]
pub struct PreparednessAi {
    checklist: Flow<ChecklistInput, ChecklistOutput>,
    quiz: Flow<QuizInput, QuizOutput>,
    drill_feedback: Flow<DrillFeedbackInput, DrillFeedbackOutput>,
    strict_quiz_checks: bool,
}

impl PreparednessAi {
    pub fn new(provider: ModelProviderRef, strict_quiz_checks: bool) -> Self {
        let renderer = Arc::new(PromptRenderer::new());
        Self {
            checklist: Flow::new(
                "generateChecklistFlow",
                &CHECKLIST_PROMPT,
                renderer.clone(),
                provider.clone(),
            ),
            quiz: Flow::new(
                "generateQuizFlow",
                &QUIZ_PROMPT,
                renderer.clone(),
                provider.clone(),
            ),
            drill_feedback: Flow::new(
                "virtualDrillFeedbackFlow",
                &DRILL_FEEDBACK_PROMPT,
                renderer,
                provider,
            ),
            strict_quiz_checks,
        }
    }

    /// 재난 종류별 안전 체크리스트 생성
    pub async fn generate_checklist(
        &self,
        input: ChecklistInput,
    ) -> Result<ChecklistOutput, FlowError> {
        self.checklist.run(input).await
    }

    /// 재난 대비 퀴즈 생성
    ///
    /// 정답이 보기에 없거나 문항 수가 다르면 경고를 남기고,
    /// 엄격 모드에서는 `OutputValidation`으로 실패합니다.
    pub async fn generate_quiz(&self, input: QuizInput) -> Result<QuizOutput, FlowError> {
        let requested = input.number_of_questions;
        let output = self.quiz.run(input).await?;

        let issues = output.consistency_issues(requested);
        if issues.is_empty() {
            return Ok(output);
        }

        for issue in &issues {
            tracing::warn!(flow = self.quiz.name(), issue = %issue, "Quiz consistency issue");
        }

        if self.strict_quiz_checks {
            let reasons: Vec<String> = issues.iter().map(ToString::to_string).collect();
            return Err(FlowError::OutputValidation(reasons.join("; ")));
        }

        Ok(output)
    }

    /// 가상 재난 훈련 결과에 대한 피드백 생성
    pub async fn virtual_drill_feedback(
        &self,
        input: DrillFeedbackInput,
    ) -> Result<DrillFeedbackOutput, FlowError> {
        self.drill_feedback.run(input).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ai::client::MockModelProvider;
    use crate::domain::ai::dto::QUIZ_OPTION_COUNT;

    const QUIZ_WITH_WRONG_ANSWER: &str = r#"{
        "quiz": [
            {
                "question": "What is the first step during an earthquake?",
                "options": ["Run outside", "Drop, cover, and hold on", "Use the elevator", "Stand by a window"],
                "correctAnswer": "Hide"
            }
        ]
    }"#;

    const VALID_QUIZ: &str = r#"{
        "quiz": [
            {
                "question": "What is the first step during an earthquake?",
                "options": ["Run outside", "Drop, cover, and hold on", "Use the elevator", "Stand by a window"],
                "correctAnswer": "Drop, cover, and hold on"
            },
            {
                "question": "Where is the safest place indoors?",
                "options": ["Under a sturdy table", "Next to a window", "On the stairs", "In the elevator"],
                "correctAnswer": "Under a sturdy table"
            }
        ]
    }"#;

    fn service(response: &'static str, strict: bool) -> PreparednessAi {
        let mut mock = MockModelProvider::new();
        mock.expect_generate()
            .times(1)
            .returning(move |_| Ok(response.to_string()));
        PreparednessAi::new(Arc::new(mock), strict)
    }

    fn quiz_input(number_of_questions: u32) -> QuizInput {
        QuizInput {
            disaster_type: "earthquake".to_string(),
            difficulty: "easy".to_string(),
            number_of_questions,
        }
    }

    #[tokio::test]
    async fn should_generate_quiz_with_four_options_and_matching_answers() {
        // Arrange
        let ai = service(VALID_QUIZ, true);

        // Act
        let output = ai.generate_quiz(quiz_input(2)).await.unwrap();

        // Assert
        assert_eq!(output.quiz.len(), 2);
        for question in &output.quiz {
            assert_eq!(question.options.len(), QUIZ_OPTION_COUNT);
            assert!(question.options.contains(&question.correct_answer));
        }
    }

    #[tokio::test]
    async fn should_keep_inconsistent_quiz_when_not_strict() {
        let ai = service(QUIZ_WITH_WRONG_ANSWER, false);

        let output = ai.generate_quiz(quiz_input(1)).await.unwrap();

        assert_eq!(output.quiz[0].correct_answer, "Hide");
    }

    #[tokio::test]
    async fn should_reject_inconsistent_quiz_when_strict() {
        let ai = service(QUIZ_WITH_WRONG_ANSWER, true);

        let result = ai.generate_quiz(quiz_input(1)).await;

        match result {
            Err(FlowError::OutputValidation(msg)) => assert!(msg.contains("quiz[0]")),
            other => panic!("expected OutputValidation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn should_reject_count_mismatch_when_strict() {
        let ai = service(VALID_QUIZ, true);

        let result = ai.generate_quiz(quiz_input(3)).await;

        assert!(matches!(result, Err(FlowError::OutputValidation(_))));
    }

    #[tokio::test]
    async fn should_generate_checklist() {
        let ai = service(
            r#"{"checklistItems": ["Move valuables upstairs", "Know your evacuation route"]}"#,
            false,
        );

        let output = ai
            .generate_checklist(ChecklistInput {
                disaster_type: "flood".to_string(),
            })
            .await
            .unwrap();

        assert!(!output.checklist_items.is_empty());
        assert!(output.checklist_items.iter().all(|item| !item.trim().is_empty()));
    }

    #[tokio::test]
    async fn should_generate_drill_feedback() {
        let ai = service(
            r#"{"feedback": "You stayed calm.", "suggestions": "Cover your head next time."}"#,
            false,
        );

        let output = ai
            .virtual_drill_feedback(DrillFeedbackInput {
                scenario: "earthquake".to_string(),
                performance_data: "{}".to_string(),
                student_details: "{}".to_string(),
            })
            .await
            .unwrap();

        assert!(!output.feedback.is_empty());
        assert!(!output.suggestions.is_empty());
    }
}
