use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// 한 번에 생성할 수 있는 최대 퀴즈 문항 수
pub const MAX_QUIZ_QUESTIONS: u32 = 20;

/// 퀴즈 문항당 보기 개수
pub const QUIZ_OPTION_COUNT: usize = 4;

// ===== 체크리스트 =====

/// 체크리스트 생성 요청 DTO
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistInput {
    /// 체크리스트를 만들 재난 종류
    #[validate(custom = "validate_not_blank")]
    #[schema(example = "flood")]
    pub disaster_type: String,
}

/// 체크리스트 생성 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[schemars(description = "A disaster preparedness checklist.")]
pub struct ChecklistOutput {
    /// 실행 가능한 단계 목록 (순서 유지)
    #[schemars(
        description = "Actionable preparedness steps, one per entry, in the order they should be done."
    )]
    #[validate(length(min = 1), custom = "validate_items_not_blank")]
    pub checklist_items: Vec<String>,
}

// ===== 퀴즈 =====

/// 퀴즈 생성 요청 DTO
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizInput {
    /// 재난 종류 (예: earthquake, flood, volcano)
    #[validate(custom = "validate_not_blank")]
    #[schema(example = "earthquake")]
    pub disaster_type: String,

    /// 난이도 (예: easy, medium, hard)
    #[validate(custom = "validate_not_blank")]
    #[schema(example = "easy")]
    pub difficulty: String,

    /// 생성할 문항 수 (1 ~ 20)
    #[validate(range(min = 1, max = "MAX_QUIZ_QUESTIONS"))]
    #[schema(example = 2)]
    pub number_of_questions: u32,
}

/// 퀴즈 문항
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[schemars(description = "A multiple-choice question with exactly one correct answer.")]
pub struct QuizQuestion {
    #[schemars(description = "The question text.")]
    #[validate(custom = "validate_not_blank")]
    pub question: String,

    /// 보기 (정확히 4개)
    #[schemars(description = "Exactly four distinct answer options.")]
    #[validate(length(equal = "QUIZ_OPTION_COUNT"))]
    pub options: Vec<String>,

    /// 정답. 보기와의 일치 여부는 `QuizOutput::consistency_issues`에서 점검
    #[schemars(description = "The correct answer, copied exactly from one of the options.")]
    #[validate(custom = "validate_not_blank")]
    pub correct_answer: String,
}

/// 퀴즈 생성 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[schemars(description = "A disaster preparedness quiz.")]
pub struct QuizOutput {
    #[schemars(description = "The quiz questions, exactly as many as requested.")]
    #[validate(length(min = 1), custom = "validate_questions")]
    pub quiz: Vec<QuizQuestion>,
}

/// 구조 검증을 통과한 퀴즈의 의미상 불일치
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizIssue {
    /// 요청한 문항 수와 생성된 문항 수가 다름
    CountMismatch { requested: u32, returned: usize },
    /// 정답이 보기에 없음
    AnswerNotInOptions { index: usize },
}

impl fmt::Display for QuizIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizIssue::CountMismatch {
                requested,
                returned,
            } => write!(f, "requested {} questions, got {}", requested, returned),
            QuizIssue::AnswerNotInOptions { index } => {
                write!(f, "quiz[{}]: correctAnswer is not one of the options", index)
            }
        }
    }
}

impl QuizOutput {
    /// 문항 수와 정답-보기 일치 여부 점검
    pub fn consistency_issues(&self, requested: u32) -> Vec<QuizIssue> {
        let mut issues = Vec::new();

        if self.quiz.len() != requested as usize {
            issues.push(QuizIssue::CountMismatch {
                requested,
                returned: self.quiz.len(),
            });
        }

        for (index, question) in self.quiz.iter().enumerate() {
            if !question.options.contains(&question.correct_answer) {
                issues.push(QuizIssue::AnswerNotInOptions { index });
            }
        }

        issues
    }
}

// ===== 가상 훈련 피드백 =====

/// 가상 재난 훈련 피드백 요청 DTO
///
/// `performance_data`와 `student_details`는 직렬화된 JSON 문자열이며
/// 서버에서는 해석하지 않고 그대로 모델에 전달합니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DrillFeedbackInput {
    /// 훈련 시나리오 (예: earthquake, flood)
    #[validate(custom = "validate_not_blank")]
    #[schema(example = "earthquake")]
    pub scenario: String,

    #[schema(example = r#"{"reactionTimeSec": 12, "reachedSafeZone": true}"#)]
    pub performance_data: String,

    #[schema(example = r#"{"ageGroup": "10-12"}"#)]
    pub student_details: String,
}

/// 가상 재난 훈련 피드백 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[schemars(description = "Personalized feedback on a virtual disaster drill.")]
pub struct DrillFeedbackOutput {
    #[schemars(
        description = "What the student did well and what to improve, written for the student's age group."
    )]
    #[validate(custom = "validate_not_blank")]
    pub feedback: String,

    #[schemars(description = "Concrete steps the student should take for better results.")]
    #[validate(custom = "validate_not_blank")]
    pub suggestions: String,
}

// ===== 커스텀 검증 함수 =====

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("값이 비어 있습니다".into());
        return Err(error);
    }
    Ok(())
}

fn validate_items_not_blank(items: &[String]) -> Result<(), ValidationError> {
    if let Some(index) = items.iter().position(|item| item.trim().is_empty()) {
        let mut error = ValidationError::new("blank_item");
        error.message = Some(format!("{}번째 항목이 비어 있습니다", index).into());
        return Err(error);
    }
    Ok(())
}

fn validate_questions(questions: &[QuizQuestion]) -> Result<(), ValidationError> {
    for (index, question) in questions.iter().enumerate() {
        if let Err(errors) = question.validate() {
            let mut error = ValidationError::new("invalid_question");
            error.message = Some(format!("quiz[{}]: {}", index, errors).into());
            return Err(error);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(correct: &str) -> QuizQuestion {
        QuizQuestion {
            question: "What should you do first during an earthquake?".to_string(),
            options: vec![
                "Run outside".to_string(),
                "Drop, cover, and hold on".to_string(),
                "Use the elevator".to_string(),
                "Stand by a window".to_string(),
            ],
            correct_answer: correct.to_string(),
        }
    }

    #[test]
    fn should_deserialize_checklist_input_from_camel_case() {
        // Arrange
        let json = r#"{ "disasterType": "flood" }"#;

        // Act
        let input: ChecklistInput = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(input.disaster_type, "flood");
        assert!(input.validate().is_ok());
    }

    #[test]
    fn should_reject_checklist_input_without_disaster_type() {
        let result: Result<ChecklistInput, _> = serde_json::from_str("{}");

        assert!(result.is_err());
    }

    #[test]
    fn should_fail_validation_for_blank_disaster_type() {
        let input = ChecklistInput {
            disaster_type: "   ".to_string(),
        };

        let result = input.validate();

        assert!(result.is_err());
        assert!(result.unwrap_err().field_errors().contains_key("disaster_type"));
    }

    #[test]
    fn should_reject_zero_questions() {
        let input = QuizInput {
            disaster_type: "earthquake".to_string(),
            difficulty: "easy".to_string(),
            number_of_questions: 0,
        };

        assert!(input.validate().is_err());
    }

    #[test]
    fn should_reject_too_many_questions() {
        let input = QuizInput {
            disaster_type: "earthquake".to_string(),
            difficulty: "easy".to_string(),
            number_of_questions: MAX_QUIZ_QUESTIONS + 1,
        };

        assert!(input.validate().is_err());
    }

    #[test]
    fn should_reject_quiz_number_given_as_string() {
        let json = r#"{ "disasterType": "flood", "difficulty": "easy", "numberOfQuestions": "two" }"#;

        let result: Result<QuizInput, _> = serde_json::from_str(json);

        assert!(result.is_err());
    }

    #[test]
    fn should_reject_empty_checklist() {
        let output = ChecklistOutput {
            checklist_items: vec![],
        };

        assert!(output.validate().is_err());
    }

    #[test]
    fn should_reject_blank_checklist_item() {
        let output = ChecklistOutput {
            checklist_items: vec!["Pack water".to_string(), " ".to_string()],
        };

        assert!(output.validate().is_err());
    }

    #[test]
    fn should_reject_question_with_three_options() {
        let mut q = question("Drop, cover, and hold on");
        q.options.pop();
        let output = QuizOutput { quiz: vec![q] };

        let result = output.validate();

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("quiz[0]"));
    }

    #[test]
    fn should_accept_well_formed_quiz() {
        let output = QuizOutput {
            quiz: vec![question("Drop, cover, and hold on")],
        };

        assert!(output.validate().is_ok());
        assert_eq!(QUIZ_OPTION_COUNT, output.quiz[0].options.len());
    }

    #[test]
    fn should_report_answer_not_in_options() {
        // Arrange
        let output = QuizOutput {
            quiz: vec![question("Drop, cover, and hold on"), question("Hide")],
        };

        // Act
        let issues = output.consistency_issues(2);

        // Assert
        assert_eq!(issues, vec![QuizIssue::AnswerNotInOptions { index: 1 }]);
    }

    #[test]
    fn should_report_count_mismatch() {
        let output = QuizOutput {
            quiz: vec![question("Drop, cover, and hold on")],
        };

        let issues = output.consistency_issues(3);

        assert_eq!(
            issues,
            vec![QuizIssue::CountMismatch {
                requested: 3,
                returned: 1
            }]
        );
        assert_eq!(issues[0].to_string(), "requested 3 questions, got 1");
    }

    #[test]
    fn should_reject_blank_feedback() {
        let output = DrillFeedbackOutput {
            feedback: "".to_string(),
            suggestions: "Practice the route again.".to_string(),
        };

        assert!(output.validate().is_err());
    }
}
