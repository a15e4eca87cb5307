use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::error::AppError;
use crate::response::{BaseResponse, ErrorResponse};
use crate::AppState;

use super::dto::{
    ChecklistInput, ChecklistOutput, DrillFeedbackInput, DrillFeedbackOutput, QuizInput,
    QuizOutput,
};

/// 재난 대비 체크리스트 생성
///
/// 재난 종류에 맞는 실행 가능한 안전 체크리스트를 AI가 생성합니다.
#[utoipa::path(
    post,
    path = "/api/ai/checklist",
    tag = "AI",
    request_body = ChecklistInput,
    responses(
        (status = 200, description = "체크리스트 생성 성공", body = BaseResponse<ChecklistOutput>),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 502, description = "AI 응답 형식 오류 또는 요청 거절", body = ErrorResponse),
        (status = 503, description = "AI 서비스 장애", body = ErrorResponse)
    )
)]
pub async fn generate_checklist(
    State(state): State<AppState>,
    request: Result<Json<ChecklistInput>, JsonRejection>,
) -> Result<Json<BaseResponse<ChecklistOutput>>, AppError> {
    // JSON 파싱 에러 처리
    let Json(request) = request.map_err(AppError::from)?;

    tracing::info!(disaster_type = %request.disaster_type, "Checklist request received");

    let output = state.ai.generate_checklist(request).await?;

    tracing::info!(
        item_count = output.checklist_items.len(),
        "Checklist generated successfully"
    );

    Ok(Json(BaseResponse::success(output)))
}

/// 재난 대비 퀴즈 생성
///
/// 재난 종류와 난이도에 맞춰 4지선다 퀴즈를 생성합니다.
#[utoipa::path(
    post,
    path = "/api/ai/quiz",
    tag = "AI",
    request_body = QuizInput,
    responses(
        (status = 200, description = "퀴즈 생성 성공", body = BaseResponse<QuizOutput>),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 502, description = "AI 응답 형식 오류 또는 요청 거절", body = ErrorResponse),
        (status = 503, description = "AI 서비스 장애", body = ErrorResponse)
    )
)]
pub async fn generate_quiz(
    State(state): State<AppState>,
    request: Result<Json<QuizInput>, JsonRejection>,
) -> Result<Json<BaseResponse<QuizOutput>>, AppError> {
    let Json(request) = request.map_err(AppError::from)?;

    tracing::info!(
        disaster_type = %request.disaster_type,
        difficulty = %request.difficulty,
        number_of_questions = request.number_of_questions,
        "Quiz request received"
    );

    let output = state.ai.generate_quiz(request).await?;

    tracing::info!(
        question_count = output.quiz.len(),
        "Quiz generated successfully"
    );

    Ok(Json(BaseResponse::success(output)))
}

/// 가상 재난 훈련 피드백
///
/// 훈련 시나리오와 학생의 수행 데이터를 바탕으로 개인화된 피드백과 개선 제안을 제공합니다.
#[utoipa::path(
    post,
    path = "/api/ai/drill-feedback",
    tag = "AI",
    request_body = DrillFeedbackInput,
    responses(
        (status = 200, description = "피드백 생성 성공", body = BaseResponse<DrillFeedbackOutput>),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 502, description = "AI 응답 형식 오류 또는 요청 거절", body = ErrorResponse),
        (status = 503, description = "AI 서비스 장애", body = ErrorResponse)
    )
)]
pub async fn virtual_drill_feedback(
    State(state): State<AppState>,
    request: Result<Json<DrillFeedbackInput>, JsonRejection>,
) -> Result<Json<BaseResponse<DrillFeedbackOutput>>, AppError> {
    let Json(request) = request.map_err(AppError::from)?;

    tracing::info!(
        scenario = %request.scenario,
        performance_data_length = request.performance_data.len(),
        "Drill feedback request received"
    );

    let output = state.ai.virtual_drill_feedback(request).await?;

    tracing::info!(
        feedback_length = output.feedback.len(),
        "Drill feedback generated successfully"
    );

    Ok(Json(BaseResponse::success(output)))
}
