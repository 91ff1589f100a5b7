use crate::Comprehension;
use crate::error::ComprehensionError;
use crate::grade::{ComprehensionResult, grade};
use crate::matching::{award_points, check_answer};
use crate::task::{AnswerText, ComprehensionTask};
use axum::Json;
use axum::extract::State;
use gems_derive::{api_handler, api_model};
use gems_domain::constants::COMPREHENSION_TAG;
use gems_kernel::server::{ApiError, ApiResult, ApiState, ErrorBody};
use std::collections::BTreeMap;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

impl From<ComprehensionError> for ApiError {
    fn from(err: ComprehensionError) -> Self {
        let message = err.to_string();
        match err {
            ComprehensionError::InvalidTask { .. } | ComprehensionError::QuestionNotFound { .. } => {
                Self::bad_request(message)
            },
            ComprehensionError::SessionClosed { .. } => Self::conflict(message),
            ComprehensionError::SessionExpired { .. } => Self::gone(message),
            ComprehensionError::Config { .. } | ComprehensionError::Internal { .. } => Self::from(message),
        }
    }
}

#[api_model]
pub struct CheckRequest {
    pub correct_answer: AnswerText,
    pub answer: AnswerText,
    #[serde(default = "default_points")]
    pub points: u32,
}

#[api_model]
pub struct CheckResponse {
    pub is_correct: bool,
    pub points_awarded: u32,
}

#[api_model]
pub struct GradeRequest {
    pub task: ComprehensionTask,
    /// Answers keyed by question id.
    #[serde(default)]
    pub answers: BTreeMap<String, AnswerText>,
    #[serde(default)]
    pub time_spent_seconds: u64,
}

const fn default_points() -> u32 {
    1
}

#[api_handler(
    post,
    path = "/comprehension/check",
    request_body = CheckRequest,
    responses((status = OK, description = "Whether the answer is accepted", body = CheckResponse)),
    tag = COMPREHENSION_TAG,
)]
pub async fn check(Json(request): Json<CheckRequest>) -> ApiResult<Json<CheckResponse>> {
    Ok(Json(CheckResponse {
        is_correct: check_answer(&request.answer, &request.correct_answer),
        points_awarded: award_points(&request.answer, &request.correct_answer, request.points),
    }))
}

#[api_handler(
    post,
    path = "/comprehension/grade",
    request_body = GradeRequest,
    responses(
        (status = OK, description = "Graded task", body = ComprehensionResult),
        (status = BAD_REQUEST, body = ErrorBody),
    ),
    tag = COMPREHENSION_TAG,
)]
pub async fn grade_task(
    State(state): State<ApiState>,
    Json(request): Json<GradeRequest>,
) -> ApiResult<Json<ComprehensionResult>> {
    let slice = state.try_get_slice::<Comprehension>()?;
    if request.task.questions.is_empty() {
        return Err(ComprehensionError::InvalidTask {
            message: "task has no questions".into(),
            context: Some(request.task.id.into()),
        }
        .into());
    }

    let result = grade(&request.task, &request.answers, request.time_spent_seconds, slice.config.passing_score);
    Ok(Json(result))
}

/// Comprehension routes.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new().routes(routes!(check)).routes(routes!(grade_task))
}
