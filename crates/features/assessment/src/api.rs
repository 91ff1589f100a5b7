use crate::Assessments;
use crate::answer::Answer;
use crate::attempt::{AttemptView, Navigation};
use crate::error::AssessmentError;
use crate::paper::AssessmentPaper;
use crate::question::{QuestionRecord, WordCountCheck};
use crate::result::AssessmentResult;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::Utc;
use gems_derive::{api_handler, api_model};
use gems_domain::constants::ASSESSMENT_TAG;
use gems_domain::language::Skill;
use gems_kernel::server::{ApiError, ApiResult, ApiState, ErrorBody};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

impl From<AssessmentError> for ApiError {
    fn from(err: AssessmentError) -> Self {
        let message = err.to_string();
        match err {
            AssessmentError::InvalidPaper { .. } | AssessmentError::QuestionOutOfRange { .. } => {
                Self::bad_request(message)
            },
            AssessmentError::AttemptNotFound { .. } => Self::not_found(message),
            AssessmentError::AttemptClosed { .. } | AssessmentError::AttemptInProgress { .. } => {
                Self::conflict(message)
            },
            AssessmentError::AttemptExpired { .. } => Self::gone(message),
            AssessmentError::Config { .. }
            | AssessmentError::Event { .. }
            | AssessmentError::Internal { .. } => Self::from(message),
        }
    }
}

/// Stateless scoring of one question.
#[api_model]
pub struct ScoreRequest {
    pub skill: Skill,
    pub question: QuestionRecord,
    #[serde(default)]
    #[cfg_attr(feature = "server", schema(value_type = Option<Object>))]
    pub answer: Option<Answer>,
}

#[api_model]
pub struct ScoreResponse {
    pub points_awarded: u32,
    pub marks_possible: u32,
    pub is_correct: bool,
    pub requires_manual_marking: bool,
    pub word_count: Option<WordCountCheck>,
}

#[api_model]
pub struct StartAttemptRequest {
    pub paper: AssessmentPaper,
}

#[api_model]
pub struct AnswerRequest {
    #[cfg_attr(feature = "server", schema(value_type = Object))]
    pub answer: Answer,
}

/// A teacher's mark for a manually marked question.
#[api_model]
pub struct MarkRequest {
    /// 1-based, as in the result's responses.
    pub question_number: u32,
    pub points: u32,
}

#[api_handler(
    post,
    path = "/assessments/score",
    request_body = ScoreRequest,
    responses(
        (status = OK, description = "Points for the answer", body = ScoreResponse),
        (status = BAD_REQUEST, body = ErrorBody),
    ),
    tag = ASSESSMENT_TAG,
)]
pub async fn score_question(Json(request): Json<ScoreRequest>) -> ApiResult<Json<ScoreResponse>> {
    let question = request.question.parse(request.skill);
    let answer = request.answer.as_ref();
    let points_awarded = question.score(answer);

    Ok(Json(ScoreResponse {
        points_awarded,
        marks_possible: question.marks,
        is_correct: question.marks > 0 && points_awarded == question.marks,
        requires_manual_marking: question.requires_manual_marking(),
        word_count: question.word_count(answer),
    }))
}

#[api_handler(
    post,
    path = "/assessments/attempts",
    request_body = StartAttemptRequest,
    responses(
        (status = CREATED, description = "Attempt started", body = AttemptView),
        (status = BAD_REQUEST, body = ErrorBody),
    ),
    tag = ASSESSMENT_TAG,
)]
pub async fn start_attempt(
    State(state): State<ApiState>,
    Json(request): Json<StartAttemptRequest>,
) -> ApiResult<(StatusCode, Json<AttemptView>)> {
    let slice = state.try_get_slice::<Assessments>()?;
    let view = slice.attempts.start(&request.paper, Utc::now())?;
    Ok((StatusCode::CREATED, Json(view)))
}

#[api_handler(
    get,
    path = "/assessments/attempts/{id}",
    params(("id" = String, Path, description = "Attempt id")),
    responses(
        (status = OK, description = "Attempt snapshot", body = AttemptView),
        (status = NOT_FOUND, body = ErrorBody),
    ),
    tag = ASSESSMENT_TAG,
)]
pub async fn get_attempt(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<Json<AttemptView>> {
    let slice = state.try_get_slice::<Assessments>()?;
    Ok(Json(slice.attempts.view(&id, Utc::now())?))
}

#[api_handler(
    put,
    path = "/assessments/attempts/{id}/answers/{index}",
    params(
        ("id" = String, Path, description = "Attempt id"),
        ("index" = usize, Path, description = "0-based question index"),
    ),
    request_body = AnswerRequest,
    responses(
        (status = OK, description = "Answer stored", body = AttemptView),
        (status = BAD_REQUEST, body = ErrorBody),
        (status = NOT_FOUND, body = ErrorBody),
        (status = CONFLICT, body = ErrorBody),
        (status = GONE, body = ErrorBody),
    ),
    tag = ASSESSMENT_TAG,
)]
pub async fn answer_question(
    State(state): State<ApiState>,
    Path((id, index)): Path<(String, usize)>,
    Json(request): Json<AnswerRequest>,
) -> ApiResult<Json<AttemptView>> {
    let slice = state.try_get_slice::<Assessments>()?;
    Ok(Json(slice.attempts.answer(&id, index, request.answer, Utc::now())?))
}

#[api_handler(
    post,
    path = "/assessments/attempts/{id}/navigate",
    params(("id" = String, Path, description = "Attempt id")),
    request_body = Navigation,
    responses(
        (status = OK, description = "Cursor moved", body = AttemptView),
        (status = BAD_REQUEST, body = ErrorBody),
        (status = NOT_FOUND, body = ErrorBody),
        (status = GONE, body = ErrorBody),
    ),
    tag = ASSESSMENT_TAG,
)]
pub async fn navigate(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(navigation): Json<Navigation>,
) -> ApiResult<Json<AttemptView>> {
    let slice = state.try_get_slice::<Assessments>()?;
    Ok(Json(slice.attempts.navigate(&id, navigation, Utc::now())?))
}

#[api_handler(
    post,
    path = "/assessments/attempts/{id}/submit",
    params(("id" = String, Path, description = "Attempt id")),
    responses(
        (status = OK, description = "Scored attempt", body = AssessmentResult),
        (status = NOT_FOUND, body = ErrorBody),
        (status = CONFLICT, body = ErrorBody),
        (status = GONE, body = ErrorBody),
    ),
    tag = ASSESSMENT_TAG,
)]
pub async fn submit_attempt(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<Json<AssessmentResult>> {
    let slice = state.try_get_slice::<Assessments>()?;
    Ok(Json(slice.attempts.submit(&id, Utc::now())?))
}

#[api_handler(
    post,
    path = "/assessments/attempts/{id}/marks",
    params(("id" = String, Path, description = "Attempt id")),
    request_body = MarkRequest,
    responses(
        (status = OK, description = "Updated result", body = AssessmentResult),
        (status = BAD_REQUEST, body = ErrorBody),
        (status = NOT_FOUND, body = ErrorBody),
        (status = CONFLICT, body = ErrorBody),
    ),
    tag = ASSESSMENT_TAG,
)]
pub async fn mark_question(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(request): Json<MarkRequest>,
) -> ApiResult<Json<AssessmentResult>> {
    let slice = state.try_get_slice::<Assessments>()?;
    Ok(Json(slice.attempts.mark(&id, request.question_number, request.points)?))
}

/// Assessment routes.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(score_question))
        .routes(routes!(start_attempt))
        .routes(routes!(get_attempt))
        .routes(routes!(answer_question))
        .routes(routes!(navigate))
        .routes(routes!(submit_attempt))
        .routes(routes!(mark_question))
}
