use crate::error::VocabularyError;
use crate::srs::{ReviewState, ReviewSummary, due_items, summarize};
use axum::Json;
use chrono::{DateTime, Utc};
use gems_derive::{api_handler, api_model};
use gems_domain::constants::VOCABULARY_TAG;
use gems_kernel::server::{ApiError, ApiResult, ApiState, ErrorBody};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

impl From<VocabularyError> for ApiError {
    fn from(err: VocabularyError) -> Self {
        let message = err.to_string();
        match err {
            VocabularyError::InvalidReview { .. } => Self::bad_request(message),
            VocabularyError::Internal { .. } => Self::from(message),
        }
    }
}

#[api_model]
pub struct ReviewRequest {
    /// Current state; omit together with `itemId` for a first review.
    #[serde(default)]
    pub state: Option<ReviewState>,
    #[serde(default)]
    pub item_id: Option<String>,
    pub correct: bool,
}

#[api_model]
pub struct DueRequest {
    pub states: Vec<ReviewState>,
    /// Evaluation time; defaults to now.
    #[serde(default)]
    pub now: Option<DateTime<Utc>>,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[api_model]
pub struct DueResponse {
    pub due: Vec<ReviewState>,
    pub summary: ReviewSummary,
}

#[api_handler(
    post,
    path = "/vocabulary/review",
    request_body = ReviewRequest,
    responses(
        (status = OK, description = "Rescheduled review state", body = ReviewState),
        (status = BAD_REQUEST, body = ErrorBody),
    ),
    tag = VOCABULARY_TAG,
)]
pub async fn review(Json(request): Json<ReviewRequest>) -> ApiResult<Json<ReviewState>> {
    let mut state = match (request.state, request.item_id) {
        (Some(state), _) => state,
        (None, Some(item_id)) => ReviewState::new(item_id),
        (None, None) => {
            return Err(VocabularyError::InvalidReview { message: "state or itemId is required".into(), context: None }
                .into());
        },
    };
    state.validate()?;
    state.record(request.correct, Utc::now());
    Ok(Json(state))
}

#[api_handler(
    post,
    path = "/vocabulary/due",
    request_body = DueRequest,
    responses(
        (status = OK, description = "Items due for review, most overdue first", body = DueResponse),
        (status = BAD_REQUEST, body = ErrorBody),
    ),
    tag = VOCABULARY_TAG,
)]
pub async fn due(Json(request): Json<DueRequest>) -> ApiResult<Json<DueResponse>> {
    for state in &request.states {
        state.validate()?;
    }
    let now = request.now.unwrap_or_else(Utc::now);
    let mut due = due_items(&request.states, now);
    if let Some(limit) = request.limit {
        due.truncate(limit);
    }
    Ok(Json(DueResponse { due, summary: summarize(&request.states, now) }))
}

/// Vocabulary routes.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new().routes(routes!(review)).routes(routes!(due))
}
