use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
    Extension,
};
use validator::Validate;

use crate::{
    dto::quiz_dto::AnswerQuestionRequest,
    error::{Error, Result},
    middleware::auth::RecruiterSession,
    services::quiz_service::QuizService,
    AppState,
};

fn user_id(session: &RecruiterSession) -> Result<&str> {
    session
        .user_id
        .as_deref()
        .ok_or_else(|| Error::Unauthorized("User not identified".to_string()))
}

#[utoipa::path(
    get,
    path = "/api/quiz/questions",
    responses(
        (status = 200, description = "Questions the user has not answered yet"),
        (status = 401, description = "No valid session or unknown user")
    )
)]
#[axum::debug_handler]
pub async fn list_unanswered(
    State(state): State<AppState>,
    Extension(session): Extension<RecruiterSession>,
) -> Result<impl IntoResponse> {
    let user_id = user_id(&session)?;
    let questions = state
        .quiz_service
        .unanswered(user_id, &session.access_token)
        .await?;
    Ok(Json(questions))
}

#[utoipa::path(
    get,
    path = "/api/quiz/questions/{id}",
    params(
        ("id" = String, Path, description = "Question ID")
    ),
    responses(
        (status = 200, description = "Question with its options, without the answer key"),
        (status = 401, description = "No valid session"),
        (status = 404, description = "Question not found")
    )
)]
#[axum::debug_handler]
pub async fn get_question(
    State(state): State<AppState>,
    Extension(session): Extension<RecruiterSession>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let question = state
        .quiz_service
        .question(&id, &session.access_token)
        .await?;
    Ok(Json(question))
}

#[utoipa::path(
    post,
    path = "/api/quiz/questions/{id}/answer",
    params(
        ("id" = String, Path, description = "Question ID")
    ),
    request_body = AnswerQuestionRequest,
    responses(
        (status = 200, description = "Verdict and the correct option"),
        (status = 400, description = "No option selected or option not in question"),
        (status = 401, description = "No valid session or unknown user")
    )
)]
#[axum::debug_handler]
pub async fn answer_question(
    State(state): State<AppState>,
    Extension(session): Extension<RecruiterSession>,
    Path(id): Path<String>,
    Json(payload): Json<AnswerQuestionRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user_id = user_id(&session)?;
    let verdict = state
        .quiz_service
        .answer(user_id, &id, &payload.id_opcao_resposta, &session.access_token)
        .await?;
    Ok(Json(verdict))
}

#[utoipa::path(
    get,
    path = "/api/quiz/ranking",
    responses(
        (status = 200, description = "Leaderboard, best first, top three with medals")
    )
)]
#[axum::debug_handler]
pub async fn ranking() -> impl IntoResponse {
    Json(QuizService::ranking())
}
