use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use serde_json::json;
use validator::Validate;

use crate::{
    dto::student_dto::CreateProposalRequest,
    error::{Error, Result},
    middleware::auth::RecruiterSession,
    models::proposal::Solicitation,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/students/{id}/proposals",
    params(
        ("id" = String, Path, description = "Student ID")
    ),
    request_body = CreateProposalRequest,
    responses(
        (status = 201, description = "Proposal sent to the student"),
        (status = 400, description = "Missing role or non-positive salary"),
        (status = 401, description = "No recruiter session")
    )
)]
#[axum::debug_handler]
pub async fn create_proposal(
    State(state): State<AppState>,
    Extension(session): Extension<RecruiterSession>,
    Path(id): Path<String>,
    Json(payload): Json<CreateProposalRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let recruiter_id = session
        .recruiter_id
        .as_deref()
        .ok_or_else(|| Error::Unauthorized("Recruiter not identified".to_string()))?;

    let solicitation = Solicitation {
        id_aluno: id,
        cargo: payload.cargo,
        salario: payload.salario,
    };
    let created = state
        .student_service
        .propose(&session.access_token, recruiter_id, solicitation)
        .await?;
    Ok((StatusCode::CREATED, Json(json!({ "ok": true, "data": created }))))
}
