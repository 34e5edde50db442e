use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json},
    Extension,
};

use crate::{
    dto::student_dto::StudentsQuery,
    error::Result,
    middleware::auth::RecruiterSession,
    services::filter_service::FilterCriteria,
    utils::time::today,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/students",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive substring of name, course or enrollment number"),
        ("course" = Option<String>, Query, description = "Exact course name"),
        ("semesters" = Option<String>, Query, description = "Comma separated semesters"),
        ("status" = Option<String>, Query, description = "any, has_proposals or no_proposals"),
        ("skills" = Option<String>, Query, description = "Comma separated skill names, any matches"),
        ("soft_skills" = Option<String>, Query, description = "Comma separated soft skill names, any matches"),
        ("min_age" = Option<i32>, Query, description = "Minimum age in whole years"),
        ("max_age" = Option<i32>, Query, description = "Maximum age in whole years"),
        ("as_of" = Option<String>, Query, description = "Reference date for ages, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Filtered students with summary and filter options"),
        (status = 400, description = "Malformed query"),
        (status = 401, description = "No valid session")
    )
)]
#[axum::debug_handler]
pub async fn list_students(
    State(state): State<AppState>,
    Extension(session): Extension<RecruiterSession>,
    Query(query): Query<StudentsQuery>,
) -> Result<impl IntoResponse> {
    let criteria = FilterCriteria::try_from(&query)?;
    let as_of = query.as_of()?.unwrap_or_else(today);
    let listing = state
        .student_service
        .list(&session.access_token, criteria, as_of)
        .await?;
    Ok(Json(listing))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(
        ("id" = String, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student profile with age and skill level slots"),
        (status = 401, description = "No valid session"),
        (status = 404, description = "Student not found")
    )
)]
#[axum::debug_handler]
pub async fn get_student(
    State(state): State<AppState>,
    Extension(session): Extension<RecruiterSession>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let profile = state
        .student_service
        .profile(&session.access_token, &id, today())
        .await?;
    Ok(Json(profile))
}
