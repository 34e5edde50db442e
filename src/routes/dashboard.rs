use axum::{extract::State, response::IntoResponse, Extension, Json};

use crate::{error::Result, middleware::auth::RecruiterSession, AppState};

#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Totals, semester distribution and top skills"),
        (status = 401, description = "No valid session")
    )
)]
#[axum::debug_handler]
pub async fn get_dashboard(
    State(state): State<AppState>,
    Extension(session): Extension<RecruiterSession>,
) -> Result<impl IntoResponse> {
    let stats = state
        .student_service
        .dashboard(&session.access_token)
        .await?;
    Ok(Json(stats))
}
