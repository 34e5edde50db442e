use axum::{extract::State, response::IntoResponse, Json};

use crate::{error::Result, AppState};

#[axum::debug_handler]
pub async fn list_enterprises(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let enterprises = state.unidraft.fetch_enterprises().await?;
    Ok(Json(enterprises))
}
