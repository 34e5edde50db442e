use axum::{response::IntoResponse, Json};
use utoipa::OpenApi;

use crate::routes;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::health::health,
        routes::auth::login,
        routes::auth::register_recruiter,
        routes::students::list_students,
        routes::students::get_student,
        routes::proposals::create_proposal,
        routes::dashboard::get_dashboard,
        routes::quiz::list_unanswered,
        routes::quiz::get_question,
        routes::quiz::answer_question,
        routes::quiz::ranking,
    ),
    tags(
        (name = "unidraft-dashboard", description = "Recruiter dashboard backend for UniDraft")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_dashboard_routes() {
        let doc = ApiDoc::openapi().to_json().unwrap();
        assert!(doc.contains("/api/students/{id}/proposals"));
        assert!(doc.contains("/api/quiz/ranking"));
        assert!(doc.contains("name, course or enrollment number"));
    }
}
