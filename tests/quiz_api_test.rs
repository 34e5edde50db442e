mod common;

use axum::{body::Body, http::Request, http::StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;

use common::{get_with_cookie, post_json, send, session_cookie_header, session_token, test_app};

#[tokio::test]
async fn ranking_is_public_and_medals_the_podium() {
    let app = test_app().await;
    let req = Request::builder()
        .uri("/api/quiz/ranking")
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);

    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 20);
    assert_eq!(entries[0]["position"], 1);
    assert_eq!(entries[0]["medal_color"], "#FFD700");
    assert_eq!(entries[2]["medal_color"], "#CD7F32");
    assert!(entries[3].get("medal").is_none());
    assert!(entries
        .windows(2)
        .all(|w| w[0]["acertos"].as_u64() >= w[1]["acertos"].as_u64()));
}

#[tokio::test]
async fn unanswered_questions_follow_the_session_user() {
    let app = test_app().await;

    let cookie = session_cookie_header(&session_token(Some("u-1")), None);
    let (status, _, body) = send(&app, get_with_cookie("/api/quiz/questions", &cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["id_pergunta"], "q1");

    let anonymous = session_cookie_header(&session_token(None), None);
    let (status, _, _) = send(&app, get_with_cookie("/api/quiz/questions", &anonymous)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn question_hides_the_answer_key() {
    let app = test_app().await;
    let cookie = session_cookie_header(&session_token(Some("u-1")), None);

    let (status, _, body) = send(&app, get_with_cookie("/api/quiz/questions/q1", &cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["opcoes"].as_array().unwrap().len(), 3);
    assert!(body["opcoes"][0].get("correta").is_none());

    let (status, _, body) = send(&app, get_with_cookie("/api/quiz/questions/q9", &cookie)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Pergunta não encontrada");
}

#[tokio::test]
async fn answers_are_graded_and_recorded() {
    let app = test_app().await;
    let cookie = session_cookie_header(&session_token(Some("u-1")), None);
    let uri = "/api/quiz/questions/q1/answer";

    let (status, _, body) = send(
        &app,
        post_json(uri, Some(&cookie), json!({ "id_opcao_resposta": "o2" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["correct"], false);
    assert_eq!(body["correct_option_id"], "o1");
    assert_eq!(body["recorded"], true);

    let (_, _, body) = send(
        &app,
        post_json(uri, Some(&cookie), json!({ "id_opcao_resposta": "o1" })),
    )
    .await;
    assert_eq!(body["correct"], true);

    let (status, _, _) = send(
        &app,
        post_json(uri, Some(&cookie), json!({ "id_opcao_resposta": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = send(
        &app,
        post_json(uri, Some(&cookie), json!({ "id_opcao_resposta": "o9" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn upstream_write_failure_keeps_the_verdict() {
    let app = test_app().await;
    let cookie = format!(
        "{}; id_usuario=u-offline",
        session_cookie_header(&session_token(Some("u-1")), None)
    );
    let (status, _, body) = send(
        &app,
        post_json(
            "/api/quiz/questions/q1/answer",
            Some(&cookie),
            json!({ "id_opcao_resposta": "o1" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["correct"], true);
    assert_eq!(body["recorded"], false);
}
