#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    extract::Path,
    http::{header, HeaderMap, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value as JsonValue};
use tokio::net::TcpListener;
use tower::ServiceExt;

use unidraft_dashboard::{
    config::Config,
    middleware::{auth::require_session, rate_limit},
    routes, AppState,
};

pub const JWT_SECRET: &str = "test_secret_key";
pub const RECRUITER_EMAIL: &str = "rh@empresa.com";
pub const RECRUITER_PASSWORD: &str = "secret123";

pub fn session_token(sub: Option<&str>) -> String {
    let exp = chrono::Utc::now().timestamp() + 3600;
    let mut claims = json!({ "exp": exp, "role": "recruiter" });
    if let Some(sub) = sub {
        claims["sub"] = json!(sub);
    }
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("encode token")
}

pub fn students_fixture() -> JsonValue {
    json!([
        {
            "id_aluno": "s1",
            "nome": "Ana Souza",
            "email": "ana@uni.br",
            "senha": "hash",
            "matricula": "MAT-1",
            "curso": "Engenharia de Software",
            "semestre_atual": 3,
            "data_nascimento": "2003-05-10",
            "solicitacoes": 2,
            "aptidoes": [
                { "id_aptidao": "a1", "id_aluno": "s1", "nome": "Python", "nivel": 4 },
                { "id_aptidao": "a2", "id_aluno": "s1", "nome": "Rust", "nivel": 5 }
            ],
            "softskills": [
                { "id_softskill": "ss1", "id_aluno": "s1", "nome": "Comunicação", "nivel": 3 }
            ]
        },
        {
            "id_aluno": "s2",
            "nome": "Bruno Lima",
            "email": "bruno@uni.br",
            "matricula": "MAT-2",
            "curso": "Direito",
            "semestre_atual": 5,
            "data_nascimento": "2000-12-01T00:00:00.000Z",
            "solicitacoes": 0,
            "aptidoes": [
                { "id_aptidao": "a3", "id_aluno": "s2", "nome": "Python", "nivel": 2 }
            ],
            "softskills": [
                { "id_softskill": "ss2", "id_aluno": "s2", "nome": "Empatia", "nivel": 4 }
            ]
        },
        {
            "id_aluno": "s3",
            "nome": "Carla Dias",
            "email": "carla@uni.br",
            "matricula": "MAT-3",
            "curso": "Engenharia de Software",
            "semestre_atual": 5,
            "data_nascimento": null,
            "solicitacoes": 1,
            "aptidoes": [
                { "id_aptidao": "a4", "id_aluno": "s3", "nome": "Go", "nivel": 3 }
            ],
            "softskills": null
        }
    ])
}

fn question_fixture() -> JsonValue {
    json!({
        "id_pergunta": "q1",
        "texto_pergunta": "Qual palavra-chave declara uma variável imutável em Rust?",
        "opcoes": [
            { "id_opcao_resposta": "o1", "texto_resposta": "let", "correta": true },
            { "id_opcao_resposta": "o2", "texto_resposta": "var", "correta": false },
            { "id_opcao_resposta": "o3", "texto_resposta": "mut", "correta": false }
        ]
    })
}

fn has_bearer(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("Bearer "))
}

fn upstream_unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "Unauthorized", "statusCode": 401 })),
    )
        .into_response()
}

async fn upstream_login(Json(body): Json<JsonValue>) -> Response {
    if body["email"] == RECRUITER_EMAIL && body["senha"] == RECRUITER_PASSWORD {
        Json(json!({
            "access_token": session_token(Some("u-1")),
            "user": {
                "id_recrutador": "r-1",
                "nome": "Rita Recrutadora",
                "email": RECRUITER_EMAIL,
                "id_usuario": "u-1"
            }
        }))
        .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Credenciais inválidas" })),
        )
            .into_response()
    }
}

async fn upstream_students(headers: HeaderMap) -> Response {
    if !has_bearer(&headers) {
        return upstream_unauthorized();
    }
    Json(students_fixture()).into_response()
}

async fn upstream_enterprises() -> Json<JsonValue> {
    Json(json!([
        { "id_empresa": "e1", "nome": "Tech Ltda", "cnpj": "00.000.000/0001-00" },
        { "id_empresa": "e2", "nome": "Advocacia SA" }
    ]))
}

async fn upstream_register(Json(body): Json<JsonValue>) -> Response {
    if body["email"] == RECRUITER_EMAIL {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "message": "Email já cadastrado" })),
        )
            .into_response();
    }
    (
        StatusCode::CREATED,
        Json(json!({ "id_recrutador": "r-2", "nome": body["nome"] })),
    )
        .into_response()
}

async fn upstream_solicitation(
    Path(recruiter_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<JsonValue>,
) -> Response {
    if !has_bearer(&headers) {
        return upstream_unauthorized();
    }
    (
        StatusCode::CREATED,
        Json(json!({
            "id_solicitacao": "sol-1",
            "id_recrutador": recruiter_id,
            "id_aluno": body["id_aluno"],
            "cargo": body["cargo"],
            "salario": body["salario"]
        })),
    )
        .into_response()
}

async fn upstream_unanswered(Path(user_id): Path<String>) -> Json<JsonValue> {
    if user_id == "u-1" {
        Json(json!([{ "id_pergunta": "q1", "texto_pergunta": "Qual palavra-chave..." }]))
    } else {
        Json(json!([]))
    }
}

async fn upstream_question(Path(id): Path<String>) -> Response {
    if id == "q1" {
        Json(question_fixture()).into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Pergunta não encontrada" })),
        )
            .into_response()
    }
}

async fn upstream_mark_answer(Path(user_id): Path<String>) -> Response {
    if user_id == "u-offline" {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }
    Json(json!({ "ok": true })).into_response()
}

/// Serves a fake UniDraft backend on an ephemeral port and returns its base URL.
pub async fn spawn_upstream() -> String {
    let app = Router::new()
        .route("/users/login", post(upstream_login))
        .route("/students", get(upstream_students))
        .route("/enterprises", get(upstream_enterprises))
        .route("/recruiters", post(upstream_register))
        .route("/solicitations/:id", post(upstream_solicitation))
        .route("/university/unanswered/:id", get(upstream_unanswered))
        .route("/university/question/:id", get(upstream_question))
        .route("/university/answer/:id", post(upstream_mark_answer));

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind upstream");
    let addr = listener.local_addr().expect("upstream addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve upstream");
    });
    format!("http://{}/", addr)
}

pub fn test_config(upstream_url: String) -> Config {
    Config {
        server_address: "127.0.0.1:0".to_string(),
        unidraft_api_url: upstream_url,
        jwt_secret: Some(JWT_SECRET.to_string()),
        dashboard_rps: 100,
        public_rps: 100,
        http_timeout_secs: 5,
        allowed_origin: None,
        cookie_secure: false,
    }
}

pub async fn test_app() -> Router {
    let upstream = spawn_upstream().await;
    let config = test_config(upstream);
    let state = AppState::new(&config).expect("app state");

    let public_api = Router::new()
        .route("/health", get(routes::health::health))
        .route("/api/auth/login", post(routes::auth::login))
        .route("/api/auth/logout", post(routes::auth::logout))
        .route("/api/recruiters", post(routes::auth::register_recruiter))
        .route("/api/enterprises", get(routes::enterprises::list_enterprises))
        .route("/api/quiz/ranking", get(routes::quiz::ranking))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit::new_rps_state(config.public_rps),
            rate_limit::rps_middleware,
        ));

    let dashboard_api = Router::new()
        .route("/api/students", get(routes::students::list_students))
        .route("/api/students/:id", get(routes::students::get_student))
        .route(
            "/api/students/:id/proposals",
            post(routes::proposals::create_proposal),
        )
        .route("/api/dashboard", get(routes::dashboard::get_dashboard))
        .route("/api/quiz/questions", get(routes::quiz::list_unanswered))
        .route("/api/quiz/questions/:id", get(routes::quiz::get_question))
        .route(
            "/api/quiz/questions/:id/answer",
            post(routes::quiz::answer_question),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.session_verifier.clone(),
            require_session,
        ))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit::new_rps_state(config.dashboard_rps),
            rate_limit::rps_middleware,
        ));

    public_api.merge(dashboard_api).with_state(state)
}

pub fn session_cookie_header(token: &str, recruiter_id: Option<&str>) -> String {
    match recruiter_id {
        Some(id) => format!("access_token={}; id_recrutador={}; nome=Rita", token, id),
        None => format!("access_token={}", token),
    }
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, HeaderMap, JsonValue) {
    let res = app.clone().oneshot(req).await.expect("response");
    let status = res.status();
    let headers = res.headers().clone();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.expect("body");
    let body = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null)
    };
    (status, headers, body)
}

pub fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .expect("request")
}

pub fn post_json(uri: &str, cookie: Option<&str>, body: JsonValue) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request")
}
