use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use validator::Validate;

use crate::{
    dto::auth_dto::{LoginRequest, LoginResult, RegisterRecruiterRequest},
    error::{Error, Result},
    models::recruiter::NewRecruiter,
    services::unidraft_client::Credentials,
    utils::cookies::{self, expired_cookie, session_cookie},
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; session cookies set", body = LoginResult),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Invalid credentials")
    )
)]
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let credentials = Credentials::from(payload);

    let login = match state.unidraft.login(&credentials).await {
        Ok(login) => login,
        Err(Error::Upstream { status, message }) if (400..500).contains(&status) => {
            tracing::info!(status, %message, "login rejected by UniDraft backend");
            return Err(Error::Unauthorized(
                "Falha ao fazer login. Verifique suas credenciais.".to_string(),
            ));
        }
        Err(e) => return Err(e),
    };

    let secure = state.cookie_secure;
    let mut headers = HeaderMap::new();
    let mut pairs = vec![
        (cookies::ACCESS_TOKEN, login.access_token.as_str()),
        (cookies::RECRUITER_ID, login.user.id_recrutador.as_str()),
        (cookies::USER_NAME, login.user.nome.as_str()),
    ];
    if let Some(user_id) = login.user.id_usuario.as_deref() {
        pairs.push((cookies::USER_ID, user_id));
    }
    for (name, value) in pairs {
        let cookie = session_cookie(name, value, secure)
            .ok_or_else(|| Error::Internal(format!("Could not encode cookie {}", name)))?;
        headers.append(header::SET_COOKIE, cookie);
    }

    tracing::info!(recruiter = %login.user.id_recrutador, "recruiter logged in");
    Ok((
        StatusCode::OK,
        headers,
        Json(LoginResult {
            ok: true,
            user: login.user,
        }),
    ))
}

#[axum::debug_handler]
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    let mut headers = HeaderMap::new();
    for name in cookies::SESSION_COOKIES {
        if let Some(cookie) = expired_cookie(name, state.cookie_secure) {
            headers.append(header::SET_COOKIE, cookie);
        }
    }
    (StatusCode::OK, headers, Json(json!({ "ok": true })))
}

#[utoipa::path(
    post,
    path = "/api/recruiters",
    request_body = RegisterRecruiterRequest,
    responses(
        (status = 201, description = "Recruiter registered"),
        (status = 400, description = "Missing fields, short password or invalid email")
    )
)]
#[axum::debug_handler]
pub async fn register_recruiter(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRecruiterRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let recruiter = NewRecruiter::from(payload);
    let created = state.unidraft.register_recruiter(&recruiter).await?;
    tracing::info!(email = %recruiter.email, "recruiter registered");
    Ok((StatusCode::CREATED, Json(json!({ "ok": true, "data": created }))))
}
