use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::utils::cookies::{self, get_cookie};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Authenticated caller, inserted into request extensions by [`require_session`].
#[derive(Debug, Clone)]
pub struct RecruiterSession {
    pub access_token: String,
    pub recruiter_id: Option<String>,
    pub name: Option<String>,
    pub user_id: Option<String>,
    pub claims: Claims,
}

/// Checks UniDraft access tokens. With a secret the HS256 signature is
/// verified; without one only the claims (expiry) are checked.
#[derive(Clone, Debug, Default)]
pub struct SessionVerifier {
    secret: Option<String>,
}

impl SessionVerifier {
    pub fn new(secret: Option<String>) -> Self {
        Self { secret }
    }

    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_aud = false;
        validation.set_required_spec_claims::<&str>(&[]);

        let data = match &self.secret {
            Some(secret) => decode::<Claims>(
                token,
                &DecodingKey::from_secret(secret.as_bytes()),
                &validation,
            )?,
            None => {
                validation.insecure_disable_signature_validation();
                decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)?
            }
        };
        Ok(data.claims)
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

fn unauthorized(code: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "error": code }))).into_response()
}

pub async fn require_session(
    State(verifier): State<SessionVerifier>,
    mut req: Request,
    next: Next,
) -> Response {
    let headers = req.headers();
    let Some(token) = get_cookie(headers, cookies::ACCESS_TOKEN).or_else(|| bearer_token(headers))
    else {
        return unauthorized("missing_session");
    };

    let claims = match verifier.verify(&token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!(error = %e, "rejected session token");
            return unauthorized("invalid_session");
        }
    };

    let session = RecruiterSession {
        recruiter_id: get_cookie(headers, cookies::RECRUITER_ID),
        name: get_cookie(headers, cookies::USER_NAME),
        user_id: get_cookie(headers, cookies::USER_ID).or_else(|| claims.sub.clone()),
        access_token: token,
        claims,
    };
    req.extensions_mut().insert(session);
    next.run(req).await
}
