use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::BadRequest(_) | Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Upstream { status, .. } => match status {
                400 | 401 | 403 | 404 | 409 => {
                    StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
                }
                _ => StatusCode::BAD_GATEWAY,
            },
            Error::Reqwest(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let error_message = match self {
            Error::BadRequest(msg) => msg,
            Error::Unauthorized(msg) => msg,
            Error::NotFound(msg) => msg,
            Error::Upstream { message, .. } => message,
            Error::Validation(err) => err.to_string(),
            Error::Reqwest(err) => format!("External service error: {}", err),
            Error::Internal(msg) => msg,
            Error::Config(_) => "An unexpected error occurred".to_string(),
        };

        if status.is_server_error() {
            tracing::error!(status = %status, error = %error_message, "request failed");
        }

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
