pub mod config;
pub mod docs;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::time::Duration;

use crate::config::Config;
use crate::error::Result;
use crate::middleware::auth::SessionVerifier;
use crate::services::{
    quiz_service::QuizService, student_service::StudentService, unidraft_client::UnidraftClient,
};

#[derive(Clone)]
pub struct AppState {
    pub unidraft: UnidraftClient,
    pub student_service: StudentService,
    pub quiz_service: QuizService,
    pub session_verifier: SessionVerifier,
    pub cookie_secure: bool,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self> {
        let unidraft = UnidraftClient::new(
            &config.unidraft_api_url,
            Duration::from_secs(config.http_timeout_secs),
        )?;
        tracing::info!(base_url = %unidraft.base_url(), "UniDraft backend configured");

        let student_service = StudentService::new(unidraft.clone());
        let quiz_service = QuizService::new(unidraft.clone());
        let session_verifier = SessionVerifier::new(config.jwt_secret.clone());

        Ok(Self {
            unidraft,
            student_service,
            quiz_service,
            session_verifier,
            cookie_secure: config.cookie_secure,
        })
    }
}
