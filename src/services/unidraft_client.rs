use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value as JsonValue;
use tracing::{instrument, warn};
use url::Url;

use crate::error::{Error, Result};
use crate::models::enterprise::Enterprise;
use crate::models::proposal::Solicitation;
use crate::models::question::{AnswerSubmission, Question, UnansweredQuestion};
use crate::models::recruiter::{LoginResponse, NewRecruiter};
use crate::models::student::StudentRecord;

#[derive(Debug, Clone, serde::Serialize)]
pub struct Credentials {
    pub email: String,
    pub senha: String,
}

/// HTTP client for the UniDraft REST backend.
#[derive(Clone)]
pub struct UnidraftClient {
    client: Client,
    base_url: Url,
}

impl UnidraftClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::Internal(format!("Invalid upstream path {}: {}", path, e)))
    }

    fn with_token(builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> Result<T> {
        let url = self.endpoint(path)?;
        let response = Self::with_token(self.client.get(url), token).send().await?;
        Self::read_json(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B, token: Option<&str>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let response = Self::with_token(self.client.post(url).json(body), token)
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = upstream_message(&body)
                .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));
            warn!(status = status.as_u16(), %message, "UniDraft backend returned an error");
            return Err(Error::Upstream {
                status: status.as_u16(),
                message,
            });
        }
        let bytes = response.bytes().await?;
        let parsed = if bytes.iter().all(u8::is_ascii_whitespace) {
            serde_json::from_value(JsonValue::Null)
        } else {
            serde_json::from_slice(&bytes)
        };
        parsed.map_err(|e| {
            warn!(error = %e, "UniDraft backend returned an unexpected body");
            Error::Upstream {
                status: 502,
                message: format!("Invalid response from UniDraft backend: {}", e),
            }
        })
    }

    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        self.post_json("users/login", credentials, None).await
    }

    #[instrument(skip(self, token))]
    pub async fn fetch_students(&self, token: &str) -> Result<Vec<StudentRecord>> {
        let students: Vec<StudentRecord> = self.get_json("students", Some(token)).await?;
        let out_of_range = students.iter().filter(|s| s.has_out_of_range_levels()).count();
        if out_of_range > 0 {
            warn!(out_of_range, "students with skill levels outside 1..=5");
        }
        tracing::debug!(count = students.len(), "fetched students");
        Ok(students)
    }

    #[instrument(skip(self))]
    pub async fn fetch_enterprises(&self) -> Result<Vec<Enterprise>> {
        self.get_json("enterprises", None).await
    }

    #[instrument(skip(self, recruiter), fields(email = %recruiter.email))]
    pub async fn register_recruiter(&self, recruiter: &NewRecruiter) -> Result<JsonValue> {
        self.post_json("recruiters", recruiter, None).await
    }

    #[instrument(skip(self, token, solicitation), fields(student = %solicitation.id_aluno))]
    pub async fn create_solicitation(
        &self,
        recruiter_id: &str,
        solicitation: &Solicitation,
        token: &str,
    ) -> Result<JsonValue> {
        let path = format!("solicitations/{}", encode_segment(recruiter_id));
        self.post_json(&path, solicitation, Some(token)).await
    }

    #[instrument(skip(self, token))]
    pub async fn fetch_unanswered_questions(
        &self,
        user_id: &str,
        token: &str,
    ) -> Result<Vec<UnansweredQuestion>> {
        let path = format!("university/unanswered/{}", encode_segment(user_id));
        self.get_json(&path, Some(token)).await
    }

    #[instrument(skip(self, token))]
    pub async fn fetch_question(&self, question_id: &str, token: &str) -> Result<Question> {
        let path = format!("university/question/{}", encode_segment(question_id));
        self.get_json(&path, Some(token)).await
    }

    #[instrument(skip(self, token, answer), fields(question = %answer.id_pergunta))]
    pub async fn mark_answer(
        &self,
        user_id: &str,
        answer: &AnswerSubmission,
        token: &str,
    ) -> Result<JsonValue> {
        let path = format!("university/answer/{}", encode_segment(user_id));
        self.post_json(&path, answer, Some(token)).await
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let mut raw = raw.trim().to_string();
    if !raw.ends_with('/') {
        raw.push('/');
    }
    Url::parse(&raw).map_err(|e| Error::Config(format!("Invalid UNIDRAFT_API_URL {}: {}", raw, e)))
}

fn encode_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes()).collect()
}

/// Pulls a human-readable message out of an upstream error body. Validation
/// failures may carry `message` as a list.
fn upstream_message(body: &str) -> Option<String> {
    let value: JsonValue = serde_json::from_str(body).ok()?;
    match value.get("message")? {
        JsonValue::String(msg) if !msg.is_empty() => Some(msg.clone()),
        JsonValue::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(|v| v.as_str()).collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
        _ => None,
    }
}
