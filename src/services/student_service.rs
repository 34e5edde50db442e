use chrono::NaiveDate;
use serde_json::Value as JsonValue;
use tracing::info;

use crate::dto::student_dto::{StudentListResponse, StudentProfile};
use crate::error::{Error, Result};
use crate::models::proposal::Solicitation;
use crate::models::student::StudentRecord;
use crate::services::filter_service::{FilterCriteria, FilterService};
use crate::services::stats_service::{DashboardStats, StatsService};
use crate::services::unidraft_client::UnidraftClient;

/// Student listing for recruiters. Every call works on a fresh snapshot from
/// upstream; nothing is cached between requests.
#[derive(Clone)]
pub struct StudentService {
    client: UnidraftClient,
}

impl StudentService {
    pub fn new(client: UnidraftClient) -> Self {
        Self { client }
    }

    pub async fn snapshot(&self, token: &str) -> Result<Vec<StudentRecord>> {
        self.client.fetch_students(token).await
    }

    pub async fn list(
        &self,
        token: &str,
        criteria: FilterCriteria,
        as_of: NaiveDate,
    ) -> Result<StudentListResponse> {
        let records = self.snapshot(token).await?;
        Ok(Self::build_listing(&records, criteria, as_of))
    }

    pub fn build_listing(
        records: &[StudentRecord],
        criteria: FilterCriteria,
        as_of: NaiveDate,
    ) -> StudentListResponse {
        let students = FilterService::filter(records, &criteria, as_of);
        info!(
            total = records.len(),
            matched = students.len(),
            active_filters = criteria.active_filter_count(),
            "filtered students"
        );
        StudentListResponse {
            summary: StatsService::summary(&students),
            filter_options: StatsService::filter_options(records),
            total_registered: records.len(),
            active_filter_count: criteria.active_filter_count(),
            criteria,
            students,
        }
    }

    pub async fn profile(&self, token: &str, id: &str, as_of: NaiveDate) -> Result<StudentProfile> {
        let student = self
            .snapshot(token)
            .await?
            .into_iter()
            .find(|s| s.id_aluno == id)
            .ok_or_else(|| Error::NotFound(format!("Student {} not found", id)))?;
        Ok(StudentProfile::new(student, as_of))
    }

    pub async fn dashboard(&self, token: &str) -> Result<DashboardStats> {
        let records = self.snapshot(token).await?;
        Ok(StatsService::dashboard(&records))
    }

    pub async fn propose(
        &self,
        token: &str,
        recruiter_id: &str,
        solicitation: Solicitation,
    ) -> Result<JsonValue> {
        let created = self
            .client
            .create_solicitation(recruiter_id, &solicitation, token)
            .await?;
        info!(student = %solicitation.id_aluno, recruiter = %recruiter_id, "proposal sent");
        Ok(created)
    }
}
