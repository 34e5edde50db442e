use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{Error, Result};
use crate::models::student::{SkillEntry, StudentRecord, LEVEL_SLOTS};
use crate::services::filter_service::{FilterCriteria, ProposalStatus};
use crate::services::stats_service::{FilterOptions, StudentSummary};

fn trim_optional_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }))
}

fn trim_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(s.trim().to_string())
}

/// Query string of `GET /api/students`. Lists are comma separated.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StudentsQuery {
    pub search: Option<String>,
    #[serde(deserialize_with = "trim_optional_string")]
    pub course: Option<String>,
    #[serde(deserialize_with = "trim_optional_string")]
    pub semesters: Option<String>,
    #[serde(deserialize_with = "trim_optional_string")]
    pub status: Option<String>,
    #[serde(deserialize_with = "trim_optional_string")]
    pub skills: Option<String>,
    #[serde(deserialize_with = "trim_optional_string")]
    pub soft_skills: Option<String>,
    #[serde(deserialize_with = "trim_optional_string")]
    pub min_age: Option<String>,
    #[serde(deserialize_with = "trim_optional_string")]
    pub max_age: Option<String>,
    #[serde(deserialize_with = "trim_optional_string")]
    pub as_of: Option<String>,
}

fn split_list(raw: Option<&str>) -> impl Iterator<Item = &str> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
}

/// Repeated names collapse to their first occurrence.
fn split_names(raw: Option<&str>) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for item in split_list(raw) {
        if !names.iter().any(|n| n == item) {
            names.push(item.to_string());
        }
    }
    names
}

fn parse_number<T: std::str::FromStr>(field: &str, raw: &str) -> Result<T> {
    raw.parse()
        .map_err(|_| Error::BadRequest(format!("Invalid value for {}: {}", field, raw)))
}

fn parse_status(raw: &str) -> Result<ProposalStatus> {
    serde_json::from_value(serde_json::Value::String(raw.to_string()))
        .map_err(|_| Error::BadRequest(format!("Invalid value for status: {}", raw)))
}

impl StudentsQuery {
    pub fn as_of(&self) -> Result<Option<NaiveDate>> {
        self.as_of
            .as_deref()
            .map(|raw| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|_| Error::BadRequest(format!("Invalid value for as_of: {}", raw)))
            })
            .transpose()
    }
}

impl TryFrom<&StudentsQuery> for FilterCriteria {
    type Error = Error;

    fn try_from(query: &StudentsQuery) -> Result<Self> {
        let semesters = split_list(query.semesters.as_deref())
            .map(|s| parse_number::<u32>("semesters", s))
            .collect::<Result<BTreeSet<u32>>>()?;
        let status = match query.status.as_deref() {
            Some(raw) => parse_status(raw)?,
            None => ProposalStatus::Any,
        };
        let min_age = query
            .min_age
            .as_deref()
            .map(|raw| parse_number::<i32>("min_age", raw))
            .transpose()?;
        let max_age = query
            .max_age
            .as_deref()
            .map(|raw| parse_number::<i32>("max_age", raw))
            .transpose()?;

        Ok(FilterCriteria {
            search: query.search.clone().unwrap_or_default(),
            course: query.course.clone(),
            semesters,
            status,
            skills: split_names(query.skills.as_deref()),
            soft_skills: split_names(query.soft_skills.as_deref()),
            min_age,
            max_age,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentListResponse {
    pub students: Vec<StudentRecord>,
    /// Size of the unfiltered set, used to tell "nobody registered" from
    /// "nobody matches".
    pub total_registered: usize,
    pub summary: StudentSummary,
    pub filter_options: FilterOptions,
    pub criteria: FilterCriteria,
    pub active_filter_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillView {
    pub nome: String,
    pub nivel: i32,
    pub descricao: Option<String>,
    pub slots: [bool; LEVEL_SLOTS],
    pub level_in_range: bool,
}

impl SkillView {
    fn from_entry<S: SkillEntry>(entry: &S, descricao: Option<String>) -> Self {
        Self {
            nome: entry.name().to_string(),
            nivel: entry.level(),
            descricao,
            slots: entry.level_slots(),
            level_in_range: entry.level_in_range(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentProfile {
    #[serde(flatten)]
    pub student: StudentRecord,
    pub idade: Option<i32>,
    pub aptidoes_view: Vec<SkillView>,
    pub softskills_view: Vec<SkillView>,
}

impl StudentProfile {
    pub fn new(student: StudentRecord, as_of: NaiveDate) -> Self {
        let aptidoes_view = student
            .aptidoes
            .iter()
            .map(|s| SkillView::from_entry(s, s.descricao.clone()))
            .collect();
        let softskills_view = student
            .softskills
            .iter()
            .map(|s| SkillView::from_entry(s, s.descricao.clone()))
            .collect();
        Self {
            idade: student.age_on(as_of),
            student,
            aptidoes_view,
            softskills_view,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProposalRequest {
    #[serde(deserialize_with = "trim_string")]
    #[validate(length(min = 1, message = "Cargo é obrigatório"))]
    pub cargo: String,
    #[validate(range(exclusive_min = 0.0, message = "Salário deve ser maior que zero"))]
    pub salario: f64,
}
