use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::student::{SkillEntry, StudentRecord};

/// Proposal-status bucket of the advanced filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    #[default]
    #[serde(alias = "todos")]
    Any,
    #[serde(alias = "com_solicitacoes")]
    HasProposals,
    #[serde(alias = "sem_solicitacoes")]
    NoProposals,
}

impl ProposalStatus {
    pub fn admits(&self, solicitacoes: u32) -> bool {
        match self {
            ProposalStatus::Any => true,
            ProposalStatus::HasProposals => solicitacoes > 0,
            ProposalStatus::NoProposals => solicitacoes == 0,
        }
    }
}

/// Everything the recruiter has selected on the student list at one point in time.
///
/// Criteria are replaced as a whole (`apply`) or reset (`clear`); there is no
/// field-by-field mutation once a value is handed to the evaluator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub search: String,
    pub course: Option<String>,
    pub semesters: BTreeSet<u32>,
    pub status: ProposalStatus,
    pub skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
}

impl FilterCriteria {
    pub fn apply(&mut self, next: FilterCriteria) {
        *self = next;
    }

    pub fn clear(&mut self) {
        *self = FilterCriteria::default();
    }

    pub fn is_default(&self) -> bool {
        *self == FilterCriteria::default()
    }

    pub fn has_age_bounds(&self) -> bool {
        self.min_age.is_some() || self.max_age.is_some()
    }

    /// Badge count shown next to the "filters" button. Search text and course
    /// are not advanced filters and do not count.
    pub fn active_filter_count(&self) -> usize {
        self.semesters.len()
            + usize::from(self.status != ProposalStatus::Any)
            + self.skills.len()
            + self.soft_skills.len()
            + usize::from(self.has_age_bounds())
    }

    pub fn has_active_advanced_filters(&self) -> bool {
        self.active_filter_count() > 0
    }
}

pub struct FilterService;

impl FilterService {
    /// Keeps, in input order, every record matching all active dimensions.
    pub fn filter(
        records: &[StudentRecord],
        criteria: &FilterCriteria,
        as_of: NaiveDate,
    ) -> Vec<StudentRecord> {
        let needle = criteria.search.to_lowercase();
        records
            .iter()
            .filter(|record| Self::matches_with_needle(record, criteria, &needle, as_of))
            .cloned()
            .collect()
    }

    pub fn matches(record: &StudentRecord, criteria: &FilterCriteria, as_of: NaiveDate) -> bool {
        Self::matches_with_needle(record, criteria, &criteria.search.to_lowercase(), as_of)
    }

    fn matches_with_needle(
        record: &StudentRecord,
        criteria: &FilterCriteria,
        needle: &str,
        as_of: NaiveDate,
    ) -> bool {
        Self::matches_text(record, needle)
            && Self::matches_course(record, criteria.course.as_deref())
            && Self::matches_semester(record, &criteria.semesters)
            && criteria.status.admits(record.solicitacoes)
            && Self::matches_any_name(&record.aptidoes, &criteria.skills)
            && Self::matches_any_name(&record.softskills, &criteria.soft_skills)
            && Self::matches_age(record, criteria, as_of)
    }

    fn matches_text(record: &StudentRecord, needle: &str) -> bool {
        needle.is_empty()
            || record.nome.to_lowercase().contains(needle)
            || record.curso.to_lowercase().contains(needle)
            || record.matricula.to_lowercase().contains(needle)
    }

    fn matches_course(record: &StudentRecord, course: Option<&str>) -> bool {
        match course {
            None | Some("") => true,
            Some(course) => record.curso == course,
        }
    }

    fn matches_semester(record: &StudentRecord, semesters: &BTreeSet<u32>) -> bool {
        semesters.is_empty() || semesters.contains(&record.semestre_atual)
    }

    fn matches_any_name<S: SkillEntry>(entries: &[S], selected: &[String]) -> bool {
        selected.is_empty()
            || selected
                .iter()
                .any(|name| entries.iter().any(|entry| entry.name() == name))
    }

    // Age is only evaluated when a bound is set; an unparseable birth date
    // fails any bound but never penalizes a record otherwise.
    fn matches_age(record: &StudentRecord, criteria: &FilterCriteria, as_of: NaiveDate) -> bool {
        if !criteria.has_age_bounds() {
            return true;
        }
        let Some(age) = record.age_on(as_of) else {
            return false;
        };
        criteria.min_age.map_or(true, |min| age >= min)
            && criteria.max_age.map_or(true, |max| age <= max)
    }
}
