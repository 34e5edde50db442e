use std::collections::{BTreeMap, HashMap, HashSet};
use std::hash::Hash;

use serde::Serialize;

use crate::models::student::{SkillEntry, StudentRecord};

pub const DASHBOARD_TOP_N: usize = 5;
pub const DASHBOARD_PREVIEW_LEN: usize = 10;

/// Which nested skill collection an aggregation reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillField {
    Aptidoes,
    Softskills,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SemesterCount {
    pub semester: u32,
    pub count: usize,
}

/// Option lists offered by the advanced filter form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub courses: Vec<String>,
    pub semesters: Vec<u32>,
    pub skills: Vec<String>,
    pub soft_skills: Vec<String>,
}

/// Quick stats shown above the student list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StudentSummary {
    pub total: usize,
    pub with_proposals: usize,
    pub without_proposals: usize,
    pub average_semester: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_students: usize,
    pub total_requests: u64,
    pub unique_courses: usize,
    /// Distinct technical-skill names across the set.
    pub unique_skills: usize,
    pub semester_distribution: Vec<SemesterCount>,
    pub top_skills: Vec<SkillCount>,
    pub top_soft_skills: Vec<SkillCount>,
    /// First students of the set, in upstream order.
    pub recent_students: Vec<StudentRecord>,
}

pub struct StatsService;

impl StatsService {
    pub fn count(records: &[StudentRecord]) -> usize {
        records.len()
    }

    pub fn count_by<P>(records: &[StudentRecord], predicate: P) -> usize
    where
        P: Fn(&StudentRecord) -> bool,
    {
        records.iter().filter(|r| predicate(r)).count()
    }

    /// Mean current semester rounded half away from zero; 0 for no records.
    pub fn average_semester(records: &[StudentRecord]) -> u32 {
        if records.is_empty() {
            return 0;
        }
        let sum: u64 = records.iter().map(|r| u64::from(r.semestre_atual)).sum();
        (sum as f64 / records.len() as f64).round() as u32
    }

    pub fn semester_histogram(records: &[StudentRecord]) -> BTreeMap<u32, usize> {
        let mut histogram = BTreeMap::new();
        for record in records {
            *histogram.entry(record.semestre_atual).or_insert(0) += 1;
        }
        histogram
    }

    /// The `limit` most frequent names in the selected collection, counts
    /// descending, ties kept in first-encountered order.
    pub fn top_skills(records: &[StudentRecord], field: SkillField, limit: usize) -> Vec<SkillCount> {
        let mut order: Vec<String> = Vec::new();
        let mut counts: HashMap<String, usize> = HashMap::new();

        let mut tally = |name: &str| match counts.get_mut(name) {
            Some(count) => *count += 1,
            None => {
                counts.insert(name.to_string(), 1);
                order.push(name.to_string());
            }
        };

        for record in records {
            match field {
                SkillField::Aptidoes => record.aptidoes.iter().for_each(|s| tally(s.name())),
                SkillField::Softskills => record.softskills.iter().for_each(|s| tally(s.name())),
            }
        }

        let mut ranked: Vec<SkillCount> = order
            .into_iter()
            .map(|name| {
                let count = counts.get(&name).copied().unwrap_or_default();
                SkillCount { name, count }
            })
            .collect();
        // sort_by is stable, so equal counts keep their first-seen order.
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(limit);
        ranked
    }

    /// Distinct values in first-occurrence order. The selector may yield any
    /// number of values per record (`Some(x)`, a single-item array, or an iterator).
    pub fn unique_values<T, I, F>(records: &[StudentRecord], selector: F) -> Vec<T>
    where
        T: Eq + Hash + Clone,
        I: IntoIterator<Item = T>,
        F: Fn(&StudentRecord) -> I,
    {
        let mut seen = HashSet::new();
        let mut values = Vec::new();
        for value in records.iter().flat_map(selector) {
            if seen.insert(value.clone()) {
                values.push(value);
            }
        }
        values
    }

    pub fn filter_options(records: &[StudentRecord]) -> FilterOptions {
        let courses = Self::unique_values(records, |r| Some(r.curso.clone()));

        let mut semesters = Self::unique_values(records, |r| Some(r.semestre_atual));
        semesters.sort_unstable();

        let mut skills = Self::unique_values(records, |r| {
            r.aptidoes.iter().map(|s| s.nome.clone()).collect::<Vec<_>>()
        });
        skills.sort();

        let mut soft_skills = Self::unique_values(records, |r| {
            r.softskills.iter().map(|s| s.nome.clone()).collect::<Vec<_>>()
        });
        soft_skills.sort();

        FilterOptions {
            courses,
            semesters,
            skills,
            soft_skills,
        }
    }

    pub fn summary(records: &[StudentRecord]) -> StudentSummary {
        StudentSummary {
            total: Self::count(records),
            with_proposals: Self::count_by(records, |r| r.solicitacoes > 0),
            without_proposals: Self::count_by(records, |r| r.solicitacoes == 0),
            average_semester: Self::average_semester(records),
        }
    }

    pub fn dashboard(records: &[StudentRecord]) -> DashboardStats {
        DashboardStats {
            total_students: Self::count(records),
            total_requests: records.iter().map(|r| u64::from(r.solicitacoes)).sum(),
            unique_courses: Self::unique_values(records, |r| Some(r.curso.clone())).len(),
            unique_skills: Self::unique_values(records, |r| {
                r.aptidoes.iter().map(|s| s.nome.clone()).collect::<Vec<_>>()
            })
            .len(),
            semester_distribution: Self::semester_histogram(records)
                .into_iter()
                .map(|(semester, count)| SemesterCount { semester, count })
                .collect(),
            top_skills: Self::top_skills(records, SkillField::Aptidoes, DASHBOARD_TOP_N),
            top_soft_skills: Self::top_skills(records, SkillField::Softskills, DASHBOARD_TOP_N),
            recent_students: records.iter().take(DASHBOARD_PREVIEW_LEN).cloned().collect(),
        }
    }
}
