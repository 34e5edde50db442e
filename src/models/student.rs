use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::utils::time::{age_on, parse_date};

/// Number of display slots a proficiency level is rendered into.
pub const LEVEL_SLOTS: usize = 5;

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Shared view over technical skills and soft skills.
pub trait SkillEntry {
    fn name(&self) -> &str;
    fn level(&self) -> i32;

    fn level_in_range(&self) -> bool {
        (1..=LEVEL_SLOTS as i32).contains(&self.level())
    }

    /// Filled/empty flags for the five rating slots. Levels are not clamped:
    /// anything above 5 fills every slot, anything below 1 fills none.
    fn level_slots(&self) -> [bool; LEVEL_SLOTS] {
        let level = self.level();
        let mut slots = [false; LEVEL_SLOTS];
        for (idx, slot) in slots.iter_mut().enumerate() {
            *slot = (idx as i32) < level;
        }
        slots
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id_aptidao: String,
    pub id_aluno: String,
    pub nome: String,
    pub nivel: i32,
    #[serde(default)]
    pub descricao: Option<String>,
}

impl SkillEntry for Skill {
    fn name(&self) -> &str {
        &self.nome
    }

    fn level(&self) -> i32 {
        self.nivel
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoftSkill {
    pub id_softskill: String,
    pub id_aluno: String,
    pub nome: String,
    pub nivel: i32,
    #[serde(default)]
    pub descricao: Option<String>,
}

impl SkillEntry for SoftSkill {
    fn name(&self) -> &str {
        &self.nome
    }

    fn level(&self) -> i32 {
        self.nivel
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id_aluno: String,
    pub nome: String,
    pub email: String,
    #[serde(default, skip_serializing)]
    pub senha: String,
    pub matricula: String,
    pub curso: String,
    pub semestre_atual: u32,
    #[serde(default)]
    pub cpf: String,
    #[serde(default)]
    pub telefone: String,
    /// Raw upstream value; `null` or absent reads as empty and never parses.
    #[serde(default, deserialize_with = "null_as_default")]
    pub data_nascimento: String,
    #[serde(default)]
    pub endereco: String,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub portfolio: Option<String>,
    #[serde(default)]
    pub solicitacoes: u32,
    #[serde(default)]
    pub data_criacao: Option<String>,
    #[serde(default)]
    pub data_atualizacao: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub aptidoes: Vec<Skill>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub softskills: Vec<SoftSkill>,
}

impl StudentRecord {
    /// `None` when the upstream date cannot be parsed.
    pub fn birth_date(&self) -> Option<NaiveDate> {
        parse_date(&self.data_nascimento)
    }

    pub fn age_on(&self, as_of: NaiveDate) -> Option<i32> {
        self.birth_date().map(|birth| age_on(birth, as_of))
    }

    pub fn has_proposals(&self) -> bool {
        self.solicitacoes > 0
    }

    pub fn has_out_of_range_levels(&self) -> bool {
        self.aptidoes.iter().any(|s| !s.level_in_range())
            || self.softskills.iter().any(|s| !s.level_in_range())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_student() -> serde_json::Value {
        json!({
            "id_aluno": "a1",
            "nome": "Ana",
            "email": "ana@uni.br",
            "senha": "$2b$hash",
            "matricula": "2021001",
            "curso": "Engenharia",
            "semestre_atual": 4,
            "cpf": "000",
            "telefone": "9999",
            "data_nascimento": "2001-03-15T00:00:00.000Z",
            "endereco": "Rua A",
            "solicitacoes": 2,
            "aptidoes": [
                {"id_aptidao": "s1", "id_aluno": "a1", "nome": "Rust", "nivel": 4, "descricao": null}
            ],
            "softskills": null
        })
    }

    #[test]
    fn null_softskills_become_empty() {
        let student: StudentRecord = serde_json::from_value(raw_student()).unwrap();
        assert!(student.softskills.is_empty());
        assert_eq!(student.aptidoes.len(), 1);
    }

    #[test]
    fn missing_softskills_become_empty() {
        let mut raw = raw_student();
        raw.as_object_mut().unwrap().remove("softskills");
        let student: StudentRecord = serde_json::from_value(raw).unwrap();
        assert!(student.softskills.is_empty());
    }

    #[test]
    fn password_is_never_serialized() {
        let student: StudentRecord = serde_json::from_value(raw_student()).unwrap();
        assert_eq!(student.senha, "$2b$hash");
        let out = serde_json::to_value(&student).unwrap();
        assert!(out.get("senha").is_none());
    }

    #[test]
    fn birth_date_parses_timestamp_shape() {
        let student: StudentRecord = serde_json::from_value(raw_student()).unwrap();
        assert_eq!(student.birth_date(), NaiveDate::from_ymd_opt(2001, 3, 15));
        let as_of = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();
        assert_eq!(student.age_on(as_of), Some(22));
    }

    #[test]
    fn null_birth_date_keeps_the_record_without_age() {
        let mut second = raw_student();
        second["id_aluno"] = json!("a2");
        second["data_nascimento"] = serde_json::Value::Null;
        let students: Vec<StudentRecord> =
            serde_json::from_value(json!([raw_student(), second])).unwrap();
        assert_eq!(students.len(), 2);
        assert_eq!(students[1].birth_date(), None);
        let as_of = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();
        assert_eq!(students[1].age_on(as_of), None);
    }

    #[test]
    fn level_slots_do_not_clamp() {
        let mut skill = Skill {
            id_aptidao: "s".into(),
            id_aluno: "a".into(),
            nome: "Go".into(),
            nivel: 3,
            descricao: None,
        };
        assert_eq!(skill.level_slots(), [true, true, true, false, false]);
        assert!(skill.level_in_range());

        skill.nivel = 7;
        assert_eq!(skill.level_slots(), [true; 5]);
        assert!(!skill.level_in_range());

        skill.nivel = 0;
        assert_eq!(skill.level_slots(), [false; 5]);
        assert!(!skill.level_in_range());
    }
}
