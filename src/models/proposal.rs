use serde::{Deserialize, Serialize};

/// Hiring proposal ("solicitação") sent by a recruiter to a student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solicitation {
    pub id_aluno: String,
    pub cargo: String,
    pub salario: f64,
}
