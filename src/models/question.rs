use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id_opcao_resposta: String,
    pub texto_resposta: String,
    #[serde(default)]
    pub correta: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id_pergunta: String,
    #[serde(default)]
    pub texto_pergunta: Option<String>,
    #[serde(default)]
    pub opcoes: Vec<AnswerOption>,
}

impl Question {
    pub fn option(&self, option_id: &str) -> Option<&AnswerOption> {
        self.opcoes.iter().find(|o| o.id_opcao_resposta == option_id)
    }

    pub fn correct_option(&self) -> Option<&AnswerOption> {
        self.opcoes.iter().find(|o| o.correta)
    }
}

/// Entry of the "questions not yet answered" list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnansweredQuestion {
    pub id_pergunta: String,
    #[serde(default)]
    pub texto_pergunta: Option<String>,
}

/// Body posted upstream when a student answers a question.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerSubmission {
    pub id_pergunta: String,
    pub id_opcao_resposta: String,
}
