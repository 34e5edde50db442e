use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::question::Question;
use crate::models::ranking::{Medal, RankingEntry};

#[derive(Debug, Clone, Serialize)]
pub struct PublicAnswerOption {
    pub id_opcao_resposta: String,
    pub texto_resposta: String,
}

/// Question as shown to a student; correctness stays server-side.
#[derive(Debug, Clone, Serialize)]
pub struct PublicQuestion {
    pub id_pergunta: String,
    pub texto_pergunta: Option<String>,
    pub opcoes: Vec<PublicAnswerOption>,
}

impl From<Question> for PublicQuestion {
    fn from(question: Question) -> Self {
        Self {
            id_pergunta: question.id_pergunta,
            texto_pergunta: question.texto_pergunta,
            opcoes: question
                .opcoes
                .into_iter()
                .map(|o| PublicAnswerOption {
                    id_opcao_resposta: o.id_opcao_resposta,
                    texto_resposta: o.texto_resposta,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AnswerQuestionRequest {
    #[validate(length(min = 1, message = "Selecione uma opção antes de enviar"))]
    pub id_opcao_resposta: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnswerQuestionResponse {
    pub id_pergunta: String,
    pub correct: bool,
    pub correct_option_id: Option<String>,
    /// Whether the upstream accepted the answer. The verdict is returned
    /// either way.
    pub recorded: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankingPosition {
    pub position: usize,
    pub nome: String,
    pub acertos: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medal: Option<Medal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medal_color: Option<&'static str>,
}

impl RankingPosition {
    pub fn new(position: usize, entry: RankingEntry) -> Self {
        let medal = Medal::for_position(position);
        Self {
            position,
            nome: entry.nome,
            acertos: entry.acertos,
            medal,
            medal_color: medal.map(|m| m.color()),
        }
    }
}
