use tracing::{info, warn};

use crate::dto::quiz_dto::{AnswerQuestionResponse, PublicQuestion, RankingPosition};
use crate::error::{Error, Result};
use crate::models::question::{AnswerSubmission, Question, UnansweredQuestion};
use crate::models::ranking::RankingEntry;
use crate::services::unidraft_client::UnidraftClient;

const RANKING: [(&str, u32); 20] = [
    ("João Silva", 18),
    ("Maria Souza", 17),
    ("Carlos Lima", 16),
    ("Ana Paula", 15),
    ("Lucas Rocha", 15),
    ("Fernanda Alves", 14),
    ("Rafael Costa", 14),
    ("Juliana Dias", 13),
    ("Bruno Martins", 13),
    ("Patrícia Melo", 12),
    ("Gabriel Pinto", 12),
    ("Larissa Ramos", 11),
    ("Eduardo Teixeira", 11),
    ("Camila Borges", 10),
    ("Vinícius Lopes", 10),
    ("Beatriz Faria", 9),
    ("André Santos", 9),
    ("Marina Duarte", 8),
    ("Pedro Henrique", 8),
    ("Sofia Barros", 7),
];

#[derive(Clone)]
pub struct QuizService {
    client: UnidraftClient,
}

impl QuizService {
    pub fn new(client: UnidraftClient) -> Self {
        Self { client }
    }

    pub async fn unanswered(&self, user_id: &str, token: &str) -> Result<Vec<UnansweredQuestion>> {
        self.client.fetch_unanswered_questions(user_id, token).await
    }

    pub async fn question(&self, question_id: &str, token: &str) -> Result<PublicQuestion> {
        let question = self.client.fetch_question(question_id, token).await?;
        Ok(PublicQuestion::from(question))
    }

    /// Grades the chosen option locally, then records it upstream. A failed
    /// upstream write does not change the verdict.
    pub async fn answer(
        &self,
        user_id: &str,
        question_id: &str,
        option_id: &str,
        token: &str,
    ) -> Result<AnswerQuestionResponse> {
        let question = self.client.fetch_question(question_id, token).await?;
        let (correct, correct_option_id) = Self::grade(&question, option_id)?;

        let submission = AnswerSubmission {
            id_pergunta: question.id_pergunta.clone(),
            id_opcao_resposta: option_id.to_string(),
        };
        let recorded = match self.client.mark_answer(user_id, &submission, token).await {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, question_id, "failed to record answer upstream");
                false
            }
        };
        info!(question_id, correct, recorded, "answer graded");

        Ok(AnswerQuestionResponse {
            id_pergunta: question.id_pergunta,
            correct,
            correct_option_id,
            recorded,
        })
    }

    pub fn grade(question: &Question, option_id: &str) -> Result<(bool, Option<String>)> {
        let chosen = question.option(option_id).ok_or_else(|| {
            Error::BadRequest(format!(
                "Option {} does not belong to question {}",
                option_id, question.id_pergunta
            ))
        })?;
        let correct_id = question.correct_option().map(|o| o.id_opcao_resposta.clone());
        Ok((chosen.correta, correct_id))
    }

    /// Static leaderboard, best first; equal scores keep listing order.
    pub fn ranking() -> Vec<RankingPosition> {
        let mut entries: Vec<RankingEntry> = RANKING
            .iter()
            .map(|(nome, acertos)| RankingEntry {
                nome: nome.to_string(),
                acertos: *acertos,
            })
            .collect();
        entries.sort_by(|a, b| b.acertos.cmp(&a.acertos));
        entries
            .into_iter()
            .enumerate()
            .map(|(idx, entry)| RankingPosition::new(idx + 1, entry))
            .collect()
    }
}
