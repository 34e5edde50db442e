use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::recruiter::{AuthenticatedUser, NewRecruiter};
use crate::services::unidraft_client::Credentials;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Digite um email válido."))]
    pub email: String,
    #[validate(length(min = 1, message = "Senha é obrigatória."))]
    pub senha: String,
}

impl From<LoginRequest> for Credentials {
    fn from(req: LoginRequest) -> Self {
        Self {
            email: req.email,
            senha: req.senha,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    pub ok: bool,
    pub user: AuthenticatedUser,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRecruiterRequest {
    #[validate(length(min = 1, message = "Todos os campos são obrigatórios."))]
    pub nome: String,
    #[validate(
        length(min = 1, message = "Todos os campos são obrigatórios."),
        email(message = "Digite um email válido.")
    )]
    pub email: String,
    #[validate(length(min = 8, message = "A senha deve ter pelo menos 8 caracteres."))]
    pub senha: String,
    #[validate(length(min = 1, message = "Todos os campos são obrigatórios."))]
    pub cargo: String,
    #[validate(length(min = 1, message = "Todos os campos são obrigatórios."))]
    pub telefone: String,
    #[validate(length(min = 1, message = "Todos os campos são obrigatórios."))]
    pub id_empresa: String,
}

impl From<RegisterRecruiterRequest> for NewRecruiter {
    fn from(req: RegisterRecruiterRequest) -> Self {
        Self {
            nome: req.nome.trim().to_string(),
            email: req.email.trim().to_string(),
            senha: req.senha,
            cargo: req.cargo.trim().to_string(),
            telefone: req.telefone.trim().to_string(),
            id_empresa: req.id_empresa,
        }
    }
}
