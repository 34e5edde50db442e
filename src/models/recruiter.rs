use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id_recrutador: String,
    pub nome: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub id_usuario: Option<String>,
}

/// Body returned by the upstream `users/login` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: AuthenticatedUser,
}

/// Recruiter as sent to upstream on registration.
#[derive(Debug, Clone, Serialize)]
pub struct NewRecruiter {
    pub nome: String,
    pub email: String,
    pub senha: String,
    pub cargo: String,
    pub telefone: String,
    pub id_empresa: String,
}
