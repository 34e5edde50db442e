use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enterprise {
    pub id_empresa: String,
    pub nome: String,
    #[serde(default)]
    pub cnpj: Option<String>,
    #[serde(default)]
    pub endereco: Option<String>,
}
