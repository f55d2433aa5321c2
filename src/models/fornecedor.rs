// src/models/fornecedor.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Fornecedor {
    pub id: i64,
    pub nome: String,
    pub cnpj: String,
    pub telefone: Option<String>,
    pub email: Option<String>,
}
