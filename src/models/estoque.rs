// src/models/estoque.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "unidade_medida", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnidadeMedida {
    Unidade,
    Kg,
    Mg,
    G,
}

/// Linha de estoque de um produto. Um produto pode ter várias linhas
/// (lotes com preços e validades diferentes).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProdutoEstoque {
    pub id: i64,
    pub produto_id: i64,
    pub produto_nome: String,
    pub quantidade: i32,
    pub preco: Decimal,
    pub data_validade: Option<NaiveDate>,
    pub unidade: UnidadeMedida,
}
