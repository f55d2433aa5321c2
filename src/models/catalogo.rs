// src/models/catalogo.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Tipo do produto: insumo de preparo ou item vendável do cardápio.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "tipo_produto", rename_all = "SCREAMING_SNAKE_CASE")] // Banco
#[serde(rename_all = "SCREAMING_SNAKE_CASE")] // JSON
pub enum TipoProduto {
    Insumo,   // Vira "INSUMO"
    Cardapio, // Vira "CARDAPIO"
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Categoria {
    pub id: i64,
    pub nome: String,
    pub descricao: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Produto {
    pub id: i64,
    pub nome: String,
    pub descricao: Option<String>,
    pub imagem_url: Option<String>,
    pub ativo: bool,
    pub tipo: TipoProduto,
    pub categoria_id: i64,
    // Nome da categoria, incluído em todas as leituras por conveniência
    // do cliente (o original devolvia a relação inteira).
    pub categoria_nome: String,
}
