// src/models/notas.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::models::estoque::UnidadeMedida;

// --- Compra ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotaFiscalCompra {
    pub id: i64,
    pub data: DateTime<Utc>,
    pub fornecedor_id: i64,
    pub fornecedor_nome: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProdutoCompra {
    pub id: i64,
    pub nota_fiscal_id: i64,
    pub produto_id: i64,
    pub produto_nome: String,
    pub quantidade: i32,
    pub preco_unitario: Decimal,
    pub unidade: UnidadeMedida,
}

/// Nota de compra com suas linhas, como devolvida por findById/findAll.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotaFiscalCompraDetalhe {
    pub id: i64,
    pub data: DateTime<Utc>,
    pub fornecedor_id: i64,
    pub fornecedor_nome: String,
    pub total: Decimal,
    pub produtos: Vec<ProdutoCompra>,
}

// --- Venda ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotaFiscalVenda {
    pub id: i64,
    pub data: DateTime<Utc>,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProdutoVenda {
    pub id: i64,
    pub nota_fiscal_id: i64,
    pub produto_id: i64,
    pub produto_nome: String,
    pub quantidade: i32,
    pub preco_unitario: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotaFiscalVendaDetalhe {
    pub id: i64,
    pub data: DateTime<Utc>,
    pub total: Decimal,
    pub produtos: Vec<ProdutoVenda>,
}
