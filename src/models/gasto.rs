// src/models/gasto.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Despesa avulsa do dia (não ligada a nota fiscal).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GastoDiario {
    pub id: i64,
    pub descricao: String,
    pub valor: Decimal,
    pub data: DateTime<Utc>,
}
