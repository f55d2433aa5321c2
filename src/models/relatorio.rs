// src/models/relatorio.rs
//
// Tipos de saída do componente de relatórios. As linhas intermediárias de
// agregação ficam junto das queries em `db::relatorio_repo`; aqui estão só
// os formatos devolvidos pela API.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// Cartões do dashboard.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumoGeral {
    pub total_vendas: Decimal,
    pub total_gastos: Decimal,
    pub produtos_em_estoque: i64,
    pub total_notas: i64,
}

// ---
// Vendas
// ---

/// Um balde de vendas por período (dia, semana, mês ou ano), identificado
/// pela data UTC de início do período.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VendaPeriodo {
    pub data: NaiveDate,
    pub total: Decimal,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TotaisPeriodo {
    pub total: Decimal,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComparativoPeriodos {
    pub periodo1: TotaisPeriodo,
    pub periodo2: TotaisPeriodo,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProdutoMaisVendido {
    pub produto_id: i64,
    pub nome: String,
    pub total_quantidade: i64,
    pub total_faturamento: Decimal,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VendaCategoria {
    pub categoria_id: i64,
    pub nome: String,
    pub total_vendas: Decimal,
    pub total_quantidade: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MargemProduto {
    pub produto_id: i64,
    pub nome: String,
    pub receita: Decimal,
    pub custo: Decimal,
    /// Margem percentual sobre a receita.
    pub margem: f64,
}

// ---
// Estoque
// ---

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PosicaoEstoque {
    pub produto_id: i64,
    pub nome: String,
    pub quantidade: i64,
    pub preco: Decimal,
    pub valor_total: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum ClasseAbc {
    A,
    B,
    C,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurvaAbcItem {
    pub produto_id: i64,
    pub nome: String,
    pub valor_estoque: Decimal,
    pub classe: ClasseAbc,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GiroProduto {
    pub produto_id: i64,
    pub nome: String,
    /// Quantidade vendida no período dividida pelo estoque médio.
    pub giro: f64,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProdutoBaixoEstoque {
    pub produto_id: i64,
    pub nome: String,
    pub quantidade_atual: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProdutoSemGiro {
    pub produto_id: i64,
    pub nome: String,
    pub dias_sem_venda: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProdutoValidade {
    pub produto_id: i64,
    pub nome: String,
    pub data_validade: NaiveDate,
    /// Negativo quando o lote já venceu.
    pub dias_para_vencimento: i64,
}

// ---
// Compras
// ---

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompraHistorico {
    pub data: DateTime<Utc>,
    pub quantidade: i32,
    pub preco_unitario: Decimal,
    pub total: Decimal,
    pub fornecedor: String,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComprasFornecedor {
    pub fornecedor_id: i64,
    pub nome: String,
    pub total_compras: i64,
    pub total_valor: Decimal,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustoAquisicao {
    pub data: DateTime<Utc>,
    pub preco_medio: Decimal,
}

// ---
// Consolidado
// ---

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoberturaEstoque {
    pub produto_id: i64,
    pub nome: String,
    pub estoque_atual: i64,
    pub media_vendas_diaria: f64,
    /// 999 quando não houve consumo no período.
    pub dias_cobertura: f64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NecessidadeCompra {
    pub produto_id: i64,
    pub nome: String,
    pub quantidade_sugestao: i64,
    pub razao: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LucratividadeCategoria {
    pub categoria_id: i64,
    pub nome: String,
    pub receita: Decimal,
    pub custo: Decimal,
    pub lucro: Decimal,
    pub margem: f64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RupturaEstoque {
    pub produto_id: i64,
    pub nome: String,
    pub estoque_atual: i64,
    pub media_vendas_diaria: f64,
    pub dias_ate_ruptura: f64,
}
