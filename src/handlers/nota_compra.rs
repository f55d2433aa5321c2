// src/handlers/nota_compra.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    common::error::AppError,
    common::response::{
        parse_data_opt, parse_decimal_opt, parse_i64_opt, resolver_ordenacao, ApiResponse,
        Paginacao,
    },
    config::AppState,
    db::nota_compra_repo::{FiltrosNotaCompra, ORDENACAO_NOTA_COMPRA},
    handlers::validar_nao_negativo,
    models::estoque::UnidadeMedida,
    models::notas::NotaFiscalCompraDetalhe,
    services::notas_service::LinhaCompra,
};

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProdutoCompraPayload {
    pub produto_id: i64,
    #[validate(range(min = 1, message = "A quantidade deve ser maior que zero."))]
    pub quantidade: i32,
    #[validate(custom(function = validar_nao_negativo))]
    pub preco_unitario: Decimal,
    pub unidade: UnidadeMedida,
}

// O total não é aceito do cliente: é calculado a partir das linhas.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotaCompraPayload {
    pub data: DateTime<Utc>,
    pub fornecedor_id: i64,
    #[validate(
        length(min = 1, message = "A nota precisa de ao menos um produto."),
        nested
    )]
    pub produtos: Vec<ProdutoCompraPayload>,
}

// O total segue as linhas; o update só mexe nos dados da capa.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNotaCompraPayload {
    pub data: Option<DateTime<Utc>>,
    pub fornecedor_id: Option<i64>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct NotaCompraQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub fornecedor_id: Option<String>,
    pub data_start: Option<String>,
    pub data_end: Option<String>,
    pub total_min: Option<String>,
    pub total_max: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/nota-fiscal-compra/create",
    tag = "Nota fiscal de compra",
    request_body = CreateNotaCompraPayload,
    responses((status = 201, description = "Nota criada com as linhas", body = NotaFiscalCompraDetalhe))
)]
pub async fn create(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateNotaCompraPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let linhas: Vec<LinhaCompra> = payload
        .produtos
        .iter()
        .map(|p| LinhaCompra {
            produto_id: p.produto_id,
            quantidade: p.quantidade,
            preco_unitario: p.preco_unitario,
            unidade: p.unidade,
        })
        .collect();

    let nota = app_state
        .notas
        .criar_nota_compra(payload.data, payload.fornecedor_id, &linhas)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(nota))))
}

#[utoipa::path(
    put,
    path = "/api/nota-fiscal-compra/update/{id}",
    tag = "Nota fiscal de compra",
    request_body = UpdateNotaCompraPayload,
    params(("id" = i64, Path, description = "ID da nota")),
    responses((status = 200, description = "Nota atualizada", body = NotaFiscalCompraDetalhe))
)]
pub async fn update(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateNotaCompraPayload>,
) -> Result<impl IntoResponse, AppError> {
    let nota = app_state
        .notas_compra
        .update(id, payload.data, payload.fornecedor_id)
        .await?;
    Ok(Json(ApiResponse::ok(nota)))
}

#[utoipa::path(
    delete,
    path = "/api/nota-fiscal-compra/delete/{id}",
    tag = "Nota fiscal de compra",
    params(("id" = i64, Path, description = "ID da nota")),
    responses((status = 200, description = "Nota removida com suas linhas"))
)]
pub async fn delete(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state.notas_compra.delete(id).await?;
    Ok(Json(ApiResponse::ok(())))
}

#[utoipa::path(
    get,
    path = "/api/nota-fiscal-compra/findAll",
    tag = "Nota fiscal de compra",
    responses((status = 200, description = "Todas as notas", body = [NotaFiscalCompraDetalhe]))
)]
pub async fn find_all(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let notas = app_state.notas_compra.find_all().await?;
    Ok(Json(ApiResponse::ok(notas)))
}

#[utoipa::path(
    get,
    path = "/api/nota-fiscal-compra/findById/{id}",
    tag = "Nota fiscal de compra",
    params(("id" = i64, Path, description = "ID da nota")),
    responses(
        (status = 200, description = "Nota encontrada", body = NotaFiscalCompraDetalhe),
        (status = 404, description = "Nota não existe")
    )
)]
pub async fn find_by_id(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let nota = app_state
        .notas_compra
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NaoEncontrado("Nota fiscal de compra".into()))?;
    Ok(Json(ApiResponse::ok(nota)))
}

#[utoipa::path(
    get,
    path = "/api/nota-fiscal-compra/findPerPage",
    tag = "Nota fiscal de compra",
    params(NotaCompraQuery),
    responses((status = 200, description = "Página de notas de compra"))
)]
pub async fn find_per_page(
    State(app_state): State<AppState>,
    Query(query): Query<NotaCompraQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filtros = FiltrosNotaCompra {
        paginacao: Paginacao::parse(query.page.as_deref(), query.limit.as_deref())?,
        ordenacao: resolver_ordenacao(
            query.sort.as_deref(),
            query.order.as_deref(),
            "n.id",
            ORDENACAO_NOTA_COMPRA,
        )?,
        search: query.search.filter(|s| !s.is_empty()),
        fornecedor_id: parse_i64_opt("fornecedorId", query.fornecedor_id.as_deref())?,
        data_start: parse_data_opt("dataStart", query.data_start.as_deref(), false)?,
        data_end: parse_data_opt("dataEnd", query.data_end.as_deref(), true)?,
        total_min: parse_decimal_opt("totalMin", query.total_min.as_deref())?,
        total_max: parse_decimal_opt("totalMax", query.total_max.as_deref())?,
    };

    let pagina = app_state.notas_compra.find_per_page(&filtros).await?;
    Ok(Json(ApiResponse::ok(pagina)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_valida_linhas_aninhadas() {
        let valido: CreateNotaCompraPayload = serde_json::from_str(
            r#"{"data":"2026-02-05T12:00:00Z","fornecedorId":7,"produtos":[{"produtoId":1,"quantidade":2,"precoUnitario":3.50,"unidade":"KG"}]}"#,
        )
        .unwrap();
        assert!(valido.validate().is_ok());

        let sem_produtos: CreateNotaCompraPayload = serde_json::from_str(
            r#"{"data":"2026-02-05T12:00:00Z","fornecedorId":7,"produtos":[]}"#,
        )
        .unwrap();
        assert!(sem_produtos.validate().is_err());

        let preco_negativo: CreateNotaCompraPayload = serde_json::from_str(
            r#"{"data":"2026-02-05T12:00:00Z","fornecedorId":7,"produtos":[{"produtoId":1,"quantidade":2,"precoUnitario":-1,"unidade":"KG"}]}"#,
        )
        .unwrap();
        assert!(preco_negativo.validate().is_err());
    }

    #[test]
    fn update_nao_aceita_total_do_cliente() {
        let payload: UpdateNotaCompraPayload =
            serde_json::from_str(r#"{"fornecedorId":9,"total":"0.01"}"#).unwrap();
        assert_eq!(payload.fornecedor_id, Some(9));
    }
}
