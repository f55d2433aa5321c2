// src/handlers/nota_venda.rs

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
        parse_data_opt, parse_decimal_opt, resolver_ordenacao, ApiResponse, Paginacao,
    },
    config::AppState,
    db::nota_venda_repo::{FiltrosNotaVenda, ORDENACAO_NOTA_VENDA},
    handlers::validar_nao_negativo,
    models::notas::NotaFiscalVendaDetalhe,
    services::notas_service::LinhaVenda,
};

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProdutoVendaPayload {
    pub produto_id: i64,
    #[validate(range(min = 1, message = "A quantidade deve ser maior que zero."))]
    pub quantidade: i32,
    #[validate(custom(function = validar_nao_negativo))]
    pub preco_unitario: Decimal,
}

// O total não é aceito do cliente: é calculado a partir das linhas.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotaVendaPayload {
    pub data: DateTime<Utc>,
    #[validate(
        length(min = 1, message = "A nota precisa de ao menos um produto."),
        nested
    )]
    pub produtos: Vec<ProdutoVendaPayload>,
}

// O total segue as linhas; o update só mexe nos dados da capa.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNotaVendaPayload {
    pub data: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct NotaVendaQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub data_start: Option<String>,
    pub data_end: Option<String>,
    pub total_min: Option<String>,
    pub total_max: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/nota-fiscal-venda/create",
    tag = "Nota fiscal de venda",
    request_body = CreateNotaVendaPayload,
    responses((status = 201, description = "Nota criada com as linhas", body = NotaFiscalVendaDetalhe))
)]
pub async fn create(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateNotaVendaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let linhas: Vec<LinhaVenda> = payload
        .produtos
        .iter()
        .map(|p| LinhaVenda {
            produto_id: p.produto_id,
            quantidade: p.quantidade,
            preco_unitario: p.preco_unitario,
        })
        .collect();

    let nota = app_state.notas.criar_nota_venda(payload.data, &linhas).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(nota))))
}

#[utoipa::path(
    put,
    path = "/api/nota-fiscal-venda/update/{id}",
    tag = "Nota fiscal de venda",
    request_body = UpdateNotaVendaPayload,
    params(("id" = i64, Path, description = "ID da nota")),
    responses((status = 200, description = "Nota atualizada", body = NotaFiscalVendaDetalhe))
)]
pub async fn update(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateNotaVendaPayload>,
) -> Result<impl IntoResponse, AppError> {
    let nota = app_state.notas_venda.update(id, payload.data).await?;
    Ok(Json(ApiResponse::ok(nota)))
}

#[utoipa::path(
    delete,
    path = "/api/nota-fiscal-venda/delete/{id}",
    tag = "Nota fiscal de venda",
    params(("id" = i64, Path, description = "ID da nota")),
    responses((status = 200, description = "Nota removida com suas linhas"))
)]
pub async fn delete(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state.notas_venda.delete(id).await?;
    Ok(Json(ApiResponse::ok(())))
}

#[utoipa::path(
    get,
    path = "/api/nota-fiscal-venda/findAll",
    tag = "Nota fiscal de venda",
    responses((status = 200, description = "Todas as notas", body = [NotaFiscalVendaDetalhe]))
)]
pub async fn find_all(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let notas = app_state.notas_venda.find_all().await?;
    Ok(Json(ApiResponse::ok(notas)))
}

#[utoipa::path(
    get,
    path = "/api/nota-fiscal-venda/findById/{id}",
    tag = "Nota fiscal de venda",
    params(("id" = i64, Path, description = "ID da nota")),
    responses(
        (status = 200, description = "Nota encontrada", body = NotaFiscalVendaDetalhe),
        (status = 404, description = "Nota não existe")
    )
)]
pub async fn find_by_id(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let nota = app_state
        .notas_venda
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NaoEncontrado("Nota fiscal de venda".into()))?;
    Ok(Json(ApiResponse::ok(nota)))
}

#[utoipa::path(
    get,
    path = "/api/nota-fiscal-venda/findPerPage",
    tag = "Nota fiscal de venda",
    params(NotaVendaQuery),
    responses((status = 200, description = "Página de notas de venda"))
)]
pub async fn find_per_page(
    State(app_state): State<AppState>,
    Query(query): Query<NotaVendaQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filtros = FiltrosNotaVenda {
        paginacao: Paginacao::parse(query.page.as_deref(), query.limit.as_deref())?,
        ordenacao: resolver_ordenacao(
            query.sort.as_deref(),
            query.order.as_deref(),
            "n.id",
            ORDENACAO_NOTA_VENDA,
        )?,
        search: query.search.filter(|s| !s.is_empty()),
        data_start: parse_data_opt("dataStart", query.data_start.as_deref(), false)?,
        data_end: parse_data_opt("dataEnd", query.data_end.as_deref(), true)?,
        total_min: parse_decimal_opt("totalMin", query.total_min.as_deref())?,
        total_max: parse_decimal_opt("totalMax", query.total_max.as_deref())?,
    };

    let pagina = app_state.notas_venda.find_per_page(&filtros).await?;
    Ok(Json(ApiResponse::ok(pagina)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_valida_linhas_aninhadas() {
        let valido: CreateNotaVendaPayload = serde_json::from_str(
            r#"{"data":"2026-02-05T12:00:00Z","produtos":[{"produtoId":1,"quantidade":2,"precoUnitario":3.50}]}"#,
        )
        .unwrap();
        assert!(valido.validate().is_ok());

        let sem_produtos: CreateNotaVendaPayload =
            serde_json::from_str(r#"{"data":"2026-02-05T12:00:00Z","produtos":[]}"#).unwrap();
        assert!(sem_produtos.validate().is_err());

        let quantidade_zero: CreateNotaVendaPayload = serde_json::from_str(
            r#"{"data":"2026-02-05T12:00:00Z","produtos":[{"produtoId":1,"quantidade":0,"precoUnitario":3.50}]}"#,
        )
        .unwrap();
        assert!(quantidade_zero.validate().is_err());
    }

    #[test]
    fn update_nao_aceita_total_do_cliente() {
        let payload: UpdateNotaVendaPayload =
            serde_json::from_str(r#"{"data":"2026-02-05T12:00:00Z","total":"0.01"}"#).unwrap();
        assert!(payload.data.is_some());
    }
}
