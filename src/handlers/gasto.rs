// src/handlers/gasto.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    common::error::AppError,
    common::response::{parse_data_opt, resolver_ordenacao, ApiResponse, Paginacao},
    config::AppState,
    db::gasto_repo::{FiltrosGasto, ORDENACAO_GASTO},
    handlers::validar_nao_negativo,
    models::gasto::GastoDiario,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGastoPayload {
    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    pub descricao: String,
    #[validate(custom(function = validar_nao_negativo))]
    pub valor: Decimal,
    pub data: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGastoPayload {
    #[validate(length(min = 1, message = "A descrição não pode ser vazia."))]
    pub descricao: Option<String>,
    #[validate(custom(function = validar_nao_negativo))]
    pub valor: Option<Decimal>,
    pub data: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct GastoQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub data_start: Option<String>,
    pub data_end: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/gasto/create",
    tag = "Gasto",
    request_body = CreateGastoPayload,
    responses((status = 201, description = "Gasto registrado", body = GastoDiario))
)]
pub async fn create(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateGastoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let gasto = app_state
        .gastos
        .create(&payload.descricao, payload.valor, payload.data)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(gasto))))
}

#[utoipa::path(
    put,
    path = "/api/gasto/update/{id}",
    tag = "Gasto",
    request_body = UpdateGastoPayload,
    params(("id" = i64, Path, description = "ID do gasto")),
    responses((status = 200, description = "Gasto atualizado", body = GastoDiario))
)]
pub async fn update(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateGastoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let gasto = app_state
        .gastos
        .update(id, payload.descricao.as_deref(), payload.valor, payload.data)
        .await?;

    Ok(Json(ApiResponse::ok(gasto)))
}

#[utoipa::path(
    delete,
    path = "/api/gasto/delete/{id}",
    tag = "Gasto",
    params(("id" = i64, Path, description = "ID do gasto")),
    responses((status = 200, description = "Gasto removido"))
)]
pub async fn delete(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state.gastos.delete(id).await?;
    Ok(Json(ApiResponse::ok(())))
}

#[utoipa::path(
    get,
    path = "/api/gasto/findAll",
    tag = "Gasto",
    responses((status = 200, description = "Todos os gastos", body = [GastoDiario]))
)]
pub async fn find_all(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let gastos = app_state.gastos.find_all().await?;
    Ok(Json(ApiResponse::ok(gastos)))
}

#[utoipa::path(
    get,
    path = "/api/gasto/findById/{id}",
    tag = "Gasto",
    params(("id" = i64, Path, description = "ID do gasto")),
    responses(
        (status = 200, description = "Gasto encontrado", body = GastoDiario),
        (status = 404, description = "Gasto não existe")
    )
)]
pub async fn find_by_id(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let gasto = app_state
        .gastos
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NaoEncontrado("Gasto".into()))?;
    Ok(Json(ApiResponse::ok(gasto)))
}

#[utoipa::path(
    get,
    path = "/api/gasto/findPerPage",
    tag = "Gasto",
    params(GastoQuery),
    responses((status = 200, description = "Página de gastos"))
)]
pub async fn find_per_page(
    State(app_state): State<AppState>,
    Query(query): Query<GastoQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filtros = FiltrosGasto {
        paginacao: Paginacao::parse(query.page.as_deref(), query.limit.as_deref())?,
        ordenacao: resolver_ordenacao(
            query.sort.as_deref(),
            query.order.as_deref(),
            "id",
            ORDENACAO_GASTO,
        )?,
        search: query.search.filter(|s| !s.is_empty()),
        data_start: parse_data_opt("dataStart", query.data_start.as_deref(), false)?,
        data_end: parse_data_opt("dataEnd", query.data_end.as_deref(), true)?,
    };

    let pagina = app_state.gastos.find_per_page(&filtros).await?;
    Ok(Json(ApiResponse::ok(pagina)))
}
