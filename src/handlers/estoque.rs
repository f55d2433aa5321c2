// src/handlers/estoque.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    common::error::AppError,
    common::response::{
        parse_decimal_opt, parse_i32_opt, parse_i64_opt, resolver_ordenacao, ApiResponse,
        Paginacao,
    },
    config::AppState,
    db::estoque_repo::{EstoquePatch, FiltrosEstoque, NovoEstoque, ORDENACAO_ESTOQUE},
    handlers::validar_nao_negativo,
    models::estoque::{ProdutoEstoque, UnidadeMedida},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEstoquePayload {
    pub produto_id: i64,
    #[validate(range(min = 0, message = "A quantidade não pode ser negativa."))]
    pub quantidade: i32,
    #[validate(custom(function = validar_nao_negativo))]
    pub preco: Decimal,
    pub data_validade: Option<NaiveDate>,
    pub unidade: UnidadeMedida,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEstoquePayload {
    #[validate(range(min = 0, message = "A quantidade não pode ser negativa."))]
    pub quantidade: Option<i32>,
    #[validate(custom(function = validar_nao_negativo))]
    pub preco: Option<Decimal>,
    pub data_validade: Option<NaiveDate>,
    pub unidade: Option<UnidadeMedida>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct EstoqueQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub category_id: Option<String>,
    pub preco_min: Option<String>,
    pub preco_max: Option<String>,
    pub quantidade_min: Option<String>,
    pub quantidade_max: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/estoque/create",
    tag = "Estoque",
    request_body = CreateEstoquePayload,
    responses((status = 201, description = "Lote de estoque criado", body = ProdutoEstoque))
)]
pub async fn create(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateEstoquePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let estoque = app_state
        .estoque
        .create(&NovoEstoque {
            produto_id: payload.produto_id,
            quantidade: payload.quantidade,
            preco: payload.preco,
            data_validade: payload.data_validade,
            unidade: payload.unidade,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(estoque))))
}

#[utoipa::path(
    put,
    path = "/api/estoque/update/{id}",
    tag = "Estoque",
    request_body = UpdateEstoquePayload,
    params(("id" = i64, Path, description = "ID do lote")),
    responses((status = 200, description = "Lote atualizado", body = ProdutoEstoque))
)]
pub async fn update(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateEstoquePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let estoque = app_state
        .estoque
        .update(
            id,
            &EstoquePatch {
                quantidade: payload.quantidade,
                preco: payload.preco,
                data_validade: payload.data_validade,
                unidade: payload.unidade,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(estoque)))
}

#[utoipa::path(
    delete,
    path = "/api/estoque/delete/{id}",
    tag = "Estoque",
    params(("id" = i64, Path, description = "ID do lote")),
    responses((status = 200, description = "Lote removido"))
)]
pub async fn delete(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state.estoque.delete(id).await?;
    Ok(Json(ApiResponse::ok(())))
}

#[utoipa::path(
    get,
    path = "/api/estoque/findAll",
    tag = "Estoque",
    responses((status = 200, description = "Todos os lotes", body = [ProdutoEstoque]))
)]
pub async fn find_all(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let estoque = app_state.estoque.find_all().await?;
    Ok(Json(ApiResponse::ok(estoque)))
}

#[utoipa::path(
    get,
    path = "/api/estoque/findById/{id}",
    tag = "Estoque",
    params(("id" = i64, Path, description = "ID do lote")),
    responses(
        (status = 200, description = "Lote encontrado", body = ProdutoEstoque),
        (status = 404, description = "Lote não existe")
    )
)]
pub async fn find_by_id(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let estoque = app_state
        .estoque
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NaoEncontrado("Estoque".into()))?;
    Ok(Json(ApiResponse::ok(estoque)))
}

#[utoipa::path(
    get,
    path = "/api/estoque/findPerPage",
    tag = "Estoque",
    params(EstoqueQuery),
    responses((status = 200, description = "Página de lotes de estoque"))
)]
pub async fn find_per_page(
    State(app_state): State<AppState>,
    Query(query): Query<EstoqueQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filtros = FiltrosEstoque {
        paginacao: Paginacao::parse(query.page.as_deref(), query.limit.as_deref())?,
        ordenacao: resolver_ordenacao(
            query.sort.as_deref(),
            query.order.as_deref(),
            "e.id",
            ORDENACAO_ESTOQUE,
        )?,
        search: query.search.filter(|s| !s.is_empty()),
        categoria_id: parse_i64_opt("categoryId", query.category_id.as_deref())?,
        preco_min: parse_decimal_opt("precoMin", query.preco_min.as_deref())?,
        preco_max: parse_decimal_opt("precoMax", query.preco_max.as_deref())?,
        quantidade_min: parse_i32_opt("quantidadeMin", query.quantidade_min.as_deref())?,
        quantidade_max: parse_i32_opt("quantidadeMax", query.quantidade_max.as_deref())?,
    };

    let pagina = app_state.estoque.find_per_page(&filtros).await?;
    Ok(Json(ApiResponse::ok(pagina)))
}
