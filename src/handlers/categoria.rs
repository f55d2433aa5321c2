// src/handlers/categoria.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    common::error::AppError,
    common::response::{resolver_ordenacao, ApiResponse, Paginacao},
    config::AppState,
    db::categoria_repo::{FiltrosCategoria, ORDENACAO_CATEGORIA},
    models::catalogo::Categoria,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoriaPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: String,
    pub descricao: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoriaPayload {
    #[validate(length(min = 1, message = "O nome não pode ser vazio."))]
    pub nome: Option<String>,
    pub descricao: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct CategoriaQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/categoria/create",
    tag = "Categoria",
    request_body = CreateCategoriaPayload,
    responses((status = 201, description = "Categoria criada", body = Categoria))
)]
pub async fn create(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateCategoriaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let categoria = app_state
        .categorias
        .create(&payload.nome, payload.descricao.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(categoria))))
}

#[utoipa::path(
    put,
    path = "/api/categoria/update/{id}",
    tag = "Categoria",
    request_body = UpdateCategoriaPayload,
    params(("id" = i64, Path, description = "ID da categoria")),
    responses((status = 200, description = "Categoria atualizada", body = Categoria))
)]
pub async fn update(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateCategoriaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let categoria = app_state
        .categorias
        .update(id, payload.nome.as_deref(), payload.descricao.as_deref())
        .await?;

    Ok(Json(ApiResponse::ok(categoria)))
}

#[utoipa::path(
    delete,
    path = "/api/categoria/delete/{id}",
    tag = "Categoria",
    params(("id" = i64, Path, description = "ID da categoria")),
    responses(
        (status = 200, description = "Categoria removida"),
        (status = 409, description = "Categoria em uso por produtos")
    )
)]
pub async fn delete(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state.categorias.delete(id).await?;
    Ok(Json(ApiResponse::ok(())))
}

#[utoipa::path(
    get,
    path = "/api/categoria/findAll",
    tag = "Categoria",
    responses((status = 200, description = "Todas as categorias", body = [Categoria]))
)]
pub async fn find_all(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let categorias = app_state.categorias.find_all().await?;
    Ok(Json(ApiResponse::ok(categorias)))
}

#[utoipa::path(
    get,
    path = "/api/categoria/findById/{id}",
    tag = "Categoria",
    params(("id" = i64, Path, description = "ID da categoria")),
    responses(
        (status = 200, description = "Categoria encontrada", body = Categoria),
        (status = 404, description = "Categoria não existe")
    )
)]
pub async fn find_by_id(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let categoria = app_state
        .categorias
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NaoEncontrado("Categoria".into()))?;
    Ok(Json(ApiResponse::ok(categoria)))
}

#[utoipa::path(
    get,
    path = "/api/categoria/findPerPage",
    tag = "Categoria",
    params(CategoriaQuery),
    responses((status = 200, description = "Página de categorias"))
)]
pub async fn find_per_page(
    State(app_state): State<AppState>,
    Query(query): Query<CategoriaQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filtros = FiltrosCategoria {
        paginacao: Paginacao::parse(query.page.as_deref(), query.limit.as_deref())?,
        ordenacao: resolver_ordenacao(
            query.sort.as_deref(),
            query.order.as_deref(),
            "id",
            ORDENACAO_CATEGORIA,
        )?,
        search: query.search.filter(|s| !s.is_empty()),
    };

    let pagina = app_state.categorias.find_per_page(&filtros).await?;
    Ok(Json(ApiResponse::ok(pagina)))
}
