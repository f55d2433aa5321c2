// src/handlers/produto.rs

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
    common::response::{parse_i64_opt, resolver_ordenacao, ApiResponse, Paginacao},
    config::AppState,
    db::produto_repo::{FiltrosProduto, NovoProduto, ProdutoPatch, ORDENACAO_PRODUTO},
    models::catalogo::{Produto, TipoProduto},
};

fn default_ativo() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProdutoPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: String,
    pub descricao: Option<String>,
    pub imagem_url: Option<String>,
    #[serde(default = "default_ativo")]
    pub ativo: bool,
    pub tipo: TipoProduto,
    pub categoria_id: i64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProdutoPayload {
    #[validate(length(min = 1, message = "O nome não pode ser vazio."))]
    pub nome: Option<String>,
    pub descricao: Option<String>,
    pub imagem_url: Option<String>,
    pub ativo: Option<bool>,
    pub tipo: Option<TipoProduto>,
    pub categoria_id: Option<i64>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ProdutoQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub category_id: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/produto/create",
    tag = "Produto",
    request_body = CreateProdutoPayload,
    responses((status = 201, description = "Produto criado", body = Produto))
)]
pub async fn create(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateProdutoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let produto = app_state
        .produtos
        .create(&NovoProduto {
            nome: &payload.nome,
            descricao: payload.descricao.as_deref(),
            imagem_url: payload.imagem_url.as_deref(),
            ativo: payload.ativo,
            tipo: payload.tipo,
            categoria_id: payload.categoria_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(produto))))
}

#[utoipa::path(
    put,
    path = "/api/produto/update/{id}",
    tag = "Produto",
    request_body = UpdateProdutoPayload,
    params(("id" = i64, Path, description = "ID do produto")),
    responses((status = 200, description = "Produto atualizado", body = Produto))
)]
pub async fn update(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateProdutoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let produto = app_state
        .produtos
        .update(
            id,
            &ProdutoPatch {
                nome: payload.nome.as_deref(),
                descricao: payload.descricao.as_deref(),
                imagem_url: payload.imagem_url.as_deref(),
                ativo: payload.ativo,
                tipo: payload.tipo,
                categoria_id: payload.categoria_id,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(produto)))
}

#[utoipa::path(
    delete,
    path = "/api/produto/delete/{id}",
    tag = "Produto",
    params(("id" = i64, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto removido"),
        (status = 409, description = "Produto referenciado por estoque ou notas")
    )
)]
pub async fn delete(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state.produtos.delete(id).await?;
    Ok(Json(ApiResponse::ok(())))
}

#[utoipa::path(
    get,
    path = "/api/produto/findAll",
    tag = "Produto",
    responses((status = 200, description = "Todos os produtos", body = [Produto]))
)]
pub async fn find_all(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let produtos = app_state.produtos.find_all().await?;
    Ok(Json(ApiResponse::ok(produtos)))
}

#[utoipa::path(
    get,
    path = "/api/produto/findById/{id}",
    tag = "Produto",
    params(("id" = i64, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto encontrado", body = Produto),
        (status = 404, description = "Produto não existe")
    )
)]
pub async fn find_by_id(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let produto = app_state
        .produtos
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NaoEncontrado("Produto".into()))?;
    Ok(Json(ApiResponse::ok(produto)))
}

#[utoipa::path(
    get,
    path = "/api/produto/findPerPage",
    tag = "Produto",
    params(ProdutoQuery),
    responses((status = 200, description = "Página de produtos"))
)]
pub async fn find_per_page(
    State(app_state): State<AppState>,
    Query(query): Query<ProdutoQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filtros = FiltrosProduto {
        paginacao: Paginacao::parse(query.page.as_deref(), query.limit.as_deref())?,
        ordenacao: resolver_ordenacao(
            query.sort.as_deref(),
            query.order.as_deref(),
            "p.id",
            ORDENACAO_PRODUTO,
        )?,
        search: query.search.filter(|s| !s.is_empty()),
        categoria_id: parse_i64_opt("categoryId", query.category_id.as_deref())?,
    };

    let pagina = app_state.produtos.find_per_page(&filtros).await?;
    Ok(Json(ApiResponse::ok(pagina)))
}
