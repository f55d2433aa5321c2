// src/handlers/fornecedor.rs

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
    db::fornecedor_repo::{
        FiltrosFornecedor, FornecedorPatch, NovoFornecedor, ORDENACAO_FORNECEDOR,
    },
    models::fornecedor::Fornecedor,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFornecedorPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: String,
    #[validate(length(min = 1, message = "O CNPJ é obrigatório."))]
    pub cnpj: String,
    pub telefone: Option<String>,
    #[validate(email(message = "E-mail inválido."))]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFornecedorPayload {
    #[validate(length(min = 1, message = "O nome não pode ser vazio."))]
    pub nome: Option<String>,
    #[validate(length(min = 1, message = "O CNPJ não pode ser vazio."))]
    pub cnpj: Option<String>,
    pub telefone: Option<String>,
    #[validate(email(message = "E-mail inválido."))]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct FornecedorQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/fornecedor/create",
    tag = "Fornecedor",
    request_body = CreateFornecedorPayload,
    responses((status = 201, description = "Fornecedor criado", body = Fornecedor))
)]
pub async fn create(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateFornecedorPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let fornecedor = app_state
        .fornecedores
        .create(&NovoFornecedor {
            nome: &payload.nome,
            cnpj: &payload.cnpj,
            telefone: payload.telefone.as_deref(),
            email: payload.email.as_deref(),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(fornecedor))))
}

#[utoipa::path(
    put,
    path = "/api/fornecedor/update/{id}",
    tag = "Fornecedor",
    request_body = UpdateFornecedorPayload,
    params(("id" = i64, Path, description = "ID do fornecedor")),
    responses((status = 200, description = "Fornecedor atualizado", body = Fornecedor))
)]
pub async fn update(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateFornecedorPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let fornecedor = app_state
        .fornecedores
        .update(
            id,
            &FornecedorPatch {
                nome: payload.nome.as_deref(),
                cnpj: payload.cnpj.as_deref(),
                telefone: payload.telefone.as_deref(),
                email: payload.email.as_deref(),
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(fornecedor)))
}

#[utoipa::path(
    delete,
    path = "/api/fornecedor/delete/{id}",
    tag = "Fornecedor",
    params(("id" = i64, Path, description = "ID do fornecedor")),
    responses(
        (status = 200, description = "Fornecedor removido"),
        (status = 409, description = "Fornecedor referenciado por notas de compra")
    )
)]
pub async fn delete(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state.fornecedores.delete(id).await?;
    Ok(Json(ApiResponse::ok(())))
}

#[utoipa::path(
    get,
    path = "/api/fornecedor/findAll",
    tag = "Fornecedor",
    responses((status = 200, description = "Todos os fornecedores", body = [Fornecedor]))
)]
pub async fn find_all(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let fornecedores = app_state.fornecedores.find_all().await?;
    Ok(Json(ApiResponse::ok(fornecedores)))
}

#[utoipa::path(
    get,
    path = "/api/fornecedor/findById/{id}",
    tag = "Fornecedor",
    params(("id" = i64, Path, description = "ID do fornecedor")),
    responses(
        (status = 200, description = "Fornecedor encontrado", body = Fornecedor),
        (status = 404, description = "Fornecedor não existe")
    )
)]
pub async fn find_by_id(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let fornecedor = app_state
        .fornecedores
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NaoEncontrado("Fornecedor".into()))?;
    Ok(Json(ApiResponse::ok(fornecedor)))
}

#[utoipa::path(
    get,
    path = "/api/fornecedor/findPerPage",
    tag = "Fornecedor",
    params(FornecedorQuery),
    responses((status = 200, description = "Página de fornecedores"))
)]
pub async fn find_per_page(
    State(app_state): State<AppState>,
    Query(query): Query<FornecedorQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filtros = FiltrosFornecedor {
        paginacao: Paginacao::parse(query.page.as_deref(), query.limit.as_deref())?,
        ordenacao: resolver_ordenacao(
            query.sort.as_deref(),
            query.order.as_deref(),
            "id",
            ORDENACAO_FORNECEDOR,
        )?,
        search: query.search.filter(|s| !s.is_empty()),
    };

    let pagina = app_state.fornecedores.find_per_page(&filtros).await?;
    Ok(Json(ApiResponse::ok(pagina)))
}
