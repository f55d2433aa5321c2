// src/handlers/user.rs
//
// Usuários não têm rota de remoção.

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
    db::user_repo::{FiltrosUser, ORDENACAO_USER},
    models::user::User,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: String,
    #[validate(email(message = "E-mail inválido."))]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserPayload {
    #[validate(length(min = 1, message = "O nome não pode ser vazio."))]
    pub nome: Option<String>,
    #[validate(email(message = "E-mail inválido."))]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct EmailQuery {
    pub email: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/user/create",
    tag = "User",
    request_body = CreateUserPayload,
    responses(
        (status = 201, description = "Usuário criado", body = User),
        (status = 409, description = "E-mail já cadastrado")
    )
)]
pub async fn create(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let user = app_state.users.create(&payload.nome, &payload.email).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(user))))
}

#[utoipa::path(
    put,
    path = "/api/user/update/{id}",
    tag = "User",
    request_body = UpdateUserPayload,
    params(("id" = i64, Path, description = "ID do usuário")),
    responses((status = 200, description = "Usuário atualizado", body = User))
)]
pub async fn update(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let user = app_state
        .users
        .update(id, payload.nome.as_deref(), payload.email.as_deref())
        .await?;
    Ok(Json(ApiResponse::ok(user)))
}

#[utoipa::path(
    get,
    path = "/api/user/findAll",
    tag = "User",
    responses((status = 200, description = "Todos os usuários", body = [User]))
)]
pub async fn find_all(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let users = app_state.users.find_all().await?;
    Ok(Json(ApiResponse::ok(users)))
}

#[utoipa::path(
    get,
    path = "/api/user/findById/{id}",
    tag = "User",
    params(("id" = i64, Path, description = "ID do usuário")),
    responses(
        (status = 200, description = "Usuário encontrado", body = User),
        (status = 404, description = "Usuário não existe")
    )
)]
pub async fn find_by_id(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let user = app_state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NaoEncontrado("Usuário".into()))?;
    Ok(Json(ApiResponse::ok(user)))
}

#[utoipa::path(
    get,
    path = "/api/user/findByEmail",
    tag = "User",
    params(EmailQuery),
    responses(
        (status = 200, description = "Usuário encontrado", body = User),
        (status = 404, description = "Usuário não existe")
    )
)]
pub async fn find_by_email(
    State(app_state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> Result<impl IntoResponse, AppError> {
    let email = query
        .email
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AppError::ParametroInvalido("email é obrigatório.".into()))?;

    let user = app_state
        .users
        .find_by_email(&email)
        .await?
        .ok_or_else(|| AppError::NaoEncontrado("Usuário".into()))?;
    Ok(Json(ApiResponse::ok(user)))
}

#[utoipa::path(
    get,
    path = "/api/user/findPerPage",
    tag = "User",
    params(UserQuery),
    responses((status = 200, description = "Página de usuários"))
)]
pub async fn find_per_page(
    State(app_state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filtros = FiltrosUser {
        paginacao: Paginacao::parse(query.page.as_deref(), query.limit.as_deref())?,
        ordenacao: resolver_ordenacao(
            query.sort.as_deref(),
            query.order.as_deref(),
            "id",
            ORDENACAO_USER,
        )?,
        search: query.search.filter(|s| !s.is_empty()),
    };

    let pagina = app_state.users.find_per_page(&filtros).await?;
    Ok(Json(ApiResponse::ok(pagina)))
}
