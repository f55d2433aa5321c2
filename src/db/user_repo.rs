// src/db/user_repo.rs

use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{
    common::error::AppError,
    common::response::{Ordenacao, Pagina, Paginacao},
    models::user::User,
};

pub const ORDENACAO_USER: &[(&str, &str)] =
    &[("id", "id"), ("nome", "nome"), ("email", "email")];

#[derive(Debug)]
pub struct FiltrosUser {
    pub paginacao: Paginacao,
    pub ordenacao: Ordenacao,
    pub search: Option<String>,
}

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, nome: &str, email: &str) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO usuario (nome, email)
            VALUES ($1, $2)
            RETURNING id, nome, email
            "#,
        )
        .bind(nome)
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::EmailAlreadyExists;
                }
            }
            e.into()
        })?;
        Ok(user)
    }

    pub async fn update(
        &self,
        id: i64,
        nome: Option<&str>,
        email: Option<&str>,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE usuario
            SET nome = COALESCE($2, nome),
                email = COALESCE($3, email)
            WHERE id = $1
            RETURNING id, nome, email
            "#,
        )
        .bind(id)
        .bind(nome)
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::EmailAlreadyExists;
                }
            }
            e.into()
        })?;

        user.ok_or_else(|| AppError::NaoEncontrado("Usuário".into()))
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT id, nome, email FROM usuario WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user =
            sqlx::query_as::<_, User>("SELECT id, nome, email FROM usuario WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;
        Ok(user)
    }

    pub async fn find_all(&self) -> Result<Vec<User>, AppError> {
        let users =
            sqlx::query_as::<_, User>("SELECT id, nome, email FROM usuario ORDER BY id ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(users)
    }

    pub async fn find_per_page(&self, filtros: &FiltrosUser) -> Result<Pagina<User>, AppError> {
        let mut qb =
            QueryBuilder::<Postgres>::new("SELECT id, nome, email FROM usuario WHERE 1=1");
        aplicar_filtros(&mut qb, filtros);
        qb.push(format!(
            " ORDER BY {} {}, id ASC",
            filtros.ordenacao.coluna,
            filtros.ordenacao.direcao.sql()
        ));
        qb.push(" LIMIT ")
            .push_bind(filtros.paginacao.itens_por_pagina)
            .push(" OFFSET ")
            .push_bind(filtros.paginacao.offset());

        let items = qb.build_query_as::<User>().fetch_all(&self.pool).await?;

        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM usuario WHERE 1=1");
        aplicar_filtros(&mut qb, filtros);
        let total: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;

        Ok(Pagina { items, total })
    }
}

fn aplicar_filtros(qb: &mut QueryBuilder<'_, Postgres>, filtros: &FiltrosUser) {
    if let Some(search) = &filtros.search {
        let padrao = format!("%{}%", search);
        qb.push(" AND (nome ILIKE ")
            .push_bind(padrao.clone())
            .push(" OR email ILIKE ")
            .push_bind(padrao)
            .push(")");
    }
}
