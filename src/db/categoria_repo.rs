// src/db/categoria_repo.rs

use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{
    common::error::AppError,
    common::response::{Ordenacao, Pagina, Paginacao},
    models::catalogo::Categoria,
};

/// Campos de ordenação aceitos em findPerPage (nome na query -> coluna SQL).
pub const ORDENACAO_CATEGORIA: &[(&str, &str)] = &[("id", "id"), ("nome", "nome")];

#[derive(Debug)]
pub struct FiltrosCategoria {
    pub paginacao: Paginacao,
    pub ordenacao: Ordenacao,
    pub search: Option<String>,
}

#[derive(Clone)]
pub struct CategoriaRepository {
    pool: PgPool,
}

impl CategoriaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, nome: &str, descricao: Option<&str>) -> Result<Categoria, AppError> {
        let categoria = sqlx::query_as::<_, Categoria>(
            r#"
            INSERT INTO categoria (nome, descricao)
            VALUES ($1, $2)
            RETURNING id, nome, descricao
            "#,
        )
        .bind(nome)
        .bind(descricao)
        .fetch_one(&self.pool)
        .await?;
        Ok(categoria)
    }

    pub async fn update(
        &self,
        id: i64,
        nome: Option<&str>,
        descricao: Option<&str>,
    ) -> Result<Categoria, AppError> {
        sqlx::query_as::<_, Categoria>(
            r#"
            UPDATE categoria
            SET nome = COALESCE($2, nome),
                descricao = COALESCE($3, descricao)
            WHERE id = $1
            RETURNING id, nome, descricao
            "#,
        )
        .bind(id)
        .bind(nome)
        .bind(descricao)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NaoEncontrado("Categoria".into()))
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM categoria WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_foreign_key_violation() {
                        return AppError::RegistroEmUso("Categoria".into());
                    }
                }
                e.into()
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NaoEncontrado("Categoria".into()));
        }
        Ok(())
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Categoria>, AppError> {
        let categoria =
            sqlx::query_as::<_, Categoria>("SELECT id, nome, descricao FROM categoria WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(categoria)
    }

    pub async fn find_all(&self) -> Result<Vec<Categoria>, AppError> {
        let categorias = sqlx::query_as::<_, Categoria>(
            "SELECT id, nome, descricao FROM categoria ORDER BY nome ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(categorias)
    }

    pub async fn find_per_page(
        &self,
        filtros: &FiltrosCategoria,
    ) -> Result<Pagina<Categoria>, AppError> {
        let mut qb =
            QueryBuilder::<Postgres>::new("SELECT id, nome, descricao FROM categoria WHERE 1=1");
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

        let items = qb
            .build_query_as::<Categoria>()
            .fetch_all(&self.pool)
            .await?;

        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM categoria WHERE 1=1");
        aplicar_filtros(&mut qb, filtros);
        let total: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;

        Ok(Pagina { items, total })
    }
}

fn aplicar_filtros(qb: &mut QueryBuilder<'_, Postgres>, filtros: &FiltrosCategoria) {
    if let Some(search) = &filtros.search {
        qb.push(" AND nome ILIKE ")
            .push_bind(format!("%{}%", search));
    }
}
