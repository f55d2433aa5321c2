// src/db/produto_repo.rs

use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{
    common::error::AppError,
    common::response::{Ordenacao, Pagina, Paginacao},
    models::catalogo::{Produto, TipoProduto},
};

const SELECT_PRODUTO: &str = r#"
    SELECT p.id, p.nome, p.descricao, p.imagem_url, p.ativo, p.tipo,
           p.categoria_id, c.nome AS categoria_nome
    FROM produto p
    JOIN categoria c ON c.id = p.categoria_id
"#;

pub const ORDENACAO_PRODUTO: &[(&str, &str)] =
    &[("id", "p.id"), ("nome", "p.nome"), ("ativo", "p.ativo")];

#[derive(Debug)]
pub struct NovoProduto<'a> {
    pub nome: &'a str,
    pub descricao: Option<&'a str>,
    pub imagem_url: Option<&'a str>,
    pub ativo: bool,
    pub tipo: TipoProduto,
    pub categoria_id: i64,
}

#[derive(Debug)]
pub struct ProdutoPatch<'a> {
    pub nome: Option<&'a str>,
    pub descricao: Option<&'a str>,
    pub imagem_url: Option<&'a str>,
    pub ativo: Option<bool>,
    pub tipo: Option<TipoProduto>,
    pub categoria_id: Option<i64>,
}

#[derive(Debug)]
pub struct FiltrosProduto {
    pub paginacao: Paginacao,
    pub ordenacao: Ordenacao,
    pub search: Option<String>,
    pub categoria_id: Option<i64>,
}

#[derive(Clone)]
pub struct ProdutoRepository {
    pool: PgPool,
}

impl ProdutoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, novo: &NovoProduto<'_>) -> Result<Produto, AppError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO produto (nome, descricao, imagem_url, ativo, tipo, categoria_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(novo.nome)
        .bind(novo.descricao)
        .bind(novo.imagem_url)
        .bind(novo.ativo)
        .bind(novo.tipo)
        .bind(novo.categoria_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return AppError::NaoEncontrado("Categoria".into());
                }
            }
            e.into()
        })?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NaoEncontrado("Produto".into()))
    }

    pub async fn update(&self, id: i64, patch: &ProdutoPatch<'_>) -> Result<Produto, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE produto
            SET nome = COALESCE($2, nome),
                descricao = COALESCE($3, descricao),
                imagem_url = COALESCE($4, imagem_url),
                ativo = COALESCE($5, ativo),
                tipo = COALESCE($6, tipo),
                categoria_id = COALESCE($7, categoria_id)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(patch.nome)
        .bind(patch.descricao)
        .bind(patch.imagem_url)
        .bind(patch.ativo)
        .bind(patch.tipo)
        .bind(patch.categoria_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return AppError::NaoEncontrado("Categoria".into());
                }
            }
            e.into()
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NaoEncontrado("Produto".into()));
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NaoEncontrado("Produto".into()))
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM produto WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_foreign_key_violation() {
                        return AppError::RegistroEmUso("Produto".into());
                    }
                }
                e.into()
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NaoEncontrado("Produto".into()));
        }
        Ok(())
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Produto>, AppError> {
        let produto =
            sqlx::query_as::<_, Produto>(&format!("{} WHERE p.id = $1", SELECT_PRODUTO))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(produto)
    }

    pub async fn find_all(&self) -> Result<Vec<Produto>, AppError> {
        let produtos =
            sqlx::query_as::<_, Produto>(&format!("{} ORDER BY p.nome ASC", SELECT_PRODUTO))
                .fetch_all(&self.pool)
                .await?;
        Ok(produtos)
    }

    pub async fn find_per_page(
        &self,
        filtros: &FiltrosProduto,
    ) -> Result<Pagina<Produto>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(SELECT_PRODUTO);
        qb.push(" WHERE 1=1");
        aplicar_filtros(&mut qb, filtros);
        qb.push(format!(
            " ORDER BY {} {}, p.id ASC",
            filtros.ordenacao.coluna,
            filtros.ordenacao.direcao.sql()
        ));
        qb.push(" LIMIT ")
            .push_bind(filtros.paginacao.itens_por_pagina)
            .push(" OFFSET ")
            .push_bind(filtros.paginacao.offset());

        let items = qb.build_query_as::<Produto>().fetch_all(&self.pool).await?;

        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM produto p WHERE 1=1");
        aplicar_filtros(&mut qb, filtros);
        let total: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;

        Ok(Pagina { items, total })
    }
}

fn aplicar_filtros(qb: &mut QueryBuilder<'_, Postgres>, filtros: &FiltrosProduto) {
    if let Some(search) = &filtros.search {
        qb.push(" AND p.nome ILIKE ")
            .push_bind(format!("%{}%", search));
    }
    if let Some(categoria_id) = filtros.categoria_id {
        qb.push(" AND p.categoria_id = ").push_bind(categoria_id);
    }
}
