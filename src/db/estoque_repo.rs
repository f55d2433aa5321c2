// src/db/estoque_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{
    common::error::AppError,
    common::response::{Ordenacao, Pagina, Paginacao},
    models::estoque::{ProdutoEstoque, UnidadeMedida},
};

const SELECT_ESTOQUE: &str = r#"
    SELECT e.id, e.produto_id, p.nome AS produto_nome, e.quantidade,
           e.preco, e.data_validade, e.unidade
    FROM produto_estoque e
    JOIN produto p ON p.id = e.produto_id
"#;

pub const ORDENACAO_ESTOQUE: &[(&str, &str)] = &[
    ("id", "e.id"),
    ("quantidade", "e.quantidade"),
    ("preco", "e.preco"),
    ("dataValidade", "e.data_validade"),
    ("produtoNome", "p.nome"),
];

#[derive(Debug)]
pub struct NovoEstoque {
    pub produto_id: i64,
    pub quantidade: i32,
    pub preco: Decimal,
    pub data_validade: Option<NaiveDate>,
    pub unidade: UnidadeMedida,
}

#[derive(Debug)]
pub struct EstoquePatch {
    pub quantidade: Option<i32>,
    pub preco: Option<Decimal>,
    pub data_validade: Option<NaiveDate>,
    pub unidade: Option<UnidadeMedida>,
}

#[derive(Debug)]
pub struct FiltrosEstoque {
    pub paginacao: Paginacao,
    pub ordenacao: Ordenacao,
    pub search: Option<String>,
    pub categoria_id: Option<i64>,
    pub preco_min: Option<Decimal>,
    pub preco_max: Option<Decimal>,
    pub quantidade_min: Option<i32>,
    pub quantidade_max: Option<i32>,
}

#[derive(Clone)]
pub struct EstoqueRepository {
    pool: PgPool,
}

impl EstoqueRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, novo: &NovoEstoque) -> Result<ProdutoEstoque, AppError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO produto_estoque (produto_id, quantidade, preco, data_validade, unidade)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(novo.produto_id)
        .bind(novo.quantidade)
        .bind(novo.preco)
        .bind(novo.data_validade)
        .bind(novo.unidade)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return AppError::NaoEncontrado("Produto".into());
                }
            }
            e.into()
        })?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NaoEncontrado("Estoque".into()))
    }

    pub async fn update(&self, id: i64, patch: &EstoquePatch) -> Result<ProdutoEstoque, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE produto_estoque
            SET quantidade = COALESCE($2, quantidade),
                preco = COALESCE($3, preco),
                data_validade = COALESCE($4, data_validade),
                unidade = COALESCE($5, unidade)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(patch.quantidade)
        .bind(patch.preco)
        .bind(patch.data_validade)
        .bind(patch.unidade)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NaoEncontrado("Estoque".into()));
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NaoEncontrado("Estoque".into()))
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM produto_estoque WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NaoEncontrado("Estoque".into()));
        }
        Ok(())
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<ProdutoEstoque>, AppError> {
        let estoque =
            sqlx::query_as::<_, ProdutoEstoque>(&format!("{} WHERE e.id = $1", SELECT_ESTOQUE))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(estoque)
    }

    pub async fn find_all(&self) -> Result<Vec<ProdutoEstoque>, AppError> {
        let estoques = sqlx::query_as::<_, ProdutoEstoque>(&format!(
            "{} ORDER BY p.nome ASC, e.id ASC",
            SELECT_ESTOQUE
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(estoques)
    }

    pub async fn find_per_page(
        &self,
        filtros: &FiltrosEstoque,
    ) -> Result<Pagina<ProdutoEstoque>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(SELECT_ESTOQUE);
        qb.push(" WHERE 1=1");
        aplicar_filtros(&mut qb, filtros);
        qb.push(format!(
            " ORDER BY {} {}, e.id ASC",
            filtros.ordenacao.coluna,
            filtros.ordenacao.direcao.sql()
        ));
        qb.push(" LIMIT ")
            .push_bind(filtros.paginacao.itens_por_pagina)
            .push(" OFFSET ")
            .push_bind(filtros.paginacao.offset());

        let items = qb
            .build_query_as::<ProdutoEstoque>()
            .fetch_all(&self.pool)
            .await?;

        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) FROM produto_estoque e JOIN produto p ON p.id = e.produto_id WHERE 1=1",
        );
        aplicar_filtros(&mut qb, filtros);
        let total: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;

        Ok(Pagina { items, total })
    }
}

fn aplicar_filtros(qb: &mut QueryBuilder<'_, Postgres>, filtros: &FiltrosEstoque) {
    if let Some(search) = &filtros.search {
        qb.push(" AND p.nome ILIKE ")
            .push_bind(format!("%{}%", search));
    }
    if let Some(categoria_id) = filtros.categoria_id {
        qb.push(" AND p.categoria_id = ").push_bind(categoria_id);
    }
    // Limites inclusivos, aplicados só quando presentes.
    if let Some(preco_min) = filtros.preco_min {
        qb.push(" AND e.preco >= ").push_bind(preco_min);
    }
    if let Some(preco_max) = filtros.preco_max {
        qb.push(" AND e.preco <= ").push_bind(preco_max);
    }
    if let Some(quantidade_min) = filtros.quantidade_min {
        qb.push(" AND e.quantidade >= ").push_bind(quantidade_min);
    }
    if let Some(quantidade_max) = filtros.quantidade_max {
        qb.push(" AND e.quantidade <= ").push_bind(quantidade_max);
    }
}
