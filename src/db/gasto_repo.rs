// src/db/gasto_repo.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{
    common::error::AppError,
    common::response::{Ordenacao, Pagina, Paginacao},
    models::gasto::GastoDiario,
};

pub const ORDENACAO_GASTO: &[(&str, &str)] = &[
    ("id", "id"),
    ("descricao", "descricao"),
    ("valor", "valor"),
    ("data", "data"),
];

#[derive(Debug)]
pub struct FiltrosGasto {
    pub paginacao: Paginacao,
    pub ordenacao: Ordenacao,
    pub search: Option<String>,
    pub data_start: Option<DateTime<Utc>>,
    pub data_end: Option<DateTime<Utc>>,
}

#[derive(Clone)]
pub struct GastoRepository {
    pool: PgPool,
}

impl GastoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        descricao: &str,
        valor: Decimal,
        data: DateTime<Utc>,
    ) -> Result<GastoDiario, AppError> {
        let gasto = sqlx::query_as::<_, GastoDiario>(
            r#"
            INSERT INTO gasto_diario (descricao, valor, data)
            VALUES ($1, $2, $3)
            RETURNING id, descricao, valor, data
            "#,
        )
        .bind(descricao)
        .bind(valor)
        .bind(data)
        .fetch_one(&self.pool)
        .await?;
        Ok(gasto)
    }

    pub async fn update(
        &self,
        id: i64,
        descricao: Option<&str>,
        valor: Option<Decimal>,
        data: Option<DateTime<Utc>>,
    ) -> Result<GastoDiario, AppError> {
        let gasto = sqlx::query_as::<_, GastoDiario>(
            r#"
            UPDATE gasto_diario
            SET descricao = COALESCE($2, descricao),
                valor = COALESCE($3, valor),
                data = COALESCE($4, data)
            WHERE id = $1
            RETURNING id, descricao, valor, data
            "#,
        )
        .bind(id)
        .bind(descricao)
        .bind(valor)
        .bind(data)
        .fetch_optional(&self.pool)
        .await?;

        gasto.ok_or_else(|| AppError::NaoEncontrado("Gasto".into()))
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM gasto_diario WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NaoEncontrado("Gasto".into()));
        }
        Ok(())
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<GastoDiario>, AppError> {
        let gasto = sqlx::query_as::<_, GastoDiario>(
            "SELECT id, descricao, valor, data FROM gasto_diario WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(gasto)
    }

    pub async fn find_all(&self) -> Result<Vec<GastoDiario>, AppError> {
        let gastos = sqlx::query_as::<_, GastoDiario>(
            "SELECT id, descricao, valor, data FROM gasto_diario ORDER BY data DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(gastos)
    }

    pub async fn find_per_page(
        &self,
        filtros: &FiltrosGasto,
    ) -> Result<Pagina<GastoDiario>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT id, descricao, valor, data FROM gasto_diario WHERE 1=1",
        );
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
            .build_query_as::<GastoDiario>()
            .fetch_all(&self.pool)
            .await?;

        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM gasto_diario WHERE 1=1");
        aplicar_filtros(&mut qb, filtros);
        let total: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;

        Ok(Pagina { items, total })
    }
}

fn aplicar_filtros(qb: &mut QueryBuilder<'_, Postgres>, filtros: &FiltrosGasto) {
    if let Some(search) = &filtros.search {
        qb.push(" AND descricao ILIKE ")
            .push_bind(format!("%{}%", search));
    }
    if let Some(data_start) = filtros.data_start {
        qb.push(" AND data >= ").push_bind(data_start);
    }
    if let Some(data_end) = filtros.data_end {
        qb.push(" AND data < ").push_bind(data_end);
    }
}
