// src/db/fornecedor_repo.rs

use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{
    common::error::AppError,
    common::response::{Ordenacao, Pagina, Paginacao},
    models::fornecedor::Fornecedor,
};

pub const ORDENACAO_FORNECEDOR: &[(&str, &str)] =
    &[("id", "id"), ("nome", "nome"), ("cnpj", "cnpj")];

#[derive(Debug)]
pub struct NovoFornecedor<'a> {
    pub nome: &'a str,
    pub cnpj: &'a str,
    pub telefone: Option<&'a str>,
    pub email: Option<&'a str>,
}

#[derive(Debug)]
pub struct FornecedorPatch<'a> {
    pub nome: Option<&'a str>,
    pub cnpj: Option<&'a str>,
    pub telefone: Option<&'a str>,
    pub email: Option<&'a str>,
}

#[derive(Debug)]
pub struct FiltrosFornecedor {
    pub paginacao: Paginacao,
    pub ordenacao: Ordenacao,
    pub search: Option<String>,
}

#[derive(Clone)]
pub struct FornecedorRepository {
    pool: PgPool,
}

impl FornecedorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, novo: &NovoFornecedor<'_>) -> Result<Fornecedor, AppError> {
        let fornecedor = sqlx::query_as::<_, Fornecedor>(
            r#"
            INSERT INTO fornecedor (nome, cnpj, telefone, email)
            VALUES ($1, $2, $3, $4)
            RETURNING id, nome, cnpj, telefone, email
            "#,
        )
        .bind(novo.nome)
        .bind(novo.cnpj)
        .bind(novo.telefone)
        .bind(novo.email)
        .fetch_one(&self.pool)
        .await?;
        Ok(fornecedor)
    }

    pub async fn update(
        &self,
        id: i64,
        patch: &FornecedorPatch<'_>,
    ) -> Result<Fornecedor, AppError> {
        sqlx::query_as::<_, Fornecedor>(
            r#"
            UPDATE fornecedor
            SET nome = COALESCE($2, nome),
                cnpj = COALESCE($3, cnpj),
                telefone = COALESCE($4, telefone),
                email = COALESCE($5, email)
            WHERE id = $1
            RETURNING id, nome, cnpj, telefone, email
            "#,
        )
        .bind(id)
        .bind(patch.nome)
        .bind(patch.cnpj)
        .bind(patch.telefone)
        .bind(patch.email)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NaoEncontrado("Fornecedor".into()))
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM fornecedor WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_foreign_key_violation() {
                        return AppError::RegistroEmUso("Fornecedor".into());
                    }
                }
                e.into()
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NaoEncontrado("Fornecedor".into()));
        }
        Ok(())
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Fornecedor>, AppError> {
        let fornecedor = sqlx::query_as::<_, Fornecedor>(
            "SELECT id, nome, cnpj, telefone, email FROM fornecedor WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(fornecedor)
    }

    pub async fn find_all(&self) -> Result<Vec<Fornecedor>, AppError> {
        let fornecedores = sqlx::query_as::<_, Fornecedor>(
            "SELECT id, nome, cnpj, telefone, email FROM fornecedor ORDER BY nome ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(fornecedores)
    }

    pub async fn find_per_page(
        &self,
        filtros: &FiltrosFornecedor,
    ) -> Result<Pagina<Fornecedor>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT id, nome, cnpj, telefone, email FROM fornecedor WHERE 1=1",
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
            .build_query_as::<Fornecedor>()
            .fetch_all(&self.pool)
            .await?;

        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM fornecedor WHERE 1=1");
        aplicar_filtros(&mut qb, filtros);
        let total: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;

        Ok(Pagina { items, total })
    }
}

// A busca cobre os quatro campos de texto do fornecedor.
fn aplicar_filtros(qb: &mut QueryBuilder<'_, Postgres>, filtros: &FiltrosFornecedor) {
    if let Some(search) = &filtros.search {
        let padrao = format!("%{}%", search);
        qb.push(" AND (nome ILIKE ")
            .push_bind(padrao.clone())
            .push(" OR cnpj ILIKE ")
            .push_bind(padrao.clone())
            .push(" OR telefone ILIKE ")
            .push_bind(padrao.clone())
            .push(" OR email ILIKE ")
            .push_bind(padrao)
            .push(")");
    }
}
