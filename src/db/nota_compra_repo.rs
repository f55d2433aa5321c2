// src/db/nota_compra_repo.rs

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres, QueryBuilder};

use crate::{
    common::error::AppError,
    common::response::{Ordenacao, Pagina, Paginacao},
    models::estoque::UnidadeMedida,
    models::notas::{NotaFiscalCompra, NotaFiscalCompraDetalhe, ProdutoCompra},
};

const SELECT_NOTA: &str = r#"
    SELECT n.id, n.data, n.fornecedor_id, f.nome AS fornecedor_nome, n.total
    FROM nota_fiscal_compra n
    JOIN fornecedor f ON f.id = n.fornecedor_id
"#;

pub const ORDENACAO_NOTA_COMPRA: &[(&str, &str)] = &[
    ("id", "n.id"),
    ("data", "n.data"),
    ("total", "n.total"),
    ("fornecedorNome", "f.nome"),
];

#[derive(Debug)]
pub struct FiltrosNotaCompra {
    pub paginacao: Paginacao,
    pub ordenacao: Ordenacao,
    pub search: Option<String>,
    pub fornecedor_id: Option<i64>,
    pub data_start: Option<DateTime<Utc>>,
    pub data_end: Option<DateTime<Utc>>,
    pub total_min: Option<Decimal>,
    pub total_max: Option<Decimal>,
}

#[derive(Clone)]
pub struct NotaCompraRepository {
    pool: PgPool,
}

impl NotaCompraRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Escrita transacional (ver NotasService)
    // ---

    pub async fn inserir_nota<'e, E>(
        &self,
        executor: E,
        data: DateTime<Utc>,
        fornecedor_id: i64,
        total: Decimal,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO nota_fiscal_compra (data, fornecedor_id, total)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(data)
        .bind(fornecedor_id)
        .bind(total)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return AppError::NaoEncontrado("Fornecedor".into());
                }
            }
            e.into()
        })?;
        Ok(id)
    }

    pub async fn inserir_linha<'e, E>(
        &self,
        executor: E,
        nota_fiscal_id: i64,
        produto_id: i64,
        quantidade: i32,
        preco_unitario: Decimal,
        unidade: UnidadeMedida,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO produto_compra (nota_fiscal_id, produto_id, quantidade, preco_unitario, unidade)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(nota_fiscal_id)
        .bind(produto_id)
        .bind(quantidade)
        .bind(preco_unitario)
        .bind(unidade)
        .execute(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return AppError::NaoEncontrado("Produto".into());
                }
            }
            e.into()
        })?;
        Ok(())
    }

    // ---
    // Leitura / demais operações
    // ---

    pub async fn update(
        &self,
        id: i64,
        data: Option<DateTime<Utc>>,
        fornecedor_id: Option<i64>,
    ) -> Result<NotaFiscalCompraDetalhe, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE nota_fiscal_compra
            SET data = COALESCE($2, data),
                fornecedor_id = COALESCE($3, fornecedor_id)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(data)
        .bind(fornecedor_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return AppError::NaoEncontrado("Fornecedor".into());
                }
            }
            e.into()
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NaoEncontrado("Nota fiscal de compra".into()));
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NaoEncontrado("Nota fiscal de compra".into()))
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM nota_fiscal_compra WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NaoEncontrado("Nota fiscal de compra".into()));
        }
        Ok(())
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<NotaFiscalCompraDetalhe>, AppError> {
        let nota =
            sqlx::query_as::<_, NotaFiscalCompra>(&format!("{} WHERE n.id = $1", SELECT_NOTA))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        let Some(nota) = nota else { return Ok(None) };

        let mut linhas = self.linhas_das_notas(&[nota.id]).await?;
        let produtos = linhas.remove(&nota.id).unwrap_or_default();

        Ok(Some(NotaFiscalCompraDetalhe {
            id: nota.id,
            data: nota.data,
            fornecedor_id: nota.fornecedor_id,
            fornecedor_nome: nota.fornecedor_nome,
            total: nota.total,
            produtos,
        }))
    }

    pub async fn find_all(&self) -> Result<Vec<NotaFiscalCompraDetalhe>, AppError> {
        let notas = sqlx::query_as::<_, NotaFiscalCompra>(&format!(
            "{} ORDER BY n.data DESC, n.id DESC",
            SELECT_NOTA
        ))
        .fetch_all(&self.pool)
        .await?;

        self.montar_detalhes(notas).await
    }

    pub async fn find_per_page(
        &self,
        filtros: &FiltrosNotaCompra,
    ) -> Result<Pagina<NotaFiscalCompraDetalhe>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(SELECT_NOTA);
        qb.push(" WHERE 1=1");
        aplicar_filtros(&mut qb, filtros);
        qb.push(format!(
            " ORDER BY {} {}, n.id ASC",
            filtros.ordenacao.coluna,
            filtros.ordenacao.direcao.sql()
        ));
        qb.push(" LIMIT ")
            .push_bind(filtros.paginacao.itens_por_pagina)
            .push(" OFFSET ")
            .push_bind(filtros.paginacao.offset());

        let notas = qb
            .build_query_as::<NotaFiscalCompra>()
            .fetch_all(&self.pool)
            .await?;

        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) FROM nota_fiscal_compra n \
             JOIN fornecedor f ON f.id = n.fornecedor_id WHERE 1=1",
        );
        aplicar_filtros(&mut qb, filtros);
        let total: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;

        let items = self.montar_detalhes(notas).await?;
        Ok(Pagina { items, total })
    }

    async fn montar_detalhes(
        &self,
        notas: Vec<NotaFiscalCompra>,
    ) -> Result<Vec<NotaFiscalCompraDetalhe>, AppError> {
        let ids: Vec<i64> = notas.iter().map(|n| n.id).collect();
        let mut linhas = self.linhas_das_notas(&ids).await?;

        Ok(notas
            .into_iter()
            .map(|n| NotaFiscalCompraDetalhe {
                produtos: linhas.remove(&n.id).unwrap_or_default(),
                id: n.id,
                data: n.data,
                fornecedor_id: n.fornecedor_id,
                fornecedor_nome: n.fornecedor_nome,
                total: n.total,
            })
            .collect())
    }

    async fn linhas_das_notas(
        &self,
        ids: &[i64],
    ) -> Result<HashMap<i64, Vec<ProdutoCompra>>, AppError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let linhas = sqlx::query_as::<_, ProdutoCompra>(
            r#"
            SELECT pc.id, pc.nota_fiscal_id, pc.produto_id, p.nome AS produto_nome,
                   pc.quantidade, pc.preco_unitario, pc.unidade
            FROM produto_compra pc
            JOIN produto p ON p.id = pc.produto_id
            WHERE pc.nota_fiscal_id = ANY($1)
            ORDER BY pc.id ASC
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        let mut por_nota: HashMap<i64, Vec<ProdutoCompra>> = HashMap::new();
        for linha in linhas {
            por_nota.entry(linha.nota_fiscal_id).or_default().push(linha);
        }
        Ok(por_nota)
    }
}

fn aplicar_filtros(qb: &mut QueryBuilder<'_, Postgres>, filtros: &FiltrosNotaCompra) {
    if let Some(fornecedor_id) = filtros.fornecedor_id {
        qb.push(" AND n.fornecedor_id = ").push_bind(fornecedor_id);
    }
    if let Some(data_start) = filtros.data_start {
        qb.push(" AND n.data >= ").push_bind(data_start);
    }
    if let Some(data_end) = filtros.data_end {
        qb.push(" AND n.data < ").push_bind(data_end);
    }
    if let Some(total_min) = filtros.total_min {
        qb.push(" AND n.total >= ").push_bind(total_min);
    }
    if let Some(total_max) = filtros.total_max {
        qb.push(" AND n.total <= ").push_bind(total_max);
    }
    // Busca por número da nota, nome do fornecedor ou produto das linhas.
    if let Some(search) = &filtros.search {
        let padrao = format!("%{}%", search);
        qb.push(" AND (f.nome ILIKE ")
            .push_bind(padrao.clone())
            .push(
                " OR EXISTS (SELECT 1 FROM produto_compra pc \
                 JOIN produto p ON p.id = pc.produto_id \
                 WHERE pc.nota_fiscal_id = n.id AND p.nome ILIKE ",
            )
            .push_bind(padrao)
            .push(")");
        if let Ok(id) = search.trim().parse::<i64>() {
            qb.push(" OR n.id = ").push_bind(id);
        }
        qb.push(")");
    }
}
