// src/db/nota_venda_repo.rs

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres, QueryBuilder};

use crate::{
    common::error::AppError,
    common::response::{Ordenacao, Pagina, Paginacao},
    models::notas::{NotaFiscalVenda, NotaFiscalVendaDetalhe, ProdutoVenda},
};

pub const ORDENACAO_NOTA_VENDA: &[(&str, &str)] =
    &[("id", "n.id"), ("data", "n.data"), ("total", "n.total")];

#[derive(Debug)]
pub struct FiltrosNotaVenda {
    pub paginacao: Paginacao,
    pub ordenacao: Ordenacao,
    pub search: Option<String>,
    pub data_start: Option<DateTime<Utc>>,
    pub data_end: Option<DateTime<Utc>>,
    pub total_min: Option<Decimal>,
    pub total_max: Option<Decimal>,
}

#[derive(Clone)]
pub struct NotaVendaRepository {
    pool: PgPool,
}

impl NotaVendaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Escrita transacional: usadas pelo NotasService dentro de uma única
    // transação para que nota e linhas sejam gravadas de forma atômica.
    // ---

    pub async fn inserir_nota<'e, E>(
        &self,
        executor: E,
        data: DateTime<Utc>,
        total: Decimal,
    ) -> Result<NotaFiscalVenda, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let nota = sqlx::query_as::<_, NotaFiscalVenda>(
            r#"
            INSERT INTO nota_fiscal_venda (data, total)
            VALUES ($1, $2)
            RETURNING id, data, total
            "#,
        )
        .bind(data)
        .bind(total)
        .fetch_one(executor)
        .await?;
        Ok(nota)
    }

    pub async fn inserir_linha<'e, E>(
        &self,
        executor: E,
        nota_fiscal_id: i64,
        produto_id: i64,
        quantidade: i32,
        preco_unitario: Decimal,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO produto_venda (nota_fiscal_id, produto_id, quantidade, preco_unitario)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(nota_fiscal_id)
        .bind(produto_id)
        .bind(quantidade)
        .bind(preco_unitario)
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
    ) -> Result<NotaFiscalVendaDetalhe, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE nota_fiscal_venda
            SET data = COALESCE($2, data)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(data)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NaoEncontrado("Nota fiscal de venda".into()));
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NaoEncontrado("Nota fiscal de venda".into()))
    }

    /// As linhas caem junto (ON DELETE CASCADE); só a referência a produto
    /// é restrita, e ela pertence às linhas, não à nota.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM nota_fiscal_venda WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NaoEncontrado("Nota fiscal de venda".into()));
        }
        Ok(())
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<NotaFiscalVendaDetalhe>, AppError> {
        let nota = sqlx::query_as::<_, NotaFiscalVenda>(
            "SELECT id, data, total FROM nota_fiscal_venda WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(nota) = nota else { return Ok(None) };

        let mut linhas = self.linhas_das_notas(&[nota.id]).await?;
        let produtos = linhas.remove(&nota.id).unwrap_or_default();

        Ok(Some(NotaFiscalVendaDetalhe {
            id: nota.id,
            data: nota.data,
            total: nota.total,
            produtos,
        }))
    }

    pub async fn find_all(&self) -> Result<Vec<NotaFiscalVendaDetalhe>, AppError> {
        let notas = sqlx::query_as::<_, NotaFiscalVenda>(
            "SELECT id, data, total FROM nota_fiscal_venda ORDER BY data DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        self.montar_detalhes(notas).await
    }

    pub async fn find_per_page(
        &self,
        filtros: &FiltrosNotaVenda,
    ) -> Result<Pagina<NotaFiscalVendaDetalhe>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT n.id, n.data, n.total FROM nota_fiscal_venda n WHERE 1=1",
        );
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
            .build_query_as::<NotaFiscalVenda>()
            .fetch_all(&self.pool)
            .await?;

        let mut qb =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM nota_fiscal_venda n WHERE 1=1");
        aplicar_filtros(&mut qb, filtros);
        let total: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;

        let items = self.montar_detalhes(notas).await?;
        Ok(Pagina { items, total })
    }

    async fn montar_detalhes(
        &self,
        notas: Vec<NotaFiscalVenda>,
    ) -> Result<Vec<NotaFiscalVendaDetalhe>, AppError> {
        let ids: Vec<i64> = notas.iter().map(|n| n.id).collect();
        let mut linhas = self.linhas_das_notas(&ids).await?;

        Ok(notas
            .into_iter()
            .map(|n| NotaFiscalVendaDetalhe {
                produtos: linhas.remove(&n.id).unwrap_or_default(),
                id: n.id,
                data: n.data,
                total: n.total,
            })
            .collect())
    }

    async fn linhas_das_notas(
        &self,
        ids: &[i64],
    ) -> Result<HashMap<i64, Vec<ProdutoVenda>>, AppError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let linhas = sqlx::query_as::<_, ProdutoVenda>(
            r#"
            SELECT pv.id, pv.nota_fiscal_id, pv.produto_id, p.nome AS produto_nome,
                   pv.quantidade, pv.preco_unitario
            FROM produto_venda pv
            JOIN produto p ON p.id = pv.produto_id
            WHERE pv.nota_fiscal_id = ANY($1)
            ORDER BY pv.id ASC
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        let mut por_nota: HashMap<i64, Vec<ProdutoVenda>> = HashMap::new();
        for linha in linhas {
            por_nota.entry(linha.nota_fiscal_id).or_default().push(linha);
        }
        Ok(por_nota)
    }
}

fn aplicar_filtros(qb: &mut QueryBuilder<'_, Postgres>, filtros: &FiltrosNotaVenda) {
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
    // A busca casa com o número da nota ou com o nome de um produto
    // presente nas linhas.
    if let Some(search) = &filtros.search {
        qb.push(
            " AND (EXISTS (SELECT 1 FROM produto_venda pv \
             JOIN produto p ON p.id = pv.produto_id \
             WHERE pv.nota_fiscal_id = n.id AND p.nome ILIKE ",
        )
        .push_bind(format!("%{}%", search))
        .push(")");
        if let Ok(id) = search.trim().parse::<i64>() {
            qb.push(" OR n.id = ").push_bind(id);
        }
        qb.push(")");
    }
}
