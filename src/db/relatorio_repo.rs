// src/db/relatorio_repo.rs
//
// Queries de agregação dos relatórios. Cada método devolve linhas cruas ou
// já o formato final; a matemática derivada (baldes por período, curva ABC,
// cobertura, sugestão de compra) fica em `services::relatorio_service`.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

use crate::{
    common::error::AppError,
    models::relatorio::{
        CompraHistorico, ComprasFornecedor, CustoAquisicao, PosicaoEstoque, ProdutoBaixoEstoque,
        ProdutoMaisVendido, ResumoGeral, VendaCategoria,
    },
};

// ---
// Linhas intermediárias consumidas pelo service
// ---

#[derive(Debug, Clone, FromRow)]
pub struct VendaRow {
    pub data: DateTime<Utc>,
    pub total: Decimal,
}

#[derive(Debug, Clone, FromRow)]
pub struct TotaisRow {
    pub total: Decimal,
    pub count: i64,
}

#[derive(Debug, Clone, FromRow)]
pub struct MargemRow {
    pub produto_id: i64,
    pub nome: String,
    pub receita: Decimal,
    pub custo: Decimal,
}

#[derive(Debug, Clone, FromRow)]
pub struct ValorEstoqueRow {
    pub produto_id: i64,
    pub nome: String,
    pub valor_estoque: Decimal,
}

#[derive(Debug, Clone, FromRow)]
pub struct GiroRow {
    pub produto_id: i64,
    pub nome: String,
    pub quantidade_vendida: i64,
    pub estoque_medio: Decimal,
}

#[derive(Debug, Clone, FromRow)]
pub struct UltimaVendaRow {
    pub produto_id: i64,
    pub nome: String,
    pub ultima_venda: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, FromRow)]
pub struct ValidadeRow {
    pub produto_id: i64,
    pub nome: String,
    pub data_validade: NaiveDate,
}

#[derive(Debug, Clone, FromRow)]
pub struct ConsumoRow {
    pub produto_id: i64,
    pub nome: String,
    pub quantidade_vendida: i64,
    pub estoque_atual: i64,
}

#[derive(Debug, Clone, FromRow)]
pub struct LucroCategoriaRow {
    pub categoria_id: i64,
    pub nome: String,
    pub receita: Decimal,
    pub custo: Decimal,
}

#[derive(Clone)]
pub struct RelatorioRepository {
    pool: PgPool,
}

impl RelatorioRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn resumo_geral(&self) -> Result<ResumoGeral, AppError> {
        let resumo = sqlx::query_as::<_, ResumoGeral>(
            r#"
            SELECT
                (SELECT COALESCE(SUM(total), 0) FROM nota_fiscal_venda) AS total_vendas,
                (SELECT COALESCE(SUM(total), 0) FROM nota_fiscal_compra) AS total_gastos,
                (SELECT COALESCE(SUM(quantidade), 0)::BIGINT FROM produto_estoque) AS produtos_em_estoque,
                (SELECT COUNT(*) FROM nota_fiscal_compra) + (SELECT COUNT(*) FROM nota_fiscal_venda) AS total_notas
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(resumo)
    }

    // ---
    // Vendas
    // ---

    pub async fn vendas(&self) -> Result<Vec<VendaRow>, AppError> {
        let rows = sqlx::query_as::<_, VendaRow>(
            "SELECT data, total FROM nota_fiscal_venda ORDER BY data ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn totais_vendas(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<TotaisRow, AppError> {
        let row = sqlx::query_as::<_, TotaisRow>(
            r#"
            SELECT COALESCE(SUM(total), 0) AS total, COUNT(*) AS count
            FROM nota_fiscal_venda
            WHERE data >= $1 AND data < $2
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn produtos_mais_vendidos(
        &self,
        limit: i64,
        por_faturamento: bool,
    ) -> Result<Vec<ProdutoMaisVendido>, AppError> {
        let ordem = if por_faturamento {
            "total_faturamento"
        } else {
            "total_quantidade"
        };
        let rows = sqlx::query_as::<_, ProdutoMaisVendido>(&format!(
            r#"
            SELECT p.id AS produto_id, p.nome,
                   SUM(pv.quantidade)::BIGINT AS total_quantidade,
                   SUM(pv.quantidade * pv.preco_unitario) AS total_faturamento
            FROM produto_venda pv
            JOIN produto p ON p.id = pv.produto_id
            GROUP BY p.id, p.nome
            ORDER BY {} DESC, p.id ASC
            LIMIT $1
            "#,
            ordem
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn vendas_por_categoria(&self) -> Result<Vec<VendaCategoria>, AppError> {
        let rows = sqlx::query_as::<_, VendaCategoria>(
            r#"
            SELECT c.id AS categoria_id, c.nome,
                   SUM(pv.quantidade * pv.preco_unitario) AS total_vendas,
                   SUM(pv.quantidade)::BIGINT AS total_quantidade
            FROM produto_venda pv
            JOIN produto p ON p.id = pv.produto_id
            JOIN categoria c ON c.id = p.categoria_id
            GROUP BY c.id, c.nome
            ORDER BY total_vendas DESC, c.id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Receita e custo por produto. Produtos sem histórico de compra não têm
    /// custo conhecido e ficam de fora (JOIN interno). O ranking por margem
    /// fica no service, que calcula o percentual.
    pub async fn margens(&self) -> Result<Vec<MargemRow>, AppError> {
        let rows = sqlx::query_as::<_, MargemRow>(
            r#"
            WITH vendas AS (
                SELECT produto_id,
                       SUM(quantidade)::BIGINT AS qtd,
                       SUM(quantidade * preco_unitario) AS receita
                FROM produto_venda
                GROUP BY produto_id
            ),
            compras AS (
                SELECT produto_id, AVG(preco_unitario) AS preco_medio
                FROM produto_compra
                GROUP BY produto_id
            )
            SELECT p.id AS produto_id, p.nome,
                   v.receita,
                   v.qtd * c.preco_medio AS custo
            FROM vendas v
            JOIN compras c ON c.produto_id = v.produto_id
            JOIN produto p ON p.id = v.produto_id
            ORDER BY p.id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // ---
    // Estoque
    // ---

    pub async fn posicao_estoque(&self) -> Result<Vec<PosicaoEstoque>, AppError> {
        let rows = sqlx::query_as::<_, PosicaoEstoque>(
            r#"
            SELECT p.id AS produto_id, p.nome,
                   SUM(e.quantidade)::BIGINT AS quantidade,
                   ROUND(AVG(e.preco), 2) AS preco,
                   ROUND(SUM(e.quantidade) * AVG(e.preco), 2) AS valor_total
            FROM produto_estoque e
            JOIN produto p ON p.id = e.produto_id
            GROUP BY p.id, p.nome
            ORDER BY p.nome ASC, p.id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn valores_estoque(&self) -> Result<Vec<ValorEstoqueRow>, AppError> {
        let rows = sqlx::query_as::<_, ValorEstoqueRow>(
            r#"
            SELECT p.id AS produto_id, p.nome,
                   SUM(e.quantidade * e.preco) AS valor_estoque
            FROM produto_estoque e
            JOIN produto p ON p.id = e.produto_id
            GROUP BY p.id, p.nome
            ORDER BY valor_estoque DESC, p.id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn giro_rows(&self, start: DateTime<Utc>) -> Result<Vec<GiroRow>, AppError> {
        let rows = sqlx::query_as::<_, GiroRow>(
            r#"
            WITH vendas AS (
                SELECT pv.produto_id, SUM(pv.quantidade)::BIGINT AS qtd
                FROM produto_venda pv
                JOIN nota_fiscal_venda n ON n.id = pv.nota_fiscal_id
                WHERE n.data >= $1
                GROUP BY pv.produto_id
            )
            SELECT p.id AS produto_id, p.nome,
                   v.qtd AS quantidade_vendida,
                   COALESCE((SELECT AVG(e.quantidade) FROM produto_estoque e
                             WHERE e.produto_id = p.id), 0) AS estoque_medio
            FROM vendas v
            JOIN produto p ON p.id = v.produto_id
            ORDER BY p.id ASC
            "#,
        )
        .bind(start)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn baixo_estoque(&self, nivel_minimo: i64) -> Result<Vec<ProdutoBaixoEstoque>, AppError> {
        let rows = sqlx::query_as::<_, ProdutoBaixoEstoque>(
            r#"
            SELECT p.id AS produto_id, p.nome,
                   COALESCE(SUM(e.quantidade), 0)::BIGINT AS quantidade_atual
            FROM produto p
            LEFT JOIN produto_estoque e ON e.produto_id = p.id
            WHERE p.ativo
            GROUP BY p.id, p.nome
            HAVING COALESCE(SUM(e.quantidade), 0) <= $1
            ORDER BY quantidade_atual ASC, p.id ASC
            "#,
        )
        .bind(nivel_minimo)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn ultimas_vendas(&self) -> Result<Vec<UltimaVendaRow>, AppError> {
        let rows = sqlx::query_as::<_, UltimaVendaRow>(
            r#"
            SELECT p.id AS produto_id, p.nome,
                   (SELECT MAX(n.data)
                    FROM produto_venda pv
                    JOIN nota_fiscal_venda n ON n.id = pv.nota_fiscal_id
                    WHERE pv.produto_id = p.id) AS ultima_venda
            FROM produto p
            WHERE p.ativo
            ORDER BY p.id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn validades_ate(&self, limite: NaiveDate) -> Result<Vec<ValidadeRow>, AppError> {
        let rows = sqlx::query_as::<_, ValidadeRow>(
            r#"
            SELECT p.id AS produto_id, p.nome, e.data_validade
            FROM produto_estoque e
            JOIN produto p ON p.id = e.produto_id
            WHERE e.quantidade > 0
              AND e.data_validade IS NOT NULL
              AND e.data_validade <= $1
            ORDER BY e.data_validade ASC, p.id ASC
            "#,
        )
        .bind(limite)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // ---
    // Compras
    // ---

    pub async fn historico_compras(&self, produto_id: i64) -> Result<Vec<CompraHistorico>, AppError> {
        let rows = sqlx::query_as::<_, CompraHistorico>(
            r#"
            SELECT n.data, pc.quantidade, pc.preco_unitario,
                   pc.quantidade * pc.preco_unitario AS total,
                   f.nome AS fornecedor
            FROM produto_compra pc
            JOIN nota_fiscal_compra n ON n.id = pc.nota_fiscal_id
            JOIN fornecedor f ON f.id = n.fornecedor_id
            WHERE pc.produto_id = $1
            ORDER BY n.data DESC, pc.id DESC
            "#,
        )
        .bind(produto_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn compras_por_fornecedor(&self) -> Result<Vec<ComprasFornecedor>, AppError> {
        let rows = sqlx::query_as::<_, ComprasFornecedor>(
            r#"
            SELECT f.id AS fornecedor_id, f.nome,
                   COUNT(n.id) AS total_compras,
                   COALESCE(SUM(n.total), 0) AS total_valor
            FROM fornecedor f
            JOIN nota_fiscal_compra n ON n.fornecedor_id = f.id
            GROUP BY f.id, f.nome
            ORDER BY total_valor DESC, f.id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn custos_aquisicao(&self, produto_id: i64) -> Result<Vec<CustoAquisicao>, AppError> {
        let rows = sqlx::query_as::<_, CustoAquisicao>(
            r#"
            SELECT n.data, ROUND(AVG(pc.preco_unitario), 2) AS preco_medio
            FROM produto_compra pc
            JOIN nota_fiscal_compra n ON n.id = pc.nota_fiscal_id
            WHERE pc.produto_id = $1
            GROUP BY n.id, n.data
            ORDER BY n.data ASC, n.id ASC
            "#,
        )
        .bind(produto_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // ---
    // Consolidado
    // ---

    /// Quantidade vendida desde `start` e estoque atual, por produto vendido.
    /// Base comum de cobertura, sugestão de compra e ruptura.
    pub async fn consumo(&self, start: DateTime<Utc>) -> Result<Vec<ConsumoRow>, AppError> {
        let rows = sqlx::query_as::<_, ConsumoRow>(
            r#"
            WITH vendas AS (
                SELECT pv.produto_id, SUM(pv.quantidade)::BIGINT AS qtd
                FROM produto_venda pv
                JOIN nota_fiscal_venda n ON n.id = pv.nota_fiscal_id
                WHERE n.data >= $1
                GROUP BY pv.produto_id
            )
            SELECT p.id AS produto_id, p.nome,
                   v.qtd AS quantidade_vendida,
                   COALESCE((SELECT SUM(e.quantidade) FROM produto_estoque e
                             WHERE e.produto_id = p.id), 0)::BIGINT AS estoque_atual
            FROM vendas v
            JOIN produto p ON p.id = v.produto_id
            ORDER BY p.id ASC
            "#,
        )
        .bind(start)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn lucratividade_categorias(&self) -> Result<Vec<LucroCategoriaRow>, AppError> {
        let rows = sqlx::query_as::<_, LucroCategoriaRow>(
            r#"
            WITH vendas AS (
                SELECT produto_id,
                       SUM(quantidade)::BIGINT AS qtd,
                       SUM(quantidade * preco_unitario) AS receita
                FROM produto_venda
                GROUP BY produto_id
            ),
            compras AS (
                SELECT produto_id, AVG(preco_unitario) AS preco_medio
                FROM produto_compra
                GROUP BY produto_id
            )
            SELECT c.id AS categoria_id, c.nome,
                   COALESCE(SUM(v.receita), 0) AS receita,
                   COALESCE(SUM(v.qtd * cp.preco_medio), 0) AS custo
            FROM categoria c
            JOIN produto p ON p.categoria_id = c.id
            JOIN vendas v ON v.produto_id = p.id
            LEFT JOIN compras cp ON cp.produto_id = p.id
            GROUP BY c.id, c.nome
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
