// src/services/notas_service.rs
//
// Criação de notas fiscais: cabeçalho e linhas são gravados dentro de uma
// única transação e o total é sempre calculado aqui, nunca aceito do cliente.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{NotaCompraRepository, NotaVendaRepository},
    models::estoque::UnidadeMedida,
    models::notas::{NotaFiscalCompraDetalhe, NotaFiscalVendaDetalhe},
};

#[derive(Debug, Clone)]
pub struct LinhaVenda {
    pub produto_id: i64,
    pub quantidade: i32,
    pub preco_unitario: Decimal,
}

#[derive(Debug, Clone)]
pub struct LinhaCompra {
    pub produto_id: i64,
    pub quantidade: i32,
    pub preco_unitario: Decimal,
    pub unidade: UnidadeMedida,
}

#[derive(Clone)]
pub struct NotasService {
    pool: PgPool,
    vendas: NotaVendaRepository,
    compras: NotaCompraRepository,
}

impl NotasService {
    pub fn new(pool: PgPool, vendas: NotaVendaRepository, compras: NotaCompraRepository) -> Self {
        Self {
            pool,
            vendas,
            compras,
        }
    }

    pub async fn criar_nota_venda(
        &self,
        data: DateTime<Utc>,
        linhas: &[LinhaVenda],
    ) -> Result<NotaFiscalVendaDetalhe, AppError> {
        if linhas.is_empty() {
            return Err(AppError::ParametroInvalido(
                "nota fiscal precisa de ao menos um produto".into(),
            ));
        }

        let total = total_linhas(linhas.iter().map(|l| (l.quantidade, l.preco_unitario)));

        let mut tx = self.pool.begin().await?;
        let nota = self.vendas.inserir_nota(&mut *tx, data, total).await?;
        for linha in linhas {
            self.vendas
                .inserir_linha(
                    &mut *tx,
                    nota.id,
                    linha.produto_id,
                    linha.quantidade,
                    linha.preco_unitario,
                )
                .await?;
        }
        tx.commit().await?;

        self.vendas
            .find_by_id(nota.id)
            .await?
            .ok_or_else(|| AppError::NaoEncontrado("Nota fiscal de venda".into()))
    }

    pub async fn criar_nota_compra(
        &self,
        data: DateTime<Utc>,
        fornecedor_id: i64,
        linhas: &[LinhaCompra],
    ) -> Result<NotaFiscalCompraDetalhe, AppError> {
        if linhas.is_empty() {
            return Err(AppError::ParametroInvalido(
                "nota fiscal precisa de ao menos um produto".into(),
            ));
        }

        let total = total_linhas(linhas.iter().map(|l| (l.quantidade, l.preco_unitario)));

        let mut tx = self.pool.begin().await?;
        let nota_id = self
            .compras
            .inserir_nota(&mut *tx, data, fornecedor_id, total)
            .await?;
        for linha in linhas {
            self.compras
                .inserir_linha(
                    &mut *tx,
                    nota_id,
                    linha.produto_id,
                    linha.quantidade,
                    linha.preco_unitario,
                    linha.unidade,
                )
                .await?;
        }
        tx.commit().await?;

        self.compras
            .find_by_id(nota_id)
            .await?
            .ok_or_else(|| AppError::NaoEncontrado("Nota fiscal de compra".into()))
    }
}

/// Total da nota: soma de quantidade vezes preço unitário de cada linha.
pub fn total_linhas(linhas: impl Iterator<Item = (i32, Decimal)>) -> Decimal {
    linhas
        .map(|(quantidade, preco)| Decimal::from(quantidade) * preco)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_soma_quantidade_vezes_preco() {
        // 2 x 3.50 + 1 x 10.00 = 17.00
        let linhas = vec![
            (2, Decimal::new(350, 2)),
            (1, Decimal::new(1000, 2)),
        ];
        assert_eq!(total_linhas(linhas.into_iter()), Decimal::new(1700, 2));
    }

    #[test]
    fn total_de_nota_vazia_e_zero() {
        assert_eq!(total_linhas(std::iter::empty()), Decimal::ZERO);
    }
}
