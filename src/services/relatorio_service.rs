// src/services/relatorio_service.rs
//
// Camada de cálculo dos relatórios. O repositório devolve linhas agregadas;
// tudo que é derivado (baldes por período, curva ABC, cobertura, sugestão de
// compra) está em funções puras testadas sem banco.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    db::relatorio_repo::{MargemRow, ValorEstoqueRow, VendaRow},
    db::RelatorioRepository,
    models::relatorio::{
        ClasseAbc, CoberturaEstoque, ComparativoPeriodos, CompraHistorico, ComprasFornecedor,
        CurvaAbcItem, CustoAquisicao, GiroProduto, LucratividadeCategoria, MargemProduto,
        NecessidadeCompra, PosicaoEstoque, ProdutoBaixoEstoque, ProdutoMaisVendido,
        ProdutoSemGiro, ProdutoValidade, ResumoGeral, RupturaEstoque, TotaisPeriodo,
        VendaCategoria, VendaPeriodo,
    },
};

/// Período de agrupamento das vendas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Periodo {
    Diario,
    Semanal,
    Mensal,
    Anual,
}

impl Periodo {
    pub fn parse(valor: &str) -> Result<Self, AppError> {
        match valor {
            "daily" => Ok(Self::Diario),
            "weekly" => Ok(Self::Semanal),
            "monthly" => Ok(Self::Mensal),
            "annual" => Ok(Self::Anual),
            _ => Err(AppError::ParametroInvalido(format!(
                "período inválido: {valor}"
            ))),
        }
    }
}

#[derive(Clone)]
pub struct RelatorioService {
    repo: RelatorioRepository,
}

impl RelatorioService {
    pub fn new(repo: RelatorioRepository) -> Self {
        Self { repo }
    }

    pub async fn resumo_geral(&self) -> Result<ResumoGeral, AppError> {
        self.repo.resumo_geral().await
    }

    // ---
    // Vendas
    // ---

    pub async fn vendas_por_periodo(&self, periodo: Periodo) -> Result<Vec<VendaPeriodo>, AppError> {
        let vendas = self.repo.vendas().await?;
        Ok(agrupar_vendas(&vendas, periodo))
    }

    pub async fn comparativo_periodos(
        &self,
        start1: DateTime<Utc>,
        end1: DateTime<Utc>,
        start2: DateTime<Utc>,
        end2: DateTime<Utc>,
    ) -> Result<ComparativoPeriodos, AppError> {
        let p1 = self.repo.totais_vendas(start1, end1).await?;
        let p2 = self.repo.totais_vendas(start2, end2).await?;
        Ok(ComparativoPeriodos {
            periodo1: TotaisPeriodo {
                total: p1.total,
                count: p1.count,
            },
            periodo2: TotaisPeriodo {
                total: p2.total,
                count: p2.count,
            },
        })
    }

    pub async fn produtos_mais_vendidos(
        &self,
        limit: i64,
        por_faturamento: bool,
    ) -> Result<Vec<ProdutoMaisVendido>, AppError> {
        self.repo.produtos_mais_vendidos(limit, por_faturamento).await
    }

    pub async fn vendas_por_categoria(&self) -> Result<Vec<VendaCategoria>, AppError> {
        self.repo.vendas_por_categoria().await
    }

    pub async fn margem_lucro_por_produto(
        &self,
        limit: i64,
    ) -> Result<Vec<MargemProduto>, AppError> {
        let rows = self.repo.margens().await?;
        Ok(ranquear_margens(rows, limit as usize))
    }

    // ---
    // Estoque
    // ---

    pub async fn posicao_estoque_atual(&self) -> Result<Vec<PosicaoEstoque>, AppError> {
        self.repo.posicao_estoque().await
    }

    pub async fn curva_abc_estoque(&self) -> Result<Vec<CurvaAbcItem>, AppError> {
        let rows = self.repo.valores_estoque().await?;
        Ok(classificar_abc(rows))
    }

    pub async fn giro_estoque(&self, periodo: Periodo) -> Result<Vec<GiroProduto>, AppError> {
        let dias = match periodo {
            Periodo::Mensal => 30,
            Periodo::Anual => 365,
            _ => {
                return Err(AppError::ParametroInvalido(
                    "giro aceita apenas monthly ou annual".into(),
                ))
            }
        };
        let start = Utc::now() - Duration::days(dias);
        let rows = self.repo.giro_rows(start).await?;

        let mut giros: Vec<GiroProduto> = rows
            .into_iter()
            .map(|r| GiroProduto {
                giro: calcular_giro(
                    r.quantidade_vendida,
                    r.estoque_medio.to_f64().unwrap_or(0.0),
                ),
                produto_id: r.produto_id,
                nome: r.nome,
            })
            .collect();
        giros.sort_by(|a, b| {
            b.giro
                .partial_cmp(&a.giro)
                .unwrap_or(Ordering::Equal)
                .then(a.produto_id.cmp(&b.produto_id))
        });
        Ok(giros)
    }

    pub async fn produtos_baixo_estoque(
        &self,
        nivel_minimo: i64,
    ) -> Result<Vec<ProdutoBaixoEstoque>, AppError> {
        self.repo.baixo_estoque(nivel_minimo).await
    }

    pub async fn produtos_sem_giro(&self, dias: i64) -> Result<Vec<ProdutoSemGiro>, AppError> {
        let agora = Utc::now();
        let rows = self.repo.ultimas_vendas().await?;

        let mut parados: Vec<ProdutoSemGiro> = rows
            .into_iter()
            .filter_map(|r| {
                let dias_sem_venda = match r.ultima_venda {
                    Some(ultima) => (agora - ultima).num_days(),
                    None => dias + 1,
                };
                (dias_sem_venda > dias).then_some(ProdutoSemGiro {
                    produto_id: r.produto_id,
                    nome: r.nome,
                    dias_sem_venda,
                })
            })
            .collect();
        parados.sort_by(|a, b| {
            b.dias_sem_venda
                .cmp(&a.dias_sem_venda)
                .then(a.produto_id.cmp(&b.produto_id))
        });
        Ok(parados)
    }

    pub async fn produtos_proxima_validade(
        &self,
        dias: i64,
    ) -> Result<Vec<ProdutoValidade>, AppError> {
        let hoje = Utc::now().date_naive();
        let limite = hoje + Duration::days(dias);
        let rows = self.repo.validades_ate(limite).await?;

        Ok(rows
            .into_iter()
            .map(|r| ProdutoValidade {
                dias_para_vencimento: (r.data_validade - hoje).num_days(),
                produto_id: r.produto_id,
                nome: r.nome,
                data_validade: r.data_validade,
            })
            .collect())
    }

    // ---
    // Compras
    // ---

    pub async fn historico_compras_por_produto(
        &self,
        produto_id: i64,
    ) -> Result<Vec<CompraHistorico>, AppError> {
        self.repo.historico_compras(produto_id).await
    }

    pub async fn compras_por_fornecedor(&self) -> Result<Vec<ComprasFornecedor>, AppError> {
        self.repo.compras_por_fornecedor().await
    }

    pub async fn custos_aquisicao_por_produto(
        &self,
        produto_id: i64,
    ) -> Result<Vec<CustoAquisicao>, AppError> {
        self.repo.custos_aquisicao(produto_id).await
    }

    // ---
    // Consolidado
    // ---

    pub async fn analise_cobertura_estoque(
        &self,
        dias: i64,
    ) -> Result<Vec<CoberturaEstoque>, AppError> {
        let start = Utc::now() - Duration::days(dias);
        let rows = self.repo.consumo(start).await?;

        let mut coberturas: Vec<CoberturaEstoque> = rows
            .into_iter()
            .map(|r| {
                let media = r.quantidade_vendida as f64 / dias as f64;
                CoberturaEstoque {
                    dias_cobertura: calcular_cobertura(r.estoque_atual, media),
                    produto_id: r.produto_id,
                    nome: r.nome,
                    estoque_atual: r.estoque_atual,
                    media_vendas_diaria: media,
                }
            })
            .collect();
        coberturas.sort_by(|a, b| {
            a.dias_cobertura
                .partial_cmp(&b.dias_cobertura)
                .unwrap_or(Ordering::Equal)
                .then(a.produto_id.cmp(&b.produto_id))
        });
        Ok(coberturas)
    }

    /// Sugestão de compra sobre o consumo dos últimos 30 dias.
    pub async fn necessidade_compra(
        &self,
        lead_time: i64,
        estoque_min: i64,
    ) -> Result<Vec<NecessidadeCompra>, AppError> {
        const BASE_DIAS: i64 = 30;
        let start = Utc::now() - Duration::days(BASE_DIAS);
        let rows = self.repo.consumo(start).await?;

        let mut sugestoes: Vec<NecessidadeCompra> = rows
            .into_iter()
            .filter_map(|r| {
                let media = r.quantidade_vendida as f64 / BASE_DIAS as f64;
                let sugestao = calcular_necessidade(media, lead_time, estoque_min, r.estoque_atual);
                (sugestao > 0).then(|| NecessidadeCompra {
                    razao: format!(
                        "consumo médio de {:.2} un/dia e estoque atual de {} un",
                        media, r.estoque_atual
                    ),
                    produto_id: r.produto_id,
                    nome: r.nome,
                    quantidade_sugestao: sugestao,
                })
            })
            .collect();
        sugestoes.sort_by(|a, b| {
            b.quantidade_sugestao
                .cmp(&a.quantidade_sugestao)
                .then(a.produto_id.cmp(&b.produto_id))
        });
        Ok(sugestoes)
    }

    pub async fn lucratividade_por_categoria(
        &self,
    ) -> Result<Vec<LucratividadeCategoria>, AppError> {
        let rows = self.repo.lucratividade_categorias().await?;

        let mut categorias: Vec<LucratividadeCategoria> = rows
            .into_iter()
            .map(|r| {
                let custo = r.custo.round_dp(2);
                let receita = r.receita.round_dp(2);
                LucratividadeCategoria {
                    margem: margem_percentual(receita, custo),
                    lucro: receita - custo,
                    categoria_id: r.categoria_id,
                    nome: r.nome,
                    receita,
                    custo,
                }
            })
            .collect();
        categorias.sort_by(|a, b| b.lucro.cmp(&a.lucro).then(a.categoria_id.cmp(&b.categoria_id)));
        Ok(categorias)
    }

    /// Produtos que, mantido o consumo do período, zeram o estoque em menos
    /// de `dias` dias.
    pub async fn analise_ruptura_estoque(
        &self,
        dias: i64,
    ) -> Result<Vec<RupturaEstoque>, AppError> {
        let start = Utc::now() - Duration::days(dias);
        let rows = self.repo.consumo(start).await?;

        let mut rupturas: Vec<RupturaEstoque> = rows
            .into_iter()
            .filter_map(|r| {
                let media = r.quantidade_vendida as f64 / dias as f64;
                if media <= 0.0 {
                    return None;
                }
                let cobertura = calcular_cobertura(r.estoque_atual, media);
                (cobertura < dias as f64).then_some(RupturaEstoque {
                    produto_id: r.produto_id,
                    nome: r.nome,
                    estoque_atual: r.estoque_atual,
                    media_vendas_diaria: media,
                    dias_ate_ruptura: cobertura,
                })
            })
            .collect();
        rupturas.sort_by(|a, b| {
            a.dias_ate_ruptura
                .partial_cmp(&b.dias_ate_ruptura)
                .unwrap_or(Ordering::Equal)
                .then(a.produto_id.cmp(&b.produto_id))
        });
        Ok(rupturas)
    }
}

// ---
// Funções puras
// ---

/// Início do período (UTC) a que uma data pertence: o próprio dia, a segunda
/// da semana ISO, o primeiro dia do mês ou primeiro de janeiro.
pub fn truncar_periodo(data: DateTime<Utc>, periodo: Periodo) -> NaiveDate {
    let dia = data.date_naive();
    match periodo {
        Periodo::Diario => dia,
        Periodo::Semanal => dia - Duration::days(dia.weekday().num_days_from_monday() as i64),
        Periodo::Mensal => dia.with_day(1).unwrap_or(dia),
        Periodo::Anual => NaiveDate::from_ymd_opt(dia.year(), 1, 1).unwrap_or(dia),
    }
}

/// Agrupa as notas de venda em baldes por período, em ordem cronológica.
pub fn agrupar_vendas(vendas: &[VendaRow], periodo: Periodo) -> Vec<VendaPeriodo> {
    let mut baldes: BTreeMap<NaiveDate, (Decimal, i64)> = BTreeMap::new();
    for venda in vendas {
        let chave = truncar_periodo(venda.data, periodo);
        let balde = baldes.entry(chave).or_insert((Decimal::ZERO, 0));
        balde.0 += venda.total;
        balde.1 += 1;
    }
    baldes
        .into_iter()
        .map(|(data, (total, count))| VendaPeriodo { data, total, count })
        .collect()
}

/// Curva ABC sobre itens já ordenados por valor de estoque decrescente:
/// participação acumulada até 80% é classe A, até 95% é B, o resto é C.
pub fn classificar_abc(rows: Vec<ValorEstoqueRow>) -> Vec<CurvaAbcItem> {
    let total: Decimal = rows.iter().map(|r| r.valor_estoque).sum();
    let mut acumulado = Decimal::ZERO;

    rows.into_iter()
        .map(|r| {
            acumulado += r.valor_estoque;
            let classe = if total.is_zero() {
                ClasseAbc::A
            } else {
                let percentual = acumulado / total * Decimal::from(100);
                if percentual <= Decimal::from(80) {
                    ClasseAbc::A
                } else if percentual <= Decimal::from(95) {
                    ClasseAbc::B
                } else {
                    ClasseAbc::C
                }
            };
            CurvaAbcItem {
                produto_id: r.produto_id,
                nome: r.nome,
                valor_estoque: r.valor_estoque,
                classe,
            }
        })
        .collect()
}

/// Margem por produto, da maior para a menor, truncada em `limit`.
pub fn ranquear_margens(rows: Vec<MargemRow>, limit: usize) -> Vec<MargemProduto> {
    let mut margens: Vec<MargemProduto> = rows
        .into_iter()
        .map(|r| MargemProduto {
            margem: margem_percentual(r.receita, r.custo),
            produto_id: r.produto_id,
            nome: r.nome,
            receita: r.receita.round_dp(2),
            custo: r.custo.round_dp(2),
        })
        .collect();
    margens.sort_by(|a, b| {
        b.margem
            .partial_cmp(&a.margem)
            .unwrap_or(Ordering::Equal)
            .then(a.produto_id.cmp(&b.produto_id))
    });
    margens.truncate(limit);
    margens
}

/// Margem percentual sobre a receita. Receita zero devolve 0.
pub fn margem_percentual(receita: Decimal, custo: Decimal) -> f64 {
    if receita.is_zero() {
        return 0.0;
    }
    ((receita - custo) / receita * Decimal::from(100))
        .to_f64()
        .unwrap_or(0.0)
}

/// Giro: quantidade vendida sobre o estoque médio. Sem estoque registrado, a
/// própria quantidade vendida vale como giro.
pub fn calcular_giro(quantidade_vendida: i64, estoque_medio: f64) -> f64 {
    if estoque_medio > 0.0 {
        quantidade_vendida as f64 / estoque_medio
    } else {
        quantidade_vendida as f64
    }
}

/// Dias de cobertura do estoque atual; 999 sinaliza consumo zero.
pub fn calcular_cobertura(estoque_atual: i64, media_diaria: f64) -> f64 {
    if media_diaria > 0.0 {
        estoque_atual as f64 / media_diaria
    } else {
        999.0
    }
}

/// Quantidade sugerida de compra: consumo projetado no lead time mais o
/// estoque mínimo, menos o que já existe. Nunca negativa.
pub fn calcular_necessidade(
    media_diaria: f64,
    lead_time: i64,
    estoque_min: i64,
    estoque_atual: i64,
) -> i64 {
    let necessidade =
        media_diaria * lead_time as f64 + estoque_min as f64 - estoque_atual as f64;
    necessidade.round().max(0.0) as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn venda(ano: i32, mes: u32, dia: u32, total: i64) -> VendaRow {
        VendaRow {
            data: Utc.with_ymd_and_hms(ano, mes, dia, 12, 0, 0).unwrap(),
            total: Decimal::from(total),
        }
    }

    fn valor_estoque(id: i64, nome: &str, valor: i64) -> ValorEstoqueRow {
        ValorEstoqueRow {
            produto_id: id,
            nome: nome.into(),
            valor_estoque: Decimal::from(valor),
        }
    }

    #[test]
    fn truncar_dia_devolve_o_proprio_dia() {
        let data = Utc.with_ymd_and_hms(2026, 2, 5, 23, 59, 0).unwrap();
        assert_eq!(
            truncar_periodo(data, Periodo::Diario),
            NaiveDate::from_ymd_opt(2026, 2, 5).unwrap()
        );
    }

    #[test]
    fn truncar_semana_devolve_a_segunda() {
        // 2026-02-05 cai numa quinta; a segunda daquela semana é 2026-02-02.
        let data = Utc.with_ymd_and_hms(2026, 2, 5, 10, 0, 0).unwrap();
        assert_eq!(
            truncar_periodo(data, Periodo::Semanal),
            NaiveDate::from_ymd_opt(2026, 2, 2).unwrap()
        );
    }

    #[test]
    fn truncar_mes_e_ano() {
        let data = Utc.with_ymd_and_hms(2026, 2, 5, 10, 0, 0).unwrap();
        assert_eq!(
            truncar_periodo(data, Periodo::Mensal),
            NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()
        );
        assert_eq!(
            truncar_periodo(data, Periodo::Anual),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
        );
    }

    #[test]
    fn agrupa_vendas_por_mes_em_ordem_cronologica() {
        let vendas = vec![
            venda(2026, 2, 10, 200),
            venda(2026, 1, 5, 40),
            venda(2026, 1, 20, 60),
        ];
        let baldes = agrupar_vendas(&vendas, Periodo::Mensal);

        assert_eq!(baldes.len(), 2);
        assert_eq!(baldes[0].data, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        assert_eq!(baldes[0].total, Decimal::from(100));
        assert_eq!(baldes[0].count, 2);
        assert_eq!(baldes[1].data, NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
        assert_eq!(baldes[1].total, Decimal::from(200));
        assert_eq!(baldes[1].count, 1);
    }

    #[test]
    fn curva_abc_classifica_pelos_cortes_80_e_95() {
        let itens = classificar_abc(vec![
            valor_estoque(1, "arroz", 800),
            valor_estoque(2, "feijao", 150),
            valor_estoque(3, "sal", 50),
        ]);
        assert_eq!(itens[0].classe, ClasseAbc::A);
        assert_eq!(itens[1].classe, ClasseAbc::B);
        assert_eq!(itens[2].classe, ClasseAbc::C);
    }

    #[test]
    fn curva_abc_com_item_unico_e_classe_c_e_vazia_fica_vazia() {
        // Um item sozinho acumula 100% do valor, acima dos cortes de A e B.
        let itens = classificar_abc(vec![valor_estoque(1, "arroz", 10)]);
        assert_eq!(itens.len(), 1);
        assert_eq!(itens[0].classe, ClasseAbc::C);

        assert!(classificar_abc(vec![]).is_empty());
    }

    #[test]
    fn margem_percentual_sobre_receita() {
        assert_eq!(margem_percentual(Decimal::from(100), Decimal::from(60)), 40.0);
        assert_eq!(margem_percentual(Decimal::ZERO, Decimal::from(60)), 0.0);
    }

    #[test]
    fn margens_ordenam_por_margem_e_nao_por_receita() {
        let margem_row = |id: i64, nome: &str, receita: i64, custo: i64| MargemRow {
            produto_id: id,
            nome: nome.into(),
            receita: Decimal::from(receita),
            custo: Decimal::from(custo),
        };
        // O produto de maior receita tem a pior margem.
        let ranking = ranquear_margens(
            vec![
                margem_row(1, "refrigerante", 1000, 900),
                margem_row(2, "salgado", 200, 80),
                margem_row(3, "doce", 100, 70),
            ],
            2,
        );

        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking[0].produto_id, 2);
        assert_eq!(ranking[0].margem, 60.0);
        assert_eq!(ranking[1].produto_id, 3);
        assert_eq!(ranking[1].margem, 30.0);
    }

    #[test]
    fn cobertura_usa_sentinela_sem_consumo() {
        assert_eq!(calcular_cobertura(50, 5.0), 10.0);
        assert_eq!(calcular_cobertura(50, 0.0), 999.0);
    }

    #[test]
    fn necessidade_nunca_e_negativa() {
        // 2/dia por 7 dias + mínimo 10 - estoque 5 = 19
        assert_eq!(calcular_necessidade(2.0, 7, 10, 5), 19);
        assert_eq!(calcular_necessidade(2.0, 7, 10, 100), 0);
    }

    #[test]
    fn giro_cai_para_quantidade_sem_estoque_medio() {
        assert_eq!(calcular_giro(60, 20.0), 3.0);
        assert_eq!(calcular_giro(60, 0.0), 60.0);
    }

    #[test]
    fn periodo_parse_rejeita_valor_desconhecido() {
        assert_eq!(Periodo::parse("monthly").unwrap(), Periodo::Mensal);
        assert!(Periodo::parse("quarterly").is_err());
    }
}
