// src/handlers/relatorio.rs
//
// As rotas de relatório despacham pelo parâmetro `type`; cada família
// (vendas, estoque, compras, consolidado) tem o seu conjunto de tipos.
// Tipo desconhecido ou parâmetro obrigatório ausente viram 400.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::AppError,
    common::response::{
        parse_data_obrigatoria, parse_i64_obrigatorio, parse_i64_opt, ApiResponse,
    },
    config::AppState,
    services::relatorio_service::Periodo,
};

fn tipo_desconhecido(tipo: &str) -> AppError {
    AppError::ParametroInvalido(format!("Tipo de relatório desconhecido: {tipo}"))
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct RelatorioVendasQuery {
    #[serde(rename = "type")]
    pub tipo: Option<String>,
    pub periodo: Option<String>,
    pub start_date1: Option<String>,
    pub end_date1: Option<String>,
    pub start_date2: Option<String>,
    pub end_date2: Option<String>,
    pub limit: Option<String>,
    pub by: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct RelatorioEstoqueQuery {
    #[serde(rename = "type")]
    pub tipo: Option<String>,
    pub periodo: Option<String>,
    pub min_level: Option<String>,
    pub days: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct RelatorioComprasQuery {
    #[serde(rename = "type")]
    pub tipo: Option<String>,
    pub produto_id: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct RelatorioConsolidadoQuery {
    #[serde(rename = "type")]
    pub tipo: Option<String>,
    pub days: Option<String>,
    pub lead_time: Option<String>,
    pub estoque_min: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/relatorio",
    tag = "Relatorio",
    responses((status = 200, description = "Resumo geral do painel"))
)]
pub async fn resumo_geral(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let resumo = app_state.relatorio.resumo_geral().await?;
    Ok(Json(ApiResponse::ok(resumo)))
}

#[utoipa::path(
    get,
    path = "/api/relatorio/vendas",
    tag = "Relatorio",
    params(RelatorioVendasQuery),
    responses(
        (status = 200, description = "Relatório de vendas conforme o tipo"),
        (status = 400, description = "Tipo desconhecido ou parâmetro inválido")
    )
)]
pub async fn vendas(
    State(app_state): State<AppState>,
    Query(query): Query<RelatorioVendasQuery>,
) -> Result<Response, AppError> {
    let tipo = query.tipo.as_deref().unwrap_or("por-periodo");
    match tipo {
        "por-periodo" => {
            let periodo = Periodo::parse(query.periodo.as_deref().unwrap_or("daily"))?;
            let dados = app_state.relatorio.vendas_por_periodo(periodo).await?;
            Ok(Json(ApiResponse::ok(dados)).into_response())
        }
        "comparativo-periodos" => {
            let start1 = parse_data_obrigatoria("startDate1", query.start_date1.as_deref(), false)?;
            let end1 = parse_data_obrigatoria("endDate1", query.end_date1.as_deref(), true)?;
            let start2 = parse_data_obrigatoria("startDate2", query.start_date2.as_deref(), false)?;
            let end2 = parse_data_obrigatoria("endDate2", query.end_date2.as_deref(), true)?;
            let dados = app_state
                .relatorio
                .comparativo_periodos(start1, end1, start2, end2)
                .await?;
            Ok(Json(ApiResponse::ok(dados)).into_response())
        }
        "produtos-mais-vendidos" => {
            let limit = parse_i64_opt("limit", query.limit.as_deref())?.unwrap_or(10);
            if limit < 1 {
                return Err(AppError::ParametroInvalido(
                    "limit deve ser maior ou igual a 1.".into(),
                ));
            }
            let por_faturamento = match query.by.as_deref() {
                None | Some("") | Some("quantidade") => false,
                Some("faturamento") => true,
                Some(outro) => {
                    return Err(AppError::ParametroInvalido(format!(
                        "by deve ser quantidade ou faturamento, não {outro}."
                    )))
                }
            };
            let dados = app_state
                .relatorio
                .produtos_mais_vendidos(limit, por_faturamento)
                .await?;
            Ok(Json(ApiResponse::ok(dados)).into_response())
        }
        "vendas-por-categoria" => {
            let dados = app_state.relatorio.vendas_por_categoria().await?;
            Ok(Json(ApiResponse::ok(dados)).into_response())
        }
        "margem-lucro" => {
            let limit = parse_i64_opt("limit", query.limit.as_deref())?.unwrap_or(10);
            let dados = app_state.relatorio.margem_lucro_por_produto(limit).await?;
            Ok(Json(ApiResponse::ok(dados)).into_response())
        }
        outro => Err(tipo_desconhecido(outro)),
    }
}

#[utoipa::path(
    get,
    path = "/api/relatorio/estoque",
    tag = "Relatorio",
    params(RelatorioEstoqueQuery),
    responses(
        (status = 200, description = "Relatório de estoque conforme o tipo"),
        (status = 400, description = "Tipo desconhecido ou parâmetro inválido")
    )
)]
pub async fn estoque(
    State(app_state): State<AppState>,
    Query(query): Query<RelatorioEstoqueQuery>,
) -> Result<Response, AppError> {
    let tipo = query.tipo.as_deref().unwrap_or("posicao-atual");
    match tipo {
        "posicao-atual" => {
            let dados = app_state.relatorio.posicao_estoque_atual().await?;
            Ok(Json(ApiResponse::ok(dados)).into_response())
        }
        "curva-abc" => {
            let dados = app_state.relatorio.curva_abc_estoque().await?;
            Ok(Json(ApiResponse::ok(dados)).into_response())
        }
        "giro" => {
            let periodo = Periodo::parse(query.periodo.as_deref().unwrap_or("monthly"))?;
            let dados = app_state.relatorio.giro_estoque(periodo).await?;
            Ok(Json(ApiResponse::ok(dados)).into_response())
        }
        "baixo-estoque" => {
            let nivel = parse_i64_opt("minLevel", query.min_level.as_deref())?.unwrap_or(10);
            let dados = app_state.relatorio.produtos_baixo_estoque(nivel).await?;
            Ok(Json(ApiResponse::ok(dados)).into_response())
        }
        "sem-giro" => {
            let dias = parse_i64_opt("days", query.days.as_deref())?.unwrap_or(30);
            let dados = app_state.relatorio.produtos_sem_giro(dias).await?;
            Ok(Json(ApiResponse::ok(dados)).into_response())
        }
        "proxima-validade" => {
            let dias = parse_i64_opt("days", query.days.as_deref())?.unwrap_or(30);
            let dados = app_state.relatorio.produtos_proxima_validade(dias).await?;
            Ok(Json(ApiResponse::ok(dados)).into_response())
        }
        outro => Err(tipo_desconhecido(outro)),
    }
}

#[utoipa::path(
    get,
    path = "/api/relatorio/compras",
    tag = "Relatorio",
    params(RelatorioComprasQuery),
    responses(
        (status = 200, description = "Relatório de compras conforme o tipo"),
        (status = 400, description = "Tipo desconhecido ou parâmetro inválido")
    )
)]
pub async fn compras(
    State(app_state): State<AppState>,
    Query(query): Query<RelatorioComprasQuery>,
) -> Result<Response, AppError> {
    let tipo = query.tipo.as_deref().unwrap_or("por-fornecedor");
    match tipo {
        "historico-produto" => {
            let produto_id = parse_i64_obrigatorio("produtoId", query.produto_id.as_deref())?;
            let dados = app_state
                .relatorio
                .historico_compras_por_produto(produto_id)
                .await?;
            Ok(Json(ApiResponse::ok(dados)).into_response())
        }
        "por-fornecedor" => {
            let dados = app_state.relatorio.compras_por_fornecedor().await?;
            Ok(Json(ApiResponse::ok(dados)).into_response())
        }
        "custos-aquisicao" => {
            let produto_id = parse_i64_obrigatorio("produtoId", query.produto_id.as_deref())?;
            let dados = app_state
                .relatorio
                .custos_aquisicao_por_produto(produto_id)
                .await?;
            Ok(Json(ApiResponse::ok(dados)).into_response())
        }
        outro => Err(tipo_desconhecido(outro)),
    }
}

#[utoipa::path(
    get,
    path = "/api/relatorio/consolidado",
    tag = "Relatorio",
    params(RelatorioConsolidadoQuery),
    responses(
        (status = 200, description = "Relatório consolidado conforme o tipo"),
        (status = 400, description = "Tipo desconhecido ou parâmetro inválido")
    )
)]
pub async fn consolidado(
    State(app_state): State<AppState>,
    Query(query): Query<RelatorioConsolidadoQuery>,
) -> Result<Response, AppError> {
    let tipo = query.tipo.as_deref().unwrap_or("cobertura-estoque");
    match tipo {
        "cobertura-estoque" => {
            let dias = dias_positivos(query.days.as_deref(), 30)?;
            let dados = app_state.relatorio.analise_cobertura_estoque(dias).await?;
            Ok(Json(ApiResponse::ok(dados)).into_response())
        }
        "necessidade-compra" => {
            let lead_time = parse_i64_opt("leadTime", query.lead_time.as_deref())?.unwrap_or(7);
            let estoque_min =
                parse_i64_opt("estoqueMin", query.estoque_min.as_deref())?.unwrap_or(10);
            let dados = app_state
                .relatorio
                .necessidade_compra(lead_time, estoque_min)
                .await?;
            Ok(Json(ApiResponse::ok(dados)).into_response())
        }
        "lucratividade-categoria" => {
            let dados = app_state.relatorio.lucratividade_por_categoria().await?;
            Ok(Json(ApiResponse::ok(dados)).into_response())
        }
        "ruptura-estoque" => {
            let dias = dias_positivos(query.days.as_deref(), 30)?;
            let dados = app_state.relatorio.analise_ruptura_estoque(dias).await?;
            Ok(Json(ApiResponse::ok(dados)).into_response())
        }
        outro => Err(tipo_desconhecido(outro)),
    }
}

fn dias_positivos(valor: Option<&str>, padrao: i64) -> Result<i64, AppError> {
    let dias = parse_i64_opt("days", valor)?.unwrap_or(padrao);
    if dias < 1 {
        return Err(AppError::ParametroInvalido(
            "days deve ser maior ou igual a 1.".into(),
        ));
    }
    Ok(dias)
}
