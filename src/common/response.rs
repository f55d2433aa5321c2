// src/common/response.rs
//
// Envelope padrão de resposta e o parsing compartilhado de paginação,
// ordenação e filtros numéricos/de data. As rotas de `findPerPage` de todas
// as entidades usam estas funções em vez de repetir o boilerplate.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::common::error::AppError;

/// Envelope `{ "success": true, "data": ... }` usado por todas as rotas.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, data }
    }
}

/// Página de resultados: os itens da página corrente e o total de registros
/// que casam com os mesmos filtros.
#[derive(Debug, Serialize)]
pub struct Pagina<T> {
    pub items: Vec<T>,
    pub total: i64,
}

// ---
// Paginação
// ---

#[derive(Debug, Clone, Copy)]
pub struct Paginacao {
    pub pagina: i64,
    pub itens_por_pagina: i64,
}

impl Paginacao {
    /// Interpreta `page` e `limit` vindos da query string. Ausentes valem
    /// 1 e 10; não-numéricos ou menores que 1 viram 400.
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Result<Self, AppError> {
        let pagina = parse_i64_com_padrao("page", page, 1)?;
        let itens_por_pagina = parse_i64_com_padrao("limit", limit, 10)?;

        if pagina < 1 || itens_por_pagina < 1 {
            return Err(AppError::ParametroInvalido(
                "page e limit devem ser maiores ou iguais a 1.".into(),
            ));
        }

        Ok(Self { pagina, itens_por_pagina })
    }

    pub fn offset(&self) -> i64 {
        (self.pagina - 1) * self.itens_por_pagina
    }
}

// ---
// Ordenação
// ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direcao {
    Asc,
    Desc,
}

impl Direcao {
    pub fn sql(&self) -> &'static str {
        match self {
            Direcao::Asc => "ASC",
            Direcao::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Ordenacao {
    pub coluna: &'static str,
    pub direcao: Direcao,
}

/// Resolve `sort`/`order` contra a lista de campos permitidos da entidade
/// (nome na query -> coluna SQL). Campo desconhecido vira 400; a direção
/// padrão é ascendente.
pub fn resolver_ordenacao(
    sort: Option<&str>,
    order: Option<&str>,
    padrao: &'static str,
    permitidos: &[(&str, &'static str)],
) -> Result<Ordenacao, AppError> {
    let coluna = match sort {
        None | Some("") => padrao,
        Some(campo) => permitidos
            .iter()
            .find(|(nome, _)| *nome == campo)
            .map(|(_, coluna)| *coluna)
            .ok_or_else(|| {
                AppError::ParametroInvalido(format!("Campo de ordenação inválido: {}", campo))
            })?,
    };

    let direcao = match order {
        None | Some("") | Some("asc") => Direcao::Asc,
        Some("desc") => Direcao::Desc,
        Some(outro) => {
            return Err(AppError::ParametroInvalido(format!(
                "Direção de ordenação inválida: {}",
                outro
            )))
        }
    };

    Ok(Ordenacao { coluna, direcao })
}

// ---
// Parsing de parâmetros de query
// ---

fn parse_i64_com_padrao(nome: &str, valor: Option<&str>, padrao: i64) -> Result<i64, AppError> {
    match valor {
        None | Some("") => Ok(padrao),
        Some(v) => v
            .trim()
            .parse::<i64>()
            .map_err(|_| AppError::ParametroInvalido(format!("{} deve ser numérico.", nome))),
    }
}

pub fn parse_i64_opt(nome: &str, valor: Option<&str>) -> Result<Option<i64>, AppError> {
    match valor {
        None | Some("") => Ok(None),
        Some(v) => v
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| AppError::ParametroInvalido(format!("{} deve ser numérico.", nome))),
    }
}

pub fn parse_i64_obrigatorio(nome: &str, valor: Option<&str>) -> Result<i64, AppError> {
    parse_i64_opt(nome, valor)?
        .ok_or_else(|| AppError::ParametroInvalido(format!("{} é obrigatório.", nome)))
}

pub fn parse_i32_opt(nome: &str, valor: Option<&str>) -> Result<Option<i32>, AppError> {
    match valor {
        None | Some("") => Ok(None),
        Some(v) => v
            .trim()
            .parse::<i32>()
            .map(Some)
            .map_err(|_| AppError::ParametroInvalido(format!("{} deve ser numérico.", nome))),
    }
}

pub fn parse_decimal_opt(nome: &str, valor: Option<&str>) -> Result<Option<Decimal>, AppError> {
    match valor {
        None | Some("") => Ok(None),
        Some(v) => v
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(|_| AppError::ParametroInvalido(format!("{} deve ser numérico.", nome))),
    }
}

/// Interpreta uma data de filtro, aceitando `YYYY-MM-DD` ou RFC 3339.
/// Para limites inferiores a data vira 00:00:00 UTC; para limites
/// superiores, 00:00:00 UTC do dia seguinte. O limite superior é usado
/// com `<`, então o dia informado entra inteiro, frações de segundo
/// inclusas.
pub fn parse_data_opt(
    nome: &str,
    valor: Option<&str>,
    fim_do_dia: bool,
) -> Result<Option<DateTime<Utc>>, AppError> {
    let Some(v) = valor.filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    if let Ok(ts) = DateTime::parse_from_rfc3339(v.trim()) {
        return Ok(Some(ts.with_timezone(&Utc)));
    }

    let dia = NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::ParametroInvalido(format!("{} deve ser uma data válida.", nome)))?;

    let hora = if fim_do_dia {
        (dia + chrono::Duration::days(1)).and_hms_opt(0, 0, 0).unwrap()
    } else {
        dia.and_hms_opt(0, 0, 0).unwrap()
    };

    Ok(Some(Utc.from_utc_datetime(&hora)))
}

pub fn parse_data_obrigatoria(
    nome: &str,
    valor: Option<&str>,
    fim_do_dia: bool,
) -> Result<DateTime<Utc>, AppError> {
    parse_data_opt(nome, valor, fim_do_dia)?
        .ok_or_else(|| AppError::ParametroInvalido(format!("{} é obrigatório.", nome)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paginacao_usa_padroes() {
        let p = Paginacao::parse(None, None).unwrap();
        assert_eq!(p.pagina, 1);
        assert_eq!(p.itens_por_pagina, 10);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn paginacao_calcula_offset() {
        let p = Paginacao::parse(Some("3"), Some("25")).unwrap();
        assert_eq!(p.offset(), 50);
    }

    #[test]
    fn paginacao_rejeita_nao_numerico() {
        assert!(Paginacao::parse(Some("abc"), None).is_err());
        assert!(Paginacao::parse(None, Some("1.5")).is_err());
    }

    #[test]
    fn paginacao_rejeita_menor_que_um() {
        assert!(Paginacao::parse(Some("0"), Some("10")).is_err());
        assert!(Paginacao::parse(Some("1"), Some("-2")).is_err());
    }

    #[test]
    fn ordenacao_usa_whitelist() {
        let permitidos = [("nome", "p.nome"), ("preco", "p.preco")];
        let ord = resolver_ordenacao(Some("preco"), Some("desc"), "p.id", &permitidos).unwrap();
        assert_eq!(ord.coluna, "p.preco");
        assert_eq!(ord.direcao, Direcao::Desc);
    }

    #[test]
    fn ordenacao_rejeita_campo_desconhecido() {
        let permitidos = [("nome", "p.nome")];
        assert!(resolver_ordenacao(Some("drop table"), None, "p.id", &permitidos).is_err());
        assert!(resolver_ordenacao(Some("nome"), Some("sideways"), "p.id", &permitidos).is_err());
    }

    #[test]
    fn ordenacao_padrao_por_id_asc() {
        let ord = resolver_ordenacao(None, None, "p.id", &[]).unwrap();
        assert_eq!(ord.coluna, "p.id");
        assert_eq!(ord.direcao, Direcao::Asc);
    }

    #[test]
    fn data_somente_dia_vira_limites_do_dia() {
        let inicio = parse_data_opt("dataStart", Some("2024-01-10"), false)
            .unwrap()
            .unwrap();
        let fim = parse_data_opt("dataEnd", Some("2024-01-10"), true)
            .unwrap()
            .unwrap();
        assert_eq!(inicio.to_rfc3339(), "2024-01-10T00:00:00+00:00");
        // Limite exclusivo: o último segundo do dia (e suas frações) ainda
        // cai antes da meia-noite seguinte.
        assert_eq!(fim.to_rfc3339(), "2024-01-11T00:00:00+00:00");
        let ultimo_instante = Utc
            .with_ymd_and_hms(2024, 1, 10, 23, 59, 59)
            .unwrap()
            .checked_add_signed(chrono::Duration::milliseconds(500))
            .unwrap();
        assert!(ultimo_instante < fim);
    }

    #[test]
    fn data_invalida_vira_erro() {
        assert!(parse_data_opt("dataStart", Some("10/01/2024"), false).is_err());
    }

    #[test]
    fn decimal_opt_aceita_vazio() {
        assert_eq!(parse_decimal_opt("precoMin", None).unwrap(), None);
        assert_eq!(parse_decimal_opt("precoMin", Some("")).unwrap(), None);
        assert!(parse_decimal_opt("precoMin", Some("x")).is_err());
    }
}
