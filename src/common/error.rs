use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Taxonomia única de erros da aplicação. Todas as rotas devolvem
// `Result<_, AppError>` e a conversão para HTTP acontece em um só lugar.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Parâmetro de query/rota ausente ou não-numérico.
    #[error("Parâmetro inválido: {0}")]
    ParametroInvalido(String),

    #[error("{0} não encontrado(a)")]
    NaoEncontrado(String),

    // Tentativa de remover um registro ainda referenciado por
    // estoque ou por linhas de nota fiscal (FK RESTRICT).
    #[error("{0} ainda possui registros vinculados")]
    RegistroEmUso(String),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "success": false,
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::ParametroInvalido(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NaoEncontrado(entidade) => (
                StatusCode::NOT_FOUND,
                format!("{} não encontrado(a).", entidade),
            ),
            AppError::RegistroEmUso(entidade) => (
                StatusCode::CONFLICT,
                format!(
                    "{} ainda possui registros vinculados e não pode ser removido(a).",
                    entidade
                ),
            ),
            AppError::EmailAlreadyExists => {
                (StatusCode::CONFLICT, "Este e-mail já está em uso.".into())
            }

            // DatabaseError e InternalServerError viram 500. A mensagem
            // detalhada vai para o log; o cliente recebe um texto genérico.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".into(),
                )
            }
        };

        let body = Json(json!({ "success": false, "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parametro_invalido_vira_400() {
        let res = AppError::ParametroInvalido("page inválido".into()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn nao_encontrado_vira_404() {
        let res = AppError::NaoEncontrado("Produto".into()).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn registro_em_uso_vira_409() {
        let res = AppError::RegistroEmUso("Categoria".into()).into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn erro_de_banco_vira_500() {
        let res = AppError::DatabaseError(sqlx::Error::PoolClosed).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn erro_interno_vira_500() {
        let res = AppError::InternalServerError(anyhow::anyhow!("boom")).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validacao_vira_400_com_detalhes() {
        let mut errors = validator::ValidationErrors::new();
        errors.add("nome", validator::ValidationError::new("length"));
        let res = AppError::ValidationError(errors).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
