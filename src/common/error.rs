use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// A taxonomia é quase toda de validação: a regra é rejeitar antes de
// escrever qualquer coisa no banco.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Conta desativada")]
    AccountDisabled,

    #[error("Acesso negado: {0}")]
    Forbidden(&'static str),

    #[error("{0} não encontrado(a)")]
    NotFound(&'static str),

    #[error("Aluno já matriculado nesta turma")]
    DuplicateEnrollment,

    // --- Erros do gerador de cobranças / repasses ---
    #[error("Mês inválido: {0}")]
    InvalidMonth(String),

    #[error("Período inválido")]
    InvalidPeriod,

    #[error("Valor-hora não configurado")]
    RateNotConfigured,

    #[error("Nada a pagar no período")]
    NothingToPay,

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
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
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::EmailAlreadyExists => {
                (StatusCode::CONFLICT, "Este e-mail já está em uso.".to_string())
            }
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "E-mail ou senha inválidos.".to_string())
            }
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.".to_string(),
            ),
            AppError::AccountDisabled => (
                StatusCode::FORBIDDEN,
                "Sua conta está desativada. Fale com a administração.".to_string(),
            ),
            AppError::Forbidden(msg) => {
                (StatusCode::FORBIDDEN, format!("Acesso negado: {}.", msg))
            }
            AppError::NotFound(what) => {
                (StatusCode::NOT_FOUND, format!("{} não encontrado(a).", what))
            }
            AppError::DuplicateEnrollment => (
                StatusCode::CONFLICT,
                "Este aluno já está matriculado nesta turma.".to_string(),
            ),
            AppError::InvalidMonth(ref raw) => (
                StatusCode::BAD_REQUEST,
                format!("Mês inválido: \"{}\". Use o formato YYYY-MM.", raw),
            ),
            AppError::InvalidPeriod => (
                StatusCode::BAD_REQUEST,
                "Período inválido: a data inicial vem depois da final.".to_string(),
            ),
            AppError::RateNotConfigured => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "O valor-hora deste professor ainda não foi configurado.".to_string(),
            ),
            AppError::NothingToPay => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Nenhuma aula aprovada e não paga neste período.".to_string(),
            ),

            // Todos os outros erros (DatabaseError, InternalServerError) viram 500.
            // O `tracing` loga a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
