// src/middleware/auth.rs

use std::marker::PhantomData;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::{Role, User},
};

// O middleware em si: valida o Bearer token e pendura o perfil já
// resolvido (papel decodificado, conta ativa) nos extensions.
pub async fn auth_guard(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let headers = request.headers();
    let auth_header = headers
        .get("Authorization")
        .and_then(|value| value.to_str().ok());

    if let Some(auth_header) = auth_header {
        if let Some(token) = auth_header.strip_prefix("Bearer ") {
            let user = app_state.auth_service.validate_token(token).await?;

            // Insere o usuário nos "extensions" da requisição
            request.extensions_mut().insert(user);
            return Ok(next.run(request).await);
        }
    }

    Err(AppError::InvalidToken)
}

// Extrator para obter o usuário autenticado diretamente nos handlers
pub struct AuthenticatedUser(pub User);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<User>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or(AppError::InvalidToken)
    }
}

// ---
// GUARDAS DE PAPEL (TIPOS)
// ---
// O papel já foi decodificado uma única vez na fronteira da sessão;
// aqui é só comparar o enum. Nada de re-interpretar strings de role
// em cada tela, como fazia o app antigo.

pub trait RoleDef: Send + Sync + 'static {
    fn role() -> Role;
    fn label() -> &'static str;
}

pub struct AdminOnly;
impl RoleDef for AdminOnly {
    fn role() -> Role {
        Role::Admin
    }
    fn label() -> &'static str {
        "apenas admin"
    }
}

pub struct TeacherOnly;
impl RoleDef for TeacherOnly {
    fn role() -> Role {
        Role::Teacher
    }
    fn label() -> &'static str {
        "apenas professor"
    }
}

pub struct StudentOnly;
impl RoleDef for StudentOnly {
    fn role() -> Role {
        Role::Student
    }
    fn label() -> &'static str {
        "apenas aluno"
    }
}

/// O extractor guardião: `RequireRole<AdminOnly>` num handler rejeita
/// qualquer outro papel com 403.
pub struct RequireRole<T>(pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleDef,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts.extensions.get::<User>().ok_or(AppError::InvalidToken)?;

        if user.role != T::role() {
            return Err(AppError::Forbidden(T::label()));
        }

        Ok(RequireRole(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_guards_map_to_the_closed_enum() {
        assert_eq!(AdminOnly::role(), Role::Admin);
        assert_eq!(TeacherOnly::role(), Role::Teacher);
        assert_eq!(StudentOnly::role(), Role::Student);
    }
}
