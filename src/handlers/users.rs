// src/handlers/users.rs
// Cadastros do admin: alunos, professores e o botão Ativar/Desativar.

use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::{AdminOnly, RequireRole},
    models::auth::{CreateUserPayload, CreatedUserResponse, User},
};

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = CreateUserPayload,
    responses(
        (status = 201, description = "Usuário criado; a senha gerada só aparece aqui", body = CreatedUserResponse),
        (status = 409, description = "E-mail já em uso")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_user(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    Json(payload): Json<CreateUserPayload>,
) -> Result<Json<CreatedUserResponse>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let (user, password) = app_state
        .auth_service
        .create_user_with_generated_password(&payload.name, &payload.email, payload.role)
        .await?;

    tracing::info!("Usuário {} criado com papel {:?}.", user.id, user.role);

    Ok(Json(CreatedUserResponse {
        id: user.id,
        email: user.email,
        password,
    }))
}

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "Todos os usuários", body = [User])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
) -> Result<Json<Vec<User>>, AppError> {
    let users = app_state.user_repo.list_users().await?;
    Ok(Json(users))
}

#[utoipa::path(
    post,
    path = "/api/users/{user_id}/toggle",
    tag = "Users",
    responses(
        (status = 200, description = "Flag active alternado", body = User)
    ),
    params(
        ("user_id" = Uuid, Path, description = "ID do usuário")
    ),
    security(("api_jwt" = []))
)]
pub async fn toggle_user(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    let user = app_state.user_repo.toggle_active(user_id).await?;
    Ok(Json(user))
}
