// src/handlers/board.rs
// Mural de avisos e biblioteca de apostilas.

use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::{AdminOnly, AuthenticatedUser, RequireRole},
    models::auth::Role,
    models::board::{
        CreateNoticePayload, LibraryPage, Notice, NoticeAudience, UpsertLibraryPagePayload,
    },
};

// =========================================================================
//  AVISOS
// =========================================================================

#[utoipa::path(
    post,
    path = "/api/board/notices",
    tag = "Board",
    request_body = CreateNoticePayload,
    responses(
        (status = 200, description = "Aviso publicado", body = Notice)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_notice(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    Json(payload): Json<CreateNoticePayload>,
) -> Result<Json<Notice>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let notice = app_state
        .board_repo
        .create_notice(&payload.title, payload.audience, &payload.body)
        .await?;

    Ok(Json(notice))
}

#[utoipa::path(
    get,
    path = "/api/board/notices",
    tag = "Board",
    responses(
        (status = 200, description = "Avisos visíveis para quem pede: admin vê tudo, aluno vê all+students, professor vê all+teachers", body = [Notice])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_notices(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<Notice>>, AppError> {
    let notices = match user.role {
        Role::Admin => app_state.board_repo.list_notices().await?,
        Role::Student => {
            app_state
                .board_repo
                .list_active_notices_for(NoticeAudience::Students)
                .await?
        }
        Role::Teacher => {
            app_state
                .board_repo
                .list_active_notices_for(NoticeAudience::Teachers)
                .await?
        }
    };

    Ok(Json(notices))
}

#[utoipa::path(
    post,
    path = "/api/board/notices/{notice_id}/toggle",
    tag = "Board",
    responses(
        (status = 200, description = "Flag active alternado", body = Notice)
    ),
    params(
        ("notice_id" = Uuid, Path, description = "ID do aviso")
    ),
    security(("api_jwt" = []))
)]
pub async fn toggle_notice(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    Path(notice_id): Path<Uuid>,
) -> Result<Json<Notice>, AppError> {
    let notice = app_state.board_repo.toggle_notice(notice_id).await?;
    Ok(Json(notice))
}

// =========================================================================
//  BIBLIOTECA
// =========================================================================

#[utoipa::path(
    put,
    path = "/api/board/library",
    tag = "Board",
    request_body = UpsertLibraryPagePayload,
    responses(
        (status = 200, description = "Página criada ou sobrescrita pelo slug", body = LibraryPage),
        (status = 403, description = "Aluno não edita a biblioteca")
    ),
    security(("api_jwt" = []))
)]
pub async fn upsert_library_page(
    State(app_state): State<AppState>,
    AuthenticatedUser(author): AuthenticatedUser,
    Json(payload): Json<UpsertLibraryPagePayload>,
) -> Result<Json<LibraryPage>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    // Admin e professor escrevem; aluno só lê.
    if author.role == Role::Student {
        return Err(AppError::Forbidden("apenas admin ou professor"));
    }

    let page = app_state
        .board_repo
        .upsert_library_page(&payload.title, &payload.slug, &payload.body, author.id)
        .await?;

    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/board/library",
    tag = "Board",
    responses(
        (status = 200, description = "Páginas ativas da biblioteca", body = [LibraryPage])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_library_pages(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<LibraryPage>>, AppError> {
    let pages = app_state.board_repo.list_library_pages().await?;
    Ok(Json(pages))
}

#[utoipa::path(
    get,
    path = "/api/board/library/{slug}",
    tag = "Board",
    responses(
        (status = 200, description = "Página da biblioteca", body = LibraryPage),
        (status = 404, description = "Página não encontrada")
    ),
    params(
        ("slug" = String, Path, description = "Slug da página")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_library_page(
    State(app_state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<LibraryPage>, AppError> {
    let page = app_state
        .board_repo
        .find_library_page(&slug)
        .await?
        .ok_or(AppError::NotFound("Página"))?;

    Ok(Json(page))
}
