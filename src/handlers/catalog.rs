// src/handlers/catalog.rs
// Cursos e turmas.

use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::{AdminOnly, AuthenticatedUser, RequireRole, TeacherOnly},
    models::auth::Role,
    models::catalog::{
        ClassGroup, ClassGroupDetail, Course, CreateClassGroupPayload, CreateCoursePayload,
    },
};

// =========================================================================
//  CURSOS
// =========================================================================

#[utoipa::path(
    post,
    path = "/api/catalog/courses",
    tag = "Catalog",
    request_body = CreateCoursePayload,
    responses(
        (status = 200, description = "Curso criado", body = Course)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_course(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    Json(payload): Json<CreateCoursePayload>,
) -> Result<Json<Course>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let course = app_state
        .catalog_repo
        .create_course(
            &payload.name,
            &payload.category,
            &payload.modality,
            payload.price.unwrap_or(Decimal::ZERO),
        )
        .await?;

    Ok(Json(course))
}

#[utoipa::path(
    get,
    path = "/api/catalog/courses",
    tag = "Catalog",
    responses(
        (status = 200, description = "Todos os cursos", body = [Course])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_courses(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<Course>>, AppError> {
    let courses = app_state.catalog_repo.list_courses().await?;
    Ok(Json(courses))
}

#[utoipa::path(
    post,
    path = "/api/catalog/courses/{course_id}/toggle",
    tag = "Catalog",
    responses(
        (status = 200, description = "Flag active alternado", body = Course)
    ),
    params(
        ("course_id" = Uuid, Path, description = "ID do curso")
    ),
    security(("api_jwt" = []))
)]
pub async fn toggle_course(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    Path(course_id): Path<Uuid>,
) -> Result<Json<Course>, AppError> {
    let course = app_state.catalog_repo.toggle_course(course_id).await?;
    Ok(Json(course))
}

// =========================================================================
//  TURMAS
// =========================================================================

#[utoipa::path(
    post,
    path = "/api/catalog/classes",
    tag = "Catalog",
    request_body = CreateClassGroupPayload,
    responses(
        (status = 200, description = "Turma criada", body = ClassGroup),
        (status = 404, description = "Curso ou professor não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_class_group(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    Json(payload): Json<CreateClassGroupPayload>,
) -> Result<Json<ClassGroup>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    // Curso e professor precisam existir e estar ativos, como no fluxo
    // de criação de turma do painel antigo.
    let course = app_state
        .catalog_repo
        .find_course(payload.course_id)
        .await?
        .ok_or(AppError::NotFound("Curso"))?;
    if !course.active {
        return Err(AppError::Forbidden("curso desativado"));
    }

    let teacher = app_state
        .user_repo
        .find_by_id(payload.teacher_id)
        .await?
        .ok_or(AppError::NotFound("Professor"))?;
    if teacher.role != Role::Teacher || !teacher.active {
        return Err(AppError::NotFound("Professor"));
    }

    let modality = if payload.modality.is_empty() {
        course.modality.clone()
    } else {
        payload.modality.clone()
    };

    let class_group = app_state
        .catalog_repo
        .create_class_group(
            &payload.title,
            payload.course_id,
            payload.teacher_id,
            &modality,
            &payload.schedule,
        )
        .await?;

    Ok(Json(class_group))
}

#[utoipa::path(
    get,
    path = "/api/catalog/classes",
    tag = "Catalog",
    responses(
        (status = 200, description = "Todas as turmas, com curso e professor resolvidos", body = [ClassGroupDetail])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_class_groups(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<ClassGroupDetail>>, AppError> {
    let rows = app_state.catalog_repo.list_class_groups().await?;
    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/api/catalog/classes/mine",
    tag = "Catalog",
    responses(
        (status = 200, description = "Turmas ativas do professor logado", body = [ClassGroupDetail])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_my_class_groups(
    State(app_state): State<AppState>,
    _guard: RequireRole<TeacherOnly>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<ClassGroupDetail>>, AppError> {
    let rows = app_state
        .catalog_repo
        .list_class_groups_by_teacher(user.id)
        .await?;
    Ok(Json(rows))
}

#[utoipa::path(
    post,
    path = "/api/catalog/classes/{class_id}/toggle",
    tag = "Catalog",
    responses(
        (status = 200, description = "Flag active alternado", body = ClassGroup)
    ),
    params(
        ("class_id" = Uuid, Path, description = "ID da turma")
    ),
    security(("api_jwt" = []))
)]
pub async fn toggle_class_group(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    Path(class_id): Path<Uuid>,
) -> Result<Json<ClassGroup>, AppError> {
    let class_group = app_state.catalog_repo.toggle_class_group(class_id).await?;
    Ok(Json(class_group))
}
