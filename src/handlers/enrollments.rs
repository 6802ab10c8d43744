// src/handlers/enrollments.rs

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
    models::auth::Role,
    models::enrollment::{
        CreateEnrollmentPayload, Enrollment, EnrollmentDetail, UpdateEnrollmentStatusPayload,
    },
};

#[utoipa::path(
    post,
    path = "/api/enrollments",
    tag = "Enrollments",
    request_body = CreateEnrollmentPayload,
    responses(
        (status = 200, description = "Matrícula criada", body = Enrollment),
        (status = 409, description = "Aluno já matriculado nesta turma")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_enrollment(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    Json(payload): Json<CreateEnrollmentPayload>,
) -> Result<Json<Enrollment>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let student = app_state
        .user_repo
        .find_by_id(payload.student_id)
        .await?
        .ok_or(AppError::NotFound("Aluno"))?;
    if student.role != Role::Student || !student.active {
        return Err(AppError::NotFound("Aluno"));
    }

    let class_group = app_state
        .catalog_repo
        .find_class_group(payload.class_group_id)
        .await?
        .ok_or(AppError::NotFound("Turma"))?;
    if !class_group.active {
        return Err(AppError::Forbidden("turma desativada"));
    }

    // O plano é opcional, mas se veio, precisa existir.
    if let Some(plan_id) = payload.plan_id {
        let plans = app_state.billing_repo.list_plans().await?;
        if !plans.iter().any(|p| p.id == plan_id && p.active) {
            return Err(AppError::NotFound("Plano"));
        }
    }

    let enrollment = app_state
        .enrollment_repo
        .create(
            payload.student_id,
            payload.class_group_id,
            payload.plan_id,
            payload.custom_amount,
            payload.start_date,
        )
        .await?;

    Ok(Json(enrollment))
}

#[utoipa::path(
    get,
    path = "/api/enrollments",
    tag = "Enrollments",
    responses(
        (status = 200, description = "Todas as matrículas, com nomes resolvidos", body = [EnrollmentDetail])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_enrollments(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
) -> Result<Json<Vec<EnrollmentDetail>>, AppError> {
    let rows = app_state.enrollment_repo.list_detailed().await?;
    Ok(Json(rows))
}

#[utoipa::path(
    post,
    path = "/api/enrollments/{enrollment_id}/status",
    tag = "Enrollments",
    request_body = UpdateEnrollmentStatusPayload,
    responses(
        (status = 200, description = "Status atualizado", body = Enrollment)
    ),
    params(
        ("enrollment_id" = Uuid, Path, description = "ID da matrícula")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_enrollment_status(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    Path(enrollment_id): Path<Uuid>,
    Json(payload): Json<UpdateEnrollmentStatusPayload>,
) -> Result<Json<Enrollment>, AppError> {
    let enrollment = app_state
        .enrollment_repo
        .update_status(enrollment_id, payload.status)
        .await?;

    Ok(Json(enrollment))
}
