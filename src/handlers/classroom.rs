// src/handlers/classroom.rs
// Diário de classe do professor.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::{AuthenticatedUser, RequireRole, TeacherOnly},
    models::classroom::{AttendanceHistoryRow, AttendanceRecord, SaveAttendancePayload},
};

#[utoipa::path(
    post,
    path = "/api/classroom/{class_id}/attendance",
    tag = "Classroom",
    request_body = SaveAttendancePayload,
    responses(
        (status = 200, description = "Aula salva; re-salvar a mesma data sobrescreve", body = [AttendanceRecord]),
        (status = 403, description = "A turma é de outro professor")
    ),
    params(
        ("class_id" = Uuid, Path, description = "ID da turma")
    ),
    security(("api_jwt" = []))
)]
pub async fn save_attendance(
    State(app_state): State<AppState>,
    _guard: RequireRole<TeacherOnly>,
    AuthenticatedUser(teacher): AuthenticatedUser,
    Path(class_id): Path<Uuid>,
    Json(payload): Json<SaveAttendancePayload>,
) -> Result<Json<Vec<AttendanceRecord>>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let class_group = app_state
        .catalog_repo
        .find_class_group(class_id)
        .await?
        .ok_or(AppError::NotFound("Turma"))?;
    if class_group.teacher_id != teacher.id {
        return Err(AppError::Forbidden("a turma é de outro professor"));
    }

    // Só aceita matrículas que realmente pertencem à turma.
    let roster = app_state.enrollment_repo.list_active_by_class(class_id).await?;

    let mut saved = Vec::with_capacity(payload.entries.len());
    for entry in &payload.entries {
        let enrollment = roster
            .iter()
            .find(|e| e.id == entry.enrollment_id)
            .ok_or(AppError::NotFound("Matrícula"))?;

        let record = app_state
            .classroom_repo
            .upsert_record(
                class_id,
                enrollment.student_id,
                enrollment.id,
                teacher.id,
                payload.date,
                entry.presence,
                &entry.grade,
                &entry.note,
            )
            .await?;
        saved.push(record);
    }

    tracing::info!(
        "Diário da turma {} salvo: {} registros em {}.",
        class_id,
        saved.len(),
        payload.date
    );

    Ok(Json(saved))
}

#[utoipa::path(
    get,
    path = "/api/classroom/{class_id}/history",
    tag = "Classroom",
    responses(
        (status = 200, description = "Últimos 30 registros da turma", body = [AttendanceHistoryRow])
    ),
    params(
        ("class_id" = Uuid, Path, description = "ID da turma")
    ),
    security(("api_jwt" = []))
)]
pub async fn class_history(
    State(app_state): State<AppState>,
    _guard: RequireRole<TeacherOnly>,
    AuthenticatedUser(teacher): AuthenticatedUser,
    Path(class_id): Path<Uuid>,
) -> Result<Json<Vec<AttendanceHistoryRow>>, AppError> {
    let class_group = app_state
        .catalog_repo
        .find_class_group(class_id)
        .await?
        .ok_or(AppError::NotFound("Turma"))?;
    if class_group.teacher_id != teacher.id {
        return Err(AppError::Forbidden("a turma é de outro professor"));
    }

    let rows = app_state.classroom_repo.history_for_class(class_id).await?;
    Ok(Json(rows))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct LessonQuery {
    /// Data da aula (YYYY-MM-DD)
    pub date: NaiveDate,
}

#[utoipa::path(
    get,
    path = "/api/classroom/{class_id}/lesson",
    tag = "Classroom",
    params(
        ("class_id" = Uuid, Path, description = "ID da turma"),
        LessonQuery
    ),
    responses(
        (status = 200, description = "Registros já salvos da turma nessa data", body = [AttendanceRecord])
    ),
    security(("api_jwt" = []))
)]
pub async fn lesson_records(
    State(app_state): State<AppState>,
    _guard: RequireRole<TeacherOnly>,
    AuthenticatedUser(teacher): AuthenticatedUser,
    Path(class_id): Path<Uuid>,
    Query(query): Query<LessonQuery>,
) -> Result<Json<Vec<AttendanceRecord>>, AppError> {
    let class_group = app_state
        .catalog_repo
        .find_class_group(class_id)
        .await?
        .ok_or(AppError::NotFound("Turma"))?;
    if class_group.teacher_id != teacher.id {
        return Err(AppError::Forbidden("a turma é de outro professor"));
    }

    let rows = app_state
        .classroom_repo
        .records_for_lesson(class_id, query.date)
        .await?;
    Ok(Json(rows))
}
