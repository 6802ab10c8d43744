// src/handlers/payroll.rs
// Aulas lançadas, valor-hora e repasses.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::{AdminOnly, AuthenticatedUser, RequireRole, TeacherOnly},
    models::payroll::{
        GeneratePayoutPayload, LogSessionPayload, Payout, ReviewSessionPayload, SessionStatus,
        SetRatePayload, TeacherRate, TeacherSession,
    },
};

// =========================================================================
//  AULAS
// =========================================================================

#[utoipa::path(
    post,
    path = "/api/payroll/sessions",
    tag = "Payroll",
    request_body = LogSessionPayload,
    responses(
        (status = 200, description = "Aula lançada, aguardando aprovação", body = TeacherSession)
    ),
    security(("api_jwt" = []))
)]
pub async fn log_session(
    State(app_state): State<AppState>,
    _guard: RequireRole<TeacherOnly>,
    AuthenticatedUser(teacher): AuthenticatedUser,
    Json(payload): Json<LogSessionPayload>,
) -> Result<Json<TeacherSession>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    // A turma precisa ser do próprio professor.
    let class_group = app_state
        .catalog_repo
        .find_class_group(payload.class_group_id)
        .await?
        .ok_or(AppError::NotFound("Turma"))?;
    if class_group.teacher_id != teacher.id {
        return Err(AppError::Forbidden("a turma é de outro professor"));
    }

    let session = app_state
        .payroll_repo
        .insert_session(
            teacher.id,
            payload.class_group_id,
            payload.date,
            payload.minutes,
            &payload.note,
        )
        .await?;

    Ok(Json(session))
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct SessionFilter {
    pub teacher_id: Option<Uuid>,
    pub status: Option<SessionStatus>,
}

#[utoipa::path(
    get,
    path = "/api/payroll/sessions",
    tag = "Payroll",
    params(SessionFilter),
    responses(
        (status = 200, description = "Aulas filtradas", body = [TeacherSession])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_sessions(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    Query(filter): Query<SessionFilter>,
) -> Result<Json<Vec<TeacherSession>>, AppError> {
    let sessions = app_state
        .payroll_repo
        .list_sessions(filter.teacher_id, filter.status)
        .await?;

    Ok(Json(sessions))
}

#[utoipa::path(
    get,
    path = "/api/payroll/sessions/mine",
    tag = "Payroll",
    responses(
        (status = 200, description = "Aulas do professor logado", body = [TeacherSession])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_my_sessions(
    State(app_state): State<AppState>,
    _guard: RequireRole<TeacherOnly>,
    AuthenticatedUser(teacher): AuthenticatedUser,
) -> Result<Json<Vec<TeacherSession>>, AppError> {
    let sessions = app_state
        .payroll_repo
        .list_sessions(Some(teacher.id), None)
        .await?;

    Ok(Json(sessions))
}

#[utoipa::path(
    post,
    path = "/api/payroll/sessions/{session_id}/review",
    tag = "Payroll",
    request_body = ReviewSessionPayload,
    responses(
        (status = 200, description = "Aula aprovada ou rejeitada", body = TeacherSession),
        (status = 404, description = "Aula não encontrada ou já consumida por repasse")
    ),
    params(
        ("session_id" = Uuid, Path, description = "ID da aula")
    ),
    security(("api_jwt" = []))
)]
pub async fn review_session(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<ReviewSessionPayload>,
) -> Result<Json<TeacherSession>, AppError> {
    let session = app_state
        .payroll_repo
        .review_session(session_id, payload.status)
        .await?;

    Ok(Json(session))
}

// =========================================================================
//  VALOR-HORA
// =========================================================================

#[utoipa::path(
    put,
    path = "/api/payroll/rates/{teacher_id}",
    tag = "Payroll",
    request_body = SetRatePayload,
    responses(
        (status = 200, description = "Valor-hora definido", body = TeacherRate)
    ),
    params(
        ("teacher_id" = Uuid, Path, description = "ID do professor")
    ),
    security(("api_jwt" = []))
)]
pub async fn set_rate(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    Path(teacher_id): Path<Uuid>,
    Json(payload): Json<SetRatePayload>,
) -> Result<Json<TeacherRate>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    if payload.rate_per_hour <= rust_decimal::Decimal::ZERO {
        return Err(AppError::RateNotConfigured);
    }

    let rate = app_state
        .payroll_repo
        .set_rate(teacher_id, payload.rate_per_hour)
        .await?;

    Ok(Json(rate))
}

// =========================================================================
//  REPASSES
// =========================================================================

#[utoipa::path(
    post,
    path = "/api/payroll/generate",
    tag = "Payroll",
    request_body = GeneratePayoutPayload,
    responses(
        (status = 200, description = "Repasse gerado; as aulas consumidas saem de rodadas futuras", body = Payout),
        (status = 400, description = "Período invertido"),
        (status = 422, description = "Valor-hora não configurado ou nada a pagar")
    ),
    security(("api_jwt" = []))
)]
pub async fn generate_payout(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    AuthenticatedUser(admin): AuthenticatedUser,
    Json(payload): Json<GeneratePayoutPayload>,
) -> Result<Json<Payout>, AppError> {
    let payout = app_state
        .payroll_service
        .generate_payout(
            payload.teacher_id,
            payload.period_from,
            payload.period_to,
            &payload.note,
            admin.id,
        )
        .await?;

    Ok(Json(payout))
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PayoutFilter {
    pub teacher_id: Option<Uuid>,
}

#[utoipa::path(
    get,
    path = "/api/payroll/payouts",
    tag = "Payroll",
    params(PayoutFilter),
    responses(
        (status = 200, description = "Repasses", body = [Payout])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_payouts(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    Query(filter): Query<PayoutFilter>,
) -> Result<Json<Vec<Payout>>, AppError> {
    let payouts = app_state.payroll_repo.list_payouts(filter.teacher_id).await?;
    Ok(Json(payouts))
}

#[utoipa::path(
    get,
    path = "/api/payroll/payouts/mine",
    tag = "Payroll",
    responses(
        (status = 200, description = "Repasses do professor logado", body = [Payout])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_my_payouts(
    State(app_state): State<AppState>,
    _guard: RequireRole<TeacherOnly>,
    AuthenticatedUser(teacher): AuthenticatedUser,
) -> Result<Json<Vec<Payout>>, AppError> {
    let payouts = app_state.payroll_repo.list_payouts(Some(teacher.id)).await?;
    Ok(Json(payouts))
}

#[utoipa::path(
    post,
    path = "/api/payroll/payouts/{payout_id}/mark-paid",
    tag = "Payroll",
    responses(
        (status = 200, description = "Repasse quitado", body = Payout)
    ),
    params(
        ("payout_id" = Uuid, Path, description = "ID do repasse")
    ),
    security(("api_jwt" = []))
)]
pub async fn mark_payout_paid(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    Path(payout_id): Path<Uuid>,
) -> Result<Json<Payout>, AppError> {
    let payout = app_state.payroll_repo.mark_payout_paid(payout_id).await?;
    Ok(Json(payout))
}
