// src/handlers/billing.rs
// Planos, geração de cobranças do mês e o ciclo de vida de cada cobrança.

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
    middleware::auth::{AdminOnly, AuthenticatedUser, RequireRole, StudentOnly},
    models::billing::{
        AttachProofPayload, BillingPlan, Charge, ChargeStatus, CreatePlanPayload,
        GenerateChargesPayload, GenerateChargesReport,
    },
};

// =========================================================================
//  PLANOS
// =========================================================================

#[utoipa::path(
    post,
    path = "/api/billing/plans",
    tag = "Billing",
    request_body = CreatePlanPayload,
    responses(
        (status = 200, description = "Plano criado", body = BillingPlan)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_plan(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    Json(payload): Json<CreatePlanPayload>,
) -> Result<Json<BillingPlan>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let plan = app_state
        .billing_repo
        .create_plan(&payload.name, payload.amount, payload.due_day, &payload.pix_key)
        .await?;

    Ok(Json(plan))
}

#[utoipa::path(
    get,
    path = "/api/billing/plans",
    tag = "Billing",
    responses(
        (status = 200, description = "Todos os planos", body = [BillingPlan])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_plans(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
) -> Result<Json<Vec<BillingPlan>>, AppError> {
    let plans = app_state.billing_repo.list_plans().await?;
    Ok(Json(plans))
}

#[utoipa::path(
    post,
    path = "/api/billing/plans/{plan_id}/toggle",
    tag = "Billing",
    responses(
        (status = 200, description = "Flag active alternado", body = BillingPlan)
    ),
    params(
        ("plan_id" = Uuid, Path, description = "ID do plano")
    ),
    security(("api_jwt" = []))
)]
pub async fn toggle_plan(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    Path(plan_id): Path<Uuid>,
) -> Result<Json<BillingPlan>, AppError> {
    let plan = app_state.billing_repo.toggle_plan(plan_id).await?;
    Ok(Json(plan))
}

// =========================================================================
//  GERADOR DO MÊS
// =========================================================================

#[utoipa::path(
    post,
    path = "/api/billing/generate",
    tag = "Billing",
    request_body = GenerateChargesPayload,
    responses(
        (status = 200, description = "Rodada concluída; re-rodar o mesmo mês é seguro", body = GenerateChargesReport),
        (status = 400, description = "Mês fora do formato YYYY-MM")
    ),
    security(("api_jwt" = []))
)]
pub async fn generate_charges(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    AuthenticatedUser(admin): AuthenticatedUser,
    Json(payload): Json<GenerateChargesPayload>,
) -> Result<Json<GenerateChargesReport>, AppError> {
    let initial_status = payload.initial_status.unwrap_or(ChargeStatus::Pending);

    let report = app_state
        .billing_service
        .generate_monthly_charges(&payload.month, initial_status, admin.id)
        .await?;

    Ok(Json(report))
}

// =========================================================================
//  COBRANÇAS
// =========================================================================

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ChargeFilter {
    /// Mês de competência ("YYYY-MM")
    pub month: Option<String>,
    pub student_id: Option<Uuid>,
}

#[utoipa::path(
    get,
    path = "/api/billing/charges",
    tag = "Billing",
    params(ChargeFilter),
    responses(
        (status = 200, description = "Cobranças filtradas", body = [Charge])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_charges(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    Query(filter): Query<ChargeFilter>,
) -> Result<Json<Vec<Charge>>, AppError> {
    let charges = app_state
        .billing_repo
        .list_charges(filter.month.as_deref(), filter.student_id)
        .await?;

    Ok(Json(charges))
}

#[utoipa::path(
    get,
    path = "/api/billing/charges/mine",
    tag = "Billing",
    responses(
        (status = 200, description = "Cobranças do aluno logado", body = [Charge])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_my_charges(
    State(app_state): State<AppState>,
    _guard: RequireRole<StudentOnly>,
    AuthenticatedUser(student): AuthenticatedUser,
) -> Result<Json<Vec<Charge>>, AppError> {
    let charges = app_state
        .billing_repo
        .list_charges(None, Some(student.id))
        .await?;

    Ok(Json(charges))
}

#[utoipa::path(
    post,
    path = "/api/billing/charges/{charge_id}/proof",
    tag = "Billing",
    request_body = AttachProofPayload,
    responses(
        (status = 200, description = "Comprovante anexado", body = Charge),
        (status = 404, description = "Cobrança não encontrada (ou de outro aluno)")
    ),
    params(
        ("charge_id" = Uuid, Path, description = "ID da cobrança")
    ),
    security(("api_jwt" = []))
)]
pub async fn attach_proof(
    State(app_state): State<AppState>,
    _guard: RequireRole<StudentOnly>,
    AuthenticatedUser(student): AuthenticatedUser,
    Path(charge_id): Path<Uuid>,
    Json(payload): Json<AttachProofPayload>,
) -> Result<Json<Charge>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    // O aluno só mexe na própria cobrança: o repo filtra por student_id.
    let charge = app_state
        .billing_repo
        .attach_proof(charge_id, student.id, &payload.method, &payload.proof_link)
        .await?;

    Ok(Json(charge))
}

#[utoipa::path(
    post,
    path = "/api/billing/charges/{charge_id}/mark-paid",
    tag = "Billing",
    responses(
        (status = 200, description = "Cobrança marcada como paga", body = Charge)
    ),
    params(
        ("charge_id" = Uuid, Path, description = "ID da cobrança")
    ),
    security(("api_jwt" = []))
)]
pub async fn mark_charge_paid(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    Path(charge_id): Path<Uuid>,
) -> Result<Json<Charge>, AppError> {
    let charge = app_state.billing_repo.mark_paid(charge_id).await?;
    Ok(Json(charge))
}
