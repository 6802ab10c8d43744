// src/handlers/reports.rs

use axum::{Json, extract::State};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::{AdminOnly, RequireRole},
    models::reports::SystemSummary,
};

#[utoipa::path(
    get,
    path = "/api/reports/summary",
    tag = "Reports",
    responses(
        (status = 200, description = "Contadores gerais da escola", body = SystemSummary)
    ),
    security(("api_jwt" = []))
)]
pub async fn system_summary(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
) -> Result<Json<SystemSummary>, AppError> {
    let summary = app_state.reports_repo.summary().await?;
    Ok(Json(summary))
}
