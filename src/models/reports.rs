// src/models/reports.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

/// Resumo do sistema para o painel do admin.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SystemSummary {
    pub users: i64,
    pub courses: i64,
    pub class_groups: i64,
    pub enrollments: i64,
    pub attendance_records: i64,
    pub notices: i64,
    pub library_pages: i64,
    pub pending_charges: i64,
    pub pending_charges_total: Decimal,
    pub open_payouts: i64,
    pub open_payouts_total: Decimal,
}
