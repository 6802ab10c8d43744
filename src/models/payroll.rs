// src/models/payroll.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "session_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Pending,  // lançada pelo professor, aguardando o admin
    Approved, // liberada para entrar em repasse
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payout_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PayoutStatus {
    Open,
    Paid,
}

// --- Structs ---

/// Aula lançada por um professor. Só entra em repasse depois de aprovada,
/// e é consumida por no máximo um repasse.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeacherSession {
    pub id: Uuid,
    pub teacher_id: Uuid,
    pub class_group_id: Uuid,
    pub date: NaiveDate,

    #[schema(example = 90)]
    pub minutes: i32,
    pub note: String,

    pub status: SessionStatus,
    pub paid: bool,
    // Carimbado quando a aula é consumida por um repasse.
    pub payout_id: Option<Uuid>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Valor-hora vigente do professor. Não é versionado historicamente:
/// o repasse congela o valor usado no próprio registro.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeacherRate {
    pub teacher_id: Uuid,

    #[schema(example = "60.00")]
    pub rate_per_hour: Decimal,
    pub updated_at: DateTime<Utc>,
}

/// Repasse: agregado de aulas aprovadas de um professor num período,
/// com o valor-hora congelado no momento da geração.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payout {
    pub id: Uuid,
    pub teacher_id: Uuid,
    pub period_from: NaiveDate,
    pub period_to: NaiveDate,

    #[schema(example = "60.00")]
    pub rate_per_hour: Decimal,
    pub total_minutes: i32,

    #[schema(example = "120.00")]
    pub total: Decimal,

    pub note: String,
    pub status: PayoutStatus,
    pub session_ids: Vec<Uuid>,
    pub generated_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LogSessionPayload {
    pub class_group_id: Uuid,
    pub date: NaiveDate,
    #[validate(range(min = 1, max = 600, message = "Minutos devem estar entre 1 e 600."))]
    pub minutes: i32,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReviewSessionPayload {
    pub status: SessionStatus,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetRatePayload {
    #[schema(example = "60.00")]
    pub rate_per_hour: Decimal,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePayoutPayload {
    pub teacher_id: Uuid,
    pub period_from: NaiveDate,
    pub period_to: NaiveDate,
    #[serde(default)]
    pub note: String,
}
