// src/models/enrollment.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "enrollment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    Active,
    Suspended,
    Cancelled,
}

// Matrícula: liga aluno a turma e, opcionalmente, a um plano de cobrança.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: Uuid,
    pub student_id: Uuid,
    pub class_group_id: Uuid,

    // Vínculo de cobrança (opcional)
    pub plan_id: Option<Uuid>,
    // Valor negociado que, se presente, vence o valor do plano.
    #[schema(example = "150.00")]
    pub custom_amount: Option<Decimal>,

    pub status: EnrollmentStatus,
    pub start_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Linha de listagem, com nomes resolvidos via JOIN.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentDetail {
    pub id: Uuid,
    pub student_id: Uuid,
    pub student_name: String,
    pub student_email: String,
    pub class_group_id: Uuid,
    pub class_title: String,
    pub course_name: String,
    pub plan_id: Option<Uuid>,
    pub custom_amount: Option<Decimal>,
    pub status: EnrollmentStatus,
    pub start_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEnrollmentPayload {
    pub student_id: Uuid,
    pub class_group_id: Uuid,
    #[serde(default)]
    pub plan_id: Option<Uuid>,
    #[serde(default)]
    pub custom_amount: Option<Decimal>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateEnrollmentStatusPayload {
    pub status: EnrollmentStatus,
}
