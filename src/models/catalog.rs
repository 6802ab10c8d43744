// src/models/catalog.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Uuid,

    #[schema(example = "Violão Popular")]
    pub name: String,
    pub category: String,

    #[schema(example = "presencial")]
    pub modality: String,

    #[schema(example = "250.00")]
    pub price: Decimal,

    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Turma: curso + professor + horário
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassGroup {
    pub id: Uuid,
    pub title: String,
    pub course_id: Uuid,
    pub teacher_id: Uuid,
    pub modality: String,
    pub schedule: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Linha de listagem, já com os nomes resolvidos via JOIN.
// (O app antigo denormalizava courseName/teacherName dentro do documento.)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassGroupDetail {
    pub id: Uuid,
    pub title: String,
    pub course_id: Uuid,
    pub course_name: String,
    pub teacher_id: Uuid,
    pub teacher_name: String,
    pub modality: String,
    pub schedule: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCoursePayload {
    #[validate(length(min = 1, message = "Informe o nome do curso."))]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub modality: String,
    #[serde(default)]
    pub price: Option<Decimal>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClassGroupPayload {
    #[validate(length(min = 1, message = "Informe o nome da turma."))]
    pub title: String,
    pub course_id: Uuid,
    pub teacher_id: Uuid,
    #[serde(default)]
    pub modality: String,
    #[serde(default)]
    pub schedule: String,
}
