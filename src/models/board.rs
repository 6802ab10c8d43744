// src/models/board.rs
// Mural de avisos e páginas da biblioteca (wiki em markdown).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "notice_audience", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NoticeAudience {
    All,
    Students,
    Teachers,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub id: Uuid,
    pub title: String,
    pub audience: NoticeAudience,
    pub body: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LibraryPage {
    pub id: Uuid,
    pub title: String,

    #[schema(example = "escala-pentatonica")]
    pub slug: String,

    // Corpo em markdown, renderizado no cliente.
    pub body: String,
    pub active: bool,
    pub updated_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateNoticePayload {
    #[validate(length(min = 1, message = "Informe o título."))]
    pub title: String,
    #[serde(default = "default_audience")]
    pub audience: NoticeAudience,
    #[validate(length(min = 1, message = "Informe a mensagem."))]
    pub body: String,
}

fn default_audience() -> NoticeAudience {
    NoticeAudience::All
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpsertLibraryPagePayload {
    #[validate(length(min = 1, message = "Informe o título."))]
    pub title: String,
    #[validate(length(min = 1, message = "Informe o slug."))]
    pub slug: String,
    #[serde(default)]
    pub body: String,
}
