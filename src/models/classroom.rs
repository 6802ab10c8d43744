// src/models/classroom.rs
// Diário de classe: presença, nota e comentário por aluno/aula.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "presence_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PresenceKind {
    Present,
    Absent,
    Excused,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub class_group_id: Uuid,
    pub student_id: Uuid,
    pub enrollment_id: Uuid,
    pub teacher_id: Uuid,
    pub date: NaiveDate,
    pub presence: PresenceKind,

    // Nota livre: "0-10" ou texto, como no app antigo.
    pub grade: String,
    pub note: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Linha do histórico da turma, com o nome do aluno resolvido.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceHistoryRow {
    pub date: NaiveDate,
    pub student_name: String,
    pub presence: PresenceKind,
    pub grade: String,
}

// Um item por aluno; o handler salva a aula inteira de uma vez.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEntry {
    pub enrollment_id: Uuid,
    pub presence: PresenceKind,
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveAttendancePayload {
    pub date: NaiveDate,
    #[validate(length(min = 1, message = "Não há alunos para salvar."))]
    pub entries: Vec<AttendanceEntry>,
}
