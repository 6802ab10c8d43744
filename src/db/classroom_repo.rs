// src/db/classroom_repo.rs

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::classroom::{AttendanceHistoryRow, AttendanceRecord, PresenceKind},
};

#[derive(Clone)]
pub struct ClassroomRepository {
    pool: PgPool,
}

impl ClassroomRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Upsert de presença/nota. O UNIQUE (turma, data, aluno) cumpre o
    /// papel do doc id determinístico do app antigo: salvar de novo a
    /// mesma aula sobrescreve em vez de duplicar.
    #[allow(clippy::too_many_arguments)]
    pub async fn upsert_record(
        &self,
        class_group_id: Uuid,
        student_id: Uuid,
        enrollment_id: Uuid,
        teacher_id: Uuid,
        date: NaiveDate,
        presence: PresenceKind,
        grade: &str,
        note: &str,
    ) -> Result<AttendanceRecord, AppError> {
        let record = sqlx::query_as::<_, AttendanceRecord>(
            r#"
            INSERT INTO attendance
                (class_group_id, student_id, enrollment_id, teacher_id,
                 date, presence, grade, note)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT ON CONSTRAINT attendance_unique_per_lesson
            DO UPDATE SET presence = EXCLUDED.presence, grade = EXCLUDED.grade,
                          note = EXCLUDED.note, updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(class_group_id)
        .bind(student_id)
        .bind(enrollment_id)
        .bind(teacher_id)
        .bind(date)
        .bind(presence)
        .bind(grade)
        .bind(note)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    /// Histórico recente da turma, mais novo primeiro (mesmo recorte de 30
    /// registros do painel antigo).
    pub async fn history_for_class(
        &self,
        class_group_id: Uuid,
    ) -> Result<Vec<AttendanceHistoryRow>, AppError> {
        let rows = sqlx::query_as::<_, AttendanceHistoryRow>(
            r#"
            SELECT a.date, s.name AS student_name, a.presence, a.grade
            FROM attendance a
            JOIN users s ON s.id = a.student_id
            WHERE a.class_group_id = $1
            ORDER BY a.date DESC, s.name ASC
            LIMIT 30
            "#,
        )
        .bind(class_group_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Registros de uma turma numa data (pré-carregar o formulário do dia).
    pub async fn records_for_lesson(
        &self,
        class_group_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, AppError> {
        let rows = sqlx::query_as::<_, AttendanceRecord>(
            "SELECT * FROM attendance WHERE class_group_id = $1 AND date = $2",
        )
        .bind(class_group_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
