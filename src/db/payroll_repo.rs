// src/db/payroll_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::payroll::{Payout, PayoutStatus, SessionStatus, TeacherRate, TeacherSession},
};

#[derive(Clone)]
pub struct PayrollRepository {
    pool: PgPool,
}

impl PayrollRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  AULAS LANÇADAS
    // =========================================================================

    pub async fn insert_session(
        &self,
        teacher_id: Uuid,
        class_group_id: Uuid,
        date: NaiveDate,
        minutes: i32,
        note: &str,
    ) -> Result<TeacherSession, AppError> {
        let session = sqlx::query_as::<_, TeacherSession>(
            r#"
            INSERT INTO teacher_sessions (teacher_id, class_group_id, date, minutes, note)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(teacher_id)
        .bind(class_group_id)
        .bind(date)
        .bind(minutes)
        .bind(note)
        .fetch_one(&self.pool)
        .await?;

        Ok(session)
    }

    pub async fn list_sessions(
        &self,
        teacher_id: Option<Uuid>,
        status: Option<SessionStatus>,
    ) -> Result<Vec<TeacherSession>, AppError> {
        let sessions = sqlx::query_as::<_, TeacherSession>(
            r#"
            SELECT * FROM teacher_sessions
            WHERE ($1::UUID IS NULL OR teacher_id = $1)
              AND ($2::session_status IS NULL OR status = $2)
            ORDER BY date DESC, created_at DESC
            "#,
        )
        .bind(teacher_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(sessions)
    }

    /// Admin aprova ou rejeita uma aula pendente.
    pub async fn review_session(
        &self,
        id: Uuid,
        status: SessionStatus,
    ) -> Result<TeacherSession, AppError> {
        let session = sqlx::query_as::<_, TeacherSession>(
            r#"
            UPDATE teacher_sessions
            SET status = $2, updated_at = NOW()
            WHERE id = $1 AND payout_id IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound("Aula"))?;

        Ok(session)
    }

    /// Aulas do professor dentro do período, travadas até o fim da
    /// transação para que duas gerações simultâneas não contem a mesma
    /// aula duas vezes. A elegibilidade (aprovada, não paga) é decidida
    /// pelo serviço, em cima das linhas carregadas.
    pub async fn sessions_in_period_for_update<'e, E>(
        &self,
        executor: E,
        teacher_id: Uuid,
        period_from: NaiveDate,
        period_to: NaiveDate,
    ) -> Result<Vec<TeacherSession>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sessions = sqlx::query_as::<_, TeacherSession>(
            r#"
            SELECT * FROM teacher_sessions
            WHERE teacher_id = $1
              AND date BETWEEN $2 AND $3
            ORDER BY date ASC
            FOR UPDATE
            "#,
        )
        .bind(teacher_id)
        .bind(period_from)
        .bind(period_to)
        .fetch_all(executor)
        .await?;

        Ok(sessions)
    }

    /// Carimba as aulas consumidas: payout_id + paid numa tacada só.
    pub async fn stamp_sessions<'e, E>(
        &self,
        executor: E,
        payout_id: Uuid,
        session_ids: &[Uuid],
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE teacher_sessions
            SET payout_id = $1, paid = TRUE, updated_at = NOW()
            WHERE id = ANY($2)
            "#,
        )
        .bind(payout_id)
        .bind(session_ids)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    // =========================================================================
    //  VALOR-HORA
    // =========================================================================

    pub async fn set_rate(
        &self,
        teacher_id: Uuid,
        rate_per_hour: Decimal,
    ) -> Result<TeacherRate, AppError> {
        let rate = sqlx::query_as::<_, TeacherRate>(
            r#"
            INSERT INTO teacher_rates (teacher_id, rate_per_hour)
            VALUES ($1, $2)
            ON CONFLICT (teacher_id)
            DO UPDATE SET rate_per_hour = EXCLUDED.rate_per_hour, updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(teacher_id)
        .bind(rate_per_hour)
        .fetch_one(&self.pool)
        .await?;

        Ok(rate)
    }

    pub async fn find_rate<'e, E>(
        &self,
        executor: E,
        teacher_id: Uuid,
    ) -> Result<Option<TeacherRate>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rate =
            sqlx::query_as::<_, TeacherRate>("SELECT * FROM teacher_rates WHERE teacher_id = $1")
                .bind(teacher_id)
                .fetch_optional(executor)
                .await?;

        Ok(rate)
    }

    // =========================================================================
    //  REPASSES
    // =========================================================================

    #[allow(clippy::too_many_arguments)]
    pub async fn insert_payout<'e, E>(
        &self,
        executor: E,
        teacher_id: Uuid,
        period_from: NaiveDate,
        period_to: NaiveDate,
        rate_per_hour: Decimal,
        total_minutes: i32,
        total: Decimal,
        note: &str,
        session_ids: &[Uuid],
        generated_by: Uuid,
    ) -> Result<Payout, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let payout = sqlx::query_as::<_, Payout>(
            r#"
            INSERT INTO payouts
                (teacher_id, period_from, period_to, rate_per_hour,
                 total_minutes, total, note, session_ids, generated_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(teacher_id)
        .bind(period_from)
        .bind(period_to)
        .bind(rate_per_hour)
        .bind(total_minutes)
        .bind(total)
        .bind(note)
        .bind(session_ids)
        .bind(generated_by)
        .fetch_one(executor)
        .await?;

        Ok(payout)
    }

    pub async fn list_payouts(&self, teacher_id: Option<Uuid>) -> Result<Vec<Payout>, AppError> {
        let payouts = sqlx::query_as::<_, Payout>(
            r#"
            SELECT * FROM payouts
            WHERE ($1::UUID IS NULL OR teacher_id = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(teacher_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(payouts)
    }

    pub async fn mark_payout_paid(&self, id: Uuid) -> Result<Payout, AppError> {
        let payout = sqlx::query_as::<_, Payout>(
            "UPDATE payouts SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(PayoutStatus::Paid)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound("Repasse"))?;

        Ok(payout)
    }
}
