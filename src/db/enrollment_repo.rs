// src/db/enrollment_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::enrollment::{Enrollment, EnrollmentDetail, EnrollmentStatus},
};

#[derive(Clone)]
pub struct EnrollmentRepository {
    pool: PgPool,
}

impl EnrollmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        student_id: Uuid,
        class_group_id: Uuid,
        plan_id: Option<Uuid>,
        custom_amount: Option<Decimal>,
        start_date: Option<NaiveDate>,
    ) -> Result<Enrollment, AppError> {
        let enrollment = sqlx::query_as::<_, Enrollment>(
            r#"
            INSERT INTO enrollments (student_id, class_group_id, plan_id, custom_amount, start_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(student_id)
        .bind(class_group_id)
        .bind(plan_id)
        .bind(custom_amount)
        .bind(start_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            // A checagem de duplicidade do app antigo agora é o UNIQUE do banco.
            sqlx::Error::Database(db)
                if db.constraint() == Some("enrollments_student_class_unique") =>
            {
                AppError::DuplicateEnrollment
            }
            _ => AppError::DatabaseError(e),
        })?;

        Ok(enrollment)
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<Enrollment>, AppError> {
        let enrollment = sqlx::query_as::<_, Enrollment>("SELECT * FROM enrollments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(enrollment)
    }

    pub async fn list_detailed(&self) -> Result<Vec<EnrollmentDetail>, AppError> {
        let rows = sqlx::query_as::<_, EnrollmentDetail>(
            r#"
            SELECT e.id, e.student_id, s.name AS student_name, s.email AS student_email,
                   e.class_group_id, cg.title AS class_title, c.name AS course_name,
                   e.plan_id, e.custom_amount, e.status, e.start_date, e.created_at
            FROM enrollments e
            JOIN users s ON s.id = e.student_id
            JOIN class_groups cg ON cg.id = e.class_group_id
            JOIN courses c ON c.id = cg.course_id
            ORDER BY e.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Matrículas elegíveis para cobrança: ativas e com plano vinculado.
    pub async fn list_active_with_plan<'e, E>(
        &self,
        executor: E,
    ) -> Result<Vec<Enrollment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, Enrollment>(
            r#"
            SELECT * FROM enrollments
            WHERE status = $1 AND plan_id IS NOT NULL
            ORDER BY created_at ASC
            "#,
        )
        .bind(EnrollmentStatus::Active)
        .fetch_all(executor)
        .await?;

        Ok(rows)
    }

    /// Matrículas ativas de uma turma (diário de classe).
    pub async fn list_active_by_class(
        &self,
        class_group_id: Uuid,
    ) -> Result<Vec<EnrollmentDetail>, AppError> {
        let rows = sqlx::query_as::<_, EnrollmentDetail>(
            r#"
            SELECT e.id, e.student_id, s.name AS student_name, s.email AS student_email,
                   e.class_group_id, cg.title AS class_title, c.name AS course_name,
                   e.plan_id, e.custom_amount, e.status, e.start_date, e.created_at
            FROM enrollments e
            JOIN users s ON s.id = e.student_id
            JOIN class_groups cg ON cg.id = e.class_group_id
            JOIN courses c ON c.id = cg.course_id
            WHERE e.class_group_id = $1 AND e.status = $2
            ORDER BY s.name ASC
            "#,
        )
        .bind(class_group_id)
        .bind(EnrollmentStatus::Active)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: EnrollmentStatus,
    ) -> Result<Enrollment, AppError> {
        let enrollment = sqlx::query_as::<_, Enrollment>(
            "UPDATE enrollments SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound("Matrícula"))?;

        Ok(enrollment)
    }
}
