// src/db/reports_repo.rs

use sqlx::PgPool;

use crate::{common::error::AppError, models::reports::SystemSummary};

#[derive(Clone)]
pub struct ReportsRepository {
    pool: PgPool,
}

impl ReportsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Contagens do "Resumo do sistema", numa única ida ao banco.
    pub async fn summary(&self) -> Result<SystemSummary, AppError> {
        let summary = sqlx::query_as::<_, SystemSummary>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM users)         AS users,
                (SELECT COUNT(*) FROM courses)       AS courses,
                (SELECT COUNT(*) FROM class_groups)  AS class_groups,
                (SELECT COUNT(*) FROM enrollments)   AS enrollments,
                (SELECT COUNT(*) FROM attendance)    AS attendance_records,
                (SELECT COUNT(*) FROM notices)       AS notices,
                (SELECT COUNT(*) FROM library_pages) AS library_pages,
                (SELECT COUNT(*) FROM charges WHERE status = 'pending') AS pending_charges,
                (SELECT COALESCE(SUM(amount), 0) FROM charges WHERE status = 'pending')
                    AS pending_charges_total,
                (SELECT COUNT(*) FROM payouts WHERE status = 'open') AS open_payouts,
                (SELECT COALESCE(SUM(total), 0) FROM payouts WHERE status = 'open')
                    AS open_payouts_total
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(summary)
    }
}
