// src/db/billing_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::billing::{BillingPlan, Charge, ChargeStatus, PlannedCharge},
};

#[derive(Clone)]
pub struct BillingRepository {
    pool: PgPool,
}

/// Linha mínima para montar o conjunto de chaves já existentes no mês.
#[derive(Debug, sqlx::FromRow)]
pub struct ExistingChargeRow {
    pub student_id: Uuid,
    pub enrollment_id: Uuid,
}

impl BillingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  PLANOS
    // =========================================================================

    pub async fn create_plan(
        &self,
        name: &str,
        amount: Decimal,
        due_day: i32,
        pix_key: &str,
    ) -> Result<BillingPlan, AppError> {
        let plan = sqlx::query_as::<_, BillingPlan>(
            r#"
            INSERT INTO billing_plans (name, amount, due_day, pix_key)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(amount)
        .bind(due_day)
        .bind(pix_key)
        .fetch_one(&self.pool)
        .await?;

        Ok(plan)
    }

    pub async fn list_plans(&self) -> Result<Vec<BillingPlan>, AppError> {
        let plans =
            sqlx::query_as::<_, BillingPlan>("SELECT * FROM billing_plans ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(plans)
    }

    pub async fn list_plans_tx<'e, E>(&self, executor: E) -> Result<Vec<BillingPlan>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let plans = sqlx::query_as::<_, BillingPlan>("SELECT * FROM billing_plans")
            .fetch_all(executor)
            .await?;

        Ok(plans)
    }

    pub async fn toggle_plan(&self, id: Uuid) -> Result<BillingPlan, AppError> {
        let plan = sqlx::query_as::<_, BillingPlan>(
            "UPDATE billing_plans SET active = NOT active, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound("Plano"))?;

        Ok(plan)
    }

    // =========================================================================
    //  COBRANÇAS
    // =========================================================================

    /// Pares (aluno, matrícula) que já têm cobrança no mês alvo.
    pub async fn existing_charges_for_month<'e, E>(
        &self,
        executor: E,
        month: &str,
    ) -> Result<Vec<ExistingChargeRow>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, ExistingChargeRow>(
            "SELECT student_id, enrollment_id FROM charges WHERE month = $1",
        )
        .bind(month)
        .fetch_all(executor)
        .await?;

        Ok(rows)
    }

    /// Grava uma cobrança planejada. `ON CONFLICT DO NOTHING` é a segunda
    /// linha de defesa da unicidade: se outro admin gerou o mesmo mês em
    /// paralelo, a linha perdedora vira "skipped" em vez de duplicata.
    pub async fn insert_planned_charge<'e, E>(
        &self,
        executor: E,
        charge: &PlannedCharge,
        generated_by: Uuid,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            INSERT INTO charges
                (student_id, enrollment_id, class_group_id, plan_id,
                 month, due_date, amount, status, generated_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT ON CONSTRAINT charges_unique_per_month DO NOTHING
            "#,
        )
        .bind(charge.student_id)
        .bind(charge.enrollment_id)
        .bind(charge.class_group_id)
        .bind(charge.plan_id)
        .bind(charge.month.to_string())
        .bind(charge.due_date)
        .bind(charge.amount)
        .bind(charge.status)
        .bind(generated_by)
        .execute(executor)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn list_charges(
        &self,
        month: Option<&str>,
        student_id: Option<Uuid>,
    ) -> Result<Vec<Charge>, AppError> {
        let charges = sqlx::query_as::<_, Charge>(
            r#"
            SELECT * FROM charges
            WHERE ($1::TEXT IS NULL OR month = $1)
              AND ($2::UUID IS NULL OR student_id = $2)
            ORDER BY month DESC, due_date ASC
            "#,
        )
        .bind(month)
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(charges)
    }

    /// Aluno anexa forma de pagamento e comprovante à própria cobrança.
    pub async fn attach_proof(
        &self,
        id: Uuid,
        student_id: Uuid,
        method: &str,
        proof_link: &str,
    ) -> Result<Charge, AppError> {
        let charge = sqlx::query_as::<_, Charge>(
            r#"
            UPDATE charges
            SET method = $3, proof_link = $4, updated_at = NOW()
            WHERE id = $1 AND student_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(student_id)
        .bind(method)
        .bind(proof_link)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound("Cobrança"))?;

        Ok(charge)
    }

    pub async fn mark_paid(&self, id: Uuid) -> Result<Charge, AppError> {
        let charge = sqlx::query_as::<_, Charge>(
            "UPDATE charges SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(ChargeStatus::Paid)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound("Cobrança"))?;

        Ok(charge)
    }
}
