// src/services/billing_service.rs
//
// Gerador de cobranças mensais. O planejamento é uma função pura sobre
// os registros já carregados; a parte async só carrega, grava e commita.
// Re-rodar o gerador para o mesmo mês é seguro: só adiciona o que falta.

use std::collections::{HashMap, HashSet};

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{BillingRepository, EnrollmentRepository},
    models::billing::{
        BillingMonth, BillingPlan, ChargeStatus, GenerateChargesReport, PlannedCharge, charge_key,
    },
    models::enrollment::{Enrollment, EnrollmentStatus},
};

/// Resultado do planejamento puro, antes de qualquer escrita.
#[derive(Debug)]
pub struct ChargePlan {
    pub to_create: Vec<PlannedCharge>,
    pub skipped: u32,
}

/// Decide, matrícula a matrícula, o que gerar para o mês alvo.
///
/// Regras:
/// - só matrícula ativa e com plano entra;
/// - plano inexistente não derruba a rodada: conta como "skipped";
/// - valor = `custom_amount` se presente, senão o valor do plano
///   (snapshot do momento da geração);
/// - vencimento = mês alvo + dia do plano travado em [1, 28];
/// - a chave (aluno, matrícula, mês) já vista, seja no banco ou na
///   própria rodada, conta como "skipped".
pub fn plan_monthly_charges(
    enrollments: &[Enrollment],
    plans: &HashMap<Uuid, BillingPlan>,
    existing_keys: &HashSet<String>,
    month: BillingMonth,
    initial_status: ChargeStatus,
) -> ChargePlan {
    let mut seen = existing_keys.clone();
    let mut to_create = Vec::new();
    let mut skipped = 0u32;

    for enrollment in enrollments {
        if enrollment.status != EnrollmentStatus::Active {
            continue;
        }
        let Some(plan_id) = enrollment.plan_id else {
            continue;
        };

        let Some(plan) = plans.get(&plan_id) else {
            tracing::warn!(
                "Matrícula {} aponta para plano {} inexistente; pulando.",
                enrollment.id,
                plan_id
            );
            skipped += 1;
            continue;
        };

        let amount = enrollment.custom_amount.unwrap_or(plan.amount);
        let key = charge_key(enrollment.student_id, enrollment.id, month);

        if !seen.insert(key) {
            skipped += 1;
            continue;
        }

        to_create.push(PlannedCharge {
            student_id: enrollment.student_id,
            enrollment_id: enrollment.id,
            class_group_id: enrollment.class_group_id,
            plan_id,
            month,
            due_date: month.due_date(plan.due_day),
            amount,
            status: initial_status,
        });
    }

    ChargePlan { to_create, skipped }
}

#[derive(Clone)]
pub struct BillingService {
    repo: BillingRepository,
    enrollment_repo: EnrollmentRepository,
    pool: PgPool,
}

impl BillingService {
    pub fn new(repo: BillingRepository, enrollment_repo: EnrollmentRepository, pool: PgPool) -> Self {
        Self { repo, enrollment_repo, pool }
    }

    /// Roda o gerador para um mês. Tudo dentro de uma transação: ou a
    /// rodada inteira entra, ou nada entra. O mês é validado antes de
    /// qualquer leitura ou escrita.
    pub async fn generate_monthly_charges(
        &self,
        month_raw: &str,
        initial_status: ChargeStatus,
        generated_by: Uuid,
    ) -> Result<GenerateChargesReport, AppError> {
        let month: BillingMonth = month_raw.parse()?;

        // --- INÍCIO DA TRANSAÇÃO ---
        let mut tx = self.pool.begin().await?;

        let plans = self.repo.list_plans_tx(&mut *tx).await?;
        let plan_index: HashMap<Uuid, BillingPlan> =
            plans.into_iter().map(|p| (p.id, p)).collect();

        let enrollments = self.enrollment_repo.list_active_with_plan(&mut *tx).await?;

        let existing = self
            .repo
            .existing_charges_for_month(&mut *tx, &month.to_string())
            .await?;
        let existing_keys: HashSet<String> = existing
            .iter()
            .map(|row| charge_key(row.student_id, row.enrollment_id, month))
            .collect();

        let plan = plan_monthly_charges(
            &enrollments,
            &plan_index,
            &existing_keys,
            month,
            initial_status,
        );

        let mut created = 0u32;
        let mut skipped = plan.skipped;
        for charge in &plan.to_create {
            // O ON CONFLICT é a rede de segurança contra outro admin
            // gerando o mesmo mês em paralelo.
            if self.repo.insert_planned_charge(&mut *tx, charge, generated_by).await? {
                created += 1;
            } else {
                skipped += 1;
            }
        }

        tx.commit().await?;
        // --- FIM DA TRANSAÇÃO ---

        tracing::info!(
            "Cobranças de {} geradas: {} criadas, {} puladas.",
            month,
            created,
            skipped
        );

        Ok(GenerateChargesReport { created, skipped })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn month() -> BillingMonth {
        "2026-02".parse().unwrap()
    }

    fn plan(amount: i64, due_day: i32) -> BillingPlan {
        BillingPlan {
            id: Uuid::new_v4(),
            name: "Mensalidade".into(),
            amount: Decimal::new(amount, 0),
            due_day,
            pix_key: "financeiro@escola.com.br".into(),
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn enrollment(plan_id: Option<Uuid>, custom_amount: Option<Decimal>) -> Enrollment {
        Enrollment {
            id: Uuid::new_v4(),
            student_id: Uuid::new_v4(),
            class_group_id: Uuid::new_v4(),
            plan_id,
            custom_amount,
            status: EnrollmentStatus::Active,
            start_date: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn index(plans: &[BillingPlan]) -> HashMap<Uuid, BillingPlan> {
        plans.iter().cloned().map(|p| (p.id, p)).collect()
    }

    #[test]
    fn creates_one_charge_per_eligible_enrollment() {
        let p = plan(200, 10);
        let enrollments = vec![
            enrollment(Some(p.id), None),
            enrollment(Some(p.id), None),
        ];

        let out = plan_monthly_charges(
            &enrollments,
            &index(&[p]),
            &HashSet::new(),
            month(),
            ChargeStatus::Pending,
        );

        assert_eq!(out.to_create.len(), 2);
        assert_eq!(out.skipped, 0);
    }

    #[test]
    fn custom_amount_wins_over_plan_amount() {
        let p = plan(200, 10);
        let with_override = enrollment(Some(p.id), Some(Decimal::new(150, 0)));
        let without = enrollment(Some(p.id), None);

        let out = plan_monthly_charges(
            &[with_override, without],
            &index(&[p]),
            &HashSet::new(),
            month(),
            ChargeStatus::Pending,
        );

        assert_eq!(out.to_create[0].amount, Decimal::new(150, 0));
        assert_eq!(out.to_create[1].amount, Decimal::new(200, 0));
    }

    #[test]
    fn due_day_31_lands_on_feb_28() {
        let p = plan(200, 31);
        let e = enrollment(Some(p.id), None);

        let out = plan_monthly_charges(
            &[e],
            &index(&[p]),
            &HashSet::new(),
            month(),
            ChargeStatus::Pending,
        );

        let due = out.to_create[0].due_date;
        assert_eq!(due, chrono::NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
    }

    #[test]
    fn second_run_creates_nothing() {
        let p = plan(200, 10);
        let enrollments = vec![
            enrollment(Some(p.id), None),
            enrollment(Some(p.id), None),
        ];
        let plans = index(&[p]);

        let first = plan_monthly_charges(
            &enrollments,
            &plans,
            &HashSet::new(),
            month(),
            ChargeStatus::Pending,
        );
        assert_eq!(first.to_create.len(), 2);

        // Simula a segunda rodada: as chaves da primeira já existem.
        let existing: HashSet<String> = first
            .to_create
            .iter()
            .map(|c| charge_key(c.student_id, c.enrollment_id, c.month))
            .collect();

        let second = plan_monthly_charges(
            &enrollments,
            &plans,
            &existing,
            month(),
            ChargeStatus::Pending,
        );
        assert!(second.to_create.is_empty());
        assert_eq!(second.skipped, 2);
    }

    #[test]
    fn no_two_planned_charges_share_the_same_key() {
        let p = plan(200, 10);
        let e = enrollment(Some(p.id), None);
        // A mesma matrícula aparecendo duas vezes na entrada não pode
        // virar duas cobranças.
        let enrollments = vec![e.clone(), e];

        let out = plan_monthly_charges(
            &enrollments,
            &index(&[p]),
            &HashSet::new(),
            month(),
            ChargeStatus::Pending,
        );

        assert_eq!(out.to_create.len(), 1);
        assert_eq!(out.skipped, 1);

        let keys: HashSet<String> = out
            .to_create
            .iter()
            .map(|c| charge_key(c.student_id, c.enrollment_id, c.month))
            .collect();
        assert_eq!(keys.len(), out.to_create.len());
    }

    #[test]
    fn missing_plan_is_skipped_without_aborting_the_batch() {
        let p = plan(200, 10);
        let orphan = enrollment(Some(Uuid::new_v4()), None); // plano não existe
        let ok = enrollment(Some(p.id), None);

        let out = plan_monthly_charges(
            &[orphan, ok],
            &index(&[p]),
            &HashSet::new(),
            month(),
            ChargeStatus::Pending,
        );

        assert_eq!(out.to_create.len(), 1);
        assert_eq!(out.skipped, 1);
    }

    #[test]
    fn inactive_or_planless_enrollments_are_ignored() {
        let p = plan(200, 10);
        let mut suspended = enrollment(Some(p.id), None);
        suspended.status = EnrollmentStatus::Suspended;
        let planless = enrollment(None, None);

        let out = plan_monthly_charges(
            &[suspended, planless],
            &index(&[p]),
            &HashSet::new(),
            month(),
            ChargeStatus::Pending,
        );

        assert!(out.to_create.is_empty());
        assert_eq!(out.skipped, 0);
    }

    #[test]
    fn initial_status_is_honored() {
        let p = plan(200, 10);
        let e = enrollment(Some(p.id), None);

        let out = plan_monthly_charges(
            &[e],
            &index(&[p]),
            &HashSet::new(),
            month(),
            ChargeStatus::Paid,
        );

        assert_eq!(out.to_create[0].status, ChargeStatus::Paid);
    }
}
