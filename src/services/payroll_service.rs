// src/services/payroll_service.rs
//
// Gerador de repasses. Mesmo desenho do gerador de cobranças: a
// elegibilidade e a soma são funções puras sobre as aulas carregadas;
// a transação cria o repasse e carimba as aulas consumidas numa tacada.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{PayrollRepository, UserRepository},
    models::auth::Role,
    models::payroll::{Payout, SessionStatus, TeacherSession},
};

/// `period_from <= period_to`, senão nada é lido nem escrito.
pub fn validate_period(period_from: NaiveDate, period_to: NaiveDate) -> Result<(), AppError> {
    if period_from > period_to {
        return Err(AppError::InvalidPeriod);
    }
    Ok(())
}

/// Uma aula só entra no repasse se foi aprovada, ainda não foi paga e
/// não pertence a nenhum repasse anterior. O `payout_id` é o sinal
/// definitivo de exclusão: carimbado junto com `paid` na geração.
pub fn eligible_sessions(
    sessions: &[TeacherSession],
    period_from: NaiveDate,
    period_to: NaiveDate,
) -> Vec<&TeacherSession> {
    sessions
        .iter()
        .filter(|s| {
            s.status == SessionStatus::Approved
                && !s.paid
                && s.payout_id.is_none()
                && s.date >= period_from
                && s.date <= period_to
        })
        .collect()
}

#[derive(Debug, PartialEq)]
pub struct PayoutTotals {
    pub total_minutes: i32,
    pub total: Decimal,
}

/// total = minutos / 60 * valor-hora, arredondado para 2 casas com
/// meio-para-cima (arredondamento padrão de dinheiro).
pub fn summarize_sessions(sessions: &[&TeacherSession], rate_per_hour: Decimal) -> PayoutTotals {
    let total_minutes: i32 = sessions.iter().map(|s| s.minutes).sum();

    // Multiplica antes de dividir para não perder precisão.
    let total = (Decimal::from(total_minutes) * rate_per_hour / Decimal::from(60))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    PayoutTotals { total_minutes, total }
}

#[derive(Clone)]
pub struct PayrollService {
    repo: PayrollRepository,
    user_repo: UserRepository,
    pool: PgPool,
}

impl PayrollService {
    pub fn new(repo: PayrollRepository, user_repo: UserRepository, pool: PgPool) -> Self {
        Self { repo, user_repo, pool }
    }

    /// Gera um repasse para o professor no período. Validações em ordem
    /// de barateza, todas antes de qualquer escrita; a criação do repasse
    /// e o carimbo das aulas acontecem na mesma transação.
    pub async fn generate_payout(
        &self,
        teacher_id: Uuid,
        period_from: NaiveDate,
        period_to: NaiveDate,
        note: &str,
        generated_by: Uuid,
    ) -> Result<Payout, AppError> {
        validate_period(period_from, period_to)?;

        let teacher = self
            .user_repo
            .find_by_id(teacher_id)
            .await?
            .ok_or(AppError::NotFound("Professor"))?;
        if teacher.role != Role::Teacher {
            return Err(AppError::NotFound("Professor"));
        }

        // --- INÍCIO DA TRANSAÇÃO ---
        let mut tx = self.pool.begin().await?;

        let rate = self
            .repo
            .find_rate(&mut *tx, teacher_id)
            .await?
            .ok_or(AppError::RateNotConfigured)?;
        if rate.rate_per_hour <= Decimal::ZERO {
            return Err(AppError::RateNotConfigured);
        }

        let sessions = self
            .repo
            .sessions_in_period_for_update(&mut *tx, teacher_id, period_from, period_to)
            .await?;
        let eligible = eligible_sessions(&sessions, period_from, period_to);

        if eligible.is_empty() {
            // Nada elegível: não cria repasse vazio. O drop do tx faz rollback.
            return Err(AppError::NothingToPay);
        }

        let totals = summarize_sessions(&eligible, rate.rate_per_hour);
        let session_ids: Vec<Uuid> = eligible.iter().map(|s| s.id).collect();

        let payout = self
            .repo
            .insert_payout(
                &mut *tx,
                teacher_id,
                period_from,
                period_to,
                rate.rate_per_hour,
                totals.total_minutes,
                totals.total,
                note,
                &session_ids,
                generated_by,
            )
            .await?;

        // "Entrou em repasse" implica "fora de agregações futuras":
        // payout_id e paid são gravados juntos, na mesma transação.
        let stamped = self
            .repo
            .stamp_sessions(&mut *tx, payout.id, &session_ids)
            .await?;
        if stamped != session_ids.len() as u64 {
            return Err(anyhow::anyhow!(
                "Esperava carimbar {} aulas, carimbou {}.",
                session_ids.len(),
                stamped
            )
            .into());
        }

        tx.commit().await?;
        // --- FIM DA TRANSAÇÃO ---

        tracing::info!(
            "Repasse {} gerado para o professor {}: {} min, total {}.",
            payout.id,
            teacher_id,
            totals.total_minutes,
            totals.total
        );

        Ok(payout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn session(d: &str, minutes: i32) -> TeacherSession {
        TeacherSession {
            id: Uuid::new_v4(),
            teacher_id: Uuid::new_v4(),
            class_group_id: Uuid::new_v4(),
            date: date(d),
            minutes,
            note: String::new(),
            status: SessionStatus::Approved,
            paid: false,
            payout_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn totals_for_two_sessions_at_rate_60() {
        let sessions = vec![session("2026-02-03", 90), session("2026-02-10", 30)];
        let eligible = eligible_sessions(&sessions, date("2026-02-01"), date("2026-02-28"));

        let totals = summarize_sessions(&eligible, Decimal::new(60, 0));

        assert_eq!(totals.total_minutes, 120);
        // 2 horas x 60 = 120.00
        assert_eq!(totals.total, Decimal::new(12000, 2));
    }

    #[test]
    fn rounds_half_up_to_two_decimal_places() {
        // 1 minuto a 0,90/h = 0,015 -> 0,02
        let sessions = vec![session("2026-02-03", 1)];
        let eligible = eligible_sessions(&sessions, date("2026-02-01"), date("2026-02-28"));

        let totals = summarize_sessions(&eligible, Decimal::new(90, 2));

        assert_eq!(totals.total, Decimal::new(2, 2));
    }

    #[test]
    fn pending_sessions_never_enter_a_payout() {
        let mut pending = session("2026-02-03", 60);
        pending.status = SessionStatus::Pending;
        let approved = session("2026-02-05", 45);

        let sessions = [pending, approved];
        let eligible = eligible_sessions(&sessions, date("2026-02-01"), date("2026-02-28"));

        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].minutes, 45);
    }

    #[test]
    fn sessions_from_a_previous_payout_are_excluded() {
        let mut consumed = session("2026-02-03", 60);
        consumed.payout_id = Some(Uuid::new_v4());
        consumed.paid = true;

        // Mesmo só o carimbo, sem paid, já exclui.
        let mut stamped_only = session("2026-02-04", 60);
        stamped_only.payout_id = Some(Uuid::new_v4());

        let fresh = session("2026-02-05", 30);

        let sessions = [consumed, stamped_only, fresh];
        let eligible = eligible_sessions(
            &sessions,
            date("2026-02-01"),
            date("2026-02-28"),
        );

        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].minutes, 30);
    }

    #[test]
    fn period_bounds_are_inclusive() {
        let sessions = vec![
            session("2026-02-01", 10),
            session("2026-02-28", 20),
            session("2026-03-01", 40),
        ];

        let eligible = eligible_sessions(&sessions, date("2026-02-01"), date("2026-02-28"));

        let minutes: Vec<i32> = eligible.iter().map(|s| s.minutes).collect();
        assert_eq!(minutes, vec![10, 20]);
    }

    #[test]
    fn inverted_period_is_rejected() {
        let err = validate_period(date("2026-03-01"), date("2026-02-01")).unwrap_err();
        assert!(matches!(err, AppError::InvalidPeriod));

        assert!(validate_period(date("2026-02-01"), date("2026-02-01")).is_ok());
    }
}
