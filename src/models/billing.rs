// src/models/billing.rs

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::error::AppError;

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "charge_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ChargeStatus {
    Pending,
    Paid,
}

// --- Mês de competência ---

/// Mês de competência de uma cobrança ("YYYY-MM"). Validado na entrada:
/// o gerador nunca roda com um mês malformado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BillingMonth {
    year: i32,
    month: u32,
}

impl BillingMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if !(1..=12).contains(&month) || !(1900..=9999).contains(&year) {
            return None;
        }
        Some(Self { year, month })
    }

    /// Monta a data de vencimento combinando o mês com o dia do plano.
    /// O dia é travado em [1, 28] para nunca cair em data inexistente
    /// (dia 30 de fevereiro, por exemplo).
    pub fn due_date(&self, due_day: i32) -> NaiveDate {
        let day = due_day.clamp(1, 28) as u32;
        // Dia em [1, 28] existe em qualquer mês do calendário.
        NaiveDate::from_ymd_opt(self.year, self.month, day)
            .expect("dia travado em [1, 28] sempre existe")
    }
}

impl FromStr for BillingMonth {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::InvalidMonth(raw.to_string());

        let (y, m) = raw.split_once('-').ok_or_else(invalid)?;
        if y.len() != 4 || m.len() != 2 {
            return Err(invalid());
        }
        if !y.chars().all(|c| c.is_ascii_digit()) || !m.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let year: i32 = y.parse().map_err(|_| invalid())?;
        let month: u32 = m.parse().map_err(|_| invalid())?;

        BillingMonth::new(year, month).ok_or_else(invalid)
    }
}

impl fmt::Display for BillingMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Chave de deduplicação de cobrança: única fonte de verdade, usada
/// tanto na checagem de existência quanto na geração. O separador "__"
/// não ocorre em UUIDs.
pub fn charge_key(student_id: Uuid, enrollment_id: Uuid, month: BillingMonth) -> String {
    format!("{}__{}__{}", student_id, enrollment_id, month)
}

// --- Structs ---

/// Plano de cobrança recorrente (valor, dia de vencimento, chave Pix).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BillingPlan {
    pub id: Uuid,

    #[schema(example = "Mensalidade Violão")]
    pub name: String,

    #[schema(example = "200.00")]
    pub amount: Decimal,

    #[schema(example = 10)]
    pub due_day: i32,

    #[schema(example = "financeiro@escola.com.br")]
    pub pix_key: String,

    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Uma cobrança mensal derivada de matrícula + plano. O valor é um
/// snapshot do momento da geração, não uma referência viva ao plano.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Charge {
    pub id: Uuid,
    pub student_id: Uuid,
    pub enrollment_id: Uuid,
    pub class_group_id: Uuid,
    pub plan_id: Uuid,

    #[schema(example = "2026-02")]
    pub month: String,
    pub due_date: NaiveDate,

    #[schema(example = "200.00")]
    pub amount: Decimal,
    pub status: ChargeStatus,

    #[schema(example = "pix")]
    pub method: String,
    pub proof_link: String,

    pub generated_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Cobrança planejada por uma rodada do gerador, ainda não gravada.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedCharge {
    pub student_id: Uuid,
    pub enrollment_id: Uuid,
    pub class_group_id: Uuid,
    pub plan_id: Uuid,
    pub month: BillingMonth,
    pub due_date: NaiveDate,
    pub amount: Decimal,
    pub status: ChargeStatus,
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlanPayload {
    #[validate(length(min = 1, message = "Informe o nome do plano."))]
    pub name: String,
    pub amount: Decimal,
    #[validate(range(min = 1, max = 28, message = "O dia de vencimento deve estar entre 1 e 28."))]
    pub due_day: i32,
    #[serde(default)]
    pub pix_key: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateChargesPayload {
    #[schema(example = "2026-02")]
    pub month: String,
    // Status inicial escolhido pelo admin; o padrão é "pending".
    #[serde(default)]
    pub initial_status: Option<ChargeStatus>,
}

/// Resultado de uma rodada do gerador.
#[derive(Debug, Serialize, ToSchema)]
pub struct GenerateChargesReport {
    pub created: u32,
    pub skipped: u32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttachProofPayload {
    #[validate(length(min = 1, message = "Informe a forma de pagamento."))]
    pub method: String,
    #[serde(default)]
    pub proof_link: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_month() {
        let m: BillingMonth = "2026-02".parse().unwrap();
        assert_eq!(m.to_string(), "2026-02");
    }

    #[test]
    fn rejects_malformed_months() {
        for raw in ["2026-13", "2026-00", "2026-1", "202-01", "abc", "2026/01", "2026-01-05", ""] {
            let parsed = raw.parse::<BillingMonth>();
            assert!(parsed.is_err(), "deveria rejeitar {:?}", raw);
            assert!(matches!(parsed.unwrap_err(), AppError::InvalidMonth(_)));
        }
    }

    #[test]
    fn due_day_is_clamped_into_valid_calendar_range() {
        let feb: BillingMonth = "2026-02".parse().unwrap();
        // Dia 31 nunca existe em fevereiro: trava em 28.
        assert_eq!(feb.due_date(31), NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
        assert_eq!(feb.due_date(0), NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
        assert_eq!(feb.due_date(10), NaiveDate::from_ymd_opt(2026, 2, 10).unwrap());
    }

    #[test]
    fn charge_key_is_stable_and_separator_is_fixed() {
        let s = Uuid::new_v4();
        let e = Uuid::new_v4();
        let m: BillingMonth = "2026-02".parse().unwrap();
        let key = charge_key(s, e, m);
        assert_eq!(key, format!("{}__{}__2026-02", s, e));
        assert_eq!(key, charge_key(s, e, m));
    }
}
