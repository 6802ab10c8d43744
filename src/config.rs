// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    db::{
        BillingRepository, BoardRepository, CatalogRepository, ClassroomRepository,
        EnrollmentRepository, PayrollRepository, ReportsRepository, UserRepository,
    },
    services::{
        auth::AuthService, billing_service::BillingService, payroll_service::PayrollService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,

    pub user_repo: UserRepository,
    pub catalog_repo: CatalogRepository,
    pub enrollment_repo: EnrollmentRepository,
    pub billing_repo: BillingRepository,
    pub payroll_repo: PayrollRepository,
    pub board_repo: BoardRepository,
    pub classroom_repo: ClassroomRepository,
    pub reports_repo: ReportsRepository,

    pub auth_service: AuthService,
    pub billing_service: BillingService,
    pub payroll_service: PayrollService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let catalog_repo = CatalogRepository::new(db_pool.clone());
        let enrollment_repo = EnrollmentRepository::new(db_pool.clone());
        let billing_repo = BillingRepository::new(db_pool.clone());
        let payroll_repo = PayrollRepository::new(db_pool.clone());
        let board_repo = BoardRepository::new(db_pool.clone());
        let classroom_repo = ClassroomRepository::new(db_pool.clone());
        let reports_repo = ReportsRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo.clone(), jwt_secret.clone());
        let billing_service = BillingService::new(
            billing_repo.clone(),
            enrollment_repo.clone(),
            db_pool.clone(),
        );
        let payroll_service = PayrollService::new(
            payroll_repo.clone(),
            user_repo.clone(),
            db_pool.clone(),
        );

        Ok(Self {
            db_pool,
            jwt_secret,
            user_repo,
            catalog_repo,
            enrollment_repo,
            billing_repo,
            payroll_repo,
            board_repo,
            classroom_repo,
            reports_repo,
            auth_service,
            billing_service,
            payroll_service,
        })
    }
}
