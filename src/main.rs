//src/main.rs

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post, put},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização.
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas públicas: bootstrap do primeiro admin e login.
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .route("/", post(handlers::users::create_user).get(handlers::users::list_users))
        .route("/{user_id}/toggle", post(handlers::users::toggle_user));

    let catalog_routes = Router::new()
        .route("/courses"
               ,post(handlers::catalog::create_course)
               .get(handlers::catalog::list_courses)
        )
        .route("/courses/{course_id}/toggle", post(handlers::catalog::toggle_course))
        .route("/classes"
               ,post(handlers::catalog::create_class_group)
               .get(handlers::catalog::list_class_groups)
        )
        .route("/classes/mine", get(handlers::catalog::list_my_class_groups))
        .route("/classes/{class_id}/toggle", post(handlers::catalog::toggle_class_group));

    let enrollment_routes = Router::new()
        .route("/"
               ,post(handlers::enrollments::create_enrollment)
               .get(handlers::enrollments::list_enrollments)
        )
        .route("/{enrollment_id}/status", post(handlers::enrollments::update_enrollment_status));

    let billing_routes = Router::new()
        .route("/plans"
               ,post(handlers::billing::create_plan)
               .get(handlers::billing::list_plans)
        )
        .route("/plans/{plan_id}/toggle", post(handlers::billing::toggle_plan))
        .route("/generate", post(handlers::billing::generate_charges))
        .route("/charges", get(handlers::billing::list_charges))
        .route("/charges/mine", get(handlers::billing::list_my_charges))
        .route("/charges/{charge_id}/proof", post(handlers::billing::attach_proof))
        .route("/charges/{charge_id}/mark-paid", post(handlers::billing::mark_charge_paid));

    let payroll_routes = Router::new()
        .route("/sessions"
               ,post(handlers::payroll::log_session)
               .get(handlers::payroll::list_sessions)
        )
        .route("/sessions/mine", get(handlers::payroll::list_my_sessions))
        .route("/sessions/{session_id}/review", post(handlers::payroll::review_session))
        .route("/rates/{teacher_id}", put(handlers::payroll::set_rate))
        .route("/generate", post(handlers::payroll::generate_payout))
        .route("/payouts", get(handlers::payroll::list_payouts))
        .route("/payouts/mine", get(handlers::payroll::list_my_payouts))
        .route("/payouts/{payout_id}/mark-paid", post(handlers::payroll::mark_payout_paid));

    let board_routes = Router::new()
        .route("/notices"
               ,post(handlers::board::create_notice)
               .get(handlers::board::list_notices)
        )
        .route("/notices/{notice_id}/toggle", post(handlers::board::toggle_notice))
        .route("/library"
               ,put(handlers::board::upsert_library_page)
               .get(handlers::board::list_library_pages)
        )
        .route("/library/{slug}", get(handlers::board::get_library_page));

    let classroom_routes = Router::new()
        .route("/{class_id}/attendance", post(handlers::classroom::save_attendance))
        .route("/{class_id}/history", get(handlers::classroom::class_history))
        .route("/{class_id}/lesson", get(handlers::classroom::lesson_records));

    let report_routes = Router::new()
        .route("/summary", get(handlers::reports::system_summary));

    // Tudo abaixo do guard exige Bearer token válido de usuário ativo.
    let protected = Router::new()
        .nest("/api/users", user_routes)
        .nest("/api/catalog", catalog_routes)
        .nest("/api/enrollments", enrollment_routes)
        .nest("/api/billing", billing_routes)
        .nest("/api/payroll", payroll_routes)
        .nest("/api/board", board_routes)
        .nest("/api/classroom", classroom_routes)
        .nest("/api/reports", report_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .merge(protected)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
