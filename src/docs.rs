// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Users ---
        handlers::users::create_user,
        handlers::users::list_users,
        handlers::users::toggle_user,

        // --- Catalog ---
        handlers::catalog::create_course,
        handlers::catalog::list_courses,
        handlers::catalog::toggle_course,
        handlers::catalog::create_class_group,
        handlers::catalog::list_class_groups,
        handlers::catalog::list_my_class_groups,
        handlers::catalog::toggle_class_group,

        // --- Enrollments ---
        handlers::enrollments::create_enrollment,
        handlers::enrollments::list_enrollments,
        handlers::enrollments::update_enrollment_status,

        // --- Billing ---
        handlers::billing::create_plan,
        handlers::billing::list_plans,
        handlers::billing::toggle_plan,
        handlers::billing::generate_charges,
        handlers::billing::list_charges,
        handlers::billing::list_my_charges,
        handlers::billing::attach_proof,
        handlers::billing::mark_charge_paid,

        // --- Payroll ---
        handlers::payroll::log_session,
        handlers::payroll::list_sessions,
        handlers::payroll::list_my_sessions,
        handlers::payroll::review_session,
        handlers::payroll::set_rate,
        handlers::payroll::generate_payout,
        handlers::payroll::list_payouts,
        handlers::payroll::list_my_payouts,
        handlers::payroll::mark_payout_paid,

        // --- Board ---
        handlers::board::create_notice,
        handlers::board::list_notices,
        handlers::board::toggle_notice,
        handlers::board::upsert_library_page,
        handlers::board::list_library_pages,
        handlers::board::get_library_page,

        // --- Classroom ---
        handlers::classroom::save_attendance,
        handlers::classroom::class_history,
        handlers::classroom::lesson_records,

        // --- Reports ---
        handlers::reports::system_summary,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Role,
            models::auth::User,
            models::auth::RegisterAdminPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,
            models::auth::CreateUserPayload,
            models::auth::CreatedUserResponse,

            // --- Catalog ---
            models::catalog::Course,
            models::catalog::ClassGroup,
            models::catalog::ClassGroupDetail,
            models::catalog::CreateCoursePayload,
            models::catalog::CreateClassGroupPayload,

            // --- Enrollments ---
            models::enrollment::EnrollmentStatus,
            models::enrollment::Enrollment,
            models::enrollment::EnrollmentDetail,
            models::enrollment::CreateEnrollmentPayload,
            models::enrollment::UpdateEnrollmentStatusPayload,

            // --- Billing ---
            models::billing::ChargeStatus,
            models::billing::BillingPlan,
            models::billing::Charge,
            models::billing::CreatePlanPayload,
            models::billing::GenerateChargesPayload,
            models::billing::GenerateChargesReport,
            models::billing::AttachProofPayload,

            // --- Payroll ---
            models::payroll::SessionStatus,
            models::payroll::PayoutStatus,
            models::payroll::TeacherSession,
            models::payroll::TeacherRate,
            models::payroll::Payout,
            models::payroll::LogSessionPayload,
            models::payroll::ReviewSessionPayload,
            models::payroll::SetRatePayload,
            models::payroll::GeneratePayoutPayload,

            // --- Board ---
            models::board::NoticeAudience,
            models::board::Notice,
            models::board::LibraryPage,
            models::board::CreateNoticePayload,
            models::board::UpsertLibraryPagePayload,

            // --- Classroom ---
            models::classroom::PresenceKind,
            models::classroom::AttendanceRecord,
            models::classroom::AttendanceHistoryRow,
            models::classroom::AttendanceEntry,
            models::classroom::SaveAttendancePayload,

            // --- Reports ---
            models::reports::SystemSummary,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e bootstrap do primeiro admin"),
        (name = "Users", description = "Cadastro de alunos, professores e admins"),
        (name = "Catalog", description = "Cursos e turmas"),
        (name = "Enrollments", description = "Matrículas"),
        (name = "Billing", description = "Planos, mensalidades e o gerador do mês"),
        (name = "Payroll", description = "Aulas dos professores, valor-hora e repasses"),
        (name = "Board", description = "Mural de avisos e biblioteca"),
        (name = "Classroom", description = "Diário de classe (presença e notas)"),
        (name = "Reports", description = "Resumo gerencial da escola")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
